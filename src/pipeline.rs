// src/pipeline.rs

use chrono::NaiveDate;
use reqwest::Client;
use tracing::{error, info, instrument, warn};

use crate::config::PortfolioConfig;
use crate::error::FetchError;
use crate::fetch::{fetch_constituents, PortfolioRequest};
use crate::persist::{persist_table, PersistOutcome};
use crate::table::ConstituentTable;

/// Rows shown in the debug preview after the table is built.
const PREVIEW_ROWS: usize = 5;

/// How a run ended. Neither arm is a crash: fetch failures stop the run
/// before anything touches the disk.
#[derive(Debug)]
pub enum RunOutcome {
    NoData(FetchError),
    Persisted(PersistOutcome),
}

/// Build the request, fetch, tabulate and persist, once.
#[instrument(level = "info", skip_all, fields(index = %cfg.index, date = %trade_date))]
pub async fn run_once(client: &Client, cfg: &PortfolioConfig, trade_date: NaiveDate) -> RunOutcome {
    info!("fetching {} portfolio", cfg.index);

    let request = PortfolioRequest::from_config(cfg);
    info!(url = %request.url, "request URL built");

    let results = match fetch_constituents(client, &request).await {
        Ok(results) => results,
        Err(e) if e.is_empty_result() => {
            warn!("{}; nothing to save", e);
            return RunOutcome::NoData(e);
        }
        Err(e) => {
            error!("{}", e);
            return RunOutcome::NoData(e);
        }
    };

    let table = ConstituentTable::from_results(results, trade_date);
    table.log_preview(PREVIEW_ROWS);

    let base_name = cfg.base_file_name(trade_date);
    RunOutcome::Persisted(persist_table(Some(&table), &cfg.output_dir, &base_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::ArtifactPaths;
    use crate::test_support::{
        closed_port_url, init_test_logging, serve_once, test_client, CannedResponse,
    };
    use std::fs;
    use tempfile::tempdir;
    use url::Url;

    fn config_for(base_url: &str, out: &std::path::Path) -> PortfolioConfig {
        PortfolioConfig {
            base_url: Url::parse(base_url).unwrap(),
            output_dir: out.to_path_buf(),
            ..PortfolioConfig::default()
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn files_in(dir: &std::path::Path) -> usize {
        fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test]
    async fn successful_run_writes_both_dated_files() {
        init_test_logging();
        let out = tempdir().unwrap();
        let body = r#"{
            "page": {"pageNumber": 1, "pageSize": 20, "totalRecords": 2},
            "header": {"date": "15/03/24", "text": "Quantidade Teórica Total"},
            "results": [
                {"segment": null, "cod": "PETR4", "asset": "PETROBRAS", "type": "PN N2", "part": "7,551", "theoricalQty": "4.566.445.852"},
                {"segment": null, "cod": "SBSP3", "asset": "SABESP", "type": "ON NM", "part": "1,372", "theoricalQty": "340.001.934"}
            ]
        }"#;
        let server = serve_once(CannedResponse::json(200, body)).await;
        let cfg = config_for(&server.base_url, out.path());

        let outcome = run_once(&test_client(), &cfg, date()).await;
        let persisted = match outcome {
            RunOutcome::Persisted(p) => p,
            other => panic!("expected files to be written, got {other:?}"),
        };
        assert!(persisted.errors().is_empty());

        let paths = ArtifactPaths::new(out.path(), "composicao_ibov_2024-03-15");
        assert!(paths.csv.is_file());
        assert!(paths.parquet.is_file());

        let text = fs::read_to_string(&paths.csv).unwrap();
        let mut lines = text.trim_start_matches('\u{feff}').lines();
        assert_eq!(
            lines.next().unwrap(),
            "segment,cod,asset,type,part,theoricalQty,trade_date"
        );
        assert_eq!(lines.count(), 2);
        assert!(text.contains("2024-03-15"));
    }

    #[tokio::test]
    async fn http_error_writes_nothing() {
        let out = tempdir().unwrap();
        let server = serve_once(CannedResponse::json(404, r#"{"message":"not found"}"#)).await;
        let cfg = config_for(&server.base_url, out.path());

        match run_once(&test_client(), &cfg, date()).await {
            RunOutcome::NoData(FetchError::HttpStatus { status, .. }) => {
                assert_eq!(status.as_u16(), 404)
            }
            other => panic!("expected an HTTP failure, got {other:?}"),
        }
        assert_eq!(files_in(out.path()), 0);
    }

    #[tokio::test]
    async fn unreachable_server_writes_nothing() {
        let out = tempdir().unwrap();
        let base = closed_port_url().await;
        let cfg = config_for(&base, out.path());

        match run_once(&test_client(), &cfg, date()).await {
            RunOutcome::NoData(FetchError::Network { .. }) => {}
            other => panic!("expected a network failure, got {other:?}"),
        }
        assert_eq!(files_in(out.path()), 0);
    }

    #[tokio::test]
    async fn invalid_json_writes_nothing() {
        let out = tempdir().unwrap();
        let server = serve_once(CannedResponse::json(200, "{\"results\": [")).await;
        let cfg = config_for(&server.base_url, out.path());

        match run_once(&test_client(), &cfg, date()).await {
            RunOutcome::NoData(FetchError::Parse(_)) => {}
            other => panic!("expected a parse failure, got {other:?}"),
        }
        assert_eq!(files_in(out.path()), 0);
    }

    #[tokio::test]
    async fn empty_results_take_their_own_path() {
        for body in [r#"{"results":[]}"#, r#"{"page":{"totalRecords":0}}"#] {
            let out = tempdir().unwrap();
            let server = serve_once(CannedResponse::json(200, body)).await;
            let cfg = config_for(&server.base_url, out.path());

            match run_once(&test_client(), &cfg, date()).await {
                RunOutcome::NoData(e) => assert!(e.is_empty_result(), "got {e:?}"),
                other => panic!("expected the empty condition, got {other:?}"),
            }
            assert_eq!(files_in(out.path()), 0);
        }
    }
}
