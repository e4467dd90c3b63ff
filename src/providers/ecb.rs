use crate::core::{DateRange, FetchFailure, MaturityKey, SeriesProvider, SeriesResult};
use crate::providers::sdmx_csv;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, warn};

/// Euribor series from the ECB statistical data warehouse.
pub struct EcbProvider {
    base_url: String,
    client: reqwest::Client,
}

impl EcbProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("euribor/1.0")
            .build()
            .context("Failed to build HTTP client")?;
        Ok(EcbProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn series_url(&self, maturity: MaturityKey, range: &DateRange) -> String {
        format!(
            "{}/FM/M.U2.EUR.RT.MM.EURIBOR{}.R?startPeriod={}&endPeriod={}&format=csv",
            self.base_url,
            maturity.label(),
            range.start_param(),
            range.end_param()
        )
    }
}

#[async_trait]
impl SeriesProvider for EcbProvider {
    async fn fetch_series(&self, maturity: MaturityKey, range: &DateRange) -> SeriesResult {
        let url = self.series_url(maturity, range);
        debug!("Requesting {} series from {}", maturity, url);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Request for {} series failed", maturity);
                return SeriesResult::Failure(FetchFailure::Transport(e.to_string()));
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            return SeriesResult::Failure(FetchFailure::Status(status.as_u16()));
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return SeriesResult::Failure(FetchFailure::Transport(e.to_string())),
        };

        match sdmx_csv::decode(&body) {
            Ok(series) => SeriesResult::Success(series),
            Err(e) => {
                debug!(response = %body, "Failed to decode {} series", maturity);
                SeriesResult::Failure(FetchFailure::Malformed(format!("{e:#}")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PREAMBLE: &str = "DATASET,FM\nSERIES,M.U2.EUR.RT.MM.EURIBOR1M.R\nTITLE,Euribor\nUNIT,PCPA\nSOURCE,ECB\n";

    // Helper function to create a mock server for one maturity
    async fn create_ecb_mock_server(
        maturity: &str,
        mock_response: &str,
        status_code: u16,
    ) -> MockServer {
        let mock_server = MockServer::start().await;
        let expected_path = format!("/FM/M.U2.EUR.RT.MM.EURIBOR{maturity}.R");

        Mock::given(method("GET"))
            .and(path(&expected_path))
            .and(query_param("startPeriod", "2024-01-01"))
            .and(query_param("endPeriod", "2024-01-03"))
            .and(query_param("format", "csv"))
            .respond_with(ResponseTemplate::new(status_code).set_body_string(mock_response))
            .mount(&mock_server)
            .await;
        mock_server
    }

    fn range() -> DateRange {
        DateRange::parse("2024-01-01", "2024-01-03").unwrap()
    }

    #[test]
    fn test_series_url_template() {
        let provider = EcbProvider::new("https://example.com/service/data/").unwrap();
        assert_eq!(
            provider.series_url(MaturityKey::TwelveMonths, &range()),
            "https://example.com/service/data/FM/M.U2.EUR.RT.MM.EURIBOR12M.R?startPeriod=2024-01-01&endPeriod=2024-01-03&format=csv"
        );
    }

    #[tokio::test]
    async fn test_successful_series_fetch() {
        let body = format!("{PREAMBLE}TIME_PERIOD,OBS_VALUE\n2024-01-01,3.90\n2024-01-02,3.91\n");
        let mock_server = create_ecb_mock_server("1M", &body, 200).await;

        let provider = EcbProvider::new(&mock_server.uri()).unwrap();
        let result = provider.fetch_series(MaturityKey::OneMonth, &range()).await;

        let series = match result {
            SeriesResult::Success(series) => series,
            other => panic!("Expected a successful fetch, got {other:?}"),
        };
        assert_eq!(series.len(), 2);
        assert_eq!(
            series.value_at(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()),
            Some(3.91)
        );
    }

    #[tokio::test]
    async fn test_non_ok_status_is_recorded() {
        let mock_server = create_ecb_mock_server("3M", "No results found", 404).await;

        let provider = EcbProvider::new(&mock_server.uri()).unwrap();
        let result = provider.fetch_series(MaturityKey::ThreeMonths, &range()).await;

        assert_eq!(result, SeriesResult::Failure(FetchFailure::Status(404)));
    }

    #[tokio::test]
    async fn test_malformed_payload_is_a_failure() {
        let body = format!("{PREAMBLE}DATE,VALUE\n2024-01-01,3.90\n");
        let mock_server = create_ecb_mock_server("6M", &body, 200).await;

        let provider = EcbProvider::new(&mock_server.uri()).unwrap();
        let result = provider.fetch_series(MaturityKey::SixMonths, &range()).await;

        assert_eq!(
            result,
            SeriesResult::Failure(FetchFailure::Malformed(
                "missing TIME_PERIOD column".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_unreachable_service_is_a_transport_failure() {
        let provider = EcbProvider::new("http://127.0.0.1:1").unwrap();
        let result = provider.fetch_series(MaturityKey::OneMonth, &range()).await;

        assert!(
            matches!(result, SeriesResult::Failure(FetchFailure::Transport(_))),
            "{result:?}"
        );
    }
}
