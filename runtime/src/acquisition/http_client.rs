//! HTTP client for charts whose data is served by an endpoint instead of
//! being embedded in the page.
//!
//! The query string of the page URL is forwarded verbatim, so filters the
//! user picked on the page (time frame, agent) reach the endpoint. There is
//! no timeout and no retry: a failed request only suppresses its chart.

use crate::error::{ChartError, ChartResult};
use tracing::{debug, warn};
use url::Url;

/// Fetches chart datasets from the dashboard server.
#[derive(Debug, Clone)]
pub struct SalesDataClient {
    client: reqwest::Client,
    base_url: Url,
}

impl SalesDataClient {
    /// Create a client for a server base URL such as `https://crm.example.com`.
    pub fn new(base_url: &str) -> ChartResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ChartError::fetch(base_url, e))?;
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    /// Resolve `path` against the base URL and attach the page's query.
    pub fn endpoint_url(&self, path: &str, page_url: Option<&Url>) -> ChartResult<Url> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| ChartError::fetch(path, e))?;
        if let Some(query) = page_url.and_then(Url::query) {
            url.set_query(Some(query));
        }
        Ok(url)
    }

    /// GET the endpoint and decode its JSON body.
    pub async fn fetch(
        &self,
        path: &str,
        page_url: Option<&Url>,
    ) -> ChartResult<serde_json::Value> {
        let url = self.endpoint_url(path, page_url)?;
        debug!("fetching chart data from {url}");

        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ChartError::fetch(url.as_str(), e))?;

        let status = resp.status();
        if !status.is_success() {
            warn!("chart endpoint {url} returned {status}");
            return Err(ChartError::fetch(url.as_str(), format!("HTTP {status}")));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| ChartError::fetch(url.as_str(), e))?;
        serde_json::from_str(&body).map_err(|e| ChartError::decode(url.as_str(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_endpoint_url_forwards_query() {
        let client = SalesDataClient::new("https://crm.example.com").unwrap();
        let page =
            Url::parse("https://crm.example.com/products/sales-chart/?time_frame=2024-05&x=1")
                .unwrap();
        let url = client
            .endpoint_url("/products/sales-data/", Some(&page))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://crm.example.com/products/sales-data/?time_frame=2024-05&x=1"
        );

        let bare = client.endpoint_url("/products/sales-data/", None).unwrap();
        assert!(bare.query().is_none());
    }

    #[test]
    fn test_bad_base_url() {
        let err = SalesDataClient::new("not a url").unwrap_err();
        assert!(matches!(err, ChartError::Fetch { .. }));
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/sales-data/"))
            .and(query_param("time_frame", "last_30_days"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "labels": ["Widget"],
                "total_sold": [12],
                "unique_customers": [5]
            })))
            .mount(&server)
            .await;

        let client = SalesDataClient::new(&server.uri()).unwrap();
        let page = Url::parse("https://crm.example.com/products/chart/?time_frame=last_30_days")
            .unwrap();
        let value = client
            .fetch("/products/sales-data/", Some(&page))
            .await
            .unwrap();
        assert_eq!(value["total_sold"], json!([12]));
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = SalesDataClient::new(&server.uri()).unwrap();
        let err = client.fetch("/products/sales-data/", None).await.unwrap_err();
        match err {
            ChartError::Fetch { reason, .. } => assert!(reason.contains("500")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let client = SalesDataClient::new(&server.uri()).unwrap();
        let err = client.fetch("/products/sales-data/", None).await.unwrap_err();
        assert!(matches!(err, ChartError::Decode { .. }));
    }
}
