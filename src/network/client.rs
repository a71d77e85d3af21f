//! HTTP client wrapper - runs collection queries against the managed backend

use std::time::{Duration, Instant};

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use crate::config::AppConfig;
use crate::error::FetchError;
use crate::network::{DataService, Rows};
use crate::resource::CollectionQuery;

/// PostgREST-style REST endpoint (`/rest/v1/<collection>`)
#[derive(Clone)]
pub struct RestService {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl RestService {
    pub fn new(config: &AppConfig) -> Self {
        RestService {
            client: create_client(Duration::from_secs(config.request_timeout_secs)),
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    /// Endpoint for a collection, without query string
    pub fn collection_url(&self, collection: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, collection)
    }

    fn build_request(&self, query: &CollectionQuery) -> reqwest::RequestBuilder {
        let mut req_builder = self
            .client
            .get(self.collection_url(&query.collection))
            .query(&query.to_params())
            .header("Accept", "application/json");

        if let Some(key) = &self.api_key {
            req_builder = req_builder
                .header("apikey", key)
                .header("Authorization", format!("Bearer {}", key));
        }

        req_builder
    }
}

impl DataService for RestService {
    fn select(&self, query: &CollectionQuery) -> BoxFuture<'static, Result<Rows, FetchError>> {
        execute_query(self.build_request(query), query.collection.clone()).boxed()
    }
}

/// Send a prepared query and read its rows
async fn execute_query(
    req_builder: reqwest::RequestBuilder,
    collection: String,
) -> Result<Rows, FetchError> {
    let start = Instant::now();
    let resp = req_builder.send().await?;
    let status = resp.status();

    if !status.is_success() {
        let message = resp.text().await.unwrap_or_default();
        tracing::info!(collection, status = status.as_u16(), "Query rejected");
        return Err(FetchError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let body = resp.text().await?;
    let rows: Rows = if body.trim().is_empty() {
        None
    } else {
        serde_json::from_str(&body).map_err(|e| FetchError::Decode {
            collection: collection.clone(),
            message: e.to_string(),
        })?
    };

    tracing::info!(
        collection,
        rows = rows.as_ref().map_or(0, Vec::len),
        time_ms = start.elapsed().as_millis() as u64,
        "Query completed"
    );
    Ok(rows)
}

/// Create an HTTP client with the given request timeout
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_url_trims_trailing_slash() {
        let config = AppConfig {
            backend_url: "https://api.example.ir/".to_string(),
            ..AppConfig::default()
        };
        let service = RestService::new(&config);
        assert_eq!(
            service.collection_url("provinces"),
            "https://api.example.ir/rest/v1/provinces"
        );
    }

    #[test]
    fn test_request_carries_query_and_key() {
        let config = AppConfig {
            backend_url: "https://api.example.ir".to_string(),
            api_key: Some("anon".to_string()),
            ..AppConfig::default()
        };
        let service = RestService::new(&config);
        let req = service
            .build_request(&CollectionQuery::active("service_categories"))
            .build()
            .unwrap();

        assert_eq!(req.url().path(), "/rest/v1/service_categories");
        assert_eq!(
            req.url().query(),
            Some("select=*&is_active=eq.true&order=name.asc")
        );
        assert_eq!(req.headers()["apikey"], "anon");
        assert_eq!(req.headers()["authorization"], "Bearer anon");
    }
}
