use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

use super::{ApiInfo, ApiResponse, ContentSource, Document, Error, Query};
use crate::config::ApiConfig;

/// HTTP client for the content API
///
/// Every search needs the current master ref, which is looked up from the API
/// root right before the search. Cursor URLs returned in `next_page` already
/// carry their ref and are fetched verbatim.
#[derive(Debug, Clone)]
pub struct ContentClient {
    endpoint: String,
    access_token: Option<String>,
    http: reqwest::Client,
}

impl ContentClient {
    pub fn new(cfg: &ApiConfig) -> Result<Self, Error> {
        let endpoint = cfg.endpoint.trim().trim_end_matches('/').to_string();
        if endpoint.is_empty() {
            return Err(Error::MissingEndpoint);
        }
        Url::parse(&endpoint).map_err(|e| Error::Url(format!("{}: {}", endpoint, e)))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;

        Ok(Self {
            endpoint,
            access_token: cfg.access_token.clone(),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("Sending request to {}", url);
        let resp = self.http.get(url.clone()).send().await?;
        match resp.status() {
            reqwest::StatusCode::OK => Ok(resp.json::<T>().await?),
            status => {
                error!("request {} status: {}", url, status);
                Err(Error::StatusCode(status.as_u16()))
            }
        }
    }

    /// Resolve the master ref from the API root
    pub async fn master_ref(&self) -> Result<String, Error> {
        let mut url = parse_url(&self.endpoint)?;
        if let Some(token) = &self.access_token {
            url.query_pairs_mut().append_pair("access_token", token);
        }
        let info: ApiInfo = self.get_json(url).await?;
        info.master_ref()
            .map(str::to_string)
            .ok_or(Error::MissingMasterRef)
    }

    async fn search(&self, query: &Query) -> Result<ApiResponse, Error> {
        let reference = self.master_ref().await?;
        let url = Url::parse_with_params(
            &format!("{}/documents/search", self.endpoint),
            query.params(&reference, self.access_token.as_deref()),
        )
        .map_err(|e| Error::Url(e.to_string()))?;
        self.get_json(url).await
    }
}

impl ContentSource for ContentClient {
    async fn query(&self, query: &Query) -> Result<ApiResponse, Error> {
        self.search(query).await
    }

    async fn fetch_page(&self, url: &str) -> Result<ApiResponse, Error> {
        self.get_json(parse_url(url)?).await
    }

    async fn get_by_uid(&self, document_type: &str, uid: &str) -> Result<Option<Document>, Error> {
        let query = Query::documents_of_type(document_type)
            .and_at(&format!("my.{}.uid", document_type), uid)
            .page_size(1);
        Ok(self.search(&query).await?.results.into_iter().next())
    }
}

fn parse_url(url: &str) -> Result<Url, Error> {
    Url::parse(url).map_err(|e| Error::Url(format!("{}: {}", url, e)))
}

/// Whether `url` points at the same scheme/host/port as the API endpoint
pub fn is_same_origin(endpoint: &str, url: &str) -> bool {
    match (Url::parse(endpoint), Url::parse(url)) {
        (Ok(a), Ok(b)) => a.origin() == b.origin(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::spawn_fake_api;

    fn client_for(endpoint: &str) -> ContentClient {
        let cfg = ApiConfig {
            endpoint: endpoint.to_string(),
            ..ApiConfig::default()
        };
        ContentClient::new(&cfg).unwrap()
    }

    #[test]
    fn test_missing_endpoint() {
        let err = ContentClient::new(&ApiConfig::default()).unwrap_err();
        assert!(matches!(err, Error::MissingEndpoint));
    }

    #[test]
    fn test_same_origin() {
        let endpoint = "https://blog.cdn.prismic.io/api/v2";
        assert!(is_same_origin(
            endpoint,
            "https://blog.cdn.prismic.io/api/v2/documents/search?page=2"
        ));
        assert!(!is_same_origin(endpoint, "https://evil.example.com/api/v2"));
        assert!(!is_same_origin(endpoint, "http://blog.cdn.prismic.io/api/v2"));
        assert!(!is_same_origin(endpoint, "not a url"));
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    async fn test_master_ref() {
        let endpoint = spawn_fake_api().await;
        let client = client_for(&endpoint);
        assert_eq!(client.master_ref().await.unwrap(), "master-ref");
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    async fn test_query_and_follow_cursor() {
        let endpoint = spawn_fake_api().await;
        let client = client_for(&endpoint);

        let first = client
            .query(&Query::from_config(&ApiConfig::default()))
            .await
            .unwrap();
        assert_eq!(first.results.len(), 1);
        assert_eq!(first.results[0].uid.as_deref(), Some("como-utilizar-hooks"));

        let cursor = first.next_page.expect("first page has a cursor");
        assert!(is_same_origin(client.endpoint(), &cursor));

        let second = client.fetch_page(&cursor).await.unwrap();
        assert_eq!(
            second.results[0].uid.as_deref(),
            Some("criando-um-app-cra-do-zero")
        );
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    async fn test_get_by_uid() {
        let endpoint = spawn_fake_api().await;
        let client = client_for(&endpoint);

        let doc = client
            .get_by_uid("post", "rust-para-iniciantes")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc.data.title, "Rust para iniciantes");

        assert!(client.get_by_uid("post", "nope").await.unwrap().is_none());
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    async fn test_status_error() {
        let endpoint = spawn_fake_api().await;
        let client = client_for(&endpoint);
        let err = client
            .fetch_page(&format!("{}/missing", endpoint))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::StatusCode(404)));
    }
}
