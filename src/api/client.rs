use crate::api::error::ApiError;
use crate::api::types::{ApiUrlResponse, IngestReport, ResourceDetail, ResourceSummary};
use crate::config::Config;
use async_trait::async_trait;
use color_eyre::{eyre::eyre, Result};
use reqwest::{Method, Response};
use serde::Serialize;
use tracing::{debug, info};
use url::Url;

pub const LIST_PATH: &str = "/api/pokemon";
pub const INGEST_PATH: &str = "/api/ingest";
pub const URL_PATH: &str = "/api/pokemon/url";
pub const DETAIL_PATH: &str = "/api/pokemon/detail";

/// Operations the session needs from the catalog backend
#[async_trait]
pub trait CatalogApi: Send + Sync {
  /// `GET /api/pokemon?limit=`
  async fn list(&self, limit: u32) -> Result<Vec<ResourceSummary>, ApiError>;

  /// `POST /api/ingest?limit=&offset=`
  async fn ingest(&self, limit: u32, offset: u32) -> Result<(), ApiError>;

  /// `GET /api/pokemon/url?name=`
  async fn resolve_url(&self, name: &str) -> Result<String, ApiError>;

  /// `GET /api/pokemon/detail?name=`
  async fn resolve_detail(&self, name: &str) -> Result<ResourceDetail, ApiError>;
}

/// Catalog API client wrapper
#[derive(Clone)]
pub struct CatalogClient {
  client: reqwest::Client,
  base: Url,
}

impl CatalogClient {
  pub fn new(config: &Config) -> Result<Self> {
    let base = Url::parse(&config.api.url)
      .map_err(|e| eyre!("Invalid API url {}: {}", config.api.url, e))?;
    if base.cannot_be_a_base() {
      return Err(eyre!("Invalid API url {}: not a base URL", config.api.url));
    }

    let client = reqwest::Client::builder()
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self { client, base })
  }

  pub fn base_url(&self) -> &Url {
    &self.base
  }

  /// Append `path` to the base URL, keeping any path prefix the base carries
  fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
    let mut url = self.base.clone();
    url
      .path_segments_mut()
      .map_err(|_| ApiError::Transport(format!("{} cannot be a base URL", self.base)))?
      .pop_if_empty()
      .extend(path.trim_start_matches('/').split('/'));
    Ok(url)
  }

  /// Send a request and turn any non-2xx status into `ApiError::Status`
  async fn send<Q: Serialize + ?Sized>(
    &self,
    method: Method,
    path: &'static str,
    query: &Q,
  ) -> Result<Response, ApiError> {
    let url = self.endpoint(path)?;

    debug!(%method, path, "request");
    let response = self
      .client
      .request(method.clone(), url)
      .query(query)
      .send()
      .await?;

    let status = response.status();
    debug!(%method, path, status = status.as_u16(), "response");
    if !status.is_success() {
      return Err(ApiError::Status {
        method: method.as_str().to_string(),
        path,
        status: status.as_u16(),
      });
    }

    Ok(response)
  }
}

#[async_trait]
impl CatalogApi for CatalogClient {
  async fn list(&self, limit: u32) -> Result<Vec<ResourceSummary>, ApiError> {
    let response = self.send(Method::GET, LIST_PATH, &[("limit", limit)]).await?;
    Ok(response.json().await?)
  }

  async fn ingest(&self, limit: u32, offset: u32) -> Result<(), ApiError> {
    let response = self
      .send(
        Method::POST,
        INGEST_PATH,
        &[("limit", limit), ("offset", offset)],
      )
      .await?;

    // The body is informational only; a malformed one does not fail the import
    let report: IngestReport = response.json().await.unwrap_or_default();
    info!(
      ingested = ?report.ingested,
      limit = ?report.limit,
      offset = ?report.offset,
      "import finished"
    );
    Ok(())
  }

  async fn resolve_url(&self, name: &str) -> Result<String, ApiError> {
    let response = self.send(Method::GET, URL_PATH, &[("name", name)]).await?;
    let body: ApiUrlResponse = response.json().await?;
    Ok(body.url)
  }

  async fn resolve_detail(&self, name: &str) -> Result<ResourceDetail, ApiError> {
    let response = self
      .send(Method::GET, DETAIL_PATH, &[("name", name)])
      .await?;
    Ok(response.json().await?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tokio::io::{AsyncReadExt, AsyncWriteExt};
  use tokio::net::TcpListener;
  use tokio::task::JoinHandle;

  fn client(url: &str) -> CatalogClient {
    let mut config = Config::default();
    config.api.url = url.to_string();
    CatalogClient::new(&config).unwrap()
  }

  /// Serve exactly one request with a canned response.
  ///
  /// Returns the server address and a handle resolving to the request line.
  async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
      let (mut stream, _) = listener.accept().await.unwrap();
      let mut request = Vec::new();
      let mut buf = [0u8; 1024];
      while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut buf).await.unwrap();
        if n == 0 {
          break;
        }
        request.extend_from_slice(&buf[..n]);
      }

      let response = format!(
        concat!(
          "HTTP/1.1 {}\r\n",
          "Content-Type: application/json\r\n",
          "Content-Length: {}\r\n",
          "Connection: close\r\n\r\n{}"
        ),
        status,
        body.len(),
        body
      );
      stream.write_all(response.as_bytes()).await.unwrap();
      stream.shutdown().await.unwrap();

      let request = String::from_utf8_lossy(&request).to_string();
      request.lines().next().unwrap_or_default().to_string()
    });

    (addr, handle)
  }

  #[test]
  fn test_endpoint_without_prefix() {
    let client = client("http://localhost:8000");
    assert_eq!(
      client.endpoint(URL_PATH).unwrap().as_str(),
      "http://localhost:8000/api/pokemon/url"
    );
  }

  #[test]
  fn test_endpoint_keeps_base_prefix() {
    let with_slash = client("http://gateway/catalog/");
    assert_eq!(
      with_slash.endpoint(LIST_PATH).unwrap().as_str(),
      "http://gateway/catalog/api/pokemon"
    );

    let without_slash = client("http://gateway/catalog");
    assert_eq!(
      without_slash.endpoint(INGEST_PATH).unwrap().as_str(),
      "http://gateway/catalog/api/ingest"
    );
  }

  #[test]
  fn test_invalid_base_url_is_rejected() {
    let mut config = Config::default();
    config.api.url = "not a url".to_string();
    assert!(CatalogClient::new(&config).is_err());

    config.api.url = "mailto:ash@example.com".to_string();
    assert!(CatalogClient::new(&config).is_err());
  }

  #[tokio::test]
  async fn test_list_decodes_rows() {
    let (addr, server) = serve_once(
      "200 OK",
      r#"[{"name":"bulbasaur","url":"http://x/1"},{"name":"ditto"}]"#,
    )
    .await;

    let rows = client(&addr).list(10).await.unwrap();

    assert_eq!(server.await.unwrap(), "GET /api/pokemon?limit=10 HTTP/1.1");
    assert_eq!(
      rows,
      vec![
        ResourceSummary::new("bulbasaur", Some("http://x/1")),
        ResourceSummary::new("ditto", None),
      ]
    );
  }

  #[tokio::test]
  async fn test_list_under_prefixed_base() {
    let (addr, server) = serve_once("200 OK", "[]").await;

    let rows = client(&format!("{}/catalog/", addr)).list(10).await.unwrap();

    assert!(rows.is_empty());
    assert_eq!(
      server.await.unwrap(),
      "GET /catalog/api/pokemon?limit=10 HTTP/1.1"
    );
  }

  #[tokio::test]
  async fn test_resolve_url_not_found() {
    let (addr, server) = serve_once("404 Not Found", r#"{"detail":"not found"}"#).await;

    let err = client(&addr).resolve_url("mr mime").await.unwrap_err();

    assert_eq!(
      server.await.unwrap(),
      "GET /api/pokemon/url?name=mr+mime HTTP/1.1"
    );
    assert_eq!(
      err,
      ApiError::Status {
        method: "GET".to_string(),
        path: URL_PATH,
        status: 404,
      }
    );
  }

  #[tokio::test]
  async fn test_resolve_url_success() {
    let (addr, server) = serve_once("200 OK", r#"{"name":"ditto","url":"http://x/132"}"#).await;

    let url = client(&addr).resolve_url("ditto").await.unwrap();

    assert_eq!(url, "http://x/132");
    assert_eq!(
      server.await.unwrap(),
      "GET /api/pokemon/url?name=ditto HTTP/1.1"
    );
  }

  #[tokio::test]
  async fn test_ingest_server_error() {
    let (addr, server) = serve_once("500 Internal Server Error", "{}").await;

    let err = client(&addr).ingest(25, 50).await.unwrap_err();

    assert_eq!(
      server.await.unwrap(),
      "POST /api/ingest?limit=25&offset=50 HTTP/1.1"
    );
    assert_eq!(err.to_string(), "POST /api/ingest → 500");
  }

  #[tokio::test]
  async fn test_ingest_ignores_body() {
    let (addr, server) = serve_once("200 OK", "not json").await;

    client(&addr).ingest(10, 0).await.unwrap();

    assert_eq!(
      server.await.unwrap(),
      "POST /api/ingest?limit=10&offset=0 HTTP/1.1"
    );
  }

  #[tokio::test]
  async fn test_resolve_detail_decodes_body() {
    let (addr, server) =
      serve_once("200 OK", r#"{"types":"normal","baseExperience":101}"#).await;

    let detail = client(&addr).resolve_detail("ditto").await.unwrap();

    assert_eq!(
      server.await.unwrap(),
      "GET /api/pokemon/detail?name=ditto HTTP/1.1"
    );
    assert_eq!(detail.types.as_deref(), Some("normal"));
    assert_eq!(detail.base_experience, Some(101));
  }

  #[tokio::test]
  async fn test_connection_refused_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = client(&addr).list(10).await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
  }
}
