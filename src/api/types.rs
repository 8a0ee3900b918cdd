//! Serde-deserializable types matching the catalog API responses.

use serde::Deserialize;

/// One row of the catalog list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceSummary {
  /// Unique resource name, the join key across all session state
  #[serde(rename = "name")]
  pub key: String,
  #[serde(default)]
  pub url: Option<String>,
}

impl ResourceSummary {
  #[cfg(test)]
  pub fn new(key: impl Into<String>, url: Option<&str>) -> Self {
    Self {
      key: key.into(),
      url: url.map(String::from),
    }
  }

  /// URL delivered with the list, if any. Empty strings count as absent.
  pub fn url(&self) -> Option<&str> {
    self.url.as_deref().filter(|u| !u.is_empty())
  }
}

/// Detail record for a single resource
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDetail {
  #[serde(default)]
  pub types: Option<String>,
  #[serde(default)]
  pub abilities: Option<String>,
  #[serde(default, alias = "base_experience")]
  pub base_experience: Option<u32>,
  #[serde(default, alias = "height_meters")]
  pub height_meters: Option<f64>,
  #[serde(default, alias = "weight_kilograms")]
  pub weight_kilograms: Option<f64>,
  #[serde(default, alias = "sprite_url")]
  pub sprite_url: Option<String>,
}

/// `GET /api/pokemon/url` response
#[derive(Debug, Deserialize)]
pub struct ApiUrlResponse {
  pub url: String,
}

/// `POST /api/ingest` response. Only logged, never required.
#[derive(Debug, Default, Deserialize)]
pub struct IngestReport {
  #[serde(default)]
  pub ingested: Option<u64>,
  #[serde(default)]
  pub limit: Option<u32>,
  #[serde(default)]
  pub offset: Option<u32>,
}
