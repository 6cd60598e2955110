//! Remote title-lookup client.
//!
//! Speaks an OMDb-style API: one query resolves a title to a poster URL, a
//! second request fetches the image bytes. Everything here is non-fatal to
//! gameplay; callers absorb failures into the placeholder fallback.

use log::debug;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug)]
pub enum LookupError {
    /// The service answered but knows no poster for the title.
    NotFound,
    Http(String),
    Parse(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "title not found"),
            Self::Http(e) => write!(f, "http error: {e}"),
            Self::Parse(e) => write!(f, "parse error: {e}"),
        }
    }
}

impl std::error::Error for LookupError {}

/// The lookup collaborator the resolver depends on. Implemented by the real
/// HTTP client below and by stubs in tests.
pub trait TitleLookup: Send + Sync {
    /// Resolve a title to a poster image URL.
    fn lookup(&self, title: &str) -> Result<String, LookupError>;
    /// Download the image bytes behind a poster URL.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, LookupError>;
}

#[derive(Deserialize, Debug)]
struct LookupResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

pub struct OmdbClient {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build()
            .into();
        Self {
            agent,
            base_url,
            api_key,
        }
    }
}

impl TitleLookup for OmdbClient {
    fn lookup(&self, title: &str) -> Result<String, LookupError> {
        let response = self
            .agent
            .get(&self.base_url)
            .query("t", title)
            .query("apikey", &self.api_key)
            .call()
            .map_err(|e| LookupError::Http(e.to_string()))?;

        if response.status() != 200 {
            return Err(LookupError::Http(format!(
                "lookup returned status {}",
                response.status()
            )));
        }

        let data: LookupResponse = response
            .into_body()
            .read_json()
            .map_err(|e| LookupError::Parse(e.to_string()))?;

        if !data.response.eq_ignore_ascii_case("true") {
            // The service reports "not found" in-band.
            debug!(
                "Lookup miss for '{title}': {}",
                data.error.unwrap_or_default()
            );
            return Err(LookupError::NotFound);
        }
        match data.poster {
            Some(url) if !url.is_empty() && url != "N/A" => Ok(url),
            _ => Err(LookupError::NotFound),
        }
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>, LookupError> {
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| LookupError::Http(e.to_string()))?;
        if response.status() != 200 {
            return Err(LookupError::Http(format!(
                "fetch returned status {}",
                response.status()
            )));
        }
        response
            .into_body()
            .read_to_vec()
            .map_err(|e| LookupError::Http(e.to_string()))
    }
}
