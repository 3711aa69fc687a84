//! HTTP backend probe.
//!
//! Posts `/api/v0/<request>?flags=true` to the configured `host:port` and
//! decodes the JSON object in the reply.

use std::time::Duration;

use cmdtool_types::config::BackendConfig;
use cmdtool_types::error::{Result, ShellError};
use cmdtool_types::probe::{BackendProbe, ProbeResponse, response_from_json};

/// Blocking HTTP client for a daemon API.
pub struct HttpProbe {
    address: String,
    client: reqwest::blocking::Client,
}

impl HttpProbe {
    /// Build a probe for the given backend settings.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ShellError::Backend(format!("http client: {e}")))?;
        Ok(Self {
            address: config.address.clone(),
            client,
        })
    }

    /// URL for a request name such as `commands` or `bootstrap/list`.
    pub fn request_url(&self, request: &str) -> String {
        let request = request.trim_matches('/');
        format!("http://{}/api/v0/{request}?flags=true", self.address)
    }
}

impl BackendProbe for HttpProbe {
    fn endpoint(&self) -> &str {
        &self.address
    }

    fn query(&self, request: &str) -> Result<ProbeResponse> {
        let url = self.request_url(request);
        log::info!("Backend request {url}");

        let resp = self
            .client
            .post(&url)
            .send()
            .map_err(|e| ShellError::Backend(format!("{request}: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ShellError::Backend(format!(
                "{request}: HTTP {}",
                status.as_u16()
            )));
        }

        let body = resp
            .bytes()
            .map_err(|e| ShellError::Backend(format!("{request}: {e}")))?;
        let json: serde_json::Value = serde_json::from_slice(&body)?;
        response_from_json(json).ok_or_else(|| {
            ShellError::Backend(format!("{request}: reply is not a JSON object"))
        })
    }
}
