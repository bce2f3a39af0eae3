use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{instrument, warn};
use url::Url;

use crate::actors::messages::{ActorError, AppError};
use crate::actors::traits::CodeGenerator;
use crate::models::GeneratedCode;

/// Covers connect, send and reading the whole body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for a `POST {prompt}` code-generation endpoint.
///
/// This is the assistant's single outbound call. An error body from the
/// endpoint becomes [`ActorError::CodeGen`]; transport problems become
/// [`AppError::Http`]. No retry.
#[derive(Clone)]
pub struct RemoteCodeGenerator {
    client: Client,
    endpoint: Url,
}

impl RemoteCodeGenerator {
    pub fn new(endpoint: &str) -> Result<Self, AppError> {
        Ok(Self {
            client: Client::new(),
            endpoint: Url::parse(endpoint)?,
        })
    }
}

#[async_trait]
impl CodeGenerator for RemoteCodeGenerator {
    #[instrument(skip(self))]
    async fn generate(&self, prompt: &str) -> Result<GeneratedCode, AppError> {
        let res = self
            .client
            .post(self.endpoint.clone())
            .timeout(REQUEST_TIMEOUT)
            .json(&json!({ "prompt": prompt }))
            .send()
            .await?;
        let status = res.status();
        let body = res.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str::<GeneratedCode>(&body)?);
        }

        warn!("Code generation endpoint answered {}", status);
        match serde_json::from_str::<ErrorBody>(&body) {
            Ok(err) => Err(ActorError::CodeGen(err.error).into()),
            Err(_) => Err(AppError::Http(format!(
                "Code generation endpoint returned {}: {}",
                status, body
            ))),
        }
    }
}
