use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::{info, instrument};

use crate::actors::messages::AppError;
use crate::actors::traits::CodeGenerator;
use crate::models::GeneratedCode;

// Must finish inside the remote client's budget so the template fallback
// still reaches the caller.
pub const COMPLETION_TIMEOUT: Duration = Duration::from_secs(45);

const SYSTEM_PROMPT: &str = "You are J.A.R.V.I.S, an expert code generator. Generate clean, functional code based on user requests. \
Always include comments explaining the code. Format your response as proper code with syntax highlighting. \
If the request is unclear, ask for clarification. Keep responses concise but complete.";

/// Guesses the language of the requested code from the prompt.
pub fn guess_language(prompt: &str) -> &'static str {
    let lower = prompt.to_lowercase();
    const HINTS: &[(&str, &str)] = &[
        ("typescript", "typescript"),
        ("python", "python"),
        ("rust", "rust"),
        ("react", "jsx"),
        ("java ", "java"),
        ("bash", "bash"),
        ("shell", "bash"),
        ("sql", "sql"),
        ("html", "html"),
        ("css", "css"),
        ("go ", "go"),
    ];
    HINTS
        .iter()
        .find(|(hint, _)| lower.contains(hint))
        .map(|(_, language)| *language)
        .unwrap_or("javascript")
}

/// Chat-completions client for code generation.
#[derive(Clone)]
pub struct OpenAiCodeGenerator {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiCodeGenerator {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl CodeGenerator for OpenAiCodeGenerator {
    #[instrument(skip(self))]
    async fn generate(&self, prompt: &str) -> Result<GeneratedCode, AppError> {
        info!("Requesting code from model {}", self.model);

        let payload = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": format!("Generate code for: {}", prompt) }
            ]
        });

        let res = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .timeout(COMPLETION_TIMEOUT)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::Http(format!(
                "Completion request failed with status {}: {}",
                status, body
            )));
        }

        let json: serde_json::Value = res.json().await?;
        let code = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| AppError::Http("Completion response had no content".to_string()))?;

        Ok(GeneratedCode {
            code: code.to_string(),
            language: guess_language(prompt).to_string(),
        })
    }
}
