//! Code generation back-ends.
//!
//! - `templates`: offline keyword-selected templates
//! - `openai`: chat-completions client
//! - `remote`: client for the `/api/generate-code` endpoint

pub mod openai;
pub mod remote;
pub mod templates;

use async_trait::async_trait;
use tracing::warn;

use crate::actors::messages::AppError;
use crate::actors::traits::CodeGenerator;
use crate::models::GeneratedCode;

pub use openai::OpenAiCodeGenerator;
pub use remote::RemoteCodeGenerator;
pub use templates::{template_code, TemplateCodeGenerator};

/// Generator behind the `/api/generate-code` route: the model when one is
/// configured, templates otherwise and whenever the model call fails.
pub struct ServiceCodeGenerator {
    model: Option<OpenAiCodeGenerator>,
}

impl ServiceCodeGenerator {
    pub fn new(model: Option<OpenAiCodeGenerator>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl CodeGenerator for ServiceCodeGenerator {
    async fn generate(&self, prompt: &str) -> Result<GeneratedCode, AppError> {
        let Some(model) = &self.model else {
            return Ok(template_code(prompt));
        };
        match model.generate(prompt).await {
            Ok(code) => Ok(code),
            Err(e) => {
                warn!("Model code generation failed, using template: {}", e);
                Ok(template_code(prompt))
            }
        }
    }
}
