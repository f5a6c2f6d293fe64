use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::errors::AppError;
use crate::generation::{ContentAssistant, LlmAssistant};
use crate::llm_client::LlmClient;

/// Long-lived collaborators built once at startup and handed to commands.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Present only when an AI API key is configured.
    pub assistant: Option<Arc<dyn ContentAssistant>>,
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        let assistant = match &config.ai {
            Some(settings) => {
                let llm = LlmClient::new(settings.clone())
                    .map_err(|e| AppError::Config(format!("failed to build AI client: {e}")))?;
                info!("LLM client initialized (model: {})", llm.model());
                let assistant: Arc<dyn ContentAssistant> = Arc::new(LlmAssistant::new(llm));
                Some(assistant)
            }
            None => None,
        };
        Ok(AppState { config, assistant })
    }

    pub fn assistant(&self) -> Option<&dyn ContentAssistant> {
        self.assistant.as_deref()
    }
}
