use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum GenerationProvider {
    Google,
}

/// Connection settings handed to a generation client on every call.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerationConfig {
    pub provider: GenerationProvider,
    pub base_url: String,
    pub image_model: String,
    pub text_model: String,
    pub api_key: Option<String>,
    pub temperature: Option<f32>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: GenerationProvider::Google,
            base_url: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            text_model: "gemini-2.5-flash".to_string(),
            api_key: None,
            temperature: Some(0.7),
        }
    }
}
