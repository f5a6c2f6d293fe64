pub const DEFAULT_AI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_AI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_AI_TIMEOUT_SECS: u64 = 120;

/// Credentials and endpoint for the chat-completion API.
/// Only present when an API key was found in the environment.
#[derive(Debug, Clone)]
pub struct AiSettings {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

/// Application configuration loaded from environment variables (and `.env`).
/// Everything is optional; a missing API key simply disables AI features.
///
/// Bad values never abort a command: they fall back to the default and are
/// reported through `warnings`, which `main` logs once tracing is up.
#[derive(Debug, Clone)]
pub struct Config {
    pub ai: Option<AiSettings>,
    pub rust_log: String,
    pub warnings: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests never touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut warnings = Vec::new();

        let ai = match var("AI_API_KEY").or_else(|| var("OPENAI_API_KEY")) {
            Some(api_key) => Some(AiSettings {
                api_url: var("AI_API_URL").unwrap_or_else(|| DEFAULT_AI_API_URL.to_string()),
                api_key,
                model: var("AI_MODEL").unwrap_or_else(|| DEFAULT_AI_MODEL.to_string()),
                timeout_secs: match var("AI_TIMEOUT_SECS") {
                    Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                        warnings.push(format!(
                            "AI_TIMEOUT_SECS={raw:?} is not a whole number of seconds; \
                             using {DEFAULT_AI_TIMEOUT_SECS}"
                        ));
                        DEFAULT_AI_TIMEOUT_SECS
                    }),
                    None => DEFAULT_AI_TIMEOUT_SECS,
                },
            }),
            None => None,
        };

        Config {
            ai,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_no_key_disables_ai() {
        let config = Config::from_lookup(lookup(&[("AI_MODEL", "gpt-4o")]));
        assert!(config.ai.is_none());
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_defaults_fill_endpoint_and_model() {
        let config = Config::from_lookup(lookup(&[("AI_API_KEY", "sk-test")]));
        let ai = config.ai.unwrap();
        assert_eq!(ai.api_url, DEFAULT_AI_API_URL);
        assert_eq!(ai.model, DEFAULT_AI_MODEL);
        assert_eq!(ai.timeout_secs, 120);
    }

    #[test]
    fn test_openai_key_is_a_fallback() {
        let config = Config::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-legacy")]));
        assert_eq!(config.ai.unwrap().api_key, "sk-legacy");
    }

    #[test]
    fn test_blank_key_counts_as_absent() {
        let config = Config::from_lookup(lookup(&[("AI_API_KEY", "   ")]));
        assert!(config.ai.is_none());
    }

    #[test]
    fn test_bad_timeout_falls_back_with_warning() {
        let config = Config::from_lookup(lookup(&[
            ("AI_API_KEY", "sk-test"),
            ("AI_TIMEOUT_SECS", "soon"),
        ]));
        assert_eq!(config.ai.unwrap().timeout_secs, 120);
        assert_eq!(config.warnings.len(), 1);
        assert!(config.warnings[0].contains("AI_TIMEOUT_SECS"));
    }

    #[test]
    fn test_timeout_is_read_when_valid() {
        let config = Config::from_lookup(lookup(&[
            ("AI_API_KEY", "sk-test"),
            ("AI_TIMEOUT_SECS", "30"),
        ]));
        assert_eq!(config.ai.unwrap().timeout_secs, 30);
        assert!(config.warnings.is_empty());
    }
}
