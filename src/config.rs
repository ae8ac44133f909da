use serde::{Deserialize, Serialize};
use std::env;

pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
pub const TAVILY_API_KEY: &str = "TAVILY_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub gemini: GeminiSettings,
    pub tavily: TavilySettings,
    pub http: HttpSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TavilySettings {
    pub api_key: String,
    pub base_url: String,
    pub max_results: u32,
    pub search_depth: String,
    pub topic: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    pub timeout_seconds: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini: GeminiSettings {
                api_key: String::new(),
                model: "gemini-1.5-flash".to_string(),
                base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
                temperature: None,
                max_tokens: None,
            },
            tavily: TavilySettings {
                api_key: String::new(),
                base_url: "https://api.tavily.com".to_string(),
                max_results: 5,
                search_depth: "advanced".to_string(),
                topic: "news".to_string(),
            },
            http: HttpSettings {
                timeout_seconds: None,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Credentials are not validated here; see [`Config::missing_credentials`].
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        // Gemini configuration
        if let Some(api_key) = lookup(GOOGLE_API_KEY) {
            config.gemini.api_key = api_key.trim().to_string();
        }
        if let Some(model) = lookup("GEMINI_MODEL") {
            config.gemini.model = model;
        }
        if let Some(base_url) = lookup("GEMINI_BASE_URL") {
            config.gemini.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(temperature) = lookup("GEMINI_TEMPERATURE") {
            config.gemini.temperature = Some(temperature.parse()?);
        }
        if let Some(max_tokens) = lookup("GEMINI_MAX_TOKENS") {
            config.gemini.max_tokens = Some(max_tokens.parse()?);
        }

        // Tavily configuration
        if let Some(api_key) = lookup(TAVILY_API_KEY) {
            config.tavily.api_key = api_key.trim().to_string();
        }
        if let Some(base_url) = lookup("TAVILY_BASE_URL") {
            config.tavily.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(max_results) = lookup("TAVILY_MAX_RESULTS") {
            config.tavily.max_results = max_results.parse()?;
        }
        if let Some(search_depth) = lookup("TAVILY_SEARCH_DEPTH") {
            config.tavily.search_depth = search_depth;
        }
        if let Some(topic) = lookup("TAVILY_TOPIC") {
            config.tavily.topic = topic;
        }

        // HTTP configuration
        if let Some(timeout_seconds) = lookup("HTTP_TIMEOUT_SECONDS") {
            config.http.timeout_seconds = Some(timeout_seconds.parse()?);
        }

        Ok(config)
    }

    /// Names of the required credentials that are unset or blank.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.gemini.api_key.is_empty() {
            missing.push(GOOGLE_API_KEY);
        }
        if self.tavily.api_key.is_empty() {
            missing.push(TAVILY_API_KEY);
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_follow_the_news_search_tool() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.tavily.max_results, 5);
        assert_eq!(config.tavily.topic, "news");
        assert_eq!(config.tavily.search_depth, "advanced");
        assert_eq!(config.gemini.model, "gemini-1.5-flash");
        assert!(config.gemini.temperature.is_none());
        assert!(config.http.timeout_seconds.is_none());
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("GOOGLE_API_KEY", " g-key "),
            ("TAVILY_API_KEY", "t-key"),
            ("GEMINI_MODEL", "gemini-pro"),
            ("GEMINI_BASE_URL", "http://localhost:8080/"),
            ("GEMINI_TEMPERATURE", "0.2"),
            ("GEMINI_MAX_TOKENS", "512"),
            ("TAVILY_MAX_RESULTS", "3"),
            ("HTTP_TIMEOUT_SECONDS", "30"),
        ]))
        .unwrap();

        assert_eq!(config.gemini.api_key, "g-key");
        assert_eq!(config.gemini.model, "gemini-pro");
        assert_eq!(config.gemini.base_url, "http://localhost:8080");
        assert_eq!(config.gemini.temperature, Some(0.2));
        assert_eq!(config.gemini.max_tokens, Some(512));
        assert_eq!(config.tavily.max_results, 3);
        assert_eq!(config.http.timeout_seconds, Some(30));
        assert!(config.missing_credentials().is_empty());
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let result = Config::from_lookup(lookup_from(&[("TAVILY_MAX_RESULTS", "many")]));
        assert!(result.is_err());
    }

    #[test]
    fn blank_keys_count_as_missing() {
        let config = Config::from_lookup(lookup_from(&[
            ("GOOGLE_API_KEY", "   "),
            ("TAVILY_API_KEY", "t-key"),
        ]))
        .unwrap();
        assert_eq!(config.missing_credentials(), vec![GOOGLE_API_KEY]);

        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(
            config.missing_credentials(),
            vec![GOOGLE_API_KEY, TAVILY_API_KEY]
        );
    }
}
