use std::env;

pub const DEFAULT_SERVER_DOMAIN: &str = "0.0.0.0:8080";
pub const DEFAULT_BIRDEYE_URL: &str = "https://public-api.birdeye.so";
pub const DEFAULT_CHAIN: &str = "solana";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct BirdeyeConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub chain: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub max_output_tokens: u32,
}

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub server_domain: String,
    pub birdeye: BirdeyeConfig,
    pub openai: OpenAiConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Missing API keys only warn: requests made without them degrade at call time.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let birdeye_api_key = non_empty("BIRDEYE_API_KEY");
        if birdeye_api_key.is_none() {
            log::warn!("BIRDEYE_API_KEY not set, wallet data requests will be rejected upstream");
        }

        let openai_api_key = non_empty("OPENAI_API_KEY");
        if openai_api_key.is_none() {
            log::warn!("OPENAI_API_KEY not set, analysis text will not be generated");
        }

        let max_output_tokens = match non_empty("OPENAI_MAX_OUTPUT_TOKENS") {
            Some(raw) => raw.trim().parse::<u32>().unwrap_or_else(|e| {
                log::warn!(
                    "Invalid OPENAI_MAX_OUTPUT_TOKENS {:?} ({}), using {}",
                    raw,
                    e,
                    DEFAULT_MAX_OUTPUT_TOKENS
                );
                DEFAULT_MAX_OUTPUT_TOKENS
            }),
            None => DEFAULT_MAX_OUTPUT_TOKENS,
        };

        Self {
            server_domain: non_empty("SERVER_DOMAIN")
                .unwrap_or_else(|| DEFAULT_SERVER_DOMAIN.to_string()),
            birdeye: BirdeyeConfig {
                api_key: birdeye_api_key,
                base_url: non_empty("BIRDEYE_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_BIRDEYE_URL.to_string()),
                chain: non_empty("BIRDEYE_CHAIN").unwrap_or_else(|| DEFAULT_CHAIN.to_string()),
            },
            openai: OpenAiConfig {
                api_key: openai_api_key,
                max_output_tokens,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(|_| None);

        assert_eq!(config.server_domain, DEFAULT_SERVER_DOMAIN);
        assert_eq!(config.birdeye.base_url, DEFAULT_BIRDEYE_URL);
        assert_eq!(config.birdeye.chain, "solana");
        assert_eq!(config.birdeye.api_key, None);
        assert_eq!(config.openai.api_key, None);
        assert_eq!(config.openai.max_output_tokens, DEFAULT_MAX_OUTPUT_TOKENS);
    }

    #[test]
    fn test_max_output_tokens() {
        let tokens = |raw: &'static str| {
            AppConfig::from_lookup(|key| {
                (key == "OPENAI_MAX_OUTPUT_TOKENS").then(|| raw.to_string())
            })
            .openai
            .max_output_tokens
        };

        assert_eq!(tokens("2048"), 2048);
        assert_eq!(tokens(" 512 "), 512);
        assert_eq!(tokens("lots"), DEFAULT_MAX_OUTPUT_TOKENS);
        assert_eq!(tokens("-5"), DEFAULT_MAX_OUTPUT_TOKENS);
        assert_eq!(tokens(""), DEFAULT_MAX_OUTPUT_TOKENS);
    }

    #[test]
    fn test_values_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("SERVER_DOMAIN", "127.0.0.1:3000"),
            ("BIRDEYE_API_KEY", "be-key"),
            ("BIRDEYE_BASE_URL", "http://localhost:9999"),
            ("OPENAI_API_KEY", "   "),
        ]);
        let config = AppConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.server_domain, "127.0.0.1:3000");
        assert_eq!(config.birdeye.api_key.as_deref(), Some("be-key"));
        assert_eq!(config.birdeye.base_url, "http://localhost:9999");
        // Blank keys count as missing.
        assert_eq!(config.openai.api_key, None);
    }
}
