//! # API Client Configuration
//!
//! The caller supplies where and how to submit: endpoint URL, optional
//! bearer token, timeout, and the discount strategy for the targeted
//! endpoint. Environment variables override defaults for development.

use crate::payload::DiscountStrategy;

/// Configuration for the submission client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Full URL of the receipt submission endpoint.
    pub submit_url: String,

    /// Bearer token added to the Authorization header, if any.
    /// Session management itself lives outside this crate.
    pub api_token: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Discount representation expected by the targeted endpoint.
    pub discount_strategy: DiscountStrategy,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            submit_url: "http://localhost:3000/api/receipts".to_string(),
            api_token: None,
            timeout_secs: 10,
            discount_strategy: DiscountStrategy::default(),
        }
    }
}

impl ApiConfig {
    /// Creates a configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `KAKEIBO_API_URL`: submission endpoint URL
    /// - `KAKEIBO_API_TOKEN`: bearer token
    /// - `KAKEIBO_API_TIMEOUT_SECS`: request timeout
    /// - `KAKEIBO_DISCOUNT_STRATEGY`: `separate` or `flatten`
    pub fn from_env() -> Self {
        let mut config = ApiConfig::default();

        if let Ok(url) = std::env::var("KAKEIBO_API_URL") {
            config.submit_url = url;
        }

        if let Ok(token) = std::env::var("KAKEIBO_API_TOKEN") {
            config.api_token = Some(token);
        }

        if let Ok(timeout) = std::env::var("KAKEIBO_API_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse::<u64>() {
                config.timeout_secs = secs;
            }
        }

        if let Ok(strategy) = std::env::var("KAKEIBO_DISCOUNT_STRATEGY") {
            config.discount_strategy = match strategy.as_str() {
                "flatten" => DiscountStrategy::FlattenIntoPrice,
                _ => DiscountStrategy::SeparateField,
            };
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.timeout_secs, 10);
        assert!(config.api_token.is_none());
        assert_eq!(config.discount_strategy, DiscountStrategy::SeparateField);
    }
}
