//! Exchange quotes fetched over HTTP.
//!
//! The configured URL must return a JSON document; the rate is read at a JSON
//! pointer and may be a number or a numeric string. Successful quotes are
//! cached for `cache_ttl_secs`.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use rust_decimal::Decimal;
use serde_json::Value;
use tally_core::currency::{Quote, QuoteError, QuoteProvider};
use tally_shared::config::QuoteConfig;
use tracing::{debug, warn};

/// [`QuoteProvider`] backed by a remote JSON endpoint.
#[derive(Clone)]
pub struct HttpQuoteProvider {
    client: reqwest::Client,
    config: QuoteConfig,
    cache: Cache<(), Quote>,
}

impl HttpQuoteProvider {
    /// Creates a provider from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: QuoteConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(Duration::from_secs(config.cache_ttl_secs))
            .build();
        Ok(Self {
            client,
            config,
            cache,
        })
    }

    async fn fetch(&self) -> Result<Quote, QuoteError> {
        let document: Value = self
            .client
            .get(&self.config.url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| QuoteError::Unreachable(e.to_string()))?
            .json()
            .await
            .map_err(|e| QuoteError::Malformed(e.to_string()))?;

        let quote = parse_quote(&document, &self.config)?;
        debug!(currency = %quote.currency, rate = %quote.rate, "Fetched exchange quote");
        Ok(quote)
    }
}

/// Extracts the rate at the configured pointer.
///
/// # Errors
///
/// Returns `Malformed` if the pointer is missing or not numeric, and
/// `InvalidRate` if the rate is not positive.
pub fn parse_quote(document: &Value, config: &QuoteConfig) -> Result<Quote, QuoteError> {
    let raw = match document.pointer(&config.pointer) {
        Some(Value::Number(n)) => Decimal::from_str(&n.to_string()),
        Some(Value::String(s)) => Decimal::from_str(s.trim()),
        _ => {
            return Err(QuoteError::Malformed(format!(
                "no numeric value at {}",
                config.pointer
            )));
        }
    }
    .map_err(|e| QuoteError::Malformed(e.to_string()))?;

    if raw <= Decimal::ZERO {
        return Err(QuoteError::InvalidRate(raw));
    }

    let rate = if config.invert {
        Decimal::ONE
            .checked_div(raw)
            .ok_or_else(|| QuoteError::Malformed(format!("cannot invert {raw}")))?
    } else {
        raw
    };

    Quote::new(config.currency, rate)
}

#[async_trait]
impl QuoteProvider for HttpQuoteProvider {
    async fn quote(&self) -> Result<Quote, QuoteError> {
        if !self.config.enabled {
            return Err(QuoteError::Disabled);
        }

        self.cache
            .try_get_with((), self.fetch())
            .await
            .map_err(|e: Arc<QuoteError>| {
                warn!(error = %e, url = %self.config.url, "Exchange quote unavailable");
                (*e).clone()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use tally_shared::types::Currency;

    fn config(pointer: &str, invert: bool) -> QuoteConfig {
        QuoteConfig {
            enabled: true,
            url: "http://127.0.0.1:9/quote".to_string(),
            pointer: pointer.to_string(),
            currency: Currency::Usd,
            invert,
            timeout_secs: 1,
            cache_ttl_secs: 60,
        }
    }

    #[test]
    fn test_parse_numeric_and_string_rates() {
        let doc = json!({ "rate": 0.00125, "venta": "800" });
        let quote = parse_quote(&doc, &config("/rate", false)).unwrap();
        assert_eq!(quote.rate, dec!(0.00125));
        assert_eq!(quote.currency, Currency::Usd);

        let quote = parse_quote(&doc, &config("/venta", false)).unwrap();
        assert_eq!(quote.rate, dec!(800));
    }

    #[test]
    fn test_parse_inverted_rate() {
        let doc = json!({ "venta": "800" });
        let quote = parse_quote(&doc, &config("/venta", true)).unwrap();
        assert_eq!(quote.rate, dec!(0.00125));
    }

    #[test]
    fn test_parse_rejects_bad_documents() {
        let doc = json!({ "rate": "abc", "zero": 0, "nested": { "x": 1 } });
        assert!(matches!(
            parse_quote(&doc, &config("/missing", false)),
            Err(QuoteError::Malformed(_))
        ));
        assert!(matches!(
            parse_quote(&doc, &config("/rate", false)),
            Err(QuoteError::Malformed(_))
        ));
        assert!(matches!(
            parse_quote(&doc, &config("/nested", false)),
            Err(QuoteError::Malformed(_))
        ));
        assert!(matches!(
            parse_quote(&doc, &config("/zero", true)),
            Err(QuoteError::InvalidRate(_))
        ));
    }

    #[tokio::test]
    async fn test_disabled_provider() {
        let mut cfg = config("/rate", false);
        cfg.enabled = false;
        let provider = HttpQuoteProvider::new(cfg).unwrap();
        assert!(matches!(provider.quote().await, Err(QuoteError::Disabled)));
    }

    #[tokio::test]
    async fn test_unreachable_source() {
        let provider = HttpQuoteProvider::new(config("/rate", false)).unwrap();
        assert!(matches!(
            provider.quote().await,
            Err(QuoteError::Unreachable(_))
        ));
    }
}
