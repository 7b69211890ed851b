//! Storefront commerce configuration.

use crate::money::Currency;
use serde::{Deserialize, Serialize};

/// Default key of the persisted cart slot.
pub const DEFAULT_CART_KEY: &str = "cart";

/// Tax rate in basis points (16% IVA).
pub const DEFAULT_TAX_RATE_BPS: i64 = 1600;

/// Configuration for the cart store and pricing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CommerceConfig {
    /// Currency for all cart and quotation amounts.
    pub currency: Currency,
    /// Tax rate in basis points applied to the discounted subtotal.
    pub tax_rate_bps: i64,
    /// Key of the persisted cart slot.
    pub cart_key: String,
}

impl Default for CommerceConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            cart_key: DEFAULT_CART_KEY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = CommerceConfig::default();
        assert_eq!(config.currency, Currency::MXN);
        assert_eq!(config.tax_rate_bps, 1600);
        assert_eq!(config.cart_key, "cart");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: CommerceConfig =
            serde_json::from_str(r#"{ "cart_key": "cart:kiosk" }"#).unwrap();
        assert_eq!(config.cart_key, "cart:kiosk");
        assert_eq!(config.tax_rate_bps, 1600);
    }
}
