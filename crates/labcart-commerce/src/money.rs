//! Money type for monetary values.
//!
//! Amounts are stored and summed as integers in the smallest unit of the
//! currency (cents/centavos); conversion to major units happens only at
//! display formatting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Basis-point denominator: 10000 basis points = 100%.
pub const BPS_SCALE: i64 = 10_000;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Mexican peso, the storefront default.
    #[default]
    MXN,
    USD,
    EUR,
}

impl Currency {
    /// Currency code (e.g., "MXN").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::MXN => "MXN",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    /// Currency symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::MXN => "MX$",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Number of minor-unit decimal places.
    pub fn decimal_places(&self) -> u32 {
        2
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value in minor currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest currency unit (cents/centavos).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a value from minor units.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Zero in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Checked addition. `None` on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let amount = self.amount_cents.checked_add(other.amount_cents)?;
        Some(Money::new(amount, self.currency))
    }

    /// Checked subtraction. `None` on currency mismatch or overflow.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let amount = self.amount_cents.checked_sub(other.amount_cents)?;
        Some(Money::new(amount, self.currency))
    }

    /// Checked multiplication by a quantity.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        let amount = self.amount_cents.checked_mul(factor)?;
        Some(Money::new(amount, self.currency))
    }

    /// Scale by basis points (1000 bps = 10%), rounding half away from zero.
    ///
    /// Widens through i128 so any representable amount scales without
    /// intermediate overflow.
    pub fn try_scale_bps(&self, basis_points: i64) -> Option<Money> {
        let numer = (self.amount_cents as i128).checked_mul(basis_points as i128)?;
        let half = (BPS_SCALE / 2) as i128;
        let scaled = if numer >= 0 {
            (numer + half) / BPS_SCALE as i128
        } else {
            (numer - half) / BPS_SCALE as i128
        };
        let amount = i64::try_from(scaled).ok()?;
        Some(Money::new(amount, self.currency))
    }

    /// Checked sum over an iterator. `None` on mismatch or overflow.
    pub fn try_sum<'a>(
        iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        let mut acc = Money::zero(currency);
        for m in iter {
            acc = acc.try_add(m)?;
        }
        Some(acc)
    }

    /// Major-unit value, for formatting only.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Display string with symbol (e.g., "MX$1,234.50").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Display string without symbol, with thousands separators.
    pub fn display_amount(&self) -> String {
        let negative = self.amount_cents < 0;
        let abs = self.amount_cents.unsigned_abs();
        let divisor = 10_u64.pow(self.currency.decimal_places());
        let major = abs / divisor;
        let minor = abs % divisor;

        let mut grouped = String::new();
        let digits = major.to_string();
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }

        let places = self.currency.decimal_places() as usize;
        let sign = if negative { "-" } else { "" };
        format!("{sign}{grouped}.{minor:0places$}")
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_addition() {
        let a = Money::new(1000, Currency::MXN);
        let b = Money::new(500, Currency::MXN);
        assert_eq!(a.try_add(&b).unwrap().amount_cents, 1500);
    }

    #[test]
    fn currency_mismatch_is_none() {
        let a = Money::new(1000, Currency::MXN);
        let b = Money::new(1000, Currency::USD);
        assert!(a.try_add(&b).is_none());
        assert!(a.try_subtract(&b).is_none());
    }

    #[test]
    fn overflow_is_none() {
        let a = Money::new(i64::MAX, Currency::MXN);
        let b = Money::new(1, Currency::MXN);
        assert!(a.try_add(&b).is_none());
        assert!(a.try_multiply(2).is_none());
    }

    #[test]
    fn scale_bps_ten_percent() {
        let m = Money::new(20000, Currency::MXN);
        assert_eq!(m.try_scale_bps(1000).unwrap().amount_cents, 2000);
    }

    #[test]
    fn scale_bps_tax_rate() {
        let m = Money::new(18000, Currency::MXN);
        assert_eq!(m.try_scale_bps(1600).unwrap().amount_cents, 2880);
    }

    #[test]
    fn scale_bps_rounds_half_up() {
        // 333 * 5000 / 10000 = 166.5 -> 167
        let m = Money::new(333, Currency::MXN);
        assert_eq!(m.try_scale_bps(5000).unwrap().amount_cents, 167);
    }

    #[test]
    fn display_groups_thousands() {
        let m = Money::new(123_450, Currency::MXN);
        assert_eq!(m.display(), "MX$1,234.50");

        let m = Money::new(0, Currency::USD);
        assert_eq!(m.display(), "$0.00");
    }

    #[test]
    fn try_sum_over_items() {
        let items = vec![
            Money::new(1000, Currency::MXN),
            Money::new(2500, Currency::MXN),
        ];
        let sum = Money::try_sum(items.iter(), Currency::MXN).unwrap();
        assert_eq!(sum.amount_cents, 3500);
    }
}
