//! Display formatting for whole-unit amounts: `KES 16,500`.

use agrismart_core::Money;

pub const DEFAULT_CURRENCY: &str = "KES";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormatter {
    code: String,
}

impl CurrencyFormatter {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Currency code, a space, then the amount with comma thousands separators.
    pub fn format(&self, amount: Money) -> String {
        format!("{} {}", self.code, group_thousands(amount.amount()))
    }
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY)
    }
}

/// Format with the default currency code.
pub fn format_currency(amount: Money) -> String {
    CurrencyFormatter::default().format(amount)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_commas() {
        assert_eq!(format_currency(Money::new(16_500)), "KES 16,500");
        assert_eq!(format_currency(Money::new(1_234_567)), "KES 1,234,567");
        assert_eq!(format_currency(Money::new(999)), "KES 999");
        assert_eq!(format_currency(Money::new(1000)), "KES 1,000");
    }

    #[test]
    fn zero_has_no_separator() {
        assert_eq!(format_currency(Money::ZERO), "KES 0");
    }

    #[test]
    fn code_is_configurable() {
        let ugx = CurrencyFormatter::new("UGX");
        assert_eq!(ugx.format(Money::new(250_000)), "UGX 250,000");
    }
}
