//! Money formatting for insights and terminal output

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats amounts as `$1,234` / `-$1,234.50`
#[derive(Debug, Clone)]
pub struct MoneyFormat {
    pub symbol: String,
    /// Digits after the decimal point
    pub precision: u32,
    pub thousands_separator: char,
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            precision: 0,
            thousands_separator: ',',
        }
    }
}

impl MoneyFormat {
    pub fn with_symbol(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn format(&self, value: Decimal) -> String {
        let mut rounded = value
            .abs()
            .round_dp_with_strategy(self.precision, RoundingStrategy::MidpointNearestEven);
        rounded.rescale(self.precision);

        let digits = rounded.to_string();
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (digits.as_str(), None),
        };

        let mut out = String::new();
        if value.is_sign_negative() && !rounded.is_zero() {
            out.push('-');
        }
        out.push_str(&self.symbol);

        let len = int_part.len();
        for (idx, ch) in int_part.chars().enumerate() {
            if idx > 0 && (len - idx) % 3 == 0 {
                out.push(self.thousands_separator);
            }
            out.push(ch);
        }
        if let Some(frac) = frac_part {
            out.push('.');
            out.push_str(frac);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_whole_amounts_with_separators() {
        let fmt = MoneyFormat::default();
        assert_eq!(fmt.format(dec!(0)), "$0");
        assert_eq!(fmt.format(dec!(150)), "$150");
        assert_eq!(fmt.format(dec!(1234.4)), "$1,234");
        assert_eq!(fmt.format(dec!(1234567)), "$1,234,567");
    }

    #[test]
    fn test_midpoint_rounds_to_even() {
        let fmt = MoneyFormat::default();
        assert_eq!(fmt.format(dec!(2.5)), "$2");
        assert_eq!(fmt.format(dec!(3.5)), "$4");
    }

    #[test]
    fn test_negative_and_precision() {
        let fmt = MoneyFormat::with_symbol("€").precision(2);
        assert_eq!(fmt.format(dec!(-1500.5)), "-€1,500.50");
        assert_eq!(fmt.format(dec!(-0.001)), "€0.00");
    }
}
