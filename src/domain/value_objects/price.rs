use serde::{Deserialize, Serialize};

/// A listing price. Currency-agnostic in storage, rendered as BRL.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    /// Returns None for NaN and infinities
    pub fn new(value: f64) -> Option<Self> {
        value.is_finite().then_some(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Format as Brazilian reais, e.g. `R$ 150.000,00`
    pub fn format_brl(&self) -> String {
        format_brl(self.0)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format_brl())
    }
}

/// Format a value the way pt-BR currency formatting does for BRL
pub fn format_brl(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    // "-0,00" is not a thing
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}R$ {},{}", sign, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(150000.0), "R$ 150.000,00");
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(999.5), "R$ 999,50");
        assert_eq!(format_brl(1234567.891), "R$ 1.234.567,89");
        assert_eq!(format_brl(-1.0), "-R$ 1,00");
        assert_eq!(format_brl(-0.001), "R$ 0,00");
    }

    #[test]
    fn test_price_rejects_non_finite() {
        assert!(Price::new(f64::NAN).is_none());
        assert!(Price::new(f64::INFINITY).is_none());
        assert_eq!(Price::new(10.0).unwrap().to_string(), "R$ 10,00");
    }
}
