//! Money calculation utilities using rust_decimal for precision
//!
//! All order-total and share arithmetic is done with `Decimal` internally,
//! then converted to `f64` for storage and serialization.

use rust_decimal::prelude::*;

/// Rounding: monetary values carry 2 decimal places, half away from zero
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Convert an f64 amount to Decimal for calculation
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert a Decimal back to f64 for storage, rounded to 2 places
pub fn to_f64(value: Decimal) -> f64 {
    round2(value).to_f64().unwrap_or(0.0)
}

/// Round to 2 decimal places, midpoint away from zero
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Line total of one order item: price x quantity
pub fn line_total(price: f64, quantity: i64) -> Decimal {
    to_decimal(price) * Decimal::from(quantity)
}

/// True when two amounts are equal within one cent
pub fn amounts_match(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() <= MONEY_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        assert_eq!(line_total(10.00, 2), Decimal::new(2000, 2));
        assert_eq!(line_total(5.00, 1), Decimal::new(500, 2));
    }

    #[test]
    fn test_round2_half_away_from_zero() {
        assert_eq!(round2(Decimal::new(12345, 3)), Decimal::new(1235, 2)); // 12.345 -> 12.35
        assert_eq!(round2(Decimal::new(-12345, 3)), Decimal::new(-1235, 2));
    }

    #[test]
    fn test_tolerance() {
        let total = Decimal::new(3000, 2); // 30.00
        assert!(amounts_match(total, Decimal::new(3001, 2)));
        assert!(amounts_match(total, Decimal::new(2999, 2)));
        assert!(!amounts_match(total, Decimal::new(3002, 2)));
    }

    #[test]
    fn test_f64_roundtrip() {
        let d = to_decimal(19.99);
        assert_eq!(to_f64(d), 19.99);
    }
}
