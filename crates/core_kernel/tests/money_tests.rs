//! Unit tests for the Money module
//!
//! Tests cover minor-unit construction, rate arithmetic, currency
//! handling, and edge cases.

use core_kernel::{Currency, Money, MoneyError};
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_creates_money_with_correct_amount() {
        let m = Money::new(dec!(100.50), Currency::USD);
        assert_eq!(m.amount(), dec!(100.50));
        assert_eq!(m.currency(), Currency::USD);
    }

    #[test]
    fn test_new_rounds_to_currency_precision() {
        let m = Money::new(dec!(100.123456789), Currency::USD);
        assert_eq!(m.amount(), dec!(100.12));
    }

    #[test]
    fn test_from_minor_converts_cents_correctly() {
        let m = Money::from_minor(10050, Currency::USD);
        assert_eq!(m.amount(), dec!(100.50));
    }

    #[test]
    fn test_zero_creates_zero_amount() {
        let m = Money::zero(Currency::EUR);
        assert!(m.is_zero());
        assert_eq!(m.currency(), Currency::EUR);
    }

    #[test]
    fn test_negative_amount_creation() {
        let m = Money::new(dec!(-100.00), Currency::USD);
        assert!(m.is_negative());
        assert_eq!(m.amount(), dec!(-100.00));
    }
}

mod minor_units {
    use super::*;

    #[test]
    fn test_round_trip_through_minor_units() {
        let m = Money::from_minor(40, Currency::USD);
        assert_eq!(m.as_minor().unwrap(), 40);

        let m = Money::from_minor(0, Currency::USD);
        assert_eq!(m.as_minor().unwrap(), 0);
    }

    #[test]
    fn test_negative_minor_units_round_trip() {
        let m = Money::from_minor(-250, Currency::GBP);
        assert_eq!(m.as_minor().unwrap(), -250);
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_rate_times_count() {
        // 3 offers at 10 plus 2 optimizations at 5 = 40
        let offer_rate = Money::from_minor(10, Currency::USD);
        let order_rate = Money::from_minor(5, Currency::USD);
        let total = offer_rate.times(3) + order_rate.times(2);
        assert_eq!(total, Money::from_minor(40, Currency::USD));
    }

    #[test]
    fn test_times_zero_count_is_zero() {
        let rate = Money::from_minor(10, Currency::USD);
        assert!(rate.times(0).is_zero());
    }

    #[test]
    fn test_checked_add_same_currency() {
        let a = Money::from_minor(30, Currency::USD);
        let b = Money::from_minor(10, Currency::USD);
        assert_eq!(
            a.checked_add(&b).unwrap(),
            Money::from_minor(40, Currency::USD)
        );
    }

    #[test]
    fn test_checked_add_currency_mismatch() {
        let a = Money::from_minor(30, Currency::USD);
        let b = Money::from_minor(10, Currency::INR);
        assert!(matches!(
            a.checked_add(&b),
            Err(MoneyError::CurrencyMismatch(_, _))
        ));
    }

    #[test]
    fn test_checked_sub() {
        let a = Money::from_minor(40, Currency::USD);
        let b = Money::from_minor(15, Currency::USD);
        assert_eq!(
            a.checked_sub(&b).unwrap(),
            Money::from_minor(25, Currency::USD)
        );
    }

    #[test]
    fn test_multiply_by_decimal() {
        let m = Money::from_minor(100, Currency::USD);
        assert_eq!(m.multiply(dec!(0.5)), Money::from_minor(50, Currency::USD));
    }
}

mod ordering {
    use super::*;

    #[test]
    fn test_ordering_within_currency() {
        let small = Money::from_minor(5, Currency::USD);
        let large = Money::from_minor(10, Currency::USD);
        assert!(small < large);
    }

    #[test]
    fn test_ordering_across_currencies_is_undefined() {
        let usd = Money::from_minor(5, Currency::USD);
        let eur = Money::from_minor(5, Currency::EUR);
        assert_eq!(usd.partial_cmp(&eur), None);
    }
}

mod display {
    use super::*;

    #[test]
    fn test_display_includes_symbol_and_precision() {
        let m = Money::from_minor(40, Currency::USD);
        assert_eq!(m.to_string(), "$ 0.40");
    }
}
