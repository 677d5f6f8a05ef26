//! Property-Based Test Generators
//!
//! Proptest strategies for generating random test data that maintains
//! domain invariants.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

use core_kernel::{Currency, Money, PartnerId};
use domain_invoicing::EventType;

/// Strategy for generating valid Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::GBP),
        Just(Currency::INR),
    ]
}

/// Strategy for generating billable event types
pub fn event_type_strategy() -> impl Strategy<Value = EventType> {
    prop_oneof![Just(EventType::OfferCreated), Just(EventType::OrderOptimized)]
}

/// Strategy for generating realistic event counts
pub fn event_count_strategy() -> impl Strategy<Value = u64> {
    0u64..100_000u64
}

/// Strategy for generating non-negative per-event rates in minor units
pub fn rate_minor_strategy() -> impl Strategy<Value = i64> {
    0i64..10_000i64
}

/// Strategy for generating non-negative USD Money values
pub fn usd_money_strategy() -> impl Strategy<Value = Money> {
    (0i64..1_000_000_000i64).prop_map(|minor| Money::from_minor(minor, Currency::USD))
}

/// Strategy for generating opaque partner identifiers
pub fn partner_id_strategy() -> impl Strategy<Value = PartnerId> {
    "[A-Z]{1,3}-[0-9]{1,6}".prop_map(PartnerId::new)
}

/// Strategy for generating billing run instants across month boundaries
pub fn run_instant_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (2020i32..2030i32, 1u32..13u32, 1u32..29u32, 0u32..24u32).prop_map(
        |(year, month, day, hour)| Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_usd_money_is_never_negative(money in usd_money_strategy()) {
            prop_assert!(!money.is_negative());
        }

        #[test]
        fn generated_run_instants_always_have_a_due_date(instant in run_instant_strategy()) {
            prop_assert!(core_kernel::due_date_after(instant).is_ok());
        }
    }
}
