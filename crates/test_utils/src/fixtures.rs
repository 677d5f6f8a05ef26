//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for common entities across the invoicing
//! system, designed to be consistent and predictable for unit tests.

use chrono::{DateTime, TimeZone, Utc};
use fake::faker::internet::en::SafeEmail;
use fake::Fake;

use core_kernel::{Currency, Money, PartnerId};
use domain_invoicing::{PartnerRecord, RateTable};

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// The standard per-event rate for created offers, in minor units
    pub fn offer_rate() -> Money {
        Money::from_minor(10, Currency::USD)
    }

    /// The standard per-event rate for optimized orders, in minor units
    pub fn order_rate() -> Money {
        Money::from_minor(5, Currency::USD)
    }

    /// A typical billing-run total: 3 offers and 2 orders at standard rates
    pub fn usd_40() -> Money {
        Money::from_minor(40, Currency::USD)
    }

    /// A zero amount in USD
    pub fn usd_zero() -> Money {
        Money::zero(Currency::USD)
    }

    /// A EUR amount for currency mismatch tests
    pub fn eur_100() -> Money {
        Money::from_minor(100, Currency::EUR)
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard billing run instant (Jan 15, 2024, 09:00 UTC)
    pub fn run_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()
    }

    /// Run instant whose due date needs month-end clamping (Jan 31)
    pub fn month_end_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 0).unwrap()
    }

    /// Run instant in a non-leap year (Jan 31, 2025)
    pub fn non_leap_month_end_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 31, 12, 0, 0).unwrap()
    }
}

/// Fixture for partner roster data
pub struct PartnerFixtures;

impl PartnerFixtures {
    /// An active partner with the given id
    pub fn active(id: &str) -> PartnerRecord {
        PartnerRecord {
            partner_id: PartnerId::new(id),
            is_active: 1,
        }
    }

    /// An inactive partner with the given id
    pub fn inactive(id: &str) -> PartnerRecord {
        PartnerRecord {
            partner_id: PartnerId::new(id),
            is_active: 0,
        }
    }

    /// A roster with one active and one inactive partner
    pub fn mixed_roster() -> Vec<PartnerRecord> {
        vec![Self::active("P1"), Self::inactive("P2")]
    }

    /// A random but well-formed email address for notification tests
    pub fn recipient() -> String {
        SafeEmail().fake()
    }
}

/// Fixture for rate tables
pub struct RateFixtures;

impl RateFixtures {
    /// The standard production rate table
    pub fn standard() -> RateTable {
        RateTable::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_rates_produce_the_canonical_total() {
        let total = MoneyFixtures::offer_rate().times(3) + MoneyFixtures::order_rate().times(2);
        assert_eq!(total, MoneyFixtures::usd_40());
    }

    #[test]
    fn recipient_is_a_plausible_address() {
        assert!(PartnerFixtures::recipient().contains('@'));
    }
}
