//! Billable event types and the rate table
//!
//! The rate table is one ordered mapping from event type to unit price.
//! The billing run iterates this single mapping for both its event-count
//! queries and its amount computation, so a rated type can never go
//! unqueried and a queried type can never go unrated. Adding a billable
//! event type is one entry here.

use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{Currency, Money};

/// A countable occurrence attributable to a partner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    OfferCreated,
    OrderOptimized,
}

impl EventType {
    /// Wire value used as the `eventType` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::OfferCreated => "OFFER_CREATED",
            EventType::OrderOptimized => "ORDER_OPTIMIZED",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static mapping from event type to unit price
///
/// Entries keep their insertion order; the billing run observes event
/// types in exactly this order, though correctness only depends on the
/// sum.
#[derive(Debug, Clone)]
pub struct RateTable {
    entries: Vec<(EventType, Money)>,
    currency: Currency,
}

impl RateTable {
    /// Builds a rate table from entries sharing one currency
    ///
    /// # Panics
    ///
    /// Panics on an empty table, a negative rate, or mixed currencies;
    /// rate tables are process-lifetime constants, so a bad one is a
    /// programming error.
    pub fn new(entries: Vec<(EventType, Money)>) -> Self {
        assert!(!entries.is_empty(), "rate table must not be empty");
        let currency = entries[0].1.currency();
        for (event_type, rate) in &entries {
            assert!(
                !rate.is_negative(),
                "negative rate for event type {event_type}"
            );
            assert_eq!(
                rate.currency(),
                currency,
                "mixed currencies in rate table"
            );
        }
        Self { entries, currency }
    }

    /// The standard platform rates: 10 minor units per created offer,
    /// 5 minor units per optimized order.
    pub fn standard() -> Self {
        Self::new(vec![
            (
                EventType::OfferCreated,
                Money::from_minor(10, Currency::USD),
            ),
            (
                EventType::OrderOptimized,
                Money::from_minor(5, Currency::USD),
            ),
        ])
    }

    /// Iterates the rated event types in order
    pub fn iter(&self) -> impl Iterator<Item = (EventType, Money)> + '_ {
        self.entries.iter().copied()
    }

    /// Looks up the rate for an event type
    pub fn rate(&self, event_type: EventType) -> Option<Money> {
        self.entries
            .iter()
            .find(|(t, _)| *t == event_type)
            .map(|(_, rate)| *rate)
    }

    /// The currency shared by every rate in the table
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Number of rated event types
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_has_both_event_types() {
        let table = RateTable::standard();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.rate(EventType::OfferCreated),
            Some(Money::from_minor(10, Currency::USD))
        );
        assert_eq!(
            table.rate(EventType::OrderOptimized),
            Some(Money::from_minor(5, Currency::USD))
        );
    }

    #[test]
    fn iteration_order_is_insertion_order() {
        let table = RateTable::standard();
        let types: Vec<EventType> = table.iter().map(|(t, _)| t).collect();
        assert_eq!(types, vec![EventType::OfferCreated, EventType::OrderOptimized]);
    }

    #[test]
    #[should_panic(expected = "rate table must not be empty")]
    fn empty_table_panics() {
        RateTable::new(vec![]);
    }

    #[test]
    #[should_panic(expected = "mixed currencies")]
    fn mixed_currency_table_panics() {
        RateTable::new(vec![
            (EventType::OfferCreated, Money::from_minor(10, Currency::USD)),
            (EventType::OrderOptimized, Money::from_minor(5, Currency::EUR)),
        ]);
    }

    #[test]
    fn event_type_wire_values() {
        assert_eq!(EventType::OfferCreated.as_str(), "OFFER_CREATED");
        assert_eq!(EventType::OrderOptimized.as_str(), "ORDER_OPTIMIZED");
    }
}
