//! Event-count queries
//!
//! An `EventQuery` is ephemeral: built by the billing run, sent to the
//! event source, never persisted. The `as_of` instant is captured once per
//! partner at the top of that partner's iteration, so both event-type
//! queries for one partner observe the same instant while different
//! partners may observe slightly different ones.

use chrono::{DateTime, Utc};

use core_kernel::PartnerId;

use crate::rates::EventType;

/// A request for the count of matching events, as of an instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    pub event_type: EventType,
    pub partner_id: PartnerId,
    pub as_of: DateTime<Utc>,
}

impl EventQuery {
    pub fn new(event_type: EventType, partner_id: PartnerId, as_of: DateTime<Utc>) -> Self {
        Self {
            event_type,
            partner_id,
            as_of,
        }
    }

    /// The `timestamp` query parameter value: epoch milliseconds
    pub fn as_of_millis(&self) -> i64 {
        self.as_of.timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn as_of_is_epoch_millis_on_the_wire() {
        let as_of = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let query = EventQuery::new(EventType::OfferCreated, PartnerId::new("P1"), as_of);
        assert_eq!(query.as_of_millis(), 1_704_067_200_000);
    }
}
