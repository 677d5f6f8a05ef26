//! Partner roster records
//!
//! Partners are external entities; this crate only reads their roster.
//! The wire format uses camelCase keys and encodes activity as an integer
//! flag (1 = active), which is preserved here so the directory gateway can
//! deserialize responses without a translation layer.

use serde::{Deserialize, Serialize};

use core_kernel::PartnerId;

/// One partner as reported by the external partner directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerRecord {
    #[serde(rename = "partnerId")]
    pub partner_id: PartnerId,
    /// Activity flag as transmitted: 1 = active, anything else = inactive
    #[serde(rename = "isActive")]
    pub is_active: i32,
}

impl PartnerRecord {
    pub fn new(partner_id: impl Into<PartnerId>, is_active: i32) -> Self {
        Self {
            partner_id: partner_id.into(),
            is_active,
        }
    }

    /// Only partners with an activity flag of exactly 1 are billed
    pub fn is_active(&self) -> bool {
        self.is_active == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_flag_one_is_active() {
        assert!(PartnerRecord::new("P1", 1).is_active());
        assert!(!PartnerRecord::new("P2", 0).is_active());
        assert!(!PartnerRecord::new("P3", 2).is_active());
        assert!(!PartnerRecord::new("P4", -1).is_active());
    }

    #[test]
    fn deserializes_the_wire_shape() {
        let record: PartnerRecord =
            serde_json::from_str(r#"{"partnerId": "P1", "isActive": 1}"#).unwrap();
        assert_eq!(record.partner_id.as_str(), "P1");
        assert!(record.is_active());
    }
}
