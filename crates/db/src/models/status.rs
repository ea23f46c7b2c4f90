//! Lifecycle status enums mapped to PostgreSQL enum types.
//!
//! The variant names (snake_case) match the labels declared in the
//! migrations, and the same spelling is used on the wire.

use std::fmt;
use std::str::FromStr;

use dealership_core::error::CoreError;
use serde::{Deserialize, Serialize};

macro_rules! impl_status_labels {
    ($name:ident { $( $variant:ident => $label:literal ),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// The database / wire label.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $label => Ok($name::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        concat!("Unknown ", stringify!($name), " '{}'. Must be one of: {}"),
                        other,
                        [$( $label ),+].join(", "),
                    ))),
                }
            }
        }
    };
}

/// Vehicle listing lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "vehicle_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    Reserved,
    Sold,
}

impl_status_labels!(VehicleStatus {
    Available => "available",
    Reserved => "reserved",
    Sold => "sold",
});

/// Gear product publication state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "gear_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum GearStatus {
    Active,
    Draft,
    Archived,
}

impl_status_labels!(GearStatus {
    Active => "active",
    Draft => "draft",
    Archived => "archived",
});

/// Sales pipeline stage of a lead. Any stage may be set at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "lead_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    NewLead,
    Contacted,
    Negotiation,
    TestRide,
    Sold,
    Lost,
}

impl_status_labels!(LeadStatus {
    NewLead => "new_lead",
    Contacted => "contacted",
    Negotiation => "negotiation",
    TestRide => "test_ride",
    Sold => "sold",
    Lost => "lost",
});

impl VehicleStatus {
    /// Whether a listing in this state may be shown on the public site.
    pub fn is_public(self) -> bool {
        matches!(self, VehicleStatus::Available | VehicleStatus::Reserved)
    }
}

impl GearStatus {
    pub fn is_public(self) -> bool {
        self == GearStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_str() {
        for s in LeadStatus::ALL {
            assert_eq!(s.as_str().parse::<LeadStatus>().unwrap(), *s);
        }
        for s in VehicleStatus::ALL {
            assert_eq!(s.as_str().parse::<VehicleStatus>().unwrap(), *s);
        }
        for s in GearStatus::ALL {
            assert_eq!(s.as_str().parse::<GearStatus>().unwrap(), *s);
        }
    }

    #[test]
    fn unknown_label_lists_valid_values() {
        let err = "pending".parse::<LeadStatus>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Unknown LeadStatus 'pending'"));
        assert!(msg.contains("new_lead"));
    }

    #[test]
    fn serde_uses_snake_case_labels() {
        assert_eq!(
            serde_json::to_string(&LeadStatus::TestRide).unwrap(),
            "\"test_ride\""
        );
        let parsed: LeadStatus = serde_json::from_str("\"new_lead\"").unwrap();
        assert_eq!(parsed, LeadStatus::NewLead);
    }

    #[test]
    fn public_visibility() {
        assert!(VehicleStatus::Available.is_public());
        assert!(VehicleStatus::Reserved.is_public());
        assert!(!VehicleStatus::Sold.is_public());
        assert!(GearStatus::Active.is_public());
        assert!(!GearStatus::Draft.is_public());
    }
}
