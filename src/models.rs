//! Persisted data model: user profile and delivery orders.
//!
//! JSON field names match the persisted layout of the client
//! (`pickupAddress`, `driverName`, ...), so existing on-device records
//! deserialize unchanged.

use serde::{Deserialize, Serialize};

/// Registered user profile. The store holds at most one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Opaque identifier, immutable once assigned
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Delivery order status.
///
/// Advances strictly forward through `searching → assigned → in_transit →
/// delivered`; `delivered` is terminal. Unrecognized persisted values fall
/// back to the initial state instead of failing deserialization.
///
/// `Searching` is declared last because `#[serde(other)]` must sit on the
/// final variant; the lifecycle order lives in [`OrderStatus::next`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Assigned,
    InTransit,
    Delivered,
    #[default]
    #[serde(other)]
    Searching,
}

impl OrderStatus {
    /// The next status in the fixed forward sequence, `None` at terminal.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Searching => Some(Self::Assigned),
            Self::Assigned => Some(Self::InTransit),
            Self::InTransit => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// One delivery booking record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// `LDPS` + uppercase base36 epoch millis
    pub id: String,
    pub pickup_address: String,
    pub drop_address: String,
    /// Estimated distance in km, one fractional digit
    pub distance: f64,
    /// Total fare in whole currency units
    pub price: i64,
    #[serde(default)]
    pub status: OrderStatus,
    /// RFC 3339 creation timestamp
    pub created_at: String,
    /// Set at the `assigned` transition, never cleared afterwards
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_name: Option<String>,
    /// One fractional digit, in [4.0, 5.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_rating: Option<f64>,
}
