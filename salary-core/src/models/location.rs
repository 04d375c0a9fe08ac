use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An office location selectable in the template form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
}

/// Location-specific allowance amounts. Fetched when the selected
/// location changes; both values remain manually overridable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationAllowance {
    pub location_id: i64,
    pub per_day_allowance: Decimal,
    pub pg_rent: Decimal,
}
