//! Database models for pricing queries.
//!
//! These models use sqlx's FromRow derive for direct database deserialization.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-studio pricing settings from pricing_studiosettings.
///
/// The studio app persists the four rates as text (the settings form writes
/// whatever the user typed); validation happens in the `config` module.
#[derive(Debug, Clone, FromRow)]
pub struct StudioSettingsRow {
    pub studio_id: Uuid,
    pub utility_service: Option<String>,
    pub utility_product: Option<String>,
    pub sales_commission: Option<String>,
    pub markup_surcharge: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Studio (tenant) from studios_studio, used to reject pricing requests
/// for deleted tenants.
#[derive(Debug, Clone, FromRow)]
pub struct Studio {
    pub id: Uuid,
    pub name: String,
    pub deleted_at: Option<DateTime<Utc>>,
}
