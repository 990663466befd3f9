//! Database queries for the pricing engine.
//!
//! All queries go through sqlx's runtime-checked `query_as`.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;

use super::models::{Studio, StudioSettingsRow};

/// Get a studio by id, ignoring soft-deleted tenants.
pub async fn get_studio(pool: &PgPool, studio_id: Uuid) -> Result<Option<Studio>, AppError> {
    let studio = sqlx::query_as::<_, Studio>(
        r#"
        SELECT id, name, deleted_at
        FROM studios_studio
        WHERE id = $1
          AND deleted_at IS NULL
        "#,
    )
    .bind(studio_id)
    .fetch_optional(pool)
    .await?;

    Ok(studio)
}

/// Get the pricing settings row for a studio, if one has been saved.
pub async fn get_studio_settings(
    pool: &PgPool,
    studio_id: Uuid,
) -> Result<Option<StudioSettingsRow>, AppError> {
    let row = sqlx::query_as::<_, StudioSettingsRow>(
        r#"
        SELECT studio_id, utility_service, utility_product,
               sales_commission, markup_surcharge, updated_at
        FROM pricing_studiosettings
        WHERE studio_id = $1
        "#,
    )
    .bind(studio_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Get all pricing settings rows (for cache warming).
pub async fn get_all_studio_settings(pool: &PgPool) -> Result<Vec<StudioSettingsRow>, AppError> {
    let rows = sqlx::query_as::<_, StudioSettingsRow>(
        r#"
        SELECT s.studio_id, s.utility_service, s.utility_product,
               s.sales_commission, s.markup_surcharge, s.updated_at
        FROM pricing_studiosettings s
        JOIN studios_studio st ON st.id = s.studio_id
        WHERE st.deleted_at IS NULL
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
