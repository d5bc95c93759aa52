use axum::{extract::State, Extension, Json};
use chrono::NaiveDate;
use serde::Serialize;

use crate::auth::middleware::AuthContext;
use crate::error::AppResult;
use crate::models::motivation::{Badge, MotivationStats};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct MotivationOverview {
    pub streak: i32,
    pub level: i32,
    pub last_checkin: Option<NaiveDate>,
    pub badges: Vec<Badge>,
}

/// Current streak, level, and badge collection. Users who have never checked
/// in get the zero-state rather than a 404.
pub async fn get_stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> AppResult<Json<MotivationOverview>> {
    let stats = sqlx::query_as::<_, MotivationStats>(
        "SELECT * FROM motivation_stats WHERE user_id = $1",
    )
    .bind(auth.user_id)
    .fetch_optional(&state.db)
    .await?;

    let badges = sqlx::query_as::<_, Badge>(
        r#"
        SELECT * FROM badges
        WHERE user_id = $1 AND tenant_id = $2
        ORDER BY acquired_at DESC
        "#,
    )
    .bind(auth.user_id)
    .bind(auth.tenant_id)
    .fetch_all(&state.db)
    .await?;

    let (streak, level, last_checkin) = match stats {
        Some(stats) => (stats.streak_days, stats.level, Some(stats.last_checkin)),
        None => (0, 1, None),
    };

    Ok(Json(MotivationOverview {
        streak,
        level,
        last_checkin,
        badges,
    }))
}
