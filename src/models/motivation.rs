use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-user check-in state. Keyed by `user_id` alone; `tenant_id` is carried
/// along so reporting can attribute the streak to a workspace.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MotivationStats {
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub streak_days: i32,
    pub level: i32,
    pub last_checkin: NaiveDate,
    pub updated_at: DateTime<Utc>,
}

/// Payload for the stats upsert. `updated_at` is stamped by the store at
/// write time, so the engine itself never reads the clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsUpdate {
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub streak_days: i32,
    pub level: i32,
    pub last_checkin: NaiveDate,
}

/// An earned achievement. Append-only: `(tenant_id, user_id, code)` is
/// inserted at most once and never revoked.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Badge {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub code: String,
    pub name: String,
    pub acquired_at: DateTime<Utc>,
}
