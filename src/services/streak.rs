use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::motivation::{Badge, MotivationStats, StatsUpdate};

#[derive(Debug, Clone, Copy)]
pub struct BadgeThreshold {
    pub code: &'static str,
    pub days: i32,
    pub name: &'static str,
}

pub const BADGE_THRESHOLDS: &[BadgeThreshold] = &[
    BadgeThreshold {
        code: "streak_3",
        days: 3,
        name: "连续打卡 3 天",
    },
    BadgeThreshold {
        code: "streak_7",
        days: 7,
        name: "连续打卡 7 天",
    },
    BadgeThreshold {
        code: "streak_30",
        days: 30,
        name: "连续打卡 30 天",
    },
];

pub fn level_for(streak_days: i32) -> i32 {
    if streak_days >= 30 {
        4
    } else if streak_days >= 14 {
        3
    } else if streak_days >= 7 {
        2
    } else {
        1
    }
}

/// Persistence seam for the check-in engine. Timestamps (`updated_at`,
/// `acquired_at`) are stamped by the store at write time; the engine itself
/// never reads the clock.
#[async_trait]
pub trait MotivationStore: Send + Sync {
    async fn load_stats(&self, user_id: Uuid) -> AppResult<Option<MotivationStats>>;
    async fn upsert_stats(&self, update: &StatsUpdate) -> AppResult<()>;
    async fn list_badges(&self, tenant_id: Uuid, user_id: Uuid) -> AppResult<Vec<Badge>>;
    async fn insert_badges(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        thresholds: &[BadgeThreshold],
    ) -> AppResult<Vec<Badge>>;
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckinOutcome {
    pub streak_days: i32,
    pub level: i32,
    /// Badges inserted by this call. Empty on the same-day short-circuit.
    pub awarded_badges: Vec<Badge>,
    /// The user's full badge list after this call.
    pub badges: Vec<Badge>,
}

impl CheckinOutcome {
    /// Fallback the journal flow uses when the engine fails: the primary
    /// action (saving the entry) must never be blocked by a broken streak.
    pub fn degraded() -> Self {
        Self {
            streak_days: 1,
            level: 1,
            awarded_badges: Vec::new(),
            badges: Vec::new(),
        }
    }
}

/// Record a daily check-in and award any streak badges the user just earned.
///
/// `today` is supplied by the caller, already bucketed into the configured
/// check-in timezone. Re-checking in on the same day is a no-op that returns
/// the persisted state without writing. A check-in on the day after
/// `last_checkin` extends the streak; any larger gap resets it to 1. The
/// level only ever goes up, even across a reset.
///
/// There is no transaction across the stats upsert and the badge inserts: if
/// badge insertion fails after the upsert committed, the streak advances and
/// the missing badge is re-evaluated (ownership is re-checked) on the next
/// successful check-in.
pub async fn checkin_and_reward<S: MotivationStore + ?Sized>(
    store: &S,
    tenant_id: Uuid,
    user_id: Uuid,
    today: NaiveDate,
) -> AppResult<CheckinOutcome> {
    let existing = store.load_stats(user_id).await?;

    if let Some(stats) = &existing {
        if stats.last_checkin == today {
            let badges = store.list_badges(tenant_id, user_id).await?;
            return Ok(CheckinOutcome {
                streak_days: stats.streak_days,
                level: stats.level,
                awarded_badges: Vec::new(),
                badges,
            });
        }
    }

    let yesterday = today - Duration::days(1);
    let (streak_days, level) = match &existing {
        Some(stats) => {
            let streak_days = if stats.last_checkin == yesterday {
                stats.streak_days + 1
            } else {
                1
            };
            (streak_days, stats.level.max(level_for(streak_days)))
        }
        None => (1, level_for(1)),
    };

    store
        .upsert_stats(&StatsUpdate {
            user_id,
            tenant_id,
            streak_days,
            level,
            last_checkin: today,
        })
        .await?;

    let owned = store.list_badges(tenant_id, user_id).await?;
    let owned_codes: HashSet<&str> = owned.iter().map(|b| b.code.as_str()).collect();

    let to_award: Vec<BadgeThreshold> = BADGE_THRESHOLDS
        .iter()
        .filter(|t| streak_days >= t.days && !owned_codes.contains(t.code))
        .copied()
        .collect();

    let awarded_badges = if to_award.is_empty() {
        Vec::new()
    } else {
        store.insert_badges(tenant_id, user_id, &to_award).await?
    };

    let mut badges = owned;
    badges.extend(awarded_badges.iter().cloned());

    Ok(CheckinOutcome {
        streak_days,
        level,
        awarded_badges,
        badges,
    })
}

pub struct PgMotivationStore {
    pool: PgPool,
}

impl PgMotivationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MotivationStore for PgMotivationStore {
    async fn load_stats(&self, user_id: Uuid) -> AppResult<Option<MotivationStats>> {
        let stats = sqlx::query_as::<_, MotivationStats>(
            "SELECT * FROM motivation_stats WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(stats)
    }

    async fn upsert_stats(&self, update: &StatsUpdate) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO motivation_stats (user_id, tenant_id, streak_days, level, last_checkin, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            ON CONFLICT (user_id) DO UPDATE SET
                tenant_id = EXCLUDED.tenant_id,
                streak_days = EXCLUDED.streak_days,
                level = EXCLUDED.level,
                last_checkin = EXCLUDED.last_checkin,
                updated_at = NOW()
            "#,
        )
        .bind(update.user_id)
        .bind(update.tenant_id)
        .bind(update.streak_days)
        .bind(update.level)
        .bind(update.last_checkin)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_badges(&self, tenant_id: Uuid, user_id: Uuid) -> AppResult<Vec<Badge>> {
        let badges = sqlx::query_as::<_, Badge>(
            r#"
            SELECT * FROM badges
            WHERE user_id = $1 AND tenant_id = $2
            ORDER BY acquired_at DESC
            "#,
        )
        .bind(user_id)
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(badges)
    }

    async fn insert_badges(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        thresholds: &[BadgeThreshold],
    ) -> AppResult<Vec<Badge>> {
        let mut awarded = Vec::with_capacity(thresholds.len());
        for threshold in thresholds {
            let badge = sqlx::query_as::<_, Badge>(
                r#"
                INSERT INTO badges (id, tenant_id, user_id, code, name, acquired_at)
                VALUES ($1, $2, $3, $4, $5, NOW())
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(tenant_id)
            .bind(user_id)
            .bind(threshold.code)
            .bind(threshold.name)
            .fetch_one(&self.pool)
            .await?;
            awarded.push(badge);
        }

        Ok(awarded)
    }
}
