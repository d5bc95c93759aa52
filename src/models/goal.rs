use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LearningGoal {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub goal_type: GoalType,
    pub current_level: i32,
    pub target_level: i32,
    pub target_date: Option<NaiveDate>,
    pub status: GoalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "goal_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    Exam,
    Skill,
    Career,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "goal_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    Active,
    Completed,
    Archived,
}

impl Default for GoalStatus {
    fn default() -> Self {
        Self::Active
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateGoalRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub goal_type: GoalType,
    #[validate(range(min = 1, max = 10))]
    pub current_level: Option<i32>,
    #[validate(range(min = 1, max = 10))]
    pub target_level: Option<i32>,
    pub target_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateGoalRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub goal_type: Option<GoalType>,
    #[validate(range(min = 1, max = 10))]
    pub current_level: Option<i32>,
    #[validate(range(min = 1, max = 10))]
    pub target_level: Option<i32>,
    pub target_date: Option<NaiveDate>,
    pub status: Option<GoalStatus>,
}
