//! Dashboard and classroom statistics payloads
//!
//! Shapes mirror the backend's stats endpoints. Fields the backend may omit
//! are optional or defaulted so a partial payload never fails the refresh.

use serde::{Deserialize, Serialize};

/// One row of the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub solved: i64,
}

/// Per-user aggregate stats
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(default)]
    pub challenges_solved: i64,
    #[serde(default)]
    pub total_points: i64,
    #[serde(default)]
    pub global_rank: i64,
    #[serde(default)]
    pub weekly_points: i64,
}

/// Classroom summary as listed on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassroomSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub mentor: String,
    #[serde(default)]
    pub members_count: i64,
    #[serde(default)]
    pub total_challenges: i64,
}

/// Mentor dashboard aggregates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MentorStats {
    #[serde(default)]
    pub my_classrooms_count: i64,
    #[serde(default)]
    pub total_students: i64,
    #[serde(default)]
    pub total_submissions: i64,
}

/// Full payload of the global stats endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardEntry>,
    #[serde(default)]
    pub weekly_leaderboard: Vec<LeaderboardEntry>,
    #[serde(default)]
    pub user_stats: Option<UserStats>,
    #[serde(default)]
    pub classrooms: Vec<ClassroomSummary>,
    #[serde(default)]
    pub mentor_stats: Option<MentorStats>,
}

/// Detail payload of one classroom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassroomStats {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub mentor: String,
    pub stats: ClassroomCounters,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassroomCounters {
    #[serde(default)]
    pub members_count: i64,
    #[serde(default)]
    pub challenges_count: i64,
    #[serde(default)]
    pub comments_count: i64,
}
