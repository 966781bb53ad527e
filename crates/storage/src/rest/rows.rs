//! Wire shapes for the hosted backend's REST interface.
//!
//! Rows mirror the backend tables; they are decoded here and converted into
//! domain types by the mapping module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionRow {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeriesRow {
    pub id: Uuid,
    pub session_id: Uuid,
    pub name: String,
    pub position: u32,
}

/// One exercise slot in a series, joined with its library exercise.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesExerciseRow {
    pub id: Uuid,
    pub series_id: Uuid,
    pub exercise_id: Uuid,
    pub level: u32,
    pub position: u32,
    pub exercise: LibraryExerciseRow,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LibraryExerciseRow {
    pub name: String,
    pub levels: Vec<ExerciseLevelRow>,
}

/// Per-level video/repetitions/weight for a library exercise.
#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseLevelRow {
    pub level: u32,
    pub video_url: String,
    pub repetitions: u32,
    pub weight: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub session_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanSessionRow {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub name: String,
    pub position: u32,
    pub scheduled_for: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrandingRow {
    pub trainer_id: Uuid,
    pub display_name: String,
    pub logo_url: Option<String>,
    pub accent_color: String,
}

/// Upsert payload for the progress table (merge-duplicates semantics).
#[derive(Debug, Clone, Serialize)]
pub struct ProgressUpsertRow {
    pub session_id: Uuid,
    pub completed_exercises: Vec<Uuid>,
    pub completed_series: Vec<Uuid>,
}

/// Patch payload for scheduling a plan session.
#[derive(Debug, Clone, Serialize)]
pub struct SchedulePatch {
    pub scheduled_for: DateTime<Utc>,
}
