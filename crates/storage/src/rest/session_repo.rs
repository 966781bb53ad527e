use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;

use coach_core::model::{SeriesId, SessionExerciseId, SessionId, WorkoutSession};

use crate::repository::{StorageError, WorkoutSessionRepository};

use super::RestClient;
use super::mapping;
use super::rows::{ProgressUpsertRow, SeriesExerciseRow, SeriesRow, SessionRow};

const EXERCISE_SELECT: &str =
    "id,series_id,exercise_id,level,position,exercise:exercises(name,levels:exercise_levels(level,video_url,repetitions,weight))";

impl RestClient {
    /// Fetch the exercise rows for one series.
    ///
    /// A failed branch is tolerated: the series loads with no exercises and
    /// the failure is logged, since an empty series is a legal state. Session
    /// and series level failures still propagate.
    async fn series_exercises(&self, series_id: Uuid) -> Vec<SeriesExerciseRow> {
        let query = [
            ("series_id", format!("eq.{series_id}")),
            ("order", "position".to_owned()),
            ("select", EXERCISE_SELECT.to_owned()),
        ];
        match self.get_rows::<SeriesExerciseRow>("series_exercises", &query).await {
            Ok(rows) => rows,
            Err(error) => {
                warn!(%series_id, %error, "series exercises failed to load, continuing with empty series");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl WorkoutSessionRepository for RestClient {
    async fn load_session(&self, id: SessionId) -> Result<Option<WorkoutSession>, StorageError> {
        let session_query = [("id", format!("eq.{}", id.value()))];
        let mut sessions: Vec<SessionRow> =
            self.get_rows("workout_sessions", &session_query).await?;
        let Some(session_row) = sessions.pop() else {
            return Ok(None);
        };

        let series_query = [
            ("session_id", format!("eq.{}", id.value())),
            ("order", "position".to_owned()),
        ];
        let series_rows: Vec<SeriesRow> = self.get_rows("session_series", &series_query).await?;

        let mut series = Vec::with_capacity(series_rows.len());
        for row in series_rows {
            let exercises = self.series_exercises(row.id).await;
            series.push((row, exercises));
        }

        let session = mapping::map_session(&session_row, series)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        Ok(Some(session))
    }

    async fn save_progress(
        &self,
        id: SessionId,
        completed_exercises: &[SessionExerciseId],
        completed_series: &[SeriesId],
    ) -> Result<bool, StorageError> {
        let row = ProgressUpsertRow {
            session_id: id.value(),
            completed_exercises: completed_exercises.iter().map(|e| e.value()).collect(),
            completed_series: completed_series.iter().map(|s| s.value()).collect(),
        };

        let accepted = self.upsert("session_progress", &row).await?;
        if !accepted {
            warn!(session_id = %id, "backend rejected progress write");
        }
        Ok(accepted)
    }
}
