//! Conversion from backend rows to domain types.
//!
//! Level resolution happens here: each series exercise names a level, and the
//! joined library exercise carries the per-level video/repetitions/weight
//! list. The tracker only ever sees the resolved values.

use thiserror::Error;
use url::Url;

use coach_core::model::{
    BrandingError, ExerciseError, ExerciseId, PlanError, PlanId, PlanSession, PlanSessionId,
    Series, SeriesError, SeriesId, SessionExercise, SessionExerciseId, SessionId, TrainerBranding,
    TrainerId, TrainingPlan, WorkoutSession, WorkoutSessionError,
};

use super::rows::{
    BrandingRow, PlanRow, PlanSessionRow, SeriesExerciseRow, SeriesRow, SessionRow,
};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MappingError {
    #[error("exercise {exercise} has no data for level {level}")]
    MissingLevel { exercise: String, level: u32 },

    #[error("invalid video url {url:?}: {source}")]
    InvalidVideoUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("invalid logo url {url:?}: {source}")]
    InvalidLogoUrl {
        url: String,
        source: url::ParseError,
    },

    #[error(transparent)]
    Exercise(#[from] ExerciseError),
    #[error(transparent)]
    Series(#[from] SeriesError),
    #[error(transparent)]
    Session(#[from] WorkoutSessionError),
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error(transparent)]
    Branding(#[from] BrandingError),
}

/// Resolve one series exercise against its library levels.
///
/// # Errors
///
/// Returns `MappingError::MissingLevel` when the library exercise carries no
/// entry for the requested level, or validation/url errors.
pub fn map_exercise(row: &SeriesExerciseRow) -> Result<SessionExercise, MappingError> {
    let level_data = row
        .exercise
        .levels
        .iter()
        .find(|l| l.level == row.level)
        .ok_or_else(|| MappingError::MissingLevel {
            exercise: row.exercise.name.clone(),
            level: row.level,
        })?;

    let video_url = Url::parse(&level_data.video_url).map_err(|source| {
        MappingError::InvalidVideoUrl {
            url: level_data.video_url.clone(),
            source,
        }
    })?;

    Ok(SessionExercise::new(
        SessionExerciseId::new(row.id),
        ExerciseId::new(row.exercise_id),
        row.exercise.name.clone(),
        row.level,
        video_url,
        level_data.repetitions,
        level_data.weight,
    )?)
}

/// Build a series from its row and exercise rows, ordered by position.
///
/// # Errors
///
/// Returns `MappingError` when any exercise fails to resolve.
pub fn map_series(
    row: &SeriesRow,
    mut exercises: Vec<SeriesExerciseRow>,
) -> Result<Series, MappingError> {
    exercises.sort_by_key(|e| e.position);
    let exercises = exercises
        .iter()
        .map(map_exercise)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Series::new(
        SeriesId::new(row.id),
        row.name.clone(),
        exercises,
    )?)
}

/// Build the full session tree from its rows.
///
/// Series arrive already ordered (the fetch orders by position).
///
/// # Errors
///
/// Returns `MappingError` when any branch fails to resolve.
pub fn map_session(
    row: &SessionRow,
    series: Vec<(SeriesRow, Vec<SeriesExerciseRow>)>,
) -> Result<WorkoutSession, MappingError> {
    let series = series
        .into_iter()
        .map(|(series_row, exercises)| map_series(&series_row, exercises))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(WorkoutSession::new(
        SessionId::new(row.id),
        row.name.clone(),
        series,
    )?)
}

/// # Errors
///
/// Returns `MappingError::Plan` for validation failures.
pub fn map_plan(row: &PlanRow) -> Result<TrainingPlan, MappingError> {
    Ok(TrainingPlan::new(
        PlanId::new(row.id),
        row.name.clone(),
        row.description.clone(),
        row.session_count,
    )?)
}

/// # Errors
///
/// Returns `MappingError::Plan` for validation failures.
pub fn map_plan_session(row: &PlanSessionRow) -> Result<PlanSession, MappingError> {
    Ok(PlanSession::new(
        PlanSessionId::new(row.id),
        PlanId::new(row.plan_id),
        row.name.clone(),
        row.position,
        row.scheduled_for,
    )?)
}

/// # Errors
///
/// Returns `MappingError` for invalid logo urls or branding validation.
pub fn map_branding(row: &BrandingRow) -> Result<TrainerBranding, MappingError> {
    let logo_url = row
        .logo_url
        .as_ref()
        .map(|raw| {
            Url::parse(raw).map_err(|source| MappingError::InvalidLogoUrl {
                url: raw.clone(),
                source,
            })
        })
        .transpose()?;

    Ok(TrainerBranding::new(
        TrainerId::new(row.trainer_id),
        row.display_name.clone(),
        logo_url,
        row.accent_color.clone(),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::rows::{ExerciseLevelRow, LibraryExerciseRow};
    use uuid::Uuid;

    fn exercise_row(level: u32, positions: u32) -> SeriesExerciseRow {
        SeriesExerciseRow {
            id: Uuid::new_v4(),
            series_id: Uuid::new_v4(),
            exercise_id: Uuid::new_v4(),
            level,
            position: positions,
            exercise: LibraryExerciseRow {
                name: "Goblet squat".to_owned(),
                levels: vec![
                    ExerciseLevelRow {
                        level: 1,
                        video_url: "https://videos.example.com/gs-l1.mp4".to_owned(),
                        repetitions: 8,
                        weight: 12.0,
                    },
                    ExerciseLevelRow {
                        level: 2,
                        video_url: "https://videos.example.com/gs-l2.mp4".to_owned(),
                        repetitions: 10,
                        weight: 16.0,
                    },
                ],
            },
        }
    }

    #[test]
    fn exercise_resolves_the_requested_level() {
        let exercise = map_exercise(&exercise_row(2, 0)).unwrap();
        assert_eq!(exercise.level(), 2);
        assert_eq!(exercise.repetitions(), 10);
        assert_eq!(exercise.weight(), 16.0);
        assert_eq!(exercise.video_url().as_str(), "https://videos.example.com/gs-l2.mp4");
    }

    #[test]
    fn missing_level_is_an_error() {
        let err = map_exercise(&exercise_row(5, 0)).unwrap_err();
        assert!(matches!(
            err,
            MappingError::MissingLevel { level: 5, .. }
        ));
    }

    #[test]
    fn invalid_video_url_is_an_error() {
        let mut row = exercise_row(1, 0);
        row.exercise.levels[0].video_url = "not a url".to_owned();
        let err = map_exercise(&row).unwrap_err();
        assert!(matches!(err, MappingError::InvalidVideoUrl { .. }));
    }

    #[test]
    fn series_orders_exercises_by_position() {
        let series_row = SeriesRow {
            id: Uuid::new_v4(),
            session_id: Uuid::new_v4(),
            name: "Legs".to_owned(),
            position: 0,
        };
        let mut second = exercise_row(1, 1);
        second.exercise.name = "Lunge".to_owned();
        let first = exercise_row(1, 0);

        let series = map_series(&series_row, vec![second, first]).unwrap();
        assert_eq!(series.exercise(0).unwrap().name(), "Goblet squat");
        assert_eq!(series.exercise(1).unwrap().name(), "Lunge");
    }

    #[test]
    fn branding_maps_optional_logo() {
        let row = BrandingRow {
            trainer_id: Uuid::new_v4(),
            display_name: "Studio Norte".to_owned(),
            logo_url: None,
            accent_color: "#112233".to_owned(),
        };
        let branding = map_branding(&row).unwrap();
        assert!(branding.logo_url().is_none());
    }
}
