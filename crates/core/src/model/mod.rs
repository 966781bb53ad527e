mod branding;
mod exercise;
mod ids;
mod plan;
mod series;
mod session;

pub use ids::{
    ClientId, ExerciseId, ParseIdError, PlanId, PlanSessionId, SeriesId, SessionExerciseId,
    SessionId, TrainerId,
};

pub use branding::{BrandingError, TrainerBranding};
pub use exercise::{ExerciseError, SessionExercise};
pub use plan::{PlanError, PlanSession, TrainingPlan};
pub use series::{Series, SeriesError};
pub use session::{WorkoutSession, WorkoutSessionError};
