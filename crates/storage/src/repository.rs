use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use coach_core::model::{
    ClientId, PlanId, PlanSession, PlanSessionId, SeriesId, SessionExerciseId, SessionId,
    TrainerBranding, TrainerId, TrainingPlan, WorkoutSession,
};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("backend returned {status}: {message}")]
    Api { status: u16, message: String },
}

/// Repository contract for workout sessions and their progress.
///
/// `load_session` returns the full series/exercise tree in one logical call,
/// with each exercise's level-specific video/repetitions/weight already
/// resolved. `save_progress` is a best-effort idempotent write of the
/// completion sets; `Ok(false)` means the backend reported the write as not
/// applied.
#[async_trait]
pub trait WorkoutSessionRepository: Send + Sync {
    /// Fetch a session tree by ID.
    ///
    /// Returns `Ok(None)` when the session does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on transport or decoding failures.
    async fn load_session(&self, id: SessionId) -> Result<Option<WorkoutSession>, StorageError>;

    /// Persist the completion sets for a session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on transport failures.
    async fn save_progress(
        &self,
        id: SessionId,
        completed_exercises: &[SessionExerciseId],
        completed_series: &[SeriesId],
    ) -> Result<bool, StorageError>;
}

/// Repository contract for training plans assigned to a client.
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// List plans assigned to the given client.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on transport or decoding failures.
    async fn list_assigned_plans(&self, client: ClientId)
    -> Result<Vec<TrainingPlan>, StorageError>;

    /// List the sessions of a plan, ordered by position.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on transport or decoding failures.
    async fn list_plan_sessions(&self, plan: PlanId) -> Result<Vec<PlanSession>, StorageError>;

    /// Persist a scheduled date for a plan session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` for an unknown session, or other
    /// storage errors.
    async fn schedule_session(
        &self,
        id: PlanSessionId,
        date: DateTime<Utc>,
    ) -> Result<(), StorageError>;
}

/// Repository contract for trainer branding.
#[async_trait]
pub trait BrandingRepository: Send + Sync {
    /// Fetch a trainer's branding, `Ok(None)` when none is configured.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on transport or decoding failures.
    async fn get_branding(&self, trainer: TrainerId)
    -> Result<Option<TrainerBranding>, StorageError>;
}

/// Completion sets persisted for one session, as last written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedProgress {
    pub exercises: HashSet<SessionExerciseId>,
    pub series: HashSet<SeriesId>,
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    sessions: Arc<Mutex<HashMap<SessionId, WorkoutSession>>>,
    progress: Arc<Mutex<HashMap<SessionId, SavedProgress>>>,
    plans: Arc<Mutex<HashMap<ClientId, Vec<TrainingPlan>>>>,
    plan_sessions: Arc<Mutex<HashMap<PlanId, Vec<PlanSession>>>>,
    branding: Arc<Mutex<HashMap<TrainerId, TrainerBranding>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a session tree.
    pub fn upsert_session(&self, session: &WorkoutSession) {
        let mut guard = self.sessions.lock().expect("sessions lock poisoned");
        guard.insert(session.id(), session.clone());
    }

    /// Seed plans assigned to a client.
    pub fn assign_plans(&self, client: ClientId, plans: Vec<TrainingPlan>) {
        let mut guard = self.plans.lock().expect("plans lock poisoned");
        guard.insert(client, plans);
    }

    /// Seed the sessions of a plan.
    pub fn upsert_plan_sessions(&self, plan: PlanId, sessions: Vec<PlanSession>) {
        let mut guard = self.plan_sessions.lock().expect("plan sessions lock poisoned");
        guard.insert(plan, sessions);
    }

    /// Seed a trainer's branding.
    pub fn upsert_branding(&self, branding: &TrainerBranding) {
        if let Some(trainer) = branding.trainer_id() {
            let mut guard = self.branding.lock().expect("branding lock poisoned");
            guard.insert(trainer, branding.clone());
        }
    }

    /// Last persisted completion sets for a session, for assertions in tests.
    #[must_use]
    pub fn saved_progress(&self, id: SessionId) -> Option<SavedProgress> {
        let guard = self.progress.lock().expect("progress lock poisoned");
        guard.get(&id).cloned()
    }
}

#[async_trait]
impl WorkoutSessionRepository for InMemoryRepository {
    async fn load_session(&self, id: SessionId) -> Result<Option<WorkoutSession>, StorageError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&id).cloned())
    }

    async fn save_progress(
        &self,
        id: SessionId,
        completed_exercises: &[SessionExerciseId],
        completed_series: &[SeriesId],
    ) -> Result<bool, StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let entry = guard.entry(id).or_default();
        entry.exercises.extend(completed_exercises.iter().copied());
        entry.series.extend(completed_series.iter().copied());
        Ok(true)
    }
}

#[async_trait]
impl PlanRepository for InMemoryRepository {
    async fn list_assigned_plans(
        &self,
        client: ClientId,
    ) -> Result<Vec<TrainingPlan>, StorageError> {
        let guard = self
            .plans
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&client).cloned().unwrap_or_default())
    }

    async fn list_plan_sessions(&self, plan: PlanId) -> Result<Vec<PlanSession>, StorageError> {
        let guard = self
            .plan_sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut sessions = guard.get(&plan).cloned().unwrap_or_default();
        sessions.sort_by_key(PlanSession::position);
        Ok(sessions)
    }

    async fn schedule_session(
        &self,
        id: PlanSessionId,
        date: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .plan_sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        for sessions in guard.values_mut() {
            if let Some(session) = sessions.iter_mut().find(|s| s.id() == id) {
                // scheduling validity is checked in the services layer
                session.set_schedule(date);
                return Ok(());
            }
        }
        Err(StorageError::NotFound)
    }
}

#[async_trait]
impl BrandingRepository for InMemoryRepository {
    async fn get_branding(
        &self,
        trainer: TrainerId,
    ) -> Result<Option<TrainerBranding>, StorageError> {
        let guard = self
            .branding
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&trainer).cloned())
    }
}

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub sessions: Arc<dyn WorkoutSessionRepository>,
    pub plans: Arc<dyn PlanRepository>,
    pub branding: Arc<dyn BrandingRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        Self::from_in_memory(repo)
    }

    #[must_use]
    pub fn from_in_memory(repo: InMemoryRepository) -> Self {
        let sessions: Arc<dyn WorkoutSessionRepository> = Arc::new(repo.clone());
        let plans: Arc<dyn PlanRepository> = Arc::new(repo.clone());
        let branding: Arc<dyn BrandingRepository> = Arc::new(repo);
        Self {
            sessions,
            plans,
            branding,
        }
    }

    /// Build storage backed by the hosted backend's REST interface.
    #[must_use]
    pub fn rest(client: crate::rest::RestClient) -> Self {
        let sessions: Arc<dyn WorkoutSessionRepository> = Arc::new(client.clone());
        let plans: Arc<dyn PlanRepository> = Arc::new(client.clone());
        let branding: Arc<dyn BrandingRepository> = Arc::new(client);
        Self {
            sessions,
            plans,
            branding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coach_core::model::{ExerciseId, Series, SessionExercise};
    use coach_core::time::fixed_now;
    use url::Url;

    fn build_session() -> WorkoutSession {
        let exercise = SessionExercise::new(
            SessionExerciseId::generate(),
            ExerciseId::generate(),
            "Row",
            1,
            Url::parse("https://videos.example.com/row.mp4").unwrap(),
            10,
            25.0,
        )
        .unwrap();
        let series = Series::new(SeriesId::generate(), "Back", vec![exercise]).unwrap();
        WorkoutSession::new(SessionId::generate(), "Pull day", vec![series]).unwrap()
    }

    #[tokio::test]
    async fn load_session_round_trips() {
        let repo = InMemoryRepository::new();
        let session = build_session();
        repo.upsert_session(&session);

        let loaded = repo.load_session(session.id()).await.unwrap().unwrap();
        assert_eq!(loaded, session);

        let missing = repo.load_session(SessionId::generate()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn save_progress_merges_sets() {
        let repo = InMemoryRepository::new();
        let session = build_session();
        repo.upsert_session(&session);

        let e1 = SessionExerciseId::generate();
        let e2 = SessionExerciseId::generate();
        let s1 = SeriesId::generate();

        assert!(repo.save_progress(session.id(), &[e1], &[]).await.unwrap());
        // repeated and out-of-order writes merge rather than overwrite
        assert!(repo.save_progress(session.id(), &[e1, e2], &[s1]).await.unwrap());
        assert!(repo.save_progress(session.id(), &[e1], &[]).await.unwrap());

        let saved = repo.saved_progress(session.id()).unwrap();
        assert_eq!(saved.exercises.len(), 2);
        assert!(saved.series.contains(&s1));
    }

    #[tokio::test]
    async fn plan_sessions_are_ordered_by_position() {
        let repo = InMemoryRepository::new();
        let plan = TrainingPlan::new(PlanId::generate(), "Base building", None, 2).unwrap();
        let s_late = PlanSession::new(
            PlanSessionId::generate(),
            plan.id(),
            "Week 2",
            1,
            None,
        )
        .unwrap();
        let s_early = PlanSession::new(
            PlanSessionId::generate(),
            plan.id(),
            "Week 1",
            0,
            None,
        )
        .unwrap();
        repo.upsert_plan_sessions(plan.id(), vec![s_late, s_early]);

        let listed = repo.list_plan_sessions(plan.id()).await.unwrap();
        assert_eq!(listed[0].name(), "Week 1");
        assert_eq!(listed[1].name(), "Week 2");
    }

    #[tokio::test]
    async fn schedule_stores_the_date_without_revalidating() {
        let repo = InMemoryRepository::new();
        let plan_id = PlanId::generate();
        let session = PlanSession::new(
            PlanSessionId::generate(),
            plan_id,
            "Week 1",
            0,
            None,
        )
        .unwrap();
        let session_id = session.id();
        repo.upsert_plan_sessions(plan_id, vec![session]);

        // the past-date rule lives in the services layer; the adapter just
        // persists what it is handed
        let past = fixed_now() - chrono::Duration::days(1);
        repo.schedule_session(session_id, past).await.unwrap();

        let listed = repo.list_plan_sessions(plan_id).await.unwrap();
        assert_eq!(listed[0].scheduled_for(), Some(past));
    }

    #[tokio::test]
    async fn schedule_unknown_session_is_not_found() {
        let repo = InMemoryRepository::new();
        let err = repo
            .schedule_session(PlanSessionId::generate(), fixed_now())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }
}
