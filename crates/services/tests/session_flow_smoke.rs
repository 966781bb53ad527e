use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use coach_core::model::{
    ExerciseId, Series, SeriesId, SessionExercise, SessionExerciseId, SessionId, WorkoutSession,
};
use coach_core::time::{fixed_clock, fixed_now};
use services::{
    ExerciseOutcome, SaveListener, SeriesOutcome, SessionError, SessionLoopService,
    SessionViewState,
};
use storage::repository::{InMemoryRepository, StorageError, WorkoutSessionRepository};

fn build_exercise(name: &str) -> SessionExercise {
    SessionExercise::new(
        SessionExerciseId::generate(),
        ExerciseId::generate(),
        name,
        1,
        Url::parse("https://videos.example.com/e.mp4").unwrap(),
        10,
        20.0,
    )
    .unwrap()
}

/// Session with series A (2 exercises) and series B (1 exercise).
fn build_session() -> WorkoutSession {
    let series_a = Series::new(
        SeriesId::generate(),
        "A",
        vec![build_exercise("Squat"), build_exercise("Lunge")],
    )
    .unwrap();
    let series_b = Series::new(SeriesId::generate(), "B", vec![build_exercise("Plank")]).unwrap();
    WorkoutSession::new(SessionId::generate(), "Full body", vec![series_a, series_b]).unwrap()
}

#[tokio::test]
async fn session_flow_tracks_and_persists_progress() {
    let repo = InMemoryRepository::new();
    let session = build_session();
    let session_id = session.id();
    let series_a_id = session.series_at(0).unwrap().id();
    repo.upsert_session(&session);

    let loop_svc = SessionLoopService::new(fixed_clock(), Arc::new(repo.clone()));
    let mut tracker = loop_svc.start_session(session_id).await.unwrap();
    assert_eq!(tracker.started_at(), fixed_now());

    let first = loop_svc.complete_current(&mut tracker).unwrap();
    assert_eq!(first.outcome, ExerciseOutcome::Advanced);
    assert_eq!(first.progress.percent, 33);

    let second = loop_svc.complete_current(&mut tracker).unwrap();
    assert_eq!(
        second.outcome,
        ExerciseOutcome::SeriesCompleted(SeriesOutcome::AdvancedToNext {
            series_name: "B".to_owned()
        })
    );
    assert_eq!(second.progress.percent, 67);

    let last = loop_svc.complete_current(&mut tracker).unwrap();
    assert_eq!(last.outcome, ExerciseOutcome::SessionComplete);
    assert_eq!(last.progress.percent, 100);
    assert!(last.is_terminal);

    // flush on exit, then check what the backend holds
    assert!(loop_svc.save_now(&tracker).await.unwrap());
    let saved = repo.saved_progress(session_id).unwrap();
    assert_eq!(saved.exercises.len(), 3);
    // the final series is never auto-completed on the terminal branch
    assert_eq!(saved.series.len(), 1);
    assert!(saved.series.contains(&series_a_id));
}

#[tokio::test]
async fn unknown_session_fails_the_view() {
    let repo = InMemoryRepository::new();
    let loop_svc = SessionLoopService::new(fixed_clock(), Arc::new(repo));

    let err = loop_svc.start_session(SessionId::generate()).await.unwrap_err();
    assert!(matches!(err, SessionError::NotFound));

    let mut view = SessionViewState::new();
    view.fail(err.to_string());
    assert_eq!(view.error_message(), Some("session not found"));
    assert!(view.active_exercise().is_none());
    assert!(!view.skip_exercise());
}

struct SlowRepo;

#[async_trait]
impl WorkoutSessionRepository for SlowRepo {
    async fn load_session(
        &self,
        _id: SessionId,
    ) -> Result<Option<WorkoutSession>, StorageError> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(None)
    }

    async fn save_progress(
        &self,
        _id: SessionId,
        _completed_exercises: &[SessionExerciseId],
        _completed_series: &[SeriesId],
    ) -> Result<bool, StorageError> {
        Ok(true)
    }
}

#[tokio::test]
async fn concurrent_loads_are_rejected() {
    let loop_svc = SessionLoopService::new(fixed_clock(), Arc::new(SlowRepo));
    let id = SessionId::generate();

    let (first, second) = tokio::join!(loop_svc.start_session(id), loop_svc.start_session(id));

    let errors = [first.unwrap_err(), second.unwrap_err()];
    assert!(errors.iter().any(|e| matches!(e, SessionError::LoadInProgress)));
    assert!(errors.iter().any(|e| matches!(e, SessionError::NotFound)));

    // the guard clears once the pending load finishes
    let err = loop_svc.start_session(id).await.unwrap_err();
    assert!(matches!(err, SessionError::NotFound));
}

struct FailingSaveRepo {
    inner: InMemoryRepository,
}

#[async_trait]
impl WorkoutSessionRepository for FailingSaveRepo {
    async fn load_session(
        &self,
        id: SessionId,
    ) -> Result<Option<WorkoutSession>, StorageError> {
        self.inner.load_session(id).await
    }

    async fn save_progress(
        &self,
        _id: SessionId,
        _completed_exercises: &[SessionExerciseId],
        _completed_series: &[SeriesId],
    ) -> Result<bool, StorageError> {
        Err(StorageError::Connection("backend unreachable".to_owned()))
    }
}

#[derive(Default)]
struct RecordingListener {
    failures: Mutex<Vec<(SessionId, String)>>,
}

impl SaveListener for RecordingListener {
    fn progress_save_failed(&self, session_id: SessionId, reason: String) {
        self.failures
            .lock()
            .unwrap()
            .push((session_id, reason));
    }
}

#[tokio::test]
async fn failed_saves_notify_but_keep_state() {
    let inner = InMemoryRepository::new();
    let session = build_session();
    let session_id = session.id();
    inner.upsert_session(&session);

    let listener = Arc::new(RecordingListener::default());
    let loop_svc = SessionLoopService::new(fixed_clock(), Arc::new(FailingSaveRepo { inner }))
        .with_save_listener(Arc::clone(&listener) as Arc<dyn SaveListener>);

    let mut tracker = loop_svc.start_session(session_id).await.unwrap();
    let result = loop_svc.complete_current(&mut tracker).unwrap();

    // completion is optimistic: the in-memory state advanced regardless
    assert_eq!(result.progress.completed, 1);
    assert_eq!(tracker.current_exercise_index(), 1);

    // give the background save a moment to run and report
    tokio::time::sleep(Duration::from_millis(50)).await;
    let failures = listener.failures.lock().unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, session_id);
    assert!(failures[0].1.contains("backend unreachable"));
}
