use std::sync::Arc;

use chrono::{DateTime, Utc};

use coach_core::model::{ClientId, PlanError, PlanId, PlanSession, PlanSessionId, TrainingPlan};
use storage::repository::PlanRepository;

use crate::Clock;
use crate::error::PlanServiceError;

/// Client-facing view over assigned training plans and their sessions.
#[derive(Clone)]
pub struct PlanService {
    clock: Clock,
    plans: Arc<dyn PlanRepository>,
}

impl PlanService {
    #[must_use]
    pub fn new(clock: Clock, plans: Arc<dyn PlanRepository>) -> Self {
        Self { clock, plans }
    }

    /// List the plans assigned to a client.
    ///
    /// # Errors
    ///
    /// Returns `PlanServiceError::Storage` if repository access fails.
    pub async fn list_assigned_plans(
        &self,
        client: ClientId,
    ) -> Result<Vec<TrainingPlan>, PlanServiceError> {
        let plans = self.plans.list_assigned_plans(client).await?;
        Ok(plans)
    }

    /// List a plan's sessions, ordered by position.
    ///
    /// # Errors
    ///
    /// Returns `PlanServiceError::Storage` if repository access fails.
    pub async fn list_plan_sessions(
        &self,
        plan: PlanId,
    ) -> Result<Vec<PlanSession>, PlanServiceError> {
        let sessions = self.plans.list_plan_sessions(plan).await?;
        Ok(sessions)
    }

    /// Schedule a plan session for a concrete date.
    ///
    /// # Errors
    ///
    /// Returns `PlanServiceError::Plan` for a date in the past, or
    /// `PlanServiceError::Storage` if persistence fails.
    pub async fn schedule_session(
        &self,
        id: PlanSessionId,
        date: DateTime<Utc>,
    ) -> Result<(), PlanServiceError> {
        if date < self.clock.now() {
            return Err(PlanServiceError::Plan(PlanError::ScheduleInPast));
        }
        self.plans.schedule_session(id, date).await?;
        Ok(())
    }
}
