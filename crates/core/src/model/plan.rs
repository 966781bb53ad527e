use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{PlanId, PlanSessionId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlanError {
    #[error("plan name must not be empty")]
    EmptyName,

    #[error("cannot schedule a session in the past")]
    ScheduleInPast,
}

/// A multi-session training plan assigned to a client by a trainer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingPlan {
    id: PlanId,
    name: String,
    description: Option<String>,
    session_count: u32,
}

impl TrainingPlan {
    /// # Errors
    ///
    /// Returns `PlanError::EmptyName` if the name is empty.
    pub fn new(
        id: PlanId,
        name: impl Into<String>,
        description: Option<String>,
        session_count: u32,
    ) -> Result<Self, PlanError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PlanError::EmptyName);
        }

        Ok(Self {
            id,
            name,
            description,
            session_count,
        })
    }

    #[must_use]
    pub fn id(&self) -> PlanId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn session_count(&self) -> u32 {
        self.session_count
    }
}

/// One workout slot within a plan, optionally scheduled to a concrete date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanSession {
    id: PlanSessionId,
    plan_id: PlanId,
    name: String,
    position: u32,
    scheduled_for: Option<DateTime<Utc>>,
}

impl PlanSession {
    /// # Errors
    ///
    /// Returns `PlanError::EmptyName` if the name is empty.
    pub fn new(
        id: PlanSessionId,
        plan_id: PlanId,
        name: impl Into<String>,
        position: u32,
        scheduled_for: Option<DateTime<Utc>>,
    ) -> Result<Self, PlanError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PlanError::EmptyName);
        }

        Ok(Self {
            id,
            plan_id,
            name,
            position,
            scheduled_for,
        })
    }

    #[must_use]
    pub fn id(&self) -> PlanSessionId {
        self.id
    }

    #[must_use]
    pub fn plan_id(&self) -> PlanId {
        self.plan_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn position(&self) -> u32 {
        self.position
    }

    #[must_use]
    pub fn scheduled_for(&self) -> Option<DateTime<Utc>> {
        self.scheduled_for
    }

    /// Schedule (or reschedule) this session for a concrete date.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::ScheduleInPast` when `date` is before `now`.
    pub fn schedule(&mut self, date: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), PlanError> {
        if date < now {
            return Err(PlanError::ScheduleInPast);
        }
        self.set_schedule(date);
        Ok(())
    }

    /// Record a scheduled date without the past-date check.
    ///
    /// For storage adapters persisting a date the services layer has already
    /// validated against its clock.
    pub fn set_schedule(&mut self, date: DateTime<Utc>) {
        self.scheduled_for = Some(date);
    }
}
