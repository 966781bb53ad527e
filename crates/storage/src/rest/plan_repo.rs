use async_trait::async_trait;
use chrono::{DateTime, Utc};

use coach_core::model::{ClientId, PlanId, PlanSession, PlanSessionId, TrainingPlan};

use crate::repository::{PlanRepository, StorageError};

use super::RestClient;
use super::mapping;
use super::rows::{PlanRow, PlanSessionRow, SchedulePatch};

#[async_trait]
impl PlanRepository for RestClient {
    async fn list_assigned_plans(
        &self,
        client: ClientId,
    ) -> Result<Vec<TrainingPlan>, StorageError> {
        let query = [
            ("client_id", format!("eq.{}", client.value())),
            ("order", "name".to_owned()),
        ];
        let rows: Vec<PlanRow> = self.get_rows("training_plans", &query).await?;
        rows.iter()
            .map(|row| {
                mapping::map_plan(row).map_err(|e| StorageError::Serialization(e.to_string()))
            })
            .collect()
    }

    async fn list_plan_sessions(&self, plan: PlanId) -> Result<Vec<PlanSession>, StorageError> {
        let query = [
            ("plan_id", format!("eq.{}", plan.value())),
            ("order", "position".to_owned()),
        ];
        let rows: Vec<PlanSessionRow> = self.get_rows("plan_sessions", &query).await?;
        rows.iter()
            .map(|row| {
                mapping::map_plan_session(row)
                    .map_err(|e| StorageError::Serialization(e.to_string()))
            })
            .collect()
    }

    async fn schedule_session(
        &self,
        id: PlanSessionId,
        date: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let query = [("id", format!("eq.{}", id.value()))];
        let patched = self
            .patch("plan_sessions", &query, &SchedulePatch { scheduled_for: date })
            .await?;
        if patched == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
