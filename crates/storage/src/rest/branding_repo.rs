use async_trait::async_trait;

use coach_core::model::{TrainerBranding, TrainerId};

use crate::repository::{BrandingRepository, StorageError};

use super::RestClient;
use super::mapping;
use super::rows::BrandingRow;

#[async_trait]
impl BrandingRepository for RestClient {
    async fn get_branding(
        &self,
        trainer: TrainerId,
    ) -> Result<Option<TrainerBranding>, StorageError> {
        let query = [("trainer_id", format!("eq.{}", trainer.value()))];
        let mut rows: Vec<BrandingRow> = self.get_rows("trainer_branding", &query).await?;

        rows.pop()
            .map(|row| {
                mapping::map_branding(&row)
                    .map_err(|e| StorageError::Serialization(e.to_string()))
            })
            .transpose()
    }
}
