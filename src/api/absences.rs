use tracing::{error, info, instrument};

use super::client::{ApiClient, ApiError};
use crate::model::AbsenceRecord;

impl ApiClient {
    /// `GET /absences`
    #[instrument(skip(self), fields(base = %self.base_url()))]
    pub async fn list_absences(&self) -> Result<Vec<AbsenceRecord>, ApiError> {
        match self.get_json::<Vec<AbsenceRecord>>("absences").await {
            Ok(records) => {
                info!(count = records.len(), "Fetched absences");
                Ok(records)
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch absences");
                Err(e)
            }
        }
    }
}
