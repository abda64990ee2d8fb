use tracing::{error, info, instrument};

use super::client::{ApiClient, ApiError};
use crate::model::Conflict;

impl ApiClient {
    /// `GET /conflict/{id}`
    #[instrument(skip(self), fields(base = %self.base_url()))]
    pub async fn fetch_conflict(&self, absence_id: i64) -> Result<Conflict, ApiError> {
        let path = format!("conflict/{absence_id}");

        self.get_json::<Conflict>(&path)
            .await
            .inspect(|c| info!(absence_id, conflicts = c.conflicts, "Fetched conflict"))
            .inspect_err(|e| error!(error = %e, absence_id, "Failed to fetch conflict"))
    }
}
