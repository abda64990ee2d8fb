use serde::{Deserialize, Serialize};

/// Response of `GET /conflict/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub conflicts: bool,
}
