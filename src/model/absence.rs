use serde::{Deserialize, Serialize};
use serde_json::Number;

use super::employee::Employee;

/// A single time-off entry as returned by `GET /absences`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsenceRecord {
    /// may be negative upstream
    pub id: i64,
    /// category code, e.g. `ANNUAL_LEAVE`
    pub absence_type: String,
    pub approved: bool,
    /// any JSON number; negatives and fractions become a row error, not a decode failure
    pub days: Number,
    pub employee: Employee,
    /// ISO-8601 timestamp, kept as received
    pub start_date: String,
}
