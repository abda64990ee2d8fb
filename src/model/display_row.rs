use serde::Serialize;
use serde_json::Number;

use super::absence::AbsenceRecord;
use crate::error::AbsenceError;
use crate::utils::comparator::{CellValue, SortKey, Sortable};
use crate::utils::dates::{compute_end_date, normalize_timestamp};
use crate::utils::labels::format_category_label;

/// Render-ready projection of an [`AbsenceRecord`].
///
/// Both dates are held in the canonical `YYYY-MM-DDTHH:mm:ss.sssZ` form so
/// sorting them as text is sorting them chronologically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRow {
    pub id: i64,
    pub employee_name: String,
    pub employee_id: String,
    pub absence_type: String,
    pub approved: bool,
    pub days: i64,
    pub start_date: String,
    pub end_date: String,
}

/// A record that could not be turned into a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub id: i64,
    pub error: AbsenceError,
}

impl TryFrom<&AbsenceRecord> for DisplayRow {
    type Error = AbsenceError;

    fn try_from(record: &AbsenceRecord) -> Result<Self, Self::Error> {
        let days = whole_days(&record.days)?;
        Ok(DisplayRow {
            id: record.id,
            employee_name: record.employee.full_name(),
            employee_id: record.employee.id.clone(),
            absence_type: format_category_label(&record.absence_type),
            approved: record.approved,
            days,
            start_date: normalize_timestamp(&record.start_date)?,
            end_date: compute_end_date(&record.start_date, days)?,
        })
    }
}

fn whole_days(days: &Number) -> Result<i64, AbsenceError> {
    if let Some(n) = days.as_i64() {
        return Ok(n);
    }
    match days.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f as i64),
        _ => Err(AbsenceError::invalid(format!("{days} is not a whole number of days"))),
    }
}

impl Sortable for DisplayRow {
    fn cell(&self, key: SortKey) -> CellValue {
        match key {
            SortKey::Id => self.id.into(),
            SortKey::EmployeeName => self.employee_name.as_str().into(),
            SortKey::EmployeeId => self.employee_id.as_str().into(),
            SortKey::AbsenceType => self.absence_type.as_str().into(),
            SortKey::Approved => self.approved.into(),
            SortKey::Days => self.days.into(),
            SortKey::StartDate => self.start_date.as_str().into(),
            SortKey::EndDate => self.end_date.as_str().into(),
        }
    }
}

/// Build display rows, keeping the records that fail aside instead of aborting.
pub fn build_rows(records: &[AbsenceRecord]) -> (Vec<DisplayRow>, Vec<RowError>) {
    let mut rows = Vec::with_capacity(records.len());
    let mut errors = Vec::new();

    for record in records {
        match DisplayRow::try_from(record) {
            Ok(row) => rows.push(row),
            Err(error) => {
                log::warn!("skipping absence {}: {}", record.id, error);
                errors.push(RowError { id: record.id, error });
            }
        }
    }

    (rows, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::employee::Employee;
    use crate::utils::comparator::{SortDirection, sort_rows};

    fn record(id: i64, absence_type: &str, start_date: &str, days: i64) -> AbsenceRecord {
        AbsenceRecord {
            id,
            absence_type: absence_type.to_string(),
            approved: id % 2 == 0,
            days: days.into(),
            employee: Employee {
                first_name: "John".to_string(),
                last_name: format!("Doe{id}"),
                id: format!("emp{id}"),
            },
            start_date: start_date.to_string(),
        }
    }

    #[test]
    fn test_row_from_record() {
        let row = DisplayRow::try_from(&record(1, "MATERNITY_LEAVE", "2026-01-28T13:12:13.562Z", 5))
            .unwrap();

        assert_eq!(row.employee_name, "John Doe1");
        assert_eq!(row.employee_id, "emp1");
        assert_eq!(row.absence_type, "Maternity Leave");
        assert_eq!(row.start_date, "2026-01-28T13:12:13.562Z");
        assert_eq!(row.end_date, "2026-02-02T13:12:13.562Z");
    }

    #[test]
    fn test_row_dates_are_normalized() {
        let row = DisplayRow::try_from(&record(2, "SICKNESS", "2026-02-10", 0)).unwrap();
        assert_eq!(row.start_date, "2026-02-10T00:00:00.000Z");
        assert_eq!(row.end_date, row.start_date);
    }

    #[test]
    fn test_build_rows_skips_bad_records() {
        let records = vec![
            record(1, "ANNUAL_LEAVE", "2026-02-01T00:00:00.000Z", 3),
            record(2, "ANNUAL_LEAVE", "\"2022-02-08T08:02:47.543Z\"", 1),
            record(3, "SICKNESS", "2026-02-01T00:00:00.000Z", -2),
            record(4, "SICKNESS", "2026-03-01T00:00:00.000Z", 1),
        ];

        let (rows, errors) = build_rows(&records);
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 4]);
        assert_eq!(errors.iter().map(|e| e.id).collect::<Vec<_>>(), vec![2, 3]);
        assert!(matches!(errors[0].error, AbsenceError::InvalidInput(_)));
    }

    #[test]
    fn test_sort_by_dates_is_chronological() {
        let records = vec![
            record(1, "ANNUAL_LEAVE", "2026-02-01T09:00:00+02:00", 10),
            record(2, "ANNUAL_LEAVE", "2025-12-30T00:00:00.000Z", 1),
            record(3, "ANNUAL_LEAVE", "2026-02-01T08:00:00Z", 2),
        ];
        let (mut rows, _) = build_rows(&records);

        sort_rows(&mut rows, SortDirection::Ascending, SortKey::StartDate);
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 1, 3]);

        sort_rows(&mut rows, SortDirection::Descending, SortKey::EndDate);
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3, 2]);
    }

    #[test]
    fn test_serializes_camel_case() {
        let row = DisplayRow::try_from(&record(7, "UNPAID_LEAVE", "2026-02-01T00:00:00.000Z", 1))
            .unwrap();
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["employeeName"], "John Doe7");
        assert_eq!(json["absenceType"], "Unpaid Leave");
        assert_eq!(json["endDate"], "2026-02-02T00:00:00.000Z");
    }

    #[test]
    fn test_whole_float_days_are_accepted() {
        let mut rec = record(5, "ANNUAL_LEAVE", "2026-02-01T00:00:00.000Z", 0);
        rec.days = Number::from_f64(5.0).unwrap();

        let row = DisplayRow::try_from(&rec).unwrap();
        assert_eq!(row.days, 5);
        assert_eq!(row.end_date, "2026-02-06T00:00:00.000Z");
    }

    #[test]
    fn test_odd_values_fail_only_their_row() {
        let payload = r#"[
            {"id": -3, "absenceType": "SICKNESS", "approved": true, "days": 2,
             "employee": {"firstName": "Ada", "lastName": "Byron", "id": "e1"},
             "startDate": "2026-02-01T00:00:00.000Z"},
            {"id": 4, "absenceType": "SICKNESS", "approved": false, "days": 5.5,
             "employee": {"firstName": "Alan", "lastName": "Turing", "id": "e2"},
             "startDate": "2026-02-01T00:00:00.000Z"},
            {"id": 6, "absenceType": "SICKNESS", "approved": false, "days": 1.0,
             "employee": {"firstName": "Grace", "lastName": "Hopper", "id": "e3"},
             "startDate": "2026-02-01T00:00:00.000Z"}
        ]"#;
        let records: Vec<AbsenceRecord> = serde_json::from_str(payload).unwrap();

        let (rows, errors) = build_rows(&records);
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![-3, 6]);
        assert_eq!(rows[1].end_date, "2026-02-02T00:00:00.000Z");
        assert_eq!(errors.iter().map(|e| e.id).collect::<Vec<_>>(), vec![4]);
        assert!(matches!(errors[0].error, AbsenceError::InvalidInput(_)));
    }
}
