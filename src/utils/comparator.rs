use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Sortable columns of the absences table.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Id,
    EmployeeName,
    EmployeeId,
    AbsenceType,
    Approved,
    Days,
    #[default]
    StartDate,
    EndDate,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum SortDirection {
    #[default]
    #[strum(to_string = "asc", serialize = "ascending")]
    #[serde(rename = "asc")]
    Ascending,
    #[strum(to_string = "desc", serialize = "descending")]
    #[serde(rename = "desc")]
    Descending,
}

/// A single comparable cell.
///
/// Variant order is the cross-kind order: a missing value sorts before
/// everything else, so the relation stays total for any column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum CellValue {
    Missing,
    Bool(bool),
    Number(i128),
    Text(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Missing => Ok(()),
            CellValue::Bool(true) => f.write_str("Yes"),
            CellValue::Bool(false) => f.write_str("No"),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Missing, Into::into)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<u64> for CellValue {
    fn from(value: u64) -> Self {
        CellValue::Number(value.into())
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value.into())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

/// Rows that can be ordered by a [`SortKey`].
pub trait Sortable {
    fn cell(&self, key: SortKey) -> CellValue;
}

/// Build the comparison function for one column and direction.
///
/// Descending is the exact reverse of ascending; equal cells stay `Equal`
/// so a stable sort keeps their input order.
pub fn compare<R: Sortable>(
    direction: SortDirection,
    key: SortKey,
) -> impl Fn(&R, &R) -> Ordering {
    move |a, b| {
        let ord = a.cell(key).cmp(&b.cell(key));
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// Stable in-place sort.
pub fn sort_rows<R: Sortable>(rows: &mut [R], direction: SortDirection, key: SortKey) {
    rows.sort_by(compare(direction, key));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u64,
        name: Option<&'static str>,
        approved: bool,
        days: i64,
    }

    impl Sortable for Row {
        fn cell(&self, key: SortKey) -> CellValue {
            match key {
                SortKey::Id => self.id.into(),
                SortKey::EmployeeName => self.name.into(),
                SortKey::Approved => self.approved.into(),
                SortKey::Days => self.days.into(),
                _ => CellValue::Missing,
            }
        }
    }

    fn row(id: u64, name: Option<&'static str>, approved: bool, days: i64) -> Row {
        Row { id, name, approved, days }
    }

    fn ids(rows: &[Row]) -> Vec<u64> {
        rows.iter().map(|r| r.id).collect()
    }

    fn sample() -> Vec<Row> {
        vec![
            row(3, Some("Carol"), true, 5),
            row(1, Some("alice"), false, 2),
            row(4, None, true, 5),
            row(2, Some("Bob"), false, 10),
        ]
    }

    #[test]
    fn test_numeric_column() {
        let mut rows = sample();
        sort_rows(&mut rows, SortDirection::Ascending, SortKey::Id);
        assert_eq!(ids(&rows), vec![1, 2, 3, 4]);

        sort_rows(&mut rows, SortDirection::Descending, SortKey::Id);
        assert_eq!(ids(&rows), vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_descending_reverses_ascending_for_unique_keys() {
        let mut asc = sample();
        let mut desc = sample();
        sort_rows(&mut asc, SortDirection::Ascending, SortKey::Id);
        sort_rows(&mut desc, SortDirection::Descending, SortKey::Id);
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn test_missing_sorts_first_ascending_last_descending() {
        let mut rows = sample();
        sort_rows(&mut rows, SortDirection::Ascending, SortKey::EmployeeName);
        // byte order: upper case before lower case
        assert_eq!(ids(&rows), vec![4, 2, 3, 1]);

        sort_rows(&mut rows, SortDirection::Descending, SortKey::EmployeeName);
        assert_eq!(ids(&rows), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_stable_for_duplicates() {
        let mut rows = sample();
        sort_rows(&mut rows, SortDirection::Ascending, SortKey::Days);
        assert_eq!(ids(&rows), vec![1, 3, 4, 2]);

        let mut rows = sample();
        sort_rows(&mut rows, SortDirection::Descending, SortKey::Days);
        assert_eq!(ids(&rows), vec![2, 3, 4, 1]);

        let mut rows = sample();
        sort_rows(&mut rows, SortDirection::Ascending, SortKey::Approved);
        assert_eq!(ids(&rows), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_unknown_column_keeps_input_order() {
        let mut rows = sample();
        sort_rows(&mut rows, SortDirection::Descending, SortKey::EndDate);
        assert_eq!(ids(&rows), vec![3, 1, 4, 2]);
    }

    #[test]
    fn test_compare_is_consistent() {
        let rows = sample();
        let cmp = compare::<Row>(SortDirection::Ascending, SortKey::Days);
        for a in &rows {
            assert_eq!(cmp(a, a), Ordering::Equal);
            for b in &rows {
                assert_eq!(cmp(a, b), cmp(b, a).reverse());
                assert_eq!(cmp(a, b), cmp(a, b));
            }
        }
    }

    #[test]
    fn test_cell_kinds_order() {
        assert!(CellValue::Missing < CellValue::Bool(false));
        assert!(CellValue::Bool(false) < CellValue::Bool(true));
        assert!(CellValue::Number(-3) < CellValue::Number(2));
        assert!(CellValue::Text("a".into()) > CellValue::Number(i128::MAX));
        assert_eq!(CellValue::Missing.to_string(), "");
        assert_eq!(CellValue::Bool(true).to_string(), "Yes");
    }

    #[test]
    fn test_key_and_direction_names() {
        assert_eq!(SortKey::StartDate.to_string(), "startDate");
        assert_eq!(SortKey::from_str("absenceType").unwrap(), SortKey::AbsenceType);
        assert_eq!(SortKey::from_str("employeename").unwrap(), SortKey::EmployeeName);
        assert!(SortKey::from_str("salary").is_err());
        for key in SortKey::iter() {
            assert_eq!(SortKey::from_str(key.as_ref()).unwrap(), key);
        }

        assert_eq!(SortDirection::Descending.to_string(), "desc");
        assert_eq!(SortDirection::from_str("asc").unwrap(), SortDirection::Ascending);
        assert_eq!(SortDirection::from_str("DESC").unwrap(), SortDirection::Descending);
        assert_eq!(
            SortDirection::from_str("descending").unwrap(),
            SortDirection::Descending
        );
        assert_eq!(SortDirection::default(), SortDirection::Ascending);
    }
}
