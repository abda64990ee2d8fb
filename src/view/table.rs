//! Plain-text table for the terminal.
//!
//! Every header label and every cell goes through the ISO-date formatter,
//! so date columns read `DD/MM/YYYY` while text and numbers stay as they are.

use crate::utils::comparator::{SortDirection, SortKey, Sortable};
use crate::utils::dates::format_label_if_iso_date;

const COLUMN_GAP: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: SortKey,
    pub label: &'static str,
    pub sortable: bool,
}

impl HeaderCell {
    pub const fn new(key: SortKey, label: &'static str) -> Self {
        Self {
            key,
            label,
            sortable: true,
        }
    }

    pub const fn fixed(key: SortKey, label: &'static str) -> Self {
        Self {
            key,
            label,
            sortable: false,
        }
    }
}

/// Columns of the absences table.
pub const ABSENCE_HEADERS: [HeaderCell; 7] = [
    HeaderCell::fixed(SortKey::Id, "ID"),
    HeaderCell::new(SortKey::EmployeeName, "Employee"),
    HeaderCell::new(SortKey::AbsenceType, "Type"),
    HeaderCell::new(SortKey::StartDate, "Start date"),
    HeaderCell::new(SortKey::EndDate, "End date"),
    HeaderCell::new(SortKey::Days, "Days"),
    HeaderCell::new(SortKey::Approved, "Approved"),
];

pub struct TableProps<'a, R> {
    pub loading: bool,
    pub error: Option<&'a str>,
    pub headers: &'a [HeaderCell],
    pub rows: &'a [R],
    pub order: SortDirection,
    pub order_by: SortKey,
}

pub fn render_table<R: Sortable>(props: &TableProps<'_, R>) -> String {
    if props.loading {
        return "[ table loading ]".to_string();
    }

    let header: Vec<String> = props
        .headers
        .iter()
        .map(|h| {
            let label = format_label_if_iso_date(h.label);
            match sort_arrow(h, props) {
                Some(arrow) => format!("{label} {arrow}"),
                None => label,
            }
        })
        .collect();

    let body: Vec<Vec<String>> = match props.error {
        Some(_) => Vec::new(),
        None => props
            .rows
            .iter()
            .map(|row| {
                props
                    .headers
                    .iter()
                    .map(|h| format_label_if_iso_date(&row.cell(h.key).to_string()))
                    .collect()
            })
            .collect(),
    };

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            body.iter()
                .map(|cells| width(&cells[col]))
                .chain(std::iter::once(width(&header[col])))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = vec![
        join_cells(&header, &widths),
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP),
    ];

    if let Some(error) = props.error {
        lines.push(error.to_string());
    } else {
        lines.extend(body.iter().map(|cells| join_cells(cells, &widths)));
    }

    if let Some(active) = props
        .headers
        .iter()
        .find(|h| h.sortable && h.key == props.order_by)
    {
        lines.push(String::new());
        lines.push(format!(
            "{} by {}",
            sorted_phrase(props.order),
            active.label
        ));
    }

    lines.join("\n")
}

fn sort_arrow<R>(header: &HeaderCell, props: &TableProps<'_, R>) -> Option<&'static str> {
    if !header.sortable || header.key != props.order_by {
        return None;
    }
    Some(match props.order {
        SortDirection::Ascending => "▲",
        SortDirection::Descending => "▼",
    })
}

fn sorted_phrase(order: SortDirection) -> &'static str {
    match order {
        SortDirection::Ascending => "sorted ascending",
        SortDirection::Descending => "sorted descending",
    }
}

fn width(s: &str) -> usize {
    s.chars().count()
}

fn join_cells(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{cell:<w$}", w = *w))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
        .trim_end()
        .to_string()
}
