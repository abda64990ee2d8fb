use super::fetch::FetchState;
use crate::model::{Conflict, DisplayRow};
use crate::utils::dates::format_label_if_iso_date;

/// Detail panel for a selected absence plus its conflict check result.
pub fn render_conflict_modal(row: &DisplayRow, conflict: &FetchState<Conflict>) -> String {
    let status = if row.approved { "Approved" } else { "Pending approval" };
    let unit = if row.days == 1 { "day" } else { "days" };

    let mut lines = vec![
        format!("Absence #{}", row.id),
        format!("Employee: {} ({})", row.employee_name, row.employee_id),
        format!("Type:     {}", row.absence_type),
        format!(
            "Period:   {} - {} ({} {unit})",
            format_label_if_iso_date(&row.start_date),
            format_label_if_iso_date(&row.end_date),
            row.days
        ),
        format!("Status:   {status}"),
        String::new(),
    ];

    lines.push(conflict_line(conflict, &row.employee_name));
    lines.join("\n")
}

fn conflict_line(conflict: &FetchState<Conflict>, employee: &str) -> String {
    if conflict.loading {
        return "Checking for conflicts...".to_string();
    }
    if let Some(error) = &conflict.error {
        return format!("Could not check conflicts: {error}");
    }
    match conflict.data {
        Some(Conflict { conflicts: true }) => {
            format!("Conflict found: this absence overlaps another absence for {employee}")
        }
        Some(Conflict { conflicts: false }) => "No conflicts".to_string(),
        None => String::new(),
    }
}
