use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::config::Config;
use crate::model::{AbsenceRecord, Conflict, DisplayRow, build_rows};
use crate::utils::comparator::{SortDirection, SortKey, sort_rows};
use crate::view::modal::render_conflict_modal;
use crate::view::table::{ABSENCE_HEADERS, TableProps, render_table};
use crate::view::{APP_TITLE, Fetcher, render_heading};

#[derive(Debug, Parser)]
#[command(
    name = "absence-viewer",
    version,
    about = "Browse employee absences and check schedule conflicts"
)]
pub struct Cli {
    /// Base URL of the absences API (overrides BASE_API)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// List absences as a sorted table
    List {
        /// Column to sort by, e.g. startDate, employeeName, days
        #[arg(long)]
        order_by: Option<SortKey>,
        /// asc or desc
        #[arg(long)]
        order: Option<SortDirection>,
        /// Print display rows as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one absence and whether it conflicts with another
    Show {
        #[arg(allow_negative_numbers = true)]
        id: i64,
        #[arg(long)]
        json: bool,
    },
    /// Print the conflict flag for one absence
    Conflict {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
}

impl Command {
    pub fn list_default() -> Self {
        Command::List {
            order_by: None,
            order: None,
            json: false,
        }
    }
}

/// What a command printed, and whether it got everything it asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub text: String,
    pub success: bool,
}

impl Output {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: true,
        }
    }

    fn failed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: false,
        }
    }
}

pub async fn execute(command: Command, client: &ApiClient, config: &Config) -> Result<Output> {
    debug!(?command, "Executing");

    match command {
        Command::List {
            order_by,
            order,
            json,
        } => {
            list(
                client,
                order_by.unwrap_or(config.default_order_by),
                order.unwrap_or(config.default_order),
                json,
            )
            .await
        }
        Command::Show { id, json } => show(client, id, json).await,
        Command::Conflict { id } => conflict(client, id).await,
    }
}

async fn list(
    client: &ApiClient,
    order_by: SortKey,
    order: SortDirection,
    json: bool,
) -> Result<Output> {
    let absences = Fetcher::<Vec<AbsenceRecord>>::new();
    let task = {
        let client = client.clone();
        absences.spawn(async move { client.list_absences().await })
    };

    if !json && absences.loading() && std::io::stderr().is_terminal() {
        eprintln!(
            "{}",
            render_table(&TableProps::<DisplayRow> {
                loading: true,
                error: None,
                headers: &ABSENCE_HEADERS,
                rows: &[],
                order,
                order_by,
            })
        );
    }

    let state = task.await.context("absence fetch task failed")?;

    let records = state.data.unwrap_or_default();
    let (mut rows, skipped) = build_rows(&records);
    sort_rows(&mut rows, order, order_by);
    info!(rows = rows.len(), skipped = skipped.len(), %order_by, %order, "Built table");

    if json {
        return match state.error {
            Some(error) => Ok(Output::failed(error)),
            None => Ok(Output::ok(
                serde_json::to_string_pretty(&rows).context("serialize rows")?,
            )),
        };
    }

    let table = render_table(&TableProps {
        loading: false,
        error: state.error.as_deref(),
        headers: &ABSENCE_HEADERS,
        rows: &rows,
        order,
        order_by,
    });

    let mut lines = vec![render_heading(APP_TITLE), String::new(), table];
    if !skipped.is_empty() {
        lines.push(String::new());
    }
    for row_error in &skipped {
        lines.push(format!(
            "warning: absence {} skipped ({})",
            row_error.id, row_error.error
        ));
    }

    let text = lines.join("\n");
    Ok(match state.error {
        Some(_) => Output::failed(text),
        None => Output::ok(text),
    })
}

async fn show(client: &ApiClient, id: i64, json: bool) -> Result<Output> {
    let absence_fetch = Fetcher::<Vec<AbsenceRecord>>::new();
    let conflict_fetch = Fetcher::<Conflict>::new();

    // independent requests, run side by side
    let (absences_state, conflict_state) = futures::join!(
        absence_fetch.run(client.list_absences()),
        conflict_fetch.run(client.fetch_conflict(id))
    );

    if let Some(error) = absences_state.error {
        return Ok(Output::failed(format!("Could not load absences: {error}")));
    }

    let records = absences_state.data.unwrap_or_default();
    let Some(record) = records.iter().find(|r| r.id == id) else {
        warn!(id, "Absence not found");
        return Ok(Output::failed(format!("Absence {id} not found")));
    };

    let row = match DisplayRow::try_from(record) {
        Ok(row) => row,
        Err(e) => return Ok(Output::failed(format!("Absence {id} cannot be displayed: {e}"))),
    };

    let success = conflict_state.error.is_none();
    let text = if json {
        let value = serde_json::json!({
            "absence": row,
            "conflicts": conflict_state.data.map(|c| c.conflicts),
            "error": conflict_state.error,
        });
        serde_json::to_string_pretty(&value).context("serialize absence")?
    } else {
        render_conflict_modal(&row, &conflict_state)
    };

    Ok(Output { text, success })
}

async fn conflict(client: &ApiClient, id: i64) -> Result<Output> {
    let state = Fetcher::<Conflict>::new()
        .run(client.fetch_conflict(id))
        .await;

    Ok(match (state.data, state.error) {
        (_, Some(error)) => Output::failed(error),
        (Some(Conflict { conflicts: true }), None) => {
            Output::ok(format!("Absence {id}: Conflict found"))
        }
        (Some(Conflict { conflicts: false }), None) => {
            Output::ok(format!("Absence {id}: No conflicts"))
        }
        (None, None) => Output::failed(format!("Absence {id}: no conflict data")),
    })
}
