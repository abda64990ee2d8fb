pub mod fetch;
pub mod modal;
pub mod table;

pub use fetch::{FetchState, Fetcher};

pub const APP_TITLE: &str = "Absences App";

/// Title line plus underline.
pub fn render_heading(title: &str) -> String {
    format!("{title}\n{}", "=".repeat(title.chars().count()))
}
