mod absences;
mod client;
mod conflict;

pub use client::{ApiClient, ApiError};
