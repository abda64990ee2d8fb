pub mod absence;
pub mod conflict;
pub mod display_row;
pub mod employee;

pub use absence::AbsenceRecord;
pub use conflict::Conflict;
pub use display_row::{DisplayRow, RowError, build_rows};
pub use employee::Employee;
