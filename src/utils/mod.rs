pub mod comparator;
pub mod dates;
pub mod labels;
