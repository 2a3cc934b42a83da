pub mod calendar;
pub mod date;
pub mod lenient;
pub mod records;
pub mod state;
