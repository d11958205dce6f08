pub mod context;
pub mod reservation;
pub mod schedule;
