pub mod context;
pub mod health;
pub mod reservation;
pub mod schedule;
