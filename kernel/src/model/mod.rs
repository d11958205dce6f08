pub mod calendar;
pub mod capacity;
pub mod context;
pub mod id;
pub mod payment;
pub mod reservation;
pub mod role;
pub mod schedule;
