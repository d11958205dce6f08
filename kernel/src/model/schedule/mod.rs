use crate::model::id::ScheduleId;
use chrono::{NaiveTime, Weekday};

pub mod event;

/// A recurring weekly pool slot. Once reservations reference a schedule it
/// is never hard-deleted, only deactivated.
#[derive(Debug, Clone)]
pub struct Schedule {
    pub id: ScheduleId,
    pub weekday: Weekday,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    pub max_capacity: i32,
    pub lane_count: i32,
    pub is_active: bool,
}

impl Schedule {
    /// Human-readable slot label used in notifications,
    /// e.g. "Mon 10:00-11:00".
    pub fn label(&self) -> String {
        format!(
            "{} {}-{}",
            self.weekday,
            self.starts_at.format("%H:%M"),
            self.ends_at.format("%H:%M")
        )
    }
}
