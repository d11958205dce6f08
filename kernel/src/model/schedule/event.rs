use crate::model::id::ScheduleId;
use chrono::{NaiveTime, Weekday};
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateSchedule {
    pub weekday: Weekday,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    pub max_capacity: i32,
    pub lane_count: i32,
    pub is_active: bool,
}

#[derive(Debug, new)]
pub struct UpdateSchedule {
    pub schedule_id: ScheduleId,
    pub max_capacity: Option<i32>,
    pub lane_count: Option<i32>,
    pub is_active: Option<bool>,
}

