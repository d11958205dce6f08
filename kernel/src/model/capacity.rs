use crate::model::{id::ScheduleId, reservation::Reservation, schedule::Schedule};
use chrono::NaiveDate;

/// Derived occupancy of one slot. Recomputed on every read; never cached,
/// so it always reflects the latest committed reservations handed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotState {
    pub schedule_id: ScheduleId,
    pub date: NaiveDate,
    pub total_capacity: i32,
    pub reserved_spots: i32,
    pub available_spots: i32,
    pub is_full: bool,
}

/// Counts the reservations that occupy the (schedule, date) slot.
/// Cancelled reservations never count. Assumes `max_capacity >= 1`, which
/// schedule validation enforces upstream.
pub fn compute_state(schedule: &Schedule, date: NaiveDate, existing: &[Reservation]) -> SlotState {
    let reserved_spots = existing
        .iter()
        .filter(|r| {
            r.schedule_id == schedule.id && r.date == date && r.status.occupies_slot()
        })
        .count() as i32;
    let available_spots = (schedule.max_capacity - reserved_spots).max(0);
    SlotState {
        schedule_id: schedule.id,
        date,
        total_capacity: schedule.max_capacity,
        reserved_spots,
        available_spots,
        is_full: available_spots == 0,
    }
}
