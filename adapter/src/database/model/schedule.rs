use chrono::NaiveTime;
use kernel::model::{id::ScheduleId, schedule::Schedule};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct ScheduleRow {
    pub schedule_id: ScheduleId,
    pub weekday: i16,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    pub max_capacity: i32,
    pub lane_count: i32,
    pub is_active: bool,
}

impl TryFrom<ScheduleRow> for Schedule {
    type Error = AppError;

    fn try_from(value: ScheduleRow) -> Result<Self, Self::Error> {
        let ScheduleRow {
            schedule_id,
            weekday,
            starts_at,
            ends_at,
            max_capacity,
            lane_count,
            is_active,
        } = value;
        let weekday = weekday_from_sunday_index(weekday).ok_or_else(|| {
            AppError::ConversionEntityError(format!(
                "schedule {schedule_id} carries weekday {weekday}"
            ))
        })?;
        Ok(Schedule {
            id: schedule_id,
            weekday,
            starts_at,
            ends_at,
            max_capacity,
            lane_count,
            is_active,
        })
    }
}

// Weekdays are stored Sunday-based (0 = Sunday) to match the public API.
pub fn weekday_from_sunday_index(index: i16) -> Option<chrono::Weekday> {
    use chrono::Weekday::*;
    Some(match index {
        0 => Sun,
        1 => Mon,
        2 => Tue,
        3 => Wed,
        4 => Thu,
        5 => Fri,
        6 => Sat,
        _ => return None,
    })
}

pub fn sunday_index(weekday: chrono::Weekday) -> i16 {
    weekday.num_days_from_sunday() as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sunday_index_round_trips() {
        for index in 0..7 {
            let weekday = weekday_from_sunday_index(index).unwrap();
            assert_eq!(sunday_index(weekday), index);
        }
        assert!(weekday_from_sunday_index(7).is_none());
        assert!(weekday_from_sunday_index(-1).is_none());
    }
}
