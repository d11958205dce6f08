use chrono::NaiveTime;
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::ScheduleId,
    schedule::{
        event::{CreateSchedule, UpdateSchedule},
        Schedule,
    },
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    /// 0 = Sunday .. 6 = Saturday.
    #[garde(range(max = 6))]
    pub weekday: u8,
    #[garde(skip)]
    pub starts_at: NaiveTime,
    #[garde(skip)]
    pub ends_at: NaiveTime,
    #[garde(range(min = 1))]
    pub max_capacity: i32,
    #[garde(range(min = 1))]
    pub lane_count: i32,
    #[garde(skip)]
    pub is_active: bool,
}

impl TryFrom<CreateScheduleRequest> for CreateSchedule {
    type Error = AppError;

    fn try_from(value: CreateScheduleRequest) -> AppResult<Self> {
        let CreateScheduleRequest {
            weekday,
            starts_at,
            ends_at,
            max_capacity,
            lane_count,
            is_active,
        } = value;
        let weekday = weekday_from_index(weekday)?;
        Ok(CreateSchedule {
            weekday,
            starts_at,
            ends_at,
            max_capacity,
            lane_count,
            is_active,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScheduleRequest {
    #[garde(inner(range(min = 1)))]
    pub max_capacity: Option<i32>,
    #[garde(inner(range(min = 1)))]
    pub lane_count: Option<i32>,
    #[garde(skip)]
    pub is_active: Option<bool>,
}

#[derive(new)]
pub struct UpdateScheduleRequestWithId(ScheduleId, UpdateScheduleRequest);

impl From<UpdateScheduleRequestWithId> for UpdateSchedule {
    fn from(value: UpdateScheduleRequestWithId) -> Self {
        let UpdateScheduleRequestWithId(
            schedule_id,
            UpdateScheduleRequest {
                max_capacity,
                lane_count,
                is_active,
            },
        ) = value;
        UpdateSchedule {
            schedule_id,
            max_capacity,
            lane_count,
            is_active,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub id: ScheduleId,
    pub weekday: u8,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    pub max_capacity: i32,
    pub lane_count: i32,
    pub is_active: bool,
}

impl From<Schedule> for ScheduleResponse {
    fn from(value: Schedule) -> Self {
        let Schedule {
            id,
            weekday,
            starts_at,
            ends_at,
            max_capacity,
            lane_count,
            is_active,
        } = value;
        Self {
            id,
            weekday: weekday.num_days_from_sunday() as u8,
            starts_at,
            ends_at,
            max_capacity,
            lane_count,
            is_active,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulesResponse {
    pub items: Vec<ScheduleResponse>,
}

impl From<Vec<Schedule>> for SchedulesResponse {
    fn from(value: Vec<Schedule>) -> Self {
        Self {
            items: value.into_iter().map(ScheduleResponse::from).collect(),
        }
    }
}

fn weekday_from_index(index: u8) -> AppResult<chrono::Weekday> {
    use chrono::Weekday::*;
    Ok(match index {
        0 => Sun,
        1 => Mon,
        2 => Tue,
        3 => Wed,
        4 => Thu,
        5 => Fri,
        6 => Sat,
        other => {
            return Err(AppError::InvalidRequest(format!(
                "weekday must be 0-6, got {other}"
            )))
        }
    })
}
