use chrono::NaiveDate;
use kernel::model::{
    context::{DayEntry, DayStatus, MonthContext},
    id::ScheduleId,
};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthContextResponse {
    pub month: String,
    pub days: Vec<DayEntryResponse>,
    pub price_per_session: i64,
    pub pricing: PricingResponse,
    pub can_reserve_next_month: bool,
    pub pending_refunds: i64,
}

impl From<MonthContext> for MonthContextResponse {
    fn from(value: MonthContext) -> Self {
        let MonthContext {
            month,
            days,
            price_per_session,
            pricing,
            can_reserve_next_month,
            pending_refunds,
        } = value;
        Self {
            month: month.to_string(),
            days: days.into_iter().map(DayEntryResponse::from).collect(),
            price_per_session,
            pricing: PricingResponse {
                member: pricing.member,
                visitor: pricing.visitor,
            },
            can_reserve_next_month,
            pending_refunds,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntryResponse {
    pub date: NaiveDate,
    pub schedule_id: ScheduleId,
    pub total_capacity: i32,
    pub reserved_spots: i32,
    pub available_spots: i32,
    pub is_full: bool,
    pub status: DayStatusName,
}

impl From<DayEntry> for DayEntryResponse {
    fn from(value: DayEntry) -> Self {
        let DayEntry { state, status } = value;
        Self {
            date: state.date,
            schedule_id: state.schedule_id,
            total_capacity: state.total_capacity,
            reserved_spots: state.reserved_spots,
            available_spots: state.available_spots,
            is_full: state.is_full,
            status: status.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatusName {
    Open,
    Full,
    Reserved,
}

impl From<DayStatus> for DayStatusName {
    fn from(value: DayStatus) -> Self {
        match value {
            DayStatus::Open => Self::Open,
            DayStatus::Full => Self::Full,
            DayStatus::Reserved => Self::Reserved,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResponse {
    pub member: i64,
    pub visitor: i64,
}
