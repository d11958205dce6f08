use crate::model::{
    id::ScheduleId,
    schedule::{
        event::{CreateSchedule, UpdateSchedule},
        Schedule,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn create(&self, event: CreateSchedule) -> AppResult<ScheduleId>;
    async fn find_active(&self) -> AppResult<Vec<Schedule>>;
    async fn find_all(&self) -> AppResult<Vec<Schedule>>;
    async fn find_by_id(&self, schedule_id: ScheduleId) -> AppResult<Option<Schedule>>;
    async fn update(&self, event: UpdateSchedule) -> AppResult<()>;
    // Schedules referenced by reservations are never hard-deleted.
    async fn deactivate(&self, schedule_id: ScheduleId) -> AppResult<()>;
}
