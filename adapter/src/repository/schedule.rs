use crate::database::{
    model::schedule::{sunday_index, ScheduleRow},
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::ScheduleId,
    schedule::{
        event::{CreateSchedule, UpdateSchedule},
        Schedule,
    },
};
use kernel::repository::schedule::ScheduleRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct ScheduleRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ScheduleRepository for ScheduleRepositoryImpl {
    async fn create(&self, event: CreateSchedule) -> AppResult<ScheduleId> {
        if event.max_capacity < 1 {
            return Err(AppError::InvalidRequest(
                "max capacity must be at least 1".into(),
            ));
        }
        if event.starts_at >= event.ends_at {
            return Err(AppError::InvalidRequest(
                "schedule must end after it starts".into(),
            ));
        }

        let schedule_id = ScheduleId::new();
        sqlx::query(
            r#"
                INSERT INTO schedules
                (schedule_id, weekday, starts_at, ends_at, max_capacity, lane_count, is_active)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(schedule_id)
        .bind(sunday_index(event.weekday))
        .bind(event.starts_at)
        .bind(event.ends_at)
        .bind(event.max_capacity)
        .bind(event.lane_count)
        .bind(event.is_active)
        .execute(self.db.inner_ref())
        .await?;

        Ok(schedule_id)
    }

    async fn find_active(&self) -> AppResult<Vec<Schedule>> {
        let rows: Vec<ScheduleRow> = sqlx::query_as(
            r#"
                SELECT schedule_id, weekday, starts_at, ends_at,
                       max_capacity, lane_count, is_active
                FROM schedules
                WHERE is_active
                ORDER BY weekday, starts_at
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await?;

        rows.into_iter().map(Schedule::try_from).collect()
    }

    async fn find_all(&self) -> AppResult<Vec<Schedule>> {
        let rows: Vec<ScheduleRow> = sqlx::query_as(
            r#"
                SELECT schedule_id, weekday, starts_at, ends_at,
                       max_capacity, lane_count, is_active
                FROM schedules
                ORDER BY weekday, starts_at
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await?;

        rows.into_iter().map(Schedule::try_from).collect()
    }

    async fn find_by_id(&self, schedule_id: ScheduleId) -> AppResult<Option<Schedule>> {
        let row: Option<ScheduleRow> = sqlx::query_as(
            r#"
                SELECT schedule_id, weekday, starts_at, ends_at,
                       max_capacity, lane_count, is_active
                FROM schedules
                WHERE schedule_id = $1
            "#,
        )
        .bind(schedule_id)
        .fetch_optional(self.db.inner_ref())
        .await?;

        row.map(Schedule::try_from).transpose()
    }

    async fn update(&self, event: UpdateSchedule) -> AppResult<()> {
        if matches!(event.max_capacity, Some(c) if c < 1) {
            return Err(AppError::InvalidRequest(
                "max capacity must be at least 1".into(),
            ));
        }

        let res = sqlx::query(
            r#"
                UPDATE schedules
                SET max_capacity = COALESCE($2, max_capacity),
                    lane_count = COALESCE($3, lane_count),
                    is_active = COALESCE($4, is_active),
                    updated_at = CURRENT_TIMESTAMP
                WHERE schedule_id = $1
            "#,
        )
        .bind(event.schedule_id)
        .bind(event.max_capacity)
        .bind(event.lane_count)
        .bind(event.is_active)
        .execute(self.db.inner_ref())
        .await?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "schedule {} not found",
                event.schedule_id
            )));
        }
        Ok(())
    }

    async fn deactivate(&self, schedule_id: ScheduleId) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE schedules
                SET is_active = FALSE, updated_at = CURRENT_TIMESTAMP
                WHERE schedule_id = $1
            "#,
        )
        .bind(schedule_id)
        .execute(self.db.inner_ref())
        .await?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "schedule {schedule_id} not found"
            )));
        }
        Ok(())
    }
}
