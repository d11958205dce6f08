use crate::{
    extractor::AuthorizedUser,
    model::schedule::{
        CreateScheduleRequest, ScheduleResponse, SchedulesResponse, UpdateScheduleRequest,
        UpdateScheduleRequestWithId,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::id::ScheduleId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_schedule(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateScheduleRequest>,
) -> AppResult<(StatusCode, Json<ScheduleResponse>)> {
    user.require_admin()?;
    req.validate(&())?;

    let event = req.try_into()?;
    let schedule_id = registry.schedule_repository().create(event).await?;
    let schedule = registry
        .schedule_repository()
        .find_by_id(schedule_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("schedule {schedule_id} not found")))?;

    Ok((StatusCode::CREATED, Json(schedule.into())))
}

pub async fn show_schedule_list(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<SchedulesResponse>> {
    let repo = registry.schedule_repository();
    let schedules = if user.is_admin() {
        repo.find_all().await?
    } else {
        repo.find_active().await?
    };
    Ok(Json(schedules.into()))
}

pub async fn show_schedule(
    _user: AuthorizedUser,
    Path(schedule_id): Path<ScheduleId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ScheduleResponse>> {
    registry
        .schedule_repository()
        .find_by_id(schedule_id)
        .await
        .and_then(|schedule| match schedule {
            Some(s) => Ok(Json(s.into())),
            None => Err(AppError::EntityNotFound(format!(
                "schedule {schedule_id} not found"
            ))),
        })
}

pub async fn update_schedule(
    user: AuthorizedUser,
    Path(schedule_id): Path<ScheduleId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateScheduleRequest>,
) -> AppResult<StatusCode> {
    user.require_admin()?;
    req.validate(&())?;

    let update = UpdateScheduleRequestWithId::new(schedule_id, req);
    registry
        .schedule_repository()
        .update(update.into())
        .await
        .map(|_| StatusCode::OK)
}

pub async fn deactivate_schedule(
    user: AuthorizedUser,
    Path(schedule_id): Path<ScheduleId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    user.require_admin()?;

    registry
        .schedule_repository()
        .deactivate(schedule_id)
        .await
        .map(|_| StatusCode::OK)
}
