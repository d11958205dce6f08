use crate::{
    extractor::AuthorizedUser,
    model::reservation::{
        BookBatchRequest, BookBatchResponse, ReleaseBatchRequest, ReleaseBatchResponse,
        ReservationsResponse,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use garde::Validate;
use kernel::collaborator::notifier::{BookingNotice, ReleaseNotice};
use kernel::model::{
    calendar::MonthYear,
    reservation::event::{BookBatch, ReleaseBatch},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn book_batch(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<BookBatchRequest>,
) -> AppResult<(StatusCode, Json<BookBatchResponse>)> {
    req.validate(&())?;

    let schedule = registry
        .schedule_repository()
        .find_by_id(req.schedule_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("schedule {} not found", req.schedule_id)))?;

    let dates = req.dates.clone();
    let event = BookBatch::new(
        user.id(),
        req.schedule_id,
        req.dates,
        user.role(),
        req.payment.map(Into::into),
        Utc::now(),
    );
    let reservation_ids = registry.reservation_repository().book_batch(event).await?;

    // Notification is fire-and-forget: a delivery failure never rolls back
    // the committed booking.
    if let Some(email) = user.email() {
        let notifier = registry.notifier();
        let notice = BookingNotice::new(email, schedule.label(), dates);
        tokio::spawn(async move {
            if let Err(e) = notifier.booking_confirmed(&notice).await {
                tracing::warn!(error.message = %e, "booking notification failed");
            }
        });
    }

    Ok((
        StatusCode::CREATED,
        Json(BookBatchResponse { reservation_ids }),
    ))
}

pub async fn release_batch(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<ReleaseBatchRequest>,
) -> AppResult<Json<ReleaseBatchResponse>> {
    req.validate(&())?;

    let event = ReleaseBatch::new(user.id(), req.reservation_ids);
    let released = registry.reservation_repository().release_batch(event).await?;

    if released > 0 {
        if let Some(email) = user.email() {
            let notifier = registry.notifier();
            let notice = ReleaseNotice::new(email, released);
            tokio::spawn(async move {
                if let Err(e) = notifier.booking_released(&notice).await {
                    tracing::warn!(error.message = %e, "release notification failed");
                }
            });
        }
    }

    Ok(Json(ReleaseBatchResponse { released }))
}

pub async fn my_reservations(
    user: AuthorizedUser,
    Path(month): Path<String>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationsResponse>> {
    let month = MonthYear::parse(&month)?;
    registry
        .reservation_repository()
        .find_by_user_in_month(user.id(), month)
        .await
        .map(ReservationsResponse::from)
        .map(Json)
}
