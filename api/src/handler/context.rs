use crate::{extractor::AuthorizedUser, model::context::MonthContextResponse};
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use kernel::model::calendar::MonthYear;
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn get_context(
    user: AuthorizedUser,
    Path(month): Path<String>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<MonthContextResponse>> {
    let month = MonthYear::parse(&month)?;
    registry
        .context_assembler()
        .assemble(user.id(), user.role(), month, Utc::now().date_naive())
        .await
        .map(MonthContextResponse::from)
        .map(Json)
}
