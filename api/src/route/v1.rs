use axum::Router;
use registry::AppRegistry;

use crate::route::{
    context::build_context_routers, reservation::build_reservation_routers,
    schedule::build_schedule_routers,
};

pub fn routes() -> Router<AppRegistry> {
    let routers = Router::new()
        .merge(build_schedule_routers())
        .merge(build_reservation_routers())
        .merge(build_context_routers());

    Router::new().nest("/api/v1", routers)
}
