use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::schedule::{
    deactivate_schedule, register_schedule, show_schedule, show_schedule_list, update_schedule,
};

pub fn build_schedule_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/", get(show_schedule_list).post(register_schedule))
        .route(
            "/:schedule_id",
            get(show_schedule)
                .put(update_schedule)
                .delete(deactivate_schedule),
        );

    Router::new().nest("/schedules", routers)
}
