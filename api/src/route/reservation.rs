use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::reservation::{book_batch, my_reservations, release_batch};

pub fn build_reservation_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/batch", post(book_batch))
        .route("/release", post(release_batch))
        .route("/:month", get(my_reservations));

    Router::new().nest("/reservations", routers)
}
