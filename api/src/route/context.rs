use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::context::get_context;

pub fn build_context_routers() -> Router<AppRegistry> {
    Router::new().route("/context/:month", get(get_context))
}
