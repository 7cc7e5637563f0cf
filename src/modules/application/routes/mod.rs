mod list;
mod review;
mod submit;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(submit::get_router())
        .merge(list::get_router())
        .merge(review::get_router())
}
