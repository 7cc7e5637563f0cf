mod logout;
mod request_otp;
mod verify_otp;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(request_otp::get_router())
        .merge(verify_otp::get_router())
        .merge(logout::get_router())
}
