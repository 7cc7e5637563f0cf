use super::{service::service, types::request};
use crate::types::Context;
use axum::{extract::State, response::IntoResponse, Json};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    jar: CookieJar,
    Json(payload): Json<request::Payload>,
) -> impl IntoResponse {
    service(ctx, jar, payload).await
}
