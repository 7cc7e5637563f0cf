use super::{service::service, types::request};
use crate::{types::Context, utils::validation};
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    Json(payload): Json<request::Payload>,
) -> impl IntoResponse {
    match payload.validate() {
        Ok(()) => service(ctx, payload).await.into_response(),
        Err(errors) => validation::into_response(errors).into_response(),
    }
}
