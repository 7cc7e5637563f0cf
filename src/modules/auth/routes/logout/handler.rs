use crate::{modules::auth::service::session, types::Context};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use std::sync::Arc;

pub async fn handler(State(ctx): State<Arc<Context>>, jar: CookieJar) -> impl IntoResponse {
    let jar = jar.add(session::removal_cookie(&ctx.session));

    (StatusCode::OK, jar, Json(json!({ "ok": true })))
}
