use super::service;
use crate::modules::member::{self, repository::Member};
use crate::types::Context;
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{async_trait, extract::Extension, Json, RequestPartsExt};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

enum Error {
    InvalidSession,
}

async fn get_member_from_cookie(ctx: Arc<Context>, jar: &CookieJar) -> Result<Member, Error> {
    let token = jar
        .get(&ctx.session.cookie_name)
        .map(|cookie| cookie.value().to_string())
        .ok_or(Error::InvalidSession)?;

    let claims =
        service::session::verify(&ctx.session, &token).map_err(|_| Error::InvalidSession)?;

    member::repository::find_by_phone(ctx.clone(), claims.sub)
        .await
        .map_err(|_| Error::InvalidSession)?
        .ok_or(Error::InvalidSession)
}

async fn get_member_from_request(ctx: Arc<Context>, parts: &mut Parts) -> Result<Member, Response> {
    let jar = parts
        .extract::<CookieJar>()
        .await
        .expect("CookieJar extraction is infallible");

    let err = (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Invalid session" })),
    );

    get_member_from_cookie(ctx, &jar)
        .await
        .map_err(|_| err.into_response())
}

/// Any signed-in member, tenant-bound or internal.
#[derive(Serialize, Clone)]
pub struct Auth {
    pub member: Member,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Auth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Extension(ctx) = parts
            .extract::<Extension<Arc<Context>>>()
            .await
            .expect("Context extension missing");

        get_member_from_request(ctx, parts)
            .await
            .map(|member| Self { member })
    }
}

/// An internal member (no tenant scope). Tenant-bound members get 403.
#[derive(Serialize, Clone)]
pub struct InternalAuth {
    pub member: Member,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for InternalAuth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Extension(ctx) = parts
            .extract::<Extension<Arc<Context>>>()
            .await
            .expect("Context extension missing");

        let member = get_member_from_request(ctx, parts).await?;

        if !member.is_internal() {
            return Err((
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "Forbidden" })),
            )
                .into_response());
        }

        Ok(Self { member })
    }
}
