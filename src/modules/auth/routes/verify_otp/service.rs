use super::types::{request, response};
use crate::{
    modules::auth::service::{otp, session},
    types::Context,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

pub async fn service(
    ctx: Arc<Context>,
    jar: CookieJar,
    payload: request::Payload,
) -> response::Response {
    let phone = otp::verify(&ctx.otp_store, &payload.phone, &payload.code)
        .await
        .map_err(|err| match err {
            otp::VerifyError::BadRequest => response::Error::BadRequest,
            otp::VerifyError::NoOtpRequested => response::Error::NoOtpRequested,
            otp::VerifyError::CodeExpired => response::Error::CodeExpired,
            otp::VerifyError::TooManyAttempts => response::Error::TooManyAttempts,
            otp::VerifyError::InvalidCode => response::Error::InvalidCode,
        })?;

    let token = session::mint(&ctx.session, &phone).map_err(|_| {
        tracing::error!("SESSION_SECRET is not configured, cannot mint session tokens");
        response::Error::ServerConfig
    })?;

    let jar = jar.add(session::session_cookie(
        &ctx.session,
        &ctx.app.environment,
        token,
    ));

    Ok(response::Success::Verified(jar))
}
