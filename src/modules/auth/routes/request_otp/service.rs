use super::types::{request, response};
use crate::{
    modules::auth::service::otp,
    types::Context,
    utils::messaging::whatsapp::WhatsAppClient,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let channel = WhatsAppClient::new(ctx.whatsapp.clone());

    otp::issue(
        &ctx.otp_store,
        &channel,
        &payload.phone,
        payload.lang.as_deref(),
    )
    .await
    .map(|issued| response::Success::Sent {
        resend_in: issued.resend_in,
        message_id: issued.message_id,
    })
    .map_err(|err| match err {
        otp::IssueError::InvalidPhone => response::Error::InvalidPhone,
        otp::IssueError::RateLimited { retry_after } => {
            response::Error::RateLimited { retry_after }
        }
        otp::IssueError::ProviderError(payload) => response::Error::ProviderError(payload),
    })
}
