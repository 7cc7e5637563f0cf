use super::types::{request, response};
use crate::{
    modules::application::repository,
    types::Context,
    utils::phone,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    // Same normalization rule as auth so the applicant can later sign in
    // with the number they applied with.
    let phone = phone::normalize(&payload.phone).ok_or(response::Error::InvalidPhone)?;

    repository::create(
        ctx,
        repository::CreateApplicationPayload {
            company_name: payload.company_name,
            contact_name: payload.contact_name,
            phone,
            email: payload.email,
            notes: payload.notes,
        },
    )
    .await
    .map(|application| response::Success::Submitted { id: application.id })
    .map_err(|_| response::Error::UpstreamError)
}
