use super::types::{request, response};
use crate::{
    modules::application::repository::{self, ApplicationStatus},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let status = match payload.body.decision {
        request::Decision::Approve => ApplicationStatus::Approved,
        request::Decision::Reject => ApplicationStatus::Rejected,
    };

    repository::review(ctx, payload.id, status, payload.body.note)
        .await
        .map_err(|_| response::Error::UpstreamError)?
        .ok_or(response::Error::ApplicationNotFound)
        .map(response::Success::Reviewed)
}
