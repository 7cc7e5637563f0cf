use super::types::{request, response};
use crate::{modules::application::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, _payload: request::Payload) -> response::Response {
    repository::list_pending(ctx)
        .await
        .map(response::Success::Applications)
        .map_err(|_| response::Error::UpstreamError)
}
