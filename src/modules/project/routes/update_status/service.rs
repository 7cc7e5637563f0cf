use super::types::{request, response};
use crate::{modules::project::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    // Tenant-bound members may only move their own tenant's projects;
    // internal members may move any.
    if let Some(tenant_id) = &payload.auth.member.tenant_id {
        if tenant_id != &payload.body.tenant_id {
            return Err(response::Error::Forbidden);
        }
    }

    repository::update_status(
        ctx,
        payload.body.project_id,
        payload.body.tenant_id,
        payload.body.status,
    )
    .await
    .map_err(|_| response::Error::UpstreamError)?
    .ok_or(response::Error::ProjectNotFound)
    .map(response::Success::Updated)
}
