use super::types::{request, response};
use crate::{modules::project::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    // A tenant-bound member always lists their own tenant; internal members
    // must name the tenant they want to inspect.
    let tenant_id = match &payload.auth.member.tenant_id {
        Some(tenant_id) => tenant_id.clone(),
        None => payload
            .query
            .tenant_id
            .ok_or(response::Error::TenantRequired)?,
    };

    repository::list_by_tenant(ctx, tenant_id)
        .await
        .map(response::Success::Projects)
        .map_err(|_| response::Error::UpstreamError)
}
