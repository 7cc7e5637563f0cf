use crate::types::Context;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A portal account. `tenant_id` is null for internal members, who get
/// cross-tenant administrative access.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Member {
    pub id: String,
    pub phone: String,
    pub full_name: String,
    pub tenant_id: Option<String>,
    pub role: String,
}

impl Member {
    pub fn is_internal(&self) -> bool {
        self.tenant_id.is_none()
    }
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub async fn find_by_phone(ctx: Arc<Context>, phone: String) -> Result<Option<Member>, Error> {
    let res = reqwest::Client::new()
        .get(format!("{}/rest/v1/members", ctx.supabase.api_endpoint))
        .query(&[
            ("phone", format!("eq.{}", phone)),
            ("select", "*".to_string()),
            ("limit", "1".to_string()),
        ])
        .header("apikey", ctx.supabase.service_key.clone())
        .bearer_auth(ctx.supabase.service_key.clone())
        .send()
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch member by phone: {}", err);
            Error::UnexpectedError
        })?;

    if !res.status().is_success() {
        tracing::error!(
            "Member lookup rejected with status {}: {}",
            res.status(),
            res.text().await.unwrap_or_default()
        );
        return Err(Error::UnexpectedError);
    }

    let rows = res.json::<Vec<Member>>().await.map_err(|err| {
        tracing::error!("Failed to parse member rows: {}", err);
        Error::UnexpectedError
    })?;

    Ok(rows.into_iter().next())
}
