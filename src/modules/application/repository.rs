use crate::types::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use ulid::Ulid;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PartnerApplication {
    pub id: String,
    pub company_name: String,
    pub contact_name: String,
    pub phone: String,
    pub email: String,
    pub notes: Option<String>,
    pub status: ApplicationStatus,
    pub reviewer_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

pub struct CreateApplicationPayload {
    pub company_name: String,
    pub contact_name: String,
    pub phone: String,
    pub email: String,
    pub notes: Option<String>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

fn postgrest(ctx: &Context) -> String {
    format!("{}/rest/v1/partner_applications", ctx.supabase.api_endpoint)
}

pub async fn create(
    ctx: Arc<Context>,
    payload: CreateApplicationPayload,
) -> Result<PartnerApplication, Error> {
    let res = reqwest::Client::new()
        .post(postgrest(&ctx))
        .header("apikey", ctx.supabase.service_key.clone())
        .header("Prefer", "return=representation")
        .bearer_auth(ctx.supabase.service_key.clone())
        .json(&json!({
            "id": Ulid::new().to_string(),
            "company_name": payload.company_name,
            "contact_name": payload.contact_name,
            "phone": payload.phone,
            "email": payload.email,
            "notes": payload.notes,
            "status": ApplicationStatus::Pending.as_str(),
            "created_at": Utc::now(),
        }))
        .send()
        .await
        .map_err(|err| {
            tracing::error!("Failed to create partner application: {}", err);
            Error::UnexpectedError
        })?;

    if !res.status().is_success() {
        tracing::error!(
            "Partner application insert rejected with status {}: {}",
            res.status(),
            res.text().await.unwrap_or_default()
        );
        return Err(Error::UnexpectedError);
    }

    let rows = res.json::<Vec<PartnerApplication>>().await.map_err(|err| {
        tracing::error!("Failed to parse partner application rows: {}", err);
        Error::UnexpectedError
    })?;

    rows.into_iter().next().ok_or(Error::UnexpectedError)
}

pub async fn list_pending(ctx: Arc<Context>) -> Result<Vec<PartnerApplication>, Error> {
    let res = reqwest::Client::new()
        .get(postgrest(&ctx))
        .query(&[
            ("status", "eq.pending".to_string()),
            ("select", "*".to_string()),
            ("order", "created_at.asc".to_string()),
        ])
        .header("apikey", ctx.supabase.service_key.clone())
        .bearer_auth(ctx.supabase.service_key.clone())
        .send()
        .await
        .map_err(|err| {
            tracing::error!("Failed to list partner applications: {}", err);
            Error::UnexpectedError
        })?;

    if !res.status().is_success() {
        tracing::error!(
            "Partner application listing rejected with status {}: {}",
            res.status(),
            res.text().await.unwrap_or_default()
        );
        return Err(Error::UnexpectedError);
    }

    res.json::<Vec<PartnerApplication>>().await.map_err(|err| {
        tracing::error!("Failed to parse partner application rows: {}", err);
        Error::UnexpectedError
    })
}

pub async fn review(
    ctx: Arc<Context>,
    id: String,
    status: ApplicationStatus,
    reviewer_note: Option<String>,
) -> Result<Option<PartnerApplication>, Error> {
    let res = reqwest::Client::new()
        .patch(postgrest(&ctx))
        .query(&[("id", format!("eq.{}", id))])
        .header("apikey", ctx.supabase.service_key.clone())
        .header("Prefer", "return=representation")
        .bearer_auth(ctx.supabase.service_key.clone())
        .json(&json!({
            "status": status.as_str(),
            "reviewer_note": reviewer_note,
            "updated_at": Utc::now(),
        }))
        .send()
        .await
        .map_err(|err| {
            tracing::error!("Failed to review partner application {}: {}", id, err);
            Error::UnexpectedError
        })?;

    if !res.status().is_success() {
        tracing::error!(
            "Partner application review rejected with status {}: {}",
            res.status(),
            res.text().await.unwrap_or_default()
        );
        return Err(Error::UnexpectedError);
    }

    let rows = res.json::<Vec<PartnerApplication>>().await.map_err(|err| {
        tracing::error!("Failed to parse partner application rows: {}", err);
        Error::UnexpectedError
    })?;

    Ok(rows.into_iter().next())
}
