use crate::types::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Stage of a project on the kanban board.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Idea,
    Survey,
    Design,
    Install,
    Completed,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 5] = [
        Self::Idea,
        Self::Survey,
        Self::Design,
        Self::Install,
        Self::Completed,
    ];

    /// Unknown and legacy values fold into the `Idea` bucket so no project
    /// ever disappears from the board.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "survey" => Self::Survey,
            "design" => Self::Design,
            "install" => Self::Install,
            "completed" => Self::Completed,
            _ => Self::Idea,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idea => "idea",
            Self::Survey => "survey",
            Self::Design => "design",
            Self::Install => "install",
            Self::Completed => "completed",
        }
    }
}

/// A project row as stored upstream. `status` stays a raw string because
/// legacy rows may carry values outside the current stage set.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Project {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub status: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

/// Updates a project's status, filtered by both id and tenant so a
/// tenant-scoped caller can never touch another tenant's rows. Returns
/// `None` when no row matched.
pub async fn update_status(
    ctx: Arc<Context>,
    project_id: String,
    tenant_id: String,
    status: ProjectStatus,
) -> Result<Option<Project>, Error> {
    let res = reqwest::Client::new()
        .patch(format!("{}/rest/v1/projects", ctx.supabase.api_endpoint))
        .query(&[
            ("id", format!("eq.{}", project_id)),
            ("tenant_id", format!("eq.{}", tenant_id)),
        ])
        .header("apikey", ctx.supabase.service_key.clone())
        .header("Prefer", "return=representation")
        .bearer_auth(ctx.supabase.service_key.clone())
        .json(&json!({
            "status": status.as_str(),
            "updated_at": Utc::now(),
        }))
        .send()
        .await
        .map_err(|err| {
            tracing::error!("Failed to update project status: {}", err);
            Error::UnexpectedError
        })?;

    if !res.status().is_success() {
        tracing::error!(
            "Project status update rejected with status {}: {}",
            res.status(),
            res.text().await.unwrap_or_default()
        );
        return Err(Error::UnexpectedError);
    }

    let rows = res.json::<Vec<Project>>().await.map_err(|err| {
        tracing::error!("Failed to parse project rows: {}", err);
        Error::UnexpectedError
    })?;

    Ok(rows.into_iter().next())
}

pub async fn list_by_tenant(ctx: Arc<Context>, tenant_id: String) -> Result<Vec<Project>, Error> {
    let res = reqwest::Client::new()
        .get(format!("{}/rest/v1/projects", ctx.supabase.api_endpoint))
        .query(&[
            ("tenant_id", format!("eq.{}", tenant_id)),
            ("select", "*".to_string()),
            ("order", "updated_at.desc".to_string()),
        ])
        .header("apikey", ctx.supabase.service_key.clone())
        .bearer_auth(ctx.supabase.service_key.clone())
        .send()
        .await
        .map_err(|err| {
            tracing::error!("Failed to list projects: {}", err);
            Error::UnexpectedError
        })?;

    if !res.status().is_success() {
        tracing::error!(
            "Project listing rejected with status {}: {}",
            res.status(),
            res.text().await.unwrap_or_default()
        );
        return Err(Error::UnexpectedError);
    }

    res.json::<Vec<Project>>().await.map_err(|err| {
        tracing::error!("Failed to parse project rows: {}", err);
        Error::UnexpectedError
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_round_trip() {
        for status in ProjectStatus::ALL {
            assert_eq!(ProjectStatus::from_raw(status.as_str()), status);
        }
    }

    #[test]
    fn unknown_statuses_fold_into_idea() {
        assert_eq!(ProjectStatus::from_raw("open"), ProjectStatus::Idea);
        assert_eq!(ProjectStatus::from_raw("LEGACY"), ProjectStatus::Idea);
        assert_eq!(ProjectStatus::from_raw(""), ProjectStatus::Idea);
    }
}
