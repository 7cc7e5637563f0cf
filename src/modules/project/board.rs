use super::repository::{Project, ProjectStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Result of a remote status update; the server is authoritative on the
/// exact `updated_at`.
#[derive(Clone, Debug)]
pub struct StatusUpdate {
    pub id: String,
    pub status: ProjectStatus,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub enum ApiError {
    Rejected,
}

/// Remote side of a drag-drop move. Implemented against the portal API in
/// the client and mocked in tests.
#[async_trait]
pub trait StatusApi: Send + Sync {
    async fn update_status(
        &self,
        project_id: &str,
        tenant_id: &str,
        status: ProjectStatus,
    ) -> Result<StatusUpdate, ApiError>;
}

#[derive(Clone, Debug)]
pub struct BoardItem {
    pub id: String,
    pub tenant_id: String,
    pub title: String,
    pub status: ProjectStatus,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub enum MoveError {
    UnknownItem,
    UpdateRejected,
}

/// In-memory kanban state with optimistic drag-drop moves. No locking or
/// queueing of concurrent drags; the remote side is last-writer-wins.
#[derive(Default)]
pub struct Board {
    items: Vec<BoardItem>,
}

impl Board {
    pub fn from_projects(projects: Vec<Project>) -> Self {
        Self {
            items: projects
                .into_iter()
                .map(|project| BoardItem {
                    id: project.id,
                    tenant_id: project.tenant_id,
                    title: project.name,
                    status: ProjectStatus::from_raw(&project.status),
                    updated_at: project.updated_at,
                })
                .collect(),
        }
    }

    pub fn item(&self, id: &str) -> Option<&BoardItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Moves `id` to `target`: applies the transition locally first, then
    /// confirms it remotely. On failure the item reverts to its pre-drop
    /// status; on success status and timestamp reconcile to the server's
    /// values.
    pub async fn move_item(
        &mut self,
        api: &dyn StatusApi,
        id: &str,
        target: ProjectStatus,
    ) -> Result<(), MoveError> {
        let (tenant_id, previous) = {
            let item = self
                .items
                .iter_mut()
                .find(|item| item.id == id)
                .ok_or(MoveError::UnknownItem)?;

            let previous = item.status;
            item.status = target;
            (item.tenant_id.clone(), previous)
        };

        match api.update_status(id, &tenant_id, target).await {
            Ok(update) => {
                if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
                    item.status = update.status;
                    item.updated_at = update.updated_at;
                }
                Ok(())
            }
            Err(_) => {
                if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
                    item.status = previous;
                }
                Err(MoveError::UpdateRejected)
            }
        }
    }

    /// Groups items into one column per stage. Every item lands in exactly
    /// one column since unknown statuses were normalized on load.
    pub fn columns(&self) -> Vec<(ProjectStatus, Vec<&BoardItem>)> {
        ProjectStatus::ALL
            .into_iter()
            .map(|status| {
                (
                    status,
                    self.items
                        .iter()
                        .filter(|item| item.status == status)
                        .collect(),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    struct MockApi {
        fail: bool,
        server_updated_at: DateTime<Utc>,
    }

    #[async_trait]
    impl StatusApi for MockApi {
        async fn update_status(
            &self,
            project_id: &str,
            _tenant_id: &str,
            status: ProjectStatus,
        ) -> Result<StatusUpdate, ApiError> {
            if self.fail {
                return Err(ApiError::Rejected);
            }

            Ok(StatusUpdate {
                id: project_id.to_string(),
                status,
                updated_at: self.server_updated_at,
            })
        }
    }

    fn board() -> Board {
        Board::from_projects(vec![
            Project {
                id: "p1".to_string(),
                tenant_id: "t1".to_string(),
                name: "Rooftop array".to_string(),
                status: "survey".to_string(),
                updated_at: Utc::now() - chrono::Duration::hours(1),
            },
            Project {
                id: "p2".to_string(),
                tenant_id: "t1".to_string(),
                name: "Carport".to_string(),
                status: "some-legacy-stage".to_string(),
                updated_at: Utc::now() - chrono::Duration::hours(2),
            },
        ])
    }

    #[tokio::test]
    async fn failed_remote_update_reverts_the_move() {
        let mut board = board();
        let api = MockApi {
            fail: true,
            server_updated_at: Utc::now(),
        };

        let result = board.move_item(&api, "p1", ProjectStatus::Install).await;

        assert!(matches!(result, Err(MoveError::UpdateRejected)));
        assert_eq!(board.item("p1").unwrap().status, ProjectStatus::Survey);
    }

    #[tokio::test]
    async fn successful_move_reconciles_with_server_timestamp() {
        let mut board = board();
        let server_updated_at = Utc::now();
        let api = MockApi {
            fail: false,
            server_updated_at,
        };

        board
            .move_item(&api, "p1", ProjectStatus::Install)
            .await
            .unwrap();

        let item = board.item("p1").unwrap();
        assert_eq!(item.status, ProjectStatus::Install);
        assert_eq!(item.updated_at, server_updated_at);
    }

    #[tokio::test]
    async fn moving_an_unknown_item_is_an_error() {
        let mut board = board();
        let api = MockApi {
            fail: false,
            server_updated_at: Utc::now(),
        };

        assert!(matches!(
            board.move_item(&api, "nope", ProjectStatus::Design).await,
            Err(MoveError::UnknownItem)
        ));
    }

    #[test]
    fn legacy_statuses_land_in_the_idea_column() {
        let board = board();
        let columns = board.columns();

        let idea = columns
            .iter()
            .find(|(status, _)| *status == ProjectStatus::Idea)
            .map(|(_, items)| items)
            .unwrap();

        assert_eq!(idea.len(), 1);
        assert_eq!(idea[0].id, "p2");

        let total: usize = columns.iter().map(|(_, items)| items.len()).sum();
        assert_eq!(total, 2);
    }
}
