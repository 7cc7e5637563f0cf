pub mod request {
    pub use crate::modules::auth::middleware::Auth;
    use crate::modules::project::repository::ProjectStatus;
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Body {
        pub project_id: String,
        pub tenant_id: String,
        pub status: ProjectStatus,
    }

    pub struct Payload {
        pub auth: Auth,
        pub body: Body,
    }
}

pub mod response {
    use crate::modules::project::repository::Project;
    use axum::{http::StatusCode, response::IntoResponse, Json};
    use serde_json::json;

    pub enum Success {
        Updated(Project),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Updated(project) => (
                    StatusCode::OK,
                    Json(json!({
                        "ok": true,
                        "project": {
                            "id": project.id,
                            "status": project.status,
                            "updated_at": project.updated_at,
                        },
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        Forbidden,
        ProjectNotFound,
        UpstreamError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            let (status, code) = match self {
                Self::Forbidden => (StatusCode::FORBIDDEN, "forbidden"),
                Self::ProjectNotFound => (StatusCode::NOT_FOUND, "project_not_found"),
                Self::UpstreamError => (StatusCode::BAD_GATEWAY, "upstream_error"),
            };

            (status, Json(json!({ "ok": false, "error": code }))).into_response()
        }
    }

    pub type Response = Result<Success, Error>;
}
