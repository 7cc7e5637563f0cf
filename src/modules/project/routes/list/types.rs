pub mod request {
    pub use crate::modules::auth::middleware::Auth;
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Query {
        pub tenant_id: Option<String>,
    }

    pub struct Payload {
        pub auth: Auth,
        pub query: Query,
    }
}

pub mod response {
    use crate::modules::project::repository::Project;
    use axum::{http::StatusCode, response::IntoResponse, Json};
    use serde_json::json;

    pub enum Success {
        Projects(Vec<Project>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Projects(projects) => (
                    StatusCode::OK,
                    Json(json!({ "ok": true, "projects": projects })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        TenantRequired,
        UpstreamError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            let (status, code) = match self {
                Self::TenantRequired => (StatusCode::BAD_REQUEST, "tenant_required"),
                Self::UpstreamError => (StatusCode::BAD_GATEWAY, "upstream_error"),
            };

            (status, Json(json!({ "ok": false, "error": code }))).into_response()
        }
    }

    pub type Response = Result<Success, Error>;
}
