pub mod request {
    pub use crate::modules::auth::middleware::InternalAuth;

    pub struct Payload {
        pub auth: InternalAuth,
    }
}

pub mod response {
    use crate::modules::application::repository::PartnerApplication;
    use axum::{http::StatusCode, response::IntoResponse, Json};
    use serde_json::json;

    pub enum Success {
        Applications(Vec<PartnerApplication>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Applications(applications) => (
                    StatusCode::OK,
                    Json(json!({ "ok": true, "applications": applications })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        UpstreamError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::UpstreamError => (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({ "error": "upstream_error" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
