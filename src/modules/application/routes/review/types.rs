pub mod request {
    pub use crate::modules::auth::middleware::InternalAuth;
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Decision {
        Approve,
        Reject,
    }

    #[derive(Deserialize)]
    pub struct Body {
        pub decision: Decision,
        pub note: Option<String>,
    }

    pub struct Payload {
        pub auth: InternalAuth,
        pub id: String,
        pub body: Body,
    }
}

pub mod response {
    use crate::modules::application::repository::PartnerApplication;
    use axum::{http::StatusCode, response::IntoResponse, Json};
    use serde_json::json;

    pub enum Success {
        Reviewed(PartnerApplication),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Reviewed(application) => (
                    StatusCode::OK,
                    Json(json!({ "ok": true, "application": application })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        ApplicationNotFound,
        UpstreamError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            let (status, code) = match self {
                Self::ApplicationNotFound => (StatusCode::NOT_FOUND, "application_not_found"),
                Self::UpstreamError => (StatusCode::BAD_GATEWAY, "upstream_error"),
            };

            (status, Json(json!({ "error": code }))).into_response()
        }
    }

    pub type Response = Result<Success, Error>;
}
