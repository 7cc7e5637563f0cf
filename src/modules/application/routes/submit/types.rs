pub mod request {
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Payload {
        #[validate(length(min = 1, max = 200))]
        pub company_name: String,
        #[validate(length(min = 1, max = 200))]
        pub contact_name: String,
        #[validate(length(min = 8, max = 20))]
        pub phone: String,
        #[validate(email)]
        pub email: String,
        #[validate(length(max = 2000))]
        pub notes: Option<String>,
    }
}

pub mod response {
    use axum::{http::StatusCode, response::IntoResponse, Json};
    use serde_json::json;

    pub enum Success {
        Submitted { id: String },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Submitted { id } => {
                    (StatusCode::CREATED, Json(json!({ "ok": true, "id": id }))).into_response()
                }
            }
        }
    }

    pub enum Error {
        InvalidPhone,
        UpstreamError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvalidPhone => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "invalid_phone",
                        "message": "Phone number must contain 11 to 15 digits",
                    })),
                )
                    .into_response(),
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
