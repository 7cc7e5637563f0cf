pub mod request {
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Payload {
        pub phone: String,
        pub lang: Option<String>,
    }
}

pub mod response {
    use axum::{http::StatusCode, response::IntoResponse, Json};
    use serde_json::json;

    pub enum Success {
        Sent { resend_in: i64, message_id: String },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Sent {
                    resend_in,
                    message_id,
                } => (
                    StatusCode::OK,
                    Json(json!({
                        "ok": true,
                        "resend_in": resend_in,
                        "message_id": message_id,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        InvalidPhone,
        RateLimited { retry_after: i64 },
        ProviderError(serde_json::Value),
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
                Self::RateLimited { retry_after } => (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({
                        "error": "rate_limited",
                        "message": "A code was sent recently, wait before requesting another",
                        "retry_after": retry_after,
                    })),
                )
                    .into_response(),
                Self::ProviderError(payload) => (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({
                        "error": "provider_error",
                        "message": "Failed to send the verification code",
                        "provider": payload,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
