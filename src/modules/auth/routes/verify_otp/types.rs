pub mod request {
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Payload {
        pub phone: String,
        pub code: String,
    }
}

pub mod response {
    use axum::{http::StatusCode, response::IntoResponse, Json};
    use axum_extra::extract::cookie::CookieJar;
    use serde_json::json;

    pub enum Success {
        Verified(CookieJar),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Verified(jar) => (
                    StatusCode::OK,
                    jar,
                    Json(json!({ "ok": true, "message": "verified" })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        BadRequest,
        NoOtpRequested,
        CodeExpired,
        TooManyAttempts,
        InvalidCode,
        ServerConfig,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            let (status, code) = match self {
                Self::BadRequest => (StatusCode::BAD_REQUEST, "bad_request"),
                Self::NoOtpRequested => (StatusCode::NOT_FOUND, "no_otp_requested"),
                Self::CodeExpired => (StatusCode::GONE, "code_expired"),
                Self::TooManyAttempts => (StatusCode::LOCKED, "too_many_attempts"),
                Self::InvalidCode => (StatusCode::UNAUTHORIZED, "invalid_code"),
                Self::ServerConfig => (StatusCode::INTERNAL_SERVER_ERROR, "server_config"),
            };

            (status, Json(json!({ "error": code }))).into_response()
        }
    }

    pub type Response = Result<Success, Error>;
}
