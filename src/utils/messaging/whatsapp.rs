use super::{Error, OtpChannel, Result, TemplateLang};
use crate::types::WhatsAppContext;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

// Cloud API error code for "number of parameters does not match the
// expected number" on a template send.
const MISSING_PARAMETER_ERROR_CODE: i64 = 132000;

#[derive(Deserialize, Debug)]
struct SentMessage {
    id: String,
}

#[derive(Deserialize, Debug)]
struct SendMessageResponse {
    messages: Vec<SentMessage>,
}

/// Templated-message client for the WhatsApp Cloud API.
pub struct WhatsAppClient {
    context: WhatsAppContext,
}

impl WhatsAppClient {
    pub fn new(context: WhatsAppContext) -> Self {
        Self { context }
    }

    /// Some template revisions carry a copy-code button which requires the
    /// code to be repeated as a button parameter. The base payload omits it;
    /// `with_button_param` adds it for the single accommodation resend.
    fn build_payload(
        &self,
        to: &str,
        code: &str,
        lang: TemplateLang,
        with_button_param: bool,
    ) -> serde_json::Value {
        let mut components = vec![json!({
            "type": "body",
            "parameters": [{ "type": "text", "text": code }]
        })];

        if with_button_param {
            components.push(json!({
                "type": "button",
                "sub_type": "url",
                "index": "0",
                "parameters": [{ "type": "text", "text": code }]
            }));
        }

        json!({
            "messaging_product": "whatsapp",
            "to": to,
            "type": "template",
            "template": {
                "name": self.context.otp_template,
                "language": { "code": lang.code() },
                "components": components
            }
        })
    }

    fn is_missing_parameter_error(payload: &serde_json::Value) -> bool {
        payload
            .pointer("/error/code")
            .and_then(|code| code.as_i64())
            .map(|code| code == MISSING_PARAMETER_ERROR_CODE)
            .unwrap_or(false)
    }

    async fn submit(&self, payload: serde_json::Value) -> Result<reqwest::Response> {
        reqwest::Client::new()
            .post(format!(
                "{}/{}/messages",
                self.context.api_endpoint, self.context.phone_number_id
            ))
            .bearer_auth(self.context.access_token.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|err| {
                tracing::error!("Failed to reach WhatsApp API: {}", err);
                Error::NotSent(json!({ "message": err.to_string() }))
            })
    }

    async fn error_payload(res: reqwest::Response) -> serde_json::Value {
        match res.text().await {
            Ok(body) => serde_json::from_str::<serde_json::Value>(&body)
                .unwrap_or_else(|_| json!({ "message": body })),
            Err(err) => json!({ "message": err.to_string() }),
        }
    }
}

#[async_trait]
impl OtpChannel for WhatsAppClient {
    async fn send_code(&self, to: &str, code: &str, lang: TemplateLang) -> Result<String> {
        let res = self
            .submit(self.build_payload(to, code, lang, false))
            .await?;

        let res = if res.status().is_success() {
            res
        } else {
            let payload = Self::error_payload(res).await;

            if !Self::is_missing_parameter_error(&payload) {
                tracing::error!("WhatsApp rejected OTP template send: {}", payload);
                return Err(Error::NotSent(payload));
            }

            // Template-contract accommodation: resend exactly once with the
            // button parameter added. Any other provider failure is final.
            tracing::warn!("Template requires a button parameter, resending once");

            let retry = self
                .submit(self.build_payload(to, code, lang, true))
                .await?;

            if !retry.status().is_success() {
                let payload = Self::error_payload(retry).await;
                tracing::error!("WhatsApp rejected OTP template resend: {}", payload);
                return Err(Error::NotSent(payload));
            }

            retry
        };

        let parsed = res.json::<SendMessageResponse>().await.map_err(|err| {
            tracing::error!("Failed to parse WhatsApp response: {}", err);
            Error::NotSent(json!({ "message": err.to_string() }))
        })?;

        parsed
            .messages
            .into_iter()
            .next()
            .map(|message| message.id)
            .ok_or_else(|| Error::NotSent(json!({ "message": "No message id in response" })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WhatsAppContext;

    fn client() -> WhatsAppClient {
        WhatsAppClient::new(WhatsAppContext {
            api_endpoint: "https://graph.facebook.com/v19.0".to_string(),
            access_token: "token".to_string(),
            phone_number_id: "12345".to_string(),
            otp_template: "otp_login".to_string(),
        })
    }

    #[test]
    fn base_payload_has_body_parameter_only() {
        let payload = client().build_payload("966512345678", "123456", TemplateLang::English, false);

        let components = payload
            .pointer("/template/components")
            .and_then(|c| c.as_array())
            .unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(
            payload.pointer("/template/components/0/parameters/0/text"),
            Some(&serde_json::json!("123456"))
        );
        assert_eq!(
            payload.pointer("/template/language/code"),
            Some(&serde_json::json!("en"))
        );
    }

    #[test]
    fn resend_payload_repeats_code_in_button_parameter() {
        let payload = client().build_payload("966512345678", "123456", TemplateLang::Arabic, true);

        let components = payload
            .pointer("/template/components")
            .and_then(|c| c.as_array())
            .unwrap();
        assert_eq!(components.len(), 2);
        assert_eq!(
            payload.pointer("/template/components/1/parameters/0/text"),
            Some(&serde_json::json!("123456"))
        );
        assert_eq!(
            payload.pointer("/template/language/code"),
            Some(&serde_json::json!("ar"))
        );
    }

    use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    struct ProviderScript {
        responses: Mutex<Vec<(StatusCode, serde_json::Value)>>,
        requests: Mutex<Vec<serde_json::Value>>,
    }

    impl ProviderScript {
        fn new(responses: Vec<(StatusCode, serde_json::Value)>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses),
                requests: Mutex::new(vec![]),
            })
        }

        async fn request_count(&self) -> usize {
            self.requests.lock().await.len()
        }
    }

    async fn messages_handler(
        State(script): State<Arc<ProviderScript>>,
        Json(body): Json<serde_json::Value>,
    ) -> (StatusCode, Json<serde_json::Value>) {
        script.requests.lock().await.push(body);
        let (status, body) = script.responses.lock().await.remove(0);
        (status, Json(body))
    }

    async fn spawn_provider(script: Arc<ProviderScript>) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());

        let router = Router::new()
            .route("/:phone_number_id/messages", post(messages_handler))
            .with_state(script);

        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        endpoint
    }

    fn client_at(endpoint: String) -> WhatsAppClient {
        WhatsAppClient::new(WhatsAppContext {
            api_endpoint: endpoint,
            access_token: "token".to_string(),
            phone_number_id: "12345".to_string(),
            otp_template: "otp_login".to_string(),
        })
    }

    #[tokio::test]
    async fn accepted_send_submits_once() {
        let script = ProviderScript::new(vec![(
            StatusCode::OK,
            serde_json::json!({ "messages": [{ "id": "wamid.first" }] }),
        )]);
        let client = client_at(spawn_provider(script.clone()).await);

        let id = client
            .send_code("966512345678", "123456", TemplateLang::English)
            .await
            .unwrap();

        assert_eq!(id, "wamid.first");
        assert_eq!(script.request_count().await, 1);
    }

    #[tokio::test]
    async fn missing_parameter_rejection_is_resent_exactly_once() {
        let script = ProviderScript::new(vec![
            (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": { "code": 132000 } }),
            ),
            (
                StatusCode::OK,
                serde_json::json!({ "messages": [{ "id": "wamid.second" }] }),
            ),
        ]);
        let client = client_at(spawn_provider(script.clone()).await);

        let id = client
            .send_code("966512345678", "123456", TemplateLang::English)
            .await
            .unwrap();

        assert_eq!(id, "wamid.second");
        assert_eq!(script.request_count().await, 2);

        // The resend carries the button component; the first try does not.
        let requests = script.requests.lock().await;
        let components = |req: &serde_json::Value| {
            req.pointer("/template/components")
                .and_then(|c| c.as_array())
                .unwrap()
                .len()
        };
        assert_eq!(components(&requests[0]), 1);
        assert_eq!(components(&requests[1]), 2);
        assert_eq!(
            requests[1].pointer("/template/components/1/sub_type"),
            Some(&serde_json::json!("url"))
        );
    }

    #[tokio::test]
    async fn other_provider_failures_are_not_resent() {
        let script = ProviderScript::new(vec![(
            StatusCode::BAD_REQUEST,
            serde_json::json!({ "error": { "code": 131048, "message": "rate limit hit" } }),
        )]);
        let client = client_at(spawn_provider(script.clone()).await);

        let result = client
            .send_code("966512345678", "123456", TemplateLang::English)
            .await;

        match result {
            Err(Error::NotSent(payload)) => {
                assert_eq!(
                    payload.pointer("/error/code"),
                    Some(&serde_json::json!(131048))
                );
            }
            _ => panic!("expected provider error"),
        }

        assert_eq!(script.request_count().await, 1);
    }

    #[tokio::test]
    async fn failed_resend_is_final() {
        let script = ProviderScript::new(vec![
            (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": { "code": 132000 } }),
            ),
            (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": { "code": 132000 } }),
            ),
        ]);
        let client = client_at(spawn_provider(script.clone()).await);

        let result = client
            .send_code("966512345678", "123456", TemplateLang::English)
            .await;

        assert!(matches!(result, Err(Error::NotSent(_))));
        assert_eq!(script.request_count().await, 2);
    }

    #[test]
    fn missing_parameter_error_is_detected_by_code() {
        let payload = serde_json::json!({
            "error": { "message": "Number of parameters does not match", "code": 132000 }
        });
        assert!(WhatsAppClient::is_missing_parameter_error(&payload));

        let other = serde_json::json!({
            "error": { "message": "Rate limit hit", "code": 131048 }
        });
        assert!(!WhatsAppClient::is_missing_parameter_error(&other));

        let malformed = serde_json::json!({ "message": "gateway timeout" });
        assert!(!WhatsAppClient::is_missing_parameter_error(&malformed));
    }
}
