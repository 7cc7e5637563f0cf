use crate::utils::{
    messaging::{self, OtpChannel, TemplateLang},
    otp_store::{OtpRecord, OtpStore},
    phone,
};
use rand::Rng;
use sha2::Digest;

pub const RESEND_COOLDOWN_SECONDS: i64 = 60;
pub const VALIDITY_MINUTES: i64 = 5;
pub const MAX_ATTEMPTS: u32 = 6;

pub enum IssueError {
    InvalidPhone,
    RateLimited { retry_after: i64 },
    ProviderError(serde_json::Value),
}

pub enum VerifyError {
    BadRequest,
    NoOtpRequested,
    CodeExpired,
    TooManyAttempts,
    InvalidCode,
}

pub struct Issued {
    pub message_id: String,
    pub resend_in: i64,
}

fn generate_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

fn code_hash(phone: &str, code: &str) -> String {
    let mut hasher = sha2::Sha256::new();
    hasher.update(format!("{}-{}", phone, code));
    base16ct::lower::encode_string(&hasher.finalize())
}

fn normalize_code(raw: &str) -> Option<String> {
    let code: String = raw.chars().filter(|c| c.is_ascii_digit()).take(6).collect();

    if code.len() == 6 {
        Some(code)
    } else {
        None
    }
}

/// Issues a fresh code for `raw_phone` and dispatches it over `channel`.
///
/// The store is only written after the provider accepts the message, so a
/// failed send never invalidates a previously issued code.
pub async fn issue(
    store: &OtpStore,
    channel: &dyn OtpChannel,
    raw_phone: &str,
    lang: Option<&str>,
) -> Result<Issued, IssueError> {
    let phone = phone::normalize(raw_phone).ok_or(IssueError::InvalidPhone)?;

    if let Some(existing) = store.find(&phone).await {
        let elapsed = existing.seconds_since_sent();

        if elapsed < RESEND_COOLDOWN_SECONDS {
            return Err(IssueError::RateLimited {
                retry_after: RESEND_COOLDOWN_SECONDS - elapsed,
            });
        }
    }

    let code = generate_code();

    let message_id = channel
        .send_code(&phone, &code, TemplateLang::resolve(lang))
        .await
        .map_err(|err| match err {
            messaging::Error::NotSent(payload) => IssueError::ProviderError(payload),
        })?;

    store
        .put(
            phone.clone(),
            OtpRecord::new(code_hash(&phone, &code), VALIDITY_MINUTES),
        )
        .await;

    Ok(Issued {
        message_id,
        resend_in: RESEND_COOLDOWN_SECONDS,
    })
}

/// Verifies `raw_code` against the outstanding record for `raw_phone` and
/// returns the normalized phone number on success.
///
/// A record is single-use: it is removed on success, and also on expiry so
/// later attempts report `NoOtpRequested` rather than `CodeExpired`.
pub async fn verify(store: &OtpStore, raw_phone: &str, raw_code: &str) -> Result<String, VerifyError> {
    let phone = phone::normalize(raw_phone).ok_or(VerifyError::BadRequest)?;
    let code = normalize_code(raw_code).ok_or(VerifyError::BadRequest)?;

    let record = store.find(&phone).await.ok_or(VerifyError::NoOtpRequested)?;

    if record.is_expired() {
        store.remove(&phone).await;
        return Err(VerifyError::CodeExpired);
    }

    if record.attempts >= MAX_ATTEMPTS {
        return Err(VerifyError::TooManyAttempts);
    }

    if code_hash(&phone, &code) != record.hash {
        store.record_failed_attempt(&phone).await;
        return Err(VerifyError::InvalidCode);
    }

    store.remove(&phone).await;

    Ok(phone)
}
