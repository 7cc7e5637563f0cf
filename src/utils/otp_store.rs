use chrono::{NaiveDateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A single outstanding code for one phone number. The plaintext code is
/// never stored, only its digest.
#[derive(Clone)]
pub struct OtpRecord {
    pub hash: String,
    pub expires_at: NaiveDateTime,
    pub attempts: u32,
    pub last_sent_at: NaiveDateTime,
}

impl OtpRecord {
    pub fn new(hash: String, validity_minutes: i64) -> Self {
        let now = Utc::now().naive_utc();

        Self {
            hash,
            expires_at: now + chrono::Duration::minutes(validity_minutes),
            attempts: 0,
            last_sent_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().naive_utc() > self.expires_at
    }

    pub fn seconds_since_sent(&self) -> i64 {
        (Utc::now().naive_utc() - self.last_sent_at).num_seconds()
    }
}

/// Process-local store of outstanding codes, keyed by normalized phone
/// number. At most one live record per phone; a fresh issuance overwrites
/// the prior one. Codes do not survive a restart, the user just requests a
/// new one.
#[derive(Clone)]
pub struct OtpStore {
    records: Arc<Mutex<HashMap<String, OtpRecord>>>,
}

impl OtpStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn find(&self, phone: &str) -> Option<OtpRecord> {
        self.records.lock().await.get(phone).cloned()
    }

    pub async fn put(&self, phone: String, record: OtpRecord) {
        self.records.lock().await.insert(phone, record);
    }

    pub async fn record_failed_attempt(&self, phone: &str) -> Option<u32> {
        let mut records = self.records.lock().await;

        records.get_mut(phone).map(|record| {
            record.attempts += 1;
            record.attempts
        })
    }

    pub async fn remove(&self, phone: &str) {
        self.records.lock().await.remove(phone);
    }
}

impl Default for OtpStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn issuance_overwrites_prior_record() {
        let store = OtpStore::new();
        let mut first = OtpRecord::new("first".to_string(), 5);
        first.attempts = 3;

        store.put("966512345678".to_string(), first).await;
        store
            .put("966512345678".to_string(), OtpRecord::new("second".to_string(), 5))
            .await;

        let record = store.find("966512345678").await.unwrap();
        assert_eq!(record.hash, "second");
        assert_eq!(record.attempts, 0);
    }

    #[tokio::test]
    async fn failed_attempt_increments_only_existing_records() {
        let store = OtpStore::new();
        store
            .put("966512345678".to_string(), OtpRecord::new("h".to_string(), 5))
            .await;

        assert_eq!(store.record_failed_attempt("966512345678").await, Some(1));
        assert_eq!(store.record_failed_attempt("966512345678").await, Some(2));
        assert_eq!(store.record_failed_attempt("15550001111").await, None);
    }

    #[tokio::test]
    async fn remove_is_terminal() {
        let store = OtpStore::new();
        store
            .put("966512345678".to_string(), OtpRecord::new("h".to_string(), 5))
            .await;

        store.remove("966512345678").await;

        assert!(store.find("966512345678").await.is_none());
    }
}
