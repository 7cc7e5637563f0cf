pub mod whatsapp;

use async_trait::async_trait;

#[derive(Debug)]
pub enum Error {
    /// The provider rejected the message. The provider's error payload is
    /// carried along for diagnostics instead of being swallowed.
    NotSent(serde_json::Value),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Message-template language variant for the OTP template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateLang {
    Arabic,
    English,
}

impl TemplateLang {
    /// `ar*` maps to the Arabic variant, `en*` and everything else to the
    /// English one.
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw {
            Some(lang) if lang.to_ascii_lowercase().starts_with("ar") => Self::Arabic,
            _ => Self::English,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Arabic => "ar",
            Self::English => "en",
        }
    }
}

/// Delivery channel for one-time codes. Implemented by the WhatsApp client
/// in production and by mocks in tests.
#[async_trait]
pub trait OtpChannel: Send + Sync {
    /// Delivers `code` to `to` and returns the provider message id.
    async fn send_code(&self, to: &str, code: &str, lang: TemplateLang) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arabic_locales_resolve_to_arabic_variant() {
        assert_eq!(TemplateLang::resolve(Some("ar")), TemplateLang::Arabic);
        assert_eq!(TemplateLang::resolve(Some("ar-SA")), TemplateLang::Arabic);
        assert_eq!(TemplateLang::resolve(Some("AR")), TemplateLang::Arabic);
    }

    #[test]
    fn everything_else_resolves_to_english_variant() {
        assert_eq!(TemplateLang::resolve(Some("en")), TemplateLang::English);
        assert_eq!(TemplateLang::resolve(Some("en-US")), TemplateLang::English);
        assert_eq!(TemplateLang::resolve(Some("fr")), TemplateLang::English);
        assert_eq!(TemplateLang::resolve(None), TemplateLang::English);
    }
}
