use crate::utils::otp_store::OtpStore;
use async_trait::async_trait;
use std::env;

#[derive(Clone)]
pub enum AppEnvironment {
    Production,
    Development,
}

impl AppEnvironment {
    pub fn from(raw_environment: String) -> Self {
        match raw_environment.as_ref() {
            "production" => Self::Production,
            _ => Self::Development,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u32,
    pub url: String,
}

#[derive(Clone)]
pub struct WhatsAppContext {
    pub api_endpoint: String,
    pub access_token: String,
    pub phone_number_id: String,
    pub otp_template: String,
}

#[derive(Clone)]
pub struct SessionContext {
    // None when SESSION_SECRET is unset; minting then fails with
    // server_config rather than the process refusing to boot.
    pub signing_secret: Option<String>,
    pub cookie_name: String,
}

#[derive(Clone)]
pub struct SupabaseContext {
    pub api_endpoint: String,
    pub service_key: String,
}

#[derive(Clone)]
pub struct Context {
    pub app: AppContext,
    pub whatsapp: WhatsAppContext,
    pub session: SessionContext,
    pub supabase: SupabaseContext,
    pub otp_store: OtpStore,
}

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u32,
    pub url: String,
}

#[derive(Clone)]
pub struct WhatsAppConfig {
    pub api_endpoint: String,
    pub access_token: String,
    pub phone_number_id: String,
    pub otp_template: String,
}

#[derive(Clone)]
pub struct SessionConfig {
    pub signing_secret: Option<String>,
    pub cookie_name: String,
}

#[derive(Clone)]
pub struct SupabaseConfig {
    pub api_endpoint: String,
    pub service_key: String,
}

#[derive(Clone)]
pub struct Config {
    pub app: AppConfig,
    pub whatsapp: WhatsAppConfig,
    pub session: SessionConfig,
    pub supabase: SupabaseConfig,
}

impl Default for Config {
    fn default() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let environment = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u32>()
            .expect("Invalid PORT number");
        let url = env::var("URL").unwrap_or_else(|_| format!("http://{}:{}", host, port));
        let whatsapp_api_endpoint = env::var("WHATSAPP_API_ENDPOINT")
            .unwrap_or_else(|_| "https://graph.facebook.com/v19.0".to_string());
        let whatsapp_access_token =
            env::var("WHATSAPP_ACCESS_TOKEN").expect("WHATSAPP_ACCESS_TOKEN not set");
        let whatsapp_phone_number_id =
            env::var("WHATSAPP_PHONE_NUMBER_ID").expect("WHATSAPP_PHONE_NUMBER_ID not set");
        let whatsapp_otp_template =
            env::var("WHATSAPP_OTP_TEMPLATE").unwrap_or_else(|_| "otp_login".to_string());
        let session_signing_secret = env::var("SESSION_SECRET").ok();
        let session_cookie_name =
            env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "vf_session".to_string());
        let supabase_api_endpoint = env::var("SUPABASE_URL").expect("SUPABASE_URL not set");
        let supabase_service_key =
            env::var("SUPABASE_SERVICE_KEY").expect("SUPABASE_SERVICE_KEY not set");

        Self {
            app: AppConfig {
                host,
                environment: AppEnvironment::from(environment),
                port,
                url,
            },
            whatsapp: WhatsAppConfig {
                api_endpoint: whatsapp_api_endpoint,
                access_token: whatsapp_access_token,
                phone_number_id: whatsapp_phone_number_id,
                otp_template: whatsapp_otp_template,
            },
            session: SessionConfig {
                signing_secret: session_signing_secret,
                cookie_name: session_cookie_name,
            },
            supabase: SupabaseConfig {
                api_endpoint: supabase_api_endpoint,
                service_key: supabase_service_key,
            },
        }
    }
}

#[async_trait]
pub trait ToContext {
    async fn to_context(self) -> Context;
}

#[async_trait]
impl ToContext for Config {
    async fn to_context(self) -> Context {
        Context {
            app: AppContext {
                host: self.app.host,
                environment: self.app.environment,
                port: self.app.port,
                url: self.app.url,
            },
            whatsapp: WhatsAppContext {
                api_endpoint: self.whatsapp.api_endpoint,
                access_token: self.whatsapp.access_token,
                phone_number_id: self.whatsapp.phone_number_id,
                otp_template: self.whatsapp.otp_template,
            },
            session: SessionContext {
                signing_secret: self.session.signing_secret,
                cookie_name: self.session.cookie_name,
            },
            supabase: SupabaseContext {
                api_endpoint: self.supabase.api_endpoint,
                service_key: self.supabase.service_key,
            },
            otp_store: OtpStore::new(),
        }
    }
}
