pub mod messaging;
pub mod otp_store;
pub mod phone;
pub mod validation;
