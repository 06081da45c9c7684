//! Request and response types for the authentication API. These payloads carry
//! passwords and TOTP material, so they must never be logged.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Address of the development email viewer where the code lands.
    pub email_viewer: String,
    pub message: Option<String>,
    /// Machine-readable inbox endpoint advertised by development servers.
    pub dev_endpoint: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerifyCodeRequest {
    pub email: String,
    pub code: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerifyCodeResponse {
    pub totp_secret: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub totp_token: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

/// One captured message from the development inbox, with the interesting
/// fields already extracted by the server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InboxMessage {
    pub subject: String,
    pub to: String,
    pub verification_code: Option<String>,
    pub totp_secret: Option<String>,
    pub timestamp: String,
}
