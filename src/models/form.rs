use serde::Serialize;

use crate::config::Credentials;

/// The exact field set the Costco logon endpoint receives from a browser,
/// captured from the network tab during a manual login. Every key is sent
/// even when its value is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoginForm {
    #[serde(rename = "logonId")]
    pub logon_id: String,
    #[serde(rename = "logonPassword")]
    pub logon_password: String,
    #[serde(rename = "reLogonURL")]
    pub re_logon_url: String,
    #[serde(rename = "isPharmacy")]
    pub is_pharmacy: String,
    #[serde(rename = "fromCheckout")]
    pub from_checkout: String,
    #[serde(rename = "authToken")]
    pub auth_token: String,
    #[serde(rename = "redirect_uri")]
    pub redirect_uri: String,
    #[serde(rename = "URL")]
    pub url: String,
}

impl LoginForm {
    pub fn with_credentials(credentials: &Credentials) -> Self {
        Self {
            logon_id: credentials.logon_id.clone(),
            logon_password: credentials.logon_password.clone(),
            ..Default::default()
        }
    }
}
