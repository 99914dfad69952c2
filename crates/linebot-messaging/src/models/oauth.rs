//! Channel access token responses. These use snake_case on the wire.

use serde::{Deserialize, Serialize};

/// Issued channel access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    /// Lifetime in seconds.
    pub expires_in: i64,
    pub token_type: String,
    /// Set by the v2.1 endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
}

/// `POST /v2/oauth/verify`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedAccessTokenResponse {
    pub client_id: String,
    pub expires_in: i64,
    #[serde(default)]
    pub scope: String,
}

/// `GET /oauth2/v2.1/tokens/kid`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidKeyIdsResponse {
    pub kids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_v21_token() {
        let body = r#"{"access_token":"eyJhbGciOiJIUz.....","expires_in":2592000,"token_type":"Bearer","key_id":"sDTOzw5wIfxxxxPEzcmeQA"}"#;
        let token: AccessTokenResponse = serde_json::from_str(body).unwrap();
        assert_eq!(token.expires_in, 2592000);
        assert_eq!(token.key_id.as_deref(), Some("sDTOzw5wIfxxxxPEzcmeQA"));
    }

    #[test]
    fn test_decode_v2_token_without_key_id() {
        let body = r#"{"access_token":"W1TeHCgfH2Liwa.....","expires_in":2592000,"token_type":"Bearer"}"#;
        let token: AccessTokenResponse = serde_json::from_str(body).unwrap();
        assert_eq!(token.token_type, "Bearer");
        assert!(token.key_id.is_none());
    }
}
