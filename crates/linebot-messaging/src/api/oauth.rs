//! Channel access tokens.
//!
//! These endpoints take form-encoded bodies and are called without the
//! bearer token; the channel credentials or a signed JWT travel in the form.

use crate::client::{BasicResponse, Client};
use crate::models::{AccessTokenResponse, ValidKeyIdsResponse, VerifiedAccessTokenResponse};
use crate::Result;
use reqwest::Method;

const CLIENT_CREDENTIALS: &str = "client_credentials";

/// `client_assertion_type` for JWT assertions.
pub const JWT_BEARER_ASSERTION: &str = "urn:ietf:params:oauth:client-assertion-type:jwt-bearer";

impl Client {
    /// Issue a short-lived (30 day) channel access token.
    pub async fn issue_access_token(
        &self,
        channel_id: &str,
        channel_secret: &str,
    ) -> Result<AccessTokenResponse> {
        let request = self
            .anonymous_request(Method::POST, "/v2/oauth/accessToken")
            .form(&[
                ("grant_type", CLIENT_CREDENTIALS),
                ("client_id", channel_id),
                ("client_secret", channel_secret),
            ]);
        self.call(request).await
    }

    pub async fn revoke_access_token(&self, access_token: &str) -> Result<BasicResponse> {
        let request = self
            .anonymous_request(Method::POST, "/v2/oauth/revoke")
            .form(&[("access_token", access_token)]);
        self.call_basic(request).await
    }

    pub async fn verify_access_token(&self, access_token: &str) -> Result<VerifiedAccessTokenResponse> {
        let request = self
            .anonymous_request(Method::POST, "/v2/oauth/verify")
            .form(&[("access_token", access_token)]);
        self.call(request).await
    }

    /// Issue a v2.1 token from a JWT signed with the channel's assertion key.
    pub async fn issue_access_token_v2(&self, client_assertion: &str) -> Result<AccessTokenResponse> {
        let request = self
            .anonymous_request(Method::POST, "/oauth2/v2.1/token")
            .form(&[
                ("grant_type", CLIENT_CREDENTIALS),
                ("client_assertion_type", JWT_BEARER_ASSERTION),
                ("client_assertion", client_assertion),
            ]);
        self.call(request).await
    }

    /// Key IDs of the currently valid v2.1 tokens.
    pub async fn get_access_token_key_ids_v2(&self, client_assertion: &str) -> Result<ValidKeyIdsResponse> {
        let request = self
            .anonymous_request(Method::GET, "/oauth2/v2.1/tokens/kid")
            .query(&[
                ("client_assertion_type", JWT_BEARER_ASSERTION),
                ("client_assertion", client_assertion),
            ]);
        self.call(request).await
    }

    pub async fn revoke_access_token_v2(
        &self,
        channel_id: &str,
        channel_secret: &str,
        access_token: &str,
    ) -> Result<BasicResponse> {
        let request = self
            .anonymous_request(Method::POST, "/oauth2/v2.1/revoke")
            .form(&[
                ("client_id", channel_id),
                ("client_secret", channel_secret),
                ("access_token", access_token),
            ]);
        self.call_basic(request).await
    }
}
