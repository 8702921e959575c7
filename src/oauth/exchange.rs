use reqwest::Client;

use crate::types::TokenResponse;

use super::{AuthorizationRequest, LoginError};

/// Exchanges an authorization code for tokens.
///
/// Posts `grant_type=authorization_code` with the code, the client
/// credentials and the redirect URI of `request` (plus `code_verifier` when
/// the request uses PKCE). One attempt, no retry.
///
/// # Errors
///
/// [`LoginError::TokenExchange`] on transport failure, a non-2xx status or a
/// body that is not a token response.
pub async fn exchange_code(
    client: &Client,
    token_url: &str,
    request: &AuthorizationRequest,
    code: &str,
) -> Result<TokenResponse, LoginError> {
    let mut form = vec![
        ("grant_type", "authorization_code"),
        ("code", code),
        ("redirect_uri", request.redirect_uri()),
        ("client_id", request.client_id()),
        ("client_secret", request.client_secret()),
    ];
    if let Some(verifier) = request.code_verifier() {
        form.push(("code_verifier", verifier));
    }

    let res = client.post(token_url).form(&form).send().await?;

    let status = res.status();
    let body = res.text().await?;
    if !status.is_success() {
        return Err(LoginError::TokenExchange(format!(
            "token endpoint answered {}: {}",
            status,
            body.trim()
        )));
    }

    parse_token_response(&body)
}

/// Parses a token endpoint body, rejecting an empty access token.
pub fn parse_token_response(body: &str) -> Result<TokenResponse, LoginError> {
    let token: TokenResponse = serde_json::from_str(body)
        .map_err(|e| LoginError::TokenExchange(format!("malformed token response: {}", e)))?;

    if token.access_token.is_empty() {
        return Err(LoginError::TokenExchange(
            "token response carries an empty access token".to_string(),
        ));
    }
    Ok(token)
}
