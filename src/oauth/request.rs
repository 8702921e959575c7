use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use reqwest::Url;

use crate::{config::AuthConfig, utils};

use super::LoginError;

/// Loopback socket and path the browser is redirected to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    pub addr: SocketAddr,
    pub path: String,
}

impl RedirectTarget {
    /// Parses an `http://<loopback>:<port>/<path>` redirect URI.
    ///
    /// `localhost` maps to `127.0.0.1`. Non-loopback hosts, non-`http`
    /// schemes and a missing port are rejected.
    pub fn parse(redirect_uri: &str) -> Result<Self, LoginError> {
        let url = Url::parse(redirect_uri)
            .map_err(|e| LoginError::Config(format!("invalid redirect URI {}: {}", redirect_uri, e)))?;

        if url.scheme() != "http" {
            return Err(LoginError::Config(format!(
                "redirect URI must use http, got {}",
                url.scheme()
            )));
        }

        let ip = match url.host_str() {
            Some("localhost") => IpAddr::V4(Ipv4Addr::LOCALHOST),
            Some(host) => host
                .trim_start_matches('[')
                .trim_end_matches(']')
                .parse::<IpAddr>()
                .map_err(|_| LoginError::Config(format!("redirect host {} is not loopback", host)))?,
            None => return Err(LoginError::Config("redirect URI has no host".to_string())),
        };
        if !ip.is_loopback() {
            return Err(LoginError::Config(format!("redirect host {} is not loopback", ip)));
        }

        let port = url
            .port_or_known_default()
            .ok_or_else(|| LoginError::Config("redirect URI must name a fixed port".to_string()))?;

        Ok(Self {
            addr: SocketAddr::new(ip, port),
            path: url.path().to_string(),
        })
    }
}

/// One login attempt's parameters. Built fresh per attempt so every attempt
/// carries its own `state`; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    redirect: RedirectTarget,
    scopes: Vec<String>,
    state: String,
    code_verifier: Option<String>,
}

impl AuthorizationRequest {
    pub fn new(config: &AuthConfig) -> Result<Self, LoginError> {
        if config.client_id.trim().is_empty() {
            return Err(LoginError::Config("client id is empty".to_string()));
        }
        let redirect = RedirectTarget::parse(&config.redirect_uri)?;

        Ok(Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            redirect,
            scopes: utils::dedup_ordered(&config.scopes),
            state: utils::generate_state(),
            code_verifier: config.use_pkce.then(utils::generate_code_verifier),
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    pub fn redirect(&self) -> &RedirectTarget {
        &self.redirect
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn code_verifier(&self) -> Option<&str> {
        self.code_verifier.as_deref()
    }

    /// Builds the URL opened in the browser.
    ///
    /// Query order: `client_id`, `response_type`, `redirect_uri`, `scope`
    /// (space-delimited), `state`, then `code_challenge` and
    /// `code_challenge_method` when PKCE is on.
    pub fn authorize_url(&self, auth_url: &str) -> Result<String, LoginError> {
        let mut url = Url::parse(auth_url)
            .map_err(|e| LoginError::Config(format!("invalid authorize URL {}: {}", auth_url, e)))?;

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("client_id", &self.client_id)
                .append_pair("response_type", "code")
                .append_pair("redirect_uri", &self.redirect_uri)
                .append_pair("scope", &self.scopes.join(" "))
                .append_pair("state", &self.state);

            if let Some(verifier) = &self.code_verifier {
                query
                    .append_pair("code_challenge", &utils::generate_code_challenge(verifier))
                    .append_pair("code_challenge_method", "S256");
            }
        }

        Ok(url.into())
    }
}
