mod common;

use std::net::SocketAddr;

use spotdash::{
    oauth::{AuthorizationRequest, LoginError, RedirectTarget},
    utils,
};

use common::{query_map, test_config};

#[test]
fn test_redirect_target_from_localhost_uri() {
    let target = RedirectTarget::parse("http://localhost:8889/callback").unwrap();
    assert_eq!(target.addr, SocketAddr::from(([127, 0, 0, 1], 8889)));
    assert_eq!(target.path, "/callback");
}

#[test]
fn test_redirect_target_accepts_loopback_ips() {
    let v4 = RedirectTarget::parse("http://127.0.0.1:9000/cb").unwrap();
    assert_eq!(v4.addr.port(), 9000);

    let v6 = RedirectTarget::parse("http://[::1]:9000/cb").unwrap();
    assert!(v6.addr.ip().is_loopback());
    assert_eq!(v6.path, "/cb");
}

#[test]
fn test_redirect_target_rejects_non_loopback() {
    for uri in [
        "https://localhost:8889/callback",
        "http://example.com:8889/callback",
        "http://192.168.1.10:8889/callback",
        "not a url",
    ] {
        assert!(
            matches!(RedirectTarget::parse(uri), Err(LoginError::Config(_))),
            "{} was accepted",
            uri
        );
    }
}

#[test]
fn test_redirect_target_uses_default_http_port() {
    let target = RedirectTarget::parse("http://localhost/callback").unwrap();
    assert_eq!(target.addr.port(), 80);
}

#[test]
fn test_authorize_url_carries_request_parameters() {
    let config = test_config(8889, "http://127.0.0.1:1/api/token");
    let request = AuthorizationRequest::new(&config).unwrap();
    let url = request
        .authorize_url("https://accounts.spotify.com/authorize")
        .unwrap();

    assert!(url.starts_with("https://accounts.spotify.com/authorize?client_id=client-id"));
    let params = query_map(&url);
    assert_eq!(params["client_id"], "client-id");
    assert_eq!(params["response_type"], "code");
    assert_eq!(params["redirect_uri"], "http://127.0.0.1:8889/callback");
    assert_eq!(params["scope"], "user-top-read user-read-email");
    assert_eq!(params["state"], request.state());
    assert!(!params.contains_key("code_challenge"));
    assert!(!url.contains("client-secret"));
}

#[test]
fn test_scopes_are_an_ordered_set() {
    let mut config = test_config(8889, "http://127.0.0.1:1/api/token");
    config.scopes = vec![
        "user-top-read".to_string(),
        "user-read-email".to_string(),
        "user-top-read".to_string(),
        "user-library-read".to_string(),
    ];
    let request = AuthorizationRequest::new(&config).unwrap();

    assert_eq!(
        request.scopes(),
        ["user-top-read", "user-read-email", "user-library-read"]
    );
}

#[test]
fn test_every_request_gets_its_own_state() {
    let config = test_config(8889, "http://127.0.0.1:1/api/token");
    let a = AuthorizationRequest::new(&config).unwrap();
    let b = AuthorizationRequest::new(&config).unwrap();

    assert_eq!(a.state().len(), utils::STATE_LENGTH);
    assert_ne!(a.state(), b.state());
}

#[test]
fn test_pkce_request_includes_challenge() {
    let mut config = test_config(8889, "http://127.0.0.1:1/api/token");
    config.use_pkce = true;
    let request = AuthorizationRequest::new(&config).unwrap();
    let verifier = request.code_verifier().unwrap();

    let params = query_map(&request.authorize_url(&config.auth_url).unwrap());
    assert_eq!(params["code_challenge"], utils::generate_code_challenge(verifier));
    assert_eq!(params["code_challenge_method"], "S256");
}

#[test]
fn test_invalid_configuration_is_rejected() {
    let mut config = test_config(8889, "http://127.0.0.1:1/api/token");
    config.client_id = " ".to_string();
    assert!(matches!(
        AuthorizationRequest::new(&config),
        Err(LoginError::Config(_))
    ));

    let mut config = test_config(8889, "http://127.0.0.1:1/api/token");
    config.redirect_uri = "http://example.com:8889/callback".to_string();
    assert!(matches!(
        AuthorizationRequest::new(&config),
        Err(LoginError::Config(_))
    ));
}
