#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::Router;
use reqwest::{Client, Url};
use spotdash::{config::AuthConfig, oauth::BrowserLauncher};

pub fn http_client() -> Client {
    Client::builder().no_proxy().build().unwrap()
}

/// Port that was free a moment ago.
pub fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Serves `app` on an ephemeral loopback port and returns its base URL.
pub async fn spawn_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn test_config(port: u16, token_url: &str) -> AuthConfig {
    AuthConfig {
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
        redirect_uri: format!("http://127.0.0.1:{}/callback", port),
        scopes: vec!["user-top-read".to_string(), "user-read-email".to_string()],
        auth_url: "https://accounts.example.test/authorize".to_string(),
        token_url: token_url.to_string(),
        callback_timeout: Duration::from_secs(5),
        use_pkce: false,
    }
}

pub fn query_map(url: &str) -> HashMap<String, String> {
    Url::parse(url).unwrap().query_pairs().into_owned().collect()
}

/// What the fake browser does with the authorization URL.
#[derive(Debug, Clone)]
pub enum Redirect {
    /// Redirects with `code` and the state from the URL.
    Code(&'static str),
    /// Redirects with `code` and a fixed state.
    CodeWithState(&'static str, &'static str),
    /// Redirects with `error`.
    Error(&'static str),
    /// Never redirects.
    Silent,
    /// Cannot be opened.
    Broken,
}

/// Browser stand-in that performs the redirect itself.
#[derive(Clone)]
pub struct FakeBrowser {
    pub redirect: Redirect,
    pub opened: Arc<Mutex<Vec<String>>>,
}

impl FakeBrowser {
    pub fn new(redirect: Redirect) -> Self {
        Self {
            redirect,
            opened: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn opened_urls(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl BrowserLauncher for FakeBrowser {
    fn open(&self, url: &str) -> Result<(), String> {
        if let Redirect::Broken = self.redirect {
            return Err("no browser available".to_string());
        }
        self.opened.lock().unwrap().push(url.to_string());

        let params = query_map(url);
        let redirect_uri = params["redirect_uri"].clone();
        let state = params["state"].clone();
        let query = match &self.redirect {
            Redirect::Code(code) => format!("code={}&state={}", code, state),
            Redirect::CodeWithState(code, state) => format!("code={}&state={}", code, state),
            Redirect::Error(error) => format!("error={}&state={}", error, state),
            Redirect::Silent | Redirect::Broken => return Ok(()),
        };

        tokio::spawn(async move {
            let _ = http_client()
                .get(format!("{}?{}", redirect_uri, query))
                .send()
                .await;
        });
        Ok(())
    }
}
