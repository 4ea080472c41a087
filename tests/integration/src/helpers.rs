//! Test helpers: server lifecycle, identity tokens and request shortcuts

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use chat_api::{create_app, create_app_state, serve};
use chat_common::{AppConfig, IdentityClaims, JwtService};
use reqwest::{multipart, redirect, Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Secret the test server verifies identity tokens with
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub config: AppConfig,
    jwt: JwtService,
    _handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?).await
    }

    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let addr = listener.local_addr()?;

        let state = create_app_state(config.clone()).await?;
        let app = create_app(state)?;
        let handle = tokio::spawn(async move {
            serve(listener, app).await.ok();
        });

        // Redirects are asserted on, never followed
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            addr,
            client,
            jwt: JwtService::new(&config.auth.jwt_secret, config.auth.issuer.clone()),
            config,
            _handle: handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self, path: &str) -> String {
        format!("ws://{}{path}", self.addr)
    }

    /// Identity token for a provider user called `name`
    pub fn token_for(&self, name: &str) -> Result<String> {
        let claims = IdentityClaims::new(format!("user_{name}"), chrono::Duration::minutes(10))
            .with_name(name)
            .with_email(format!("{name}@example.com"));
        Ok(self.jwt.issue(&claims)?)
    }

    /// A fresh provider user with a profile; returns its token
    pub async fn sign_up(&self, prefix: &str) -> Result<String> {
        let token = self.token_for(&format!("{prefix}{}", crate::unique_suffix()))?;
        let response = self.request(reqwest::Method::POST, "/api/profile", Some(&token)).send().await?;
        assert_status(response, StatusCode::OK).await?;
        Ok(token)
    }

    fn request(&self, method: reqwest::Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self.client.request(method, format!("{}{path}", self.base_url()));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.request(reqwest::Method::GET, path, None).send().await?)
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.request(reqwest::Method::GET, path, Some(token)).send().await?)
    }

    pub async fn post_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(self
            .request(reqwest::Method::POST, path, Some(token))
            .json(body)
            .send()
            .await?)
    }

    pub async fn patch_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(self
            .request(reqwest::Method::PATCH, path, Some(token))
            .json(body)
            .send()
            .await?)
    }

    pub async fn patch_empty(&self, path: &str, token: Option<&str>) -> Result<Response> {
        Ok(self.request(reqwest::Method::PATCH, path, token).send().await?)
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.request(reqwest::Method::DELETE, path, Some(token)).send().await?)
    }

    /// Multipart upload of one file in the `file` field
    pub async fn upload(
        &self,
        route: &str,
        token: &str,
        file_name: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Result<Response> {
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)?;
        let form = multipart::Form::new().part("file", part);
        Ok(self
            .request(reqwest::Method::POST, &format!("/api/uploadthing/{route}"), Some(token))
            .multipart(form)
            .send()
            .await?)
    }
}

/// Configuration for a test server against `DATABASE_URL`
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL")?;
    let mut config = AppConfig::for_testing(url, TEST_JWT_SECRET);
    config.storage.upload_dir = std::env::temp_dir()
        .join(format!("chat-it-uploads-{}", uuid::Uuid::new_v4()))
        .to_string_lossy()
        .into_owned();
    Ok(config)
}

/// Integration tests need a database; without one they are skipped
pub async fn check_test_env() -> bool {
    dotenvy::dotenv().ok();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }
    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

/// `Location` header of a redirect
pub fn location(response: &Response) -> Option<String> {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
