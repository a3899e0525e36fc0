//! Private API HTTP client.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::UNIX_EPOCH;

use async_trait::async_trait;
use reqwest::{header, Client, Response};
use sha1::{Digest, Sha1};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::api::types::*;
use crate::api::SavedMediaApi;
use crate::error::{Error, Result};
use crate::session::store::keys;
use crate::session::{SessionState, SessionValue};

/// Private API base URL.
const API_BASE: &str = "https://i.instagram.com/api/v1";

/// User agent the private API expects (mobile app signature).
const USER_AGENT: &str = "Instagram 76.0.0.15.395 Android (24/7.0; 640dpi; \
                          1440x2560; samsung; SM-G930F; herolte; samsungexynos8890; en_US; 138226743)";

/// Private API client holding the mutable session state.
///
/// Request signing and the wider endpoint surface are deliberately not
/// modeled; the client covers login, session resume, the saved feed,
/// unsave, and raw fetches.
pub struct InstaClient {
    http: Client,
    user_agent: String,
    session: Arc<RwLock<SessionState>>,
}

impl InstaClient {
    /// Create a new API client with an empty session.
    pub fn new() -> Result<Self> {
        let http = Client::builder().build()?;

        Ok(Self {
            http,
            user_agent: USER_AGENT.to_string(),
            session: Arc::new(RwLock::new(SessionState::new())),
        })
    }

    /// Snapshot of the current session state.
    pub async fn session(&self) -> SessionState {
        self.session.read().await.clone()
    }

    /// Build headers for an authenticated request.
    async fn request_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::USER_AGENT, parse_header(&self.user_agent)?);

        let session = self.session.read().await;
        if let Some(cookie) = session.cookie() {
            let cookie = String::from_utf8_lossy(cookie).into_owned();
            headers.insert(header::COOKIE, parse_header(&cookie)?);
        }
        if let Some(token) = session.csrf_token() {
            headers.insert("x-csrftoken", parse_header(token)?);
        }

        Ok(headers)
    }

    /// Make an authenticated GET request.
    async fn get(&self, url: &str) -> Result<Response> {
        let headers = self.request_headers().await?;

        tracing::debug!("GET {}", url);
        let response = self.http.get(url).headers(headers).send().await?;
        tracing::debug!("Response status: {}", response.status());

        Ok(response)
    }

    /// Make an authenticated form POST request.
    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<Response> {
        let headers = self.request_headers().await?;

        tracing::debug!("POST {}", url);
        let response = self
            .http
            .post(url)
            .headers(headers)
            .form(form)
            .send()
            .await?;
        tracing::debug!("Response status: {}", response.status());

        Ok(response)
    }
}

#[async_trait]
impl SavedMediaApi for InstaClient {
    async fn login(
        &self,
        username: &str,
        password: &str,
        device_id: Option<&str>,
    ) -> Result<SessionState> {
        let device_id = match device_id {
            Some(id) => id.to_string(),
            None => generate_device_id(),
        };
        let guid = Uuid::new_v4().to_string();
        let phone_id = Uuid::new_v4().to_string();

        let mut jar: BTreeMap<String, String> = BTreeMap::new();

        // Prefetch to obtain a csrf token cookie
        let url = format!("{}/si/fetch_headers/", API_BASE);
        tracing::debug!("GET {}", url);
        let response = self
            .http
            .get(&url)
            .header(header::USER_AGENT, &self.user_agent)
            .send()
            .await?;
        collect_cookies(&response, &mut jar);

        let csrf = jar.get("csrftoken").cloned().unwrap_or_default();

        let url = format!("{}/accounts/login/", API_BASE);
        let form = [
            ("username", username),
            ("password", password),
            ("device_id", device_id.as_str()),
            ("guid", guid.as_str()),
            ("phone_id", phone_id.as_str()),
            ("_csrftoken", csrf.as_str()),
            ("login_attempt_count", "0"),
        ];

        tracing::debug!("POST {}", url);
        let response = self
            .http
            .post(&url)
            .header(header::USER_AGENT, &self.user_agent)
            .header(header::COOKIE, cookie_header(&jar))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let auth_expires = session_cookie_expiry(&response);
        collect_cookies(&response, &mut jar);
        let body = response.text().await?;
        tracing::debug!("Login response status: {}", status);

        if !status.is_success() {
            return Err(map_api_error(status.as_u16(), &body));
        }

        let login: LoginResponse = serde_json::from_str(&body)
            .map_err(|_| map_api_error(status.as_u16(), &body))?;
        if login.status != "ok" {
            return Err(map_api_error(status.as_u16(), &body));
        }

        let mut state = SessionState::new();
        state.insert(keys::DEVICE_ID, SessionValue::Text(device_id));
        state.insert(keys::GUID, SessionValue::Text(guid));
        if let Some(user) = login.logged_in_user {
            state.insert(
                keys::USER_ID,
                SessionValue::Number(serde_json::Number::from(user.pk)),
            );
        }
        if let Some(token) = jar.get("csrftoken") {
            state.insert(keys::CSRF_TOKEN, SessionValue::Text(token.clone()));
        }
        state.insert(
            keys::COOKIE,
            SessionValue::Bytes(cookie_header(&jar).into_bytes()),
        );
        if let Some(ts) = auth_expires {
            state.insert(
                keys::AUTH_EXPIRES,
                SessionValue::Number(serde_json::Number::from(ts)),
            );
        }

        *self.session.write().await = state.clone();
        Ok(state)
    }

    async fn resume(&self, cached: SessionState) -> Result<SessionState> {
        *self.session.write().await = cached;

        // Verify the cached cookies are still accepted
        let url = format!("{}/accounts/current_user/", API_BASE);
        let response = self.get(&url).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(map_api_error(status.as_u16(), &body));
        }

        let parsed: StatusResponse = serde_json::from_str(&body).unwrap_or_default();
        if parsed.status != "ok" {
            return Err(map_api_error(status.as_u16(), &body));
        }

        Ok(self.session.read().await.clone())
    }

    async fn saved_feed(&self, max_id: Option<&str>) -> Result<SavedFeedPage> {
        let url = match max_id {
            Some(max_id) => format!("{}/feed/saved/?max_id={}", API_BASE, max_id),
            None => format!("{}/feed/saved/", API_BASE),
        };

        let response = self.get(&url).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(map_api_error(status.as_u16(), &body));
        }

        let page: SavedFeedPage = serde_json::from_str(&body).map_err(|e| Error::Api {
            code: status.as_u16(),
            body: format!("Failed to parse saved feed: {}", e),
        })?;

        Ok(page)
    }

    async fn unsave(&self, media_id: &str) -> Result<()> {
        let (csrf, guid) = {
            let session = self.session.read().await;
            (
                session.csrf_token().unwrap_or_default().to_string(),
                session
                    .get(keys::GUID)
                    .and_then(SessionValue::as_str)
                    .unwrap_or_default()
                    .to_string(),
            )
        };

        let url = format!("{}/media/{}/unsave/", API_BASE, media_id);
        let form = [("_csrftoken", csrf.as_str()), ("_uuid", guid.as_str())];

        let response = self.post_form(&url, &form).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await?;
            return Err(map_api_error(status.as_u16(), &body));
        }

        // Response body is unused
        Ok(())
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .header(header::USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // The body is written to disk either way; surfaced for --debug runs
            tracing::debug!("fetch of {} returned HTTP {}", url, status);
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Generate a fresh android device identifier.
fn generate_device_id() -> String {
    let digest = Sha1::digest(Uuid::new_v4().as_bytes());
    format!("android-{}", &hex::encode(digest)[..16])
}

/// Parse a header value, rejecting bytes that cannot appear in a header.
fn parse_header(value: &str) -> Result<header::HeaderValue> {
    header::HeaderValue::from_str(value)
        .map_err(|_| Error::Session("session field contains invalid header bytes".to_string()))
}

/// Merge `Set-Cookie` values from a response into a cookie map.
fn collect_cookies(response: &Response, jar: &mut BTreeMap<String, String>) {
    for cookie in response.cookies() {
        jar.insert(cookie.name().to_string(), cookie.value().to_string());
    }
}

/// Render a cookie map as a `Cookie` header value.
fn cookie_header(jar: &BTreeMap<String, String>) -> String {
    jar.iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Expiry of the auth cookie, when the server provides one.
fn session_cookie_expiry(response: &Response) -> Option<i64> {
    response
        .cookies()
        .find(|c| c.name() == "sessionid")
        .and_then(|c| c.expires())
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs() as i64)
}

/// Classify a failed API response.
///
/// Expiry-class responses are recoverable by a forced re-login; credential
/// failures and everything else are fatal.
fn map_api_error(code: u16, body: &str) -> Error {
    let parsed: StatusResponse = serde_json::from_str(body).unwrap_or_default();

    if let Some(error_type) = parsed.error_type.as_deref() {
        match error_type {
            "bad_password" | "invalid_user" | "inactive_user" => {
                return Error::Login(parsed.message.unwrap_or_else(|| error_type.to_string()));
            }
            "checkpoint_challenge_required" => {
                return Error::SessionExpired(error_type.to_string());
            }
            _ => {}
        }
    }

    if let Some(message) = parsed.message.as_deref() {
        if message == "login_required" || message == "checkpoint_required" {
            return Error::SessionExpired(message.to_string());
        }
    }

    if code == 401 || code == 403 {
        return Error::SessionExpired(format!("HTTP {}", code));
    }

    Error::Api {
        code,
        body: body.to_string(),
    }
}
