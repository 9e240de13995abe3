//! Instagram profile client
//!
//! Resolves a handle to public profile fields via the web profile info
//! endpoint. Outcomes are reported as [`SocialLookup`] variants rather than
//! errors: the caller decides how each one degrades the result.
//!
//! The HTTP context (cookie-free `reqwest::Client` with browser headers) is
//! built lazily on first lookup and reused for the life of the process.

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{redirect, Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::contact_extractor::extract_contact_email;
use crate::models::{SocialLookup, SocialProfile};

const PROFILE_INFO_PATH: &str = "/api/v1/users/web_profile_info/";

/// App id the Instagram web front end sends with API calls
const INSTAGRAM_APP_ID: &str = "936619743392459";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Max characters of an error body carried into error messages
const ERROR_BODY_LIMIT: usize = 200;

/// Social profile lookups
#[async_trait]
pub trait SocialApi: Send + Sync {
    /// Fetch public profile fields; `email` is always `None` here
    async fn resolve_profile(&self, handle: &str) -> SocialLookup;

    /// Fetch the profile and fill in `email` from its bio or external link
    async fn lookup_contact(&self, handle: &str) -> SocialLookup {
        match self.resolve_profile(handle).await {
            SocialLookup::Found(mut profile) => {
                profile.email = extract_contact_email(&profile.bio, &profile.external_url);
                SocialLookup::Found(profile)
            }
            other => other,
        }
    }
}

/// Instagram web API client
pub struct InstagramClient {
    base_url: String,
    timeout: Duration,
    context: OnceCell<Client>,
}

impl InstagramClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            context: OnceCell::new(),
        }
    }

    /// Whether the shared HTTP context has been built yet
    pub fn is_initialized(&self) -> bool {
        self.context.get().is_some()
    }

    fn context(&self) -> Result<&Client, reqwest::Error> {
        self.context.get_or_try_init(|| {
            debug!("Initializing Instagram client context");

            let mut headers = HeaderMap::new();
            headers.insert("x-ig-app-id", HeaderValue::from_static(INSTAGRAM_APP_ID));
            headers.insert(
                header::ACCEPT,
                HeaderValue::from_static("application/json,text/html;q=0.9,*/*;q=0.8"),
            );
            headers.insert(
                header::ACCEPT_LANGUAGE,
                HeaderValue::from_static("en-US,en;q=0.5"),
            );

            // Login walls arrive as redirects; keep them visible
            Client::builder()
                .user_agent(BROWSER_USER_AGENT)
                .default_headers(headers)
                .redirect(redirect::Policy::none())
                .timeout(self.timeout)
                .build()
        })
    }

    async fn fetch_profile(&self, handle: &str) -> SocialLookup {
        let client = match self.context() {
            Ok(client) => client,
            Err(e) => return SocialLookup::TransportError(e.to_string()),
        };

        let url = format!("{}{}", self.base_url, PROFILE_INFO_PATH);
        let response = match client.get(&url).query(&[("username", handle)]).send().await {
            Ok(response) => response,
            Err(e) => return SocialLookup::TransportError(e.to_string()),
        };

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return SocialLookup::NotFound;
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return SocialLookup::AuthRequired;
        }

        if status.is_redirection() {
            let location = response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            if location.contains("login") {
                return SocialLookup::AuthRequired;
            }
            return SocialLookup::TransportError(format!(
                "Unexpected redirect {} to '{}'",
                status, location
            ));
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return SocialLookup::TransportError(e.to_string()),
        };

        classify_body(status, &body)
    }
}

#[async_trait]
impl SocialApi for InstagramClient {
    async fn resolve_profile(&self, handle: &str) -> SocialLookup {
        let outcome = self.fetch_profile(handle).await;

        match &outcome {
            SocialLookup::Found(_) => debug!(handle, "Instagram profile found"),
            SocialLookup::NotFound => debug!(handle, "Instagram profile does not exist"),
            SocialLookup::AuthRequired => warn!(handle, "Instagram requires login for profile lookup"),
            SocialLookup::TransportError(e) => {
                warn!(handle, error = %e, "Error fetching Instagram profile")
            }
        }

        outcome
    }
}

/// Map a non-redirect response body to a lookup outcome
fn classify_body(status: StatusCode, body: &str) -> SocialLookup {
    let parsed = serde_json::from_str::<dto::WebProfileInfo>(body);

    if let Ok(info) = &parsed {
        if info.require_login || info.message.as_deref() == Some("login_required") {
            return SocialLookup::AuthRequired;
        }
    }

    if !status.is_success() {
        return SocialLookup::TransportError(format!(
            "HTTP {}: {}",
            status,
            body.chars().take(ERROR_BODY_LIMIT).collect::<String>()
        ));
    }

    match parsed {
        Ok(info) => match info.data.and_then(|d| d.user) {
            Some(user) => SocialLookup::Found(SocialProfile {
                email: None,
                full_name: user.full_name.unwrap_or_default(),
                bio: user.biography.unwrap_or_default(),
                followers: user.edge_followed_by.map(|e| e.count).unwrap_or_default(),
                external_url: user.external_url.unwrap_or_default(),
            }),
            None => SocialLookup::NotFound,
        },
        Err(e) => SocialLookup::TransportError(format!("Parse error: {}", e)),
    }
}

mod dto {
    use super::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct WebProfileInfo {
        pub data: Option<WebProfileData>,
        #[serde(default)]
        pub require_login: bool,
        pub message: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct WebProfileData {
        pub user: Option<WebUser>,
    }

    #[derive(Debug, Deserialize)]
    pub struct WebUser {
        pub full_name: Option<String>,
        pub biography: Option<String>,
        pub external_url: Option<String>,
        pub edge_followed_by: Option<EdgeCount>,
    }

    #[derive(Debug, Deserialize)]
    pub struct EdgeCount {
        pub count: u64,
    }
}
