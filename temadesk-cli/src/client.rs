//! External Collaborators
//!
//! Blocking HTTP clients for the two seams the wizard depends on: the hosted
//! identity provider (sign-in / sign-up) and the order-intake endpoint. When
//! no intake endpoint is configured, orders fall back to the local stub
//! acknowledgement from `temadesk_common::intake`.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use temadesk_common::config::ClientConfig;
use temadesk_common::error::CollaboratorError;
use temadesk_common::intake::{OrderIntake, OrderReceipt, StubIntake};
use temadesk_common::order::OrderDraft;
use temadesk_common::pricing::Quote;
use temadesk_common::session::Session;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the authentication collaborator
pub struct AuthClient {
    http: Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    user: Option<AuthUser>,
}

#[derive(Deserialize, Default)]
struct AuthUser {
    email: Option<String>,
    user_metadata: Option<UserMetadata>,
}

#[derive(Deserialize, Default)]
struct UserMetadata {
    full_name: Option<String>,
}

impl AuthClient {
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let (Some(url), Some(api_key)) = (config.auth.url.clone(), config.auth.api_key.clone())
        else {
            bail!(
                "No auth endpoint configured.\n\
                 Set [auth] url and api_key in temadesk.toml, or export\n\
                 TEMADESK_AUTH_URL and TEMADESK_AUTH_KEY."
            );
        };

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, CollaboratorError> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);
        let body = serde_json::json!({ "email": email, "password": password });

        let response = self
            .http
            .post(&url)
            .header("apikey", &self.api_key)
            .json(&body)
            .send()
            .map_err(|e| CollaboratorError::Unexpected(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CollaboratorError::Auth(extract_error(response)));
        }

        let token: TokenResponse = response
            .json()
            .map_err(|e| CollaboratorError::Unexpected(e.to_string()))?;
        Ok(session_from_token(token, email))
    }

    pub fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<Session, CollaboratorError> {
        let url = format!("{}/auth/v1/signup", self.base_url);
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "data": { "full_name": full_name },
        });

        let response = self
            .http
            .post(&url)
            .header("apikey", &self.api_key)
            .json(&body)
            .send()
            .map_err(|e| CollaboratorError::Unexpected(e.to_string()))?;

        if !response.status().is_success() {
            let message = extract_error(response);
            if message.contains("already registered") {
                return Err(CollaboratorError::AlreadyRegistered);
            }
            return Err(CollaboratorError::Auth(message));
        }

        let token: TokenResponse = response
            .json()
            .map_err(|e| CollaboratorError::Unexpected(e.to_string()))?;
        Ok(session_from_token(token, email))
    }
}

fn session_from_token(token: TokenResponse, fallback_email: &str) -> Session {
    let user = token.user.unwrap_or_default();
    Session::new(
        user.email.unwrap_or_else(|| fallback_email.to_string()),
        user.user_metadata.and_then(|m| m.full_name),
        token.access_token,
    )
}

/// Pull a human-readable message out of an error response body.
fn extract_error(response: Response) -> String {
    let status = response.status();
    let body: serde_json::Value = match response.json() {
        Ok(v) => v,
        Err(_) => return format!("HTTP {}", status),
    };
    for key in ["error_description", "msg", "message", "error"] {
        if let Some(message) = body.get(key).and_then(|v| v.as_str()) {
            return message.to_string();
        }
    }
    format!("HTTP {}", status)
}

/// HTTP implementation of the order-intake seam
pub struct HttpIntake {
    http: Client,
    url: String,
}

#[derive(Serialize)]
struct OrderSubmission<'a> {
    draft: &'a OrderDraft,
    quote: &'a Quote,
    submitted_at: DateTime<Utc>,
}

impl HttpIntake {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

impl OrderIntake for HttpIntake {
    fn submit_order(
        &self,
        draft: &OrderDraft,
        quote: &Quote,
    ) -> Result<OrderReceipt, CollaboratorError> {
        let submission = OrderSubmission {
            draft,
            quote,
            submitted_at: Utc::now(),
        };

        let response = self
            .http
            .post(&self.url)
            .json(&submission)
            .send()
            .map_err(|e| CollaboratorError::Unexpected(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CollaboratorError::Intake(extract_error(response)));
        }

        response
            .json::<OrderReceipt>()
            .map_err(|e| CollaboratorError::Intake(format!("invalid intake response: {}", e)))
    }
}

/// Choose the intake collaborator: HTTP when configured, local stub otherwise.
pub fn intake_from_config(config: &ClientConfig) -> Result<Box<dyn OrderIntake>> {
    match &config.intake.url {
        Some(url) => {
            tracing::debug!("using order-intake endpoint {}", url);
            Ok(Box::new(HttpIntake::new(url)?))
        }
        None => {
            tracing::debug!("no intake endpoint configured, acknowledging orders locally");
            Ok(Box::new(StubIntake))
        }
    }
}
