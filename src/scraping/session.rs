use crate::models::booking::BookingDatesResponse;
use crate::models::credentials::{Credentials, LoginForm};
use crate::models::location::LocationsResponse;
use crate::scraping::constants::*;
use anyhow::{Context, Result, anyhow};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::fmt;
use tracing::{debug, warn};
use url::Url;

/// Result of one login attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Licence details don't match the email on file
    Mismatch,
    LoggedIn,
    /// Server accepted the request but wants the email confirmed first
    VerifyEmail,
}

impl LoginOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            LoginOutcome::Mismatch => MISMATCH_MESSAGE,
            LoginOutcome::LoggedIn => LOGGED_IN_MESSAGE,
            LoginOutcome::VerifyEmail => VERIFY_EMAIL_MESSAGE,
        }
    }
}

impl fmt::Display for LoginOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Deserialize, Debug)]
struct LoginResponse {
    #[serde(default)]
    authenticated: Option<bool>,
}

/// One HTTP session against the booking service. The cookie store carries
/// whatever authentication state the login response attaches.
pub struct DriveTestSession {
    client: Client,
    base_url: Url,
}

impl DriveTestSession {
    pub fn new(base_url: Url) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("Failed to build URL for {path}"))
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome> {
        let url = self.endpoint(LOGIN_PATH)?;

        let response = self
            .client
            .post(url)
            .form(&LoginForm::from(credentials))
            .send()
            .await
            .context("Failed to send login request")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read login response")?;
        debug!("login response {}: {}", status, body);

        if status == StatusCode::UNAUTHORIZED {
            return Ok(LoginOutcome::Mismatch);
        }
        if !status.is_success() {
            return Err(anyhow!("Login request failed with status {status}: {body}"));
        }

        match serde_json::from_str::<LoginResponse>(&body) {
            Ok(LoginResponse {
                authenticated: Some(true),
            }) => Ok(LoginOutcome::LoggedIn),
            Ok(_) => Ok(LoginOutcome::VerifyEmail),
            Err(e) => {
                warn!("login response was not the expected JSON: {}", e);
                Ok(LoginOutcome::VerifyEmail)
            }
        }
    }

    pub async fn fetch_locations(&self) -> Result<LocationsResponse> {
        let url = self.endpoint(LOCATIONS_PATH)?;

        self.client
            .get(url)
            .send()
            .await
            .context("Failed to fetch test centres")?
            .error_for_status()
            .context("Test centre request was rejected")?
            .json::<LocationsResponse>()
            .await
            .context("Failed to deserialize test centres")
    }

    pub async fn fetch_booking_dates(
        &self,
        service_id: u64,
        year: i32,
        month: u32,
    ) -> Result<BookingDatesResponse> {
        let mut url = self.endpoint(&format!("{BOOKING_PATH}/{service_id}"))?;
        url.query_pairs_mut()
            .append_pair("month", &month.to_string())
            .append_pair("year", &year.to_string());

        self.client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch booking dates for service {service_id}"))?
            .error_for_status()
            .with_context(|| {
                format!("Booking date request for service {service_id} was rejected")
            })?
            .json::<BookingDatesResponse>()
            .await
            .with_context(|| {
                format!("Failed to deserialize booking dates for service {service_id}")
            })
    }
}
