use crate::config::Settings;
use crate::scraping::prompt::CredentialPrompt;
use crate::scraping::session::{DriveTestSession, LoginOutcome};
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::{info, warn};

/// Keeps asking for credentials until the server either logs us in or asks
/// for the email to be verified. A licence/email mismatch just asks again,
/// and from then on every field is typed in since the pre-filled ones were
/// rejected.
pub async fn login_until_settled<R: BufRead, W: Write>(
    session: &DriveTestSession,
    prompt: &mut CredentialPrompt<R, W>,
    settings: &Settings,
) -> Result<LoginOutcome> {
    let mut defaults = settings.clone();
    let mut attempt = 1;
    loop {
        let credentials = prompt.read_credentials(&defaults)?;
        info!("logging in, attempt {}", attempt);

        let outcome = session.login(&credentials).await?;
        prompt.say(outcome)?;

        match outcome {
            LoginOutcome::Mismatch => {
                warn!("licence details rejected for {}", credentials.email);
                defaults.forget_credentials();
                attempt += 1;
            }
            LoginOutcome::LoggedIn | LoginOutcome::VerifyEmail => return Ok(outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraping::constants::*;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::io::Cursor;
    use url::Url;

    fn prefilled(server: &MockServer) -> Settings {
        Settings {
            base_url: Url::parse(&server.base_url()).unwrap(),
            email: Some("driver@example.com".to_string()),
            licence_number: Some("A1234-56789-01234".to_string()),
            licence_expiry: Some("2027/03/14".to_string()),
        }
    }

    #[tokio::test]
    async fn mismatch_asks_again_until_logged_in() {
        let server = MockServer::start_async().await;
        let rejected = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(LOGIN_PATH)
                    .body_contains("captchaResponse=first");
                then.status(401);
            })
            .await;
        let accepted = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(LOGIN_PATH)
                    .body_contains("captchaResponse=second");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({ "authenticated": true }));
            })
            .await;
        let settings = prefilled(&server);
        let session = DriveTestSession::new(settings.base_url.clone()).unwrap();
        let mut output = Vec::new();
        let mut prompt = CredentialPrompt::new(
            Cursor::new("first\ndriver@example.com\nA1234-56789-01234\n2027/03/14\nsecond\n"),
            &mut output,
        );

        let outcome = login_until_settled(&session, &mut prompt, &settings)
            .await
            .unwrap();

        rejected.assert_hits_async(1).await;
        accepted.assert_hits_async(1).await;
        assert_eq!(outcome, LoginOutcome::LoggedIn);
        drop(prompt);
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains(MISMATCH_MESSAGE));
        assert!(shown.contains(LOGGED_IN_MESSAGE));
    }

    #[tokio::test]
    async fn unverified_email_stops_the_loop() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path(LOGIN_PATH);
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({ "authenticated": false }));
            })
            .await;
        let settings = prefilled(&server);
        let session = DriveTestSession::new(settings.base_url.clone()).unwrap();
        let mut output = Vec::new();
        let mut prompt = CredentialPrompt::new(Cursor::new("token\nunused\n"), &mut output);

        let outcome = login_until_settled(&session, &mut prompt, &settings)
            .await
            .unwrap();

        mock.assert_hits_async(1).await;
        assert_eq!(outcome, LoginOutcome::VerifyEmail);
    }

    #[tokio::test]
    async fn rejected_prefilled_licence_can_be_corrected() {
        let server = MockServer::start_async().await;
        let stale = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(LOGIN_PATH)
                    .body_contains("licenceNumber=A1234-56789-01234");
                then.status(401);
            })
            .await;
        let corrected = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(LOGIN_PATH)
                    .body_contains("licenceNumber=B1234-56789-01234")
                    .body_contains("captchaResponse=t2");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({ "authenticated": true }));
            })
            .await;
        let settings = prefilled(&server);
        let session = DriveTestSession::new(settings.base_url.clone()).unwrap();
        let mut output = Vec::new();
        let mut prompt = CredentialPrompt::new(
            Cursor::new("t1\ndriver@example.com\nB1234-56789-01234\n2027/03/14\nt2\n"),
            &mut output,
        );

        let outcome = login_until_settled(&session, &mut prompt, &settings)
            .await
            .unwrap();

        stale.assert_hits_async(1).await;
        corrected.assert_hits_async(1).await;
        assert_eq!(outcome, LoginOutcome::LoggedIn);
        drop(prompt);
        let shown = String::from_utf8(output).unwrap();
        assert_eq!(shown.matches("Email:").count(), 1);
        assert_eq!(shown.matches("licence number:").count(), 1);
        // the caller's settings are left alone
        assert_eq!(settings.licence_number.as_deref(), Some("A1234-56789-01234"));
    }
}
