use crate::config::Settings;
use crate::models::credentials::{Credentials, is_valid_licence_expiry, is_valid_licence_number};
use crate::scraping::constants::CAPTCHA_HELP_URL;
use anyhow::{Context, Result, bail};
use std::io::{BufRead, Write};

/// Asks the operator for login details on an interactive terminal
pub struct CredentialPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> CredentialPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Values already present in `settings` are used as-is; the captcha is
    /// always asked for since a token is only good for one attempt.
    pub fn read_credentials(&mut self, settings: &Settings) -> Result<Credentials> {
        let email = match &settings.email {
            Some(email) => email.clone(),
            None => self.ask("Email:")?,
        };
        let licence_number = match &settings.licence_number {
            Some(number) => number.clone(),
            None => self.ask_until_valid(
                "licence number:",
                is_valid_licence_number,
                "Licence number must look like A1234-56789-01234.",
            )?,
        };
        let licence_expiry = match &settings.licence_expiry {
            Some(expiry) => expiry.clone(),
            None => self.ask_until_valid(
                "licence expiry (YYYY/MM/DD):",
                is_valid_licence_expiry,
                "Date must follow format YYYY/MM/DD!",
            )?,
        };

        writeln!(
            self.output,
            "To get the ReCaptcha code required in the next step, go to {CAPTCHA_HELP_URL} and follow the instructions given."
        )?;
        let captcha_response = self.ask("ReCaptcha code:")?;

        Ok(Credentials {
            email,
            licence_number,
            licence_expiry,
            captcha_response,
        })
    }

    pub fn say(&mut self, message: impl std::fmt::Display) -> Result<()> {
        writeln!(self.output, "{message}").context("Failed to write to terminal")
    }

    fn ask(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{label}")?;
        self.output.flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            bail!("stdin closed while waiting for {}", label.trim_end_matches(':'));
        }
        Ok(line.trim().to_string())
    }

    fn ask_until_valid(
        &mut self,
        label: &str,
        is_valid: fn(&str) -> bool,
        hint: &str,
    ) -> Result<String> {
        loop {
            let answer = self.ask(label)?;
            if is_valid(&answer) {
                return Ok(answer);
            }
            writeln!(self.output, "{hint}")?;
        }
    }
}
