use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static LICENCE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][0-9]{4}-?[0-9]{5}-?[0-9]{5}$").expect("valid regex"));

static LICENCE_EXPIRY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}/(0?[1-9]|1[012])/(0?[1-9]|[12][0-9]|3[01])$").expect("valid regex")
});

/// Details entered by the operator for one login attempt. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub licence_number: String,
    pub licence_expiry: String, // YYYY/MM/DD
    pub captcha_response: String,
}

/// Body of the email login request
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm<'a> {
    pub captcha_response: &'a str,
    pub email: &'a str,
    pub email_confirm: &'a str,
    pub licence_expiry: &'a str,
    pub licence_number: &'a str,
}

impl<'a> From<&'a Credentials> for LoginForm<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        LoginForm {
            captcha_response: &credentials.captcha_response,
            email: &credentials.email,
            email_confirm: &credentials.email,
            licence_expiry: &credentials.licence_expiry,
            licence_number: &credentials.licence_number,
        }
    }
}

pub fn is_valid_licence_number(value: &str) -> bool {
    LICENCE_NUMBER_RE.is_match(value)
}

pub fn is_valid_licence_expiry(value: &str) -> bool {
    LICENCE_EXPIRY_RE.is_match(value)
}
