// booking service endpoints
pub const DEFAULT_BASE_URL: &str = "https://drivetest.ca";

pub const LOGIN_PATH: &str = "/booking/v1/driver/email";
pub const LOCATIONS_PATH: &str = "/booking/v1/location";
pub const BOOKING_PATH: &str = "/booking/v1/booking";

pub const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

// captcha is solved by the operator in a browser, then pasted back in
pub const CAPTCHA_HELP_URL: &str = "https://drivetest.ca/book-a-road-test/booking.html";

// login outcome messages shown to the operator
pub const MISMATCH_MESSAGE: &str =
    "The driver's licence information entered does not match DriveTest's records. Please try again.";
pub const LOGGED_IN_MESSAGE: &str = "Successfully logged in!";
pub const VERIFY_EMAIL_MESSAGE: &str = "Please verify your email and then try again.";

// env variables read by the config layer
pub const BASE_URL_VAR: &str = "DRIVETEST_BASE_URL";
pub const EMAIL_VAR: &str = "DRIVETEST_EMAIL";
pub const LICENCE_NUMBER_VAR: &str = "DRIVETEST_LICENCE_NUMBER";
pub const LICENCE_EXPIRY_VAR: &str = "DRIVETEST_LICENCE_EXPIRY";
