//! User-facing notification texts.

/// Shown when a refresh fails and the user has to log in again.
pub const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";

/// Verification mail was sent.
pub const MAIL_SENT: &str = "A verification email has been sent. Please check your inbox.";
/// E-mail address is already registered.
pub const MAIL_DUPLICATE_EMAIL: &str = "This email address is already registered.";
/// E-mail address was rejected by the server.
pub const MAIL_INVALID_EMAIL: &str = "This email address is not valid.";
/// Any other verification mail failure.
pub const MAIL_FAILED: &str = "Something went wrong while sending the verification email.";

/// Username availability could not be determined.
pub const USERNAME_CHECK_FAILED: &str = "Something went wrong while checking the username.";

/// Registration succeeded.
pub const REGISTERED: &str = "Registration complete!";
/// Nickname is taken.
pub const REGISTER_DUPLICATE_NICKNAME: &str = "This nickname is already in use.";
/// Age outside the accepted range.
pub const REGISTER_INVALID_AGE: &str =
    "Invalid age. Only users between 18 and 90 years old can register.";
/// Username is taken.
pub const REGISTER_DUPLICATE_USERNAME: &str = "This username is already in use.";
/// Any other registration failure.
pub const REGISTER_FAILED: &str = "Something went wrong during registration. Please try again.";

/// Login failed.
pub const LOGIN_FAILED: &str = "Login failed. Please check your username and password.";
