//! Registration payloads.

use serde::{Deserialize, Serialize};

/// Canonical gender values accepted by the registration endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    /// `MALE`
    Male,
    /// `FEMALE`
    Female,
}

impl Gender {
    /// Maps the registration form's gender token to the canonical value.
    ///
    /// The form offers exactly two choices; `"male"` maps to [`Gender::Male`]
    /// and every other token to [`Gender::Female`].
    #[must_use]
    pub fn from_form_token(token: &str) -> Self {
        if token == "male" {
            Self::Male
        } else {
            Self::Female
        }
    }

    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
        }
    }
}

/// Age in years for someone born in `birth_year`, as of `current_year`.
///
/// Saturates at the `i32` bounds; the server rejects such ages with
/// `INVALID_AGE`.
#[must_use]
pub const fn calculate_age(birth_year: i32, current_year: i32) -> i32 {
    current_year.saturating_sub(birth_year)
}

/// Raw registration form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    /// Login name.
    pub username: String,
    /// Plain-text password.
    pub password: String,
    /// Display name.
    pub nickname: String,
    /// Verified e-mail address.
    pub email: String,
    /// Gender token as submitted by the form (`"male"` / `"female"`).
    pub gender: String,
    /// Four-digit birth year.
    pub birth_year: i32,
}

/// Normalized registration payload sent to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    /// Login name.
    pub username: String,
    /// Plain-text password.
    pub password: String,
    /// Display name.
    pub nickname: String,
    /// E-mail address.
    pub email: String,
    /// Canonical gender.
    pub gender: Gender,
    /// Age derived from the birth year at submission time.
    pub age: i32,
}

impl RegistrationRequest {
    /// Normalizes `form` as of `current_year`.
    #[must_use]
    pub fn from_form(form: RegistrationForm, current_year: i32) -> Self {
        Self {
            gender: Gender::from_form_token(&form.gender),
            age: calculate_age(form.birth_year, current_year),
            username: form.username,
            password: form.password,
            nickname: form.nickname,
            email: form.email,
        }
    }
}
