//! Registration use cases.
//!
//! Every call here runs before the user has a session, so all requests are
//! sent with [`AuthMode::Anonymous`].

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Datelike;
use freemate_domain::{ErrorCode, QueryParams, RegistrationForm, RegistrationRequest, ResponseBody};
use tracing::{info, warn};

use super::{LoadingGuard, message_for};
use crate::client::{ApiClient, AuthMode};
use crate::error::ApiResult;
use crate::messages;
use crate::ports::{Clock, Notifier, SessionStorage};

/// Session-storage key holding the `{email: bool}` map of verified addresses.
pub const VERIFIED_EMAILS_KEY: &str = "verifiedEmails";

const MAIL_ERRORS: &[(ErrorCode, &str)] = &[
    (ErrorCode::DuplicateEmail, messages::MAIL_DUPLICATE_EMAIL),
    (ErrorCode::InvalidEmail, messages::MAIL_INVALID_EMAIL),
];

const REGISTER_ERRORS: &[(ErrorCode, &str)] = &[
    (ErrorCode::DuplicateNickname, messages::REGISTER_DUPLICATE_NICKNAME),
    (ErrorCode::InvalidAge, messages::REGISTER_INVALID_AGE),
    (ErrorCode::DuplicateUsername, messages::REGISTER_DUPLICATE_USERNAME),
];

/// Sign-up flows: verification mail, username check and registration.
pub struct RegistrationService {
    client: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    storage: Arc<dyn SessionStorage>,
}

impl RegistrationService {
    /// Creates the service.
    #[must_use]
    pub fn new(
        client: Arc<ApiClient>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        storage: Arc<dyn SessionStorage>,
    ) -> Self {
        Self {
            client,
            notifier,
            clock,
            storage,
        }
    }

    /// Asks the server to mail a verification link to `email`.
    ///
    /// # Errors
    ///
    /// Returns the client error unchanged after notifying the user.
    pub async fn send_verification_email(&self, email: &str) -> ApiResult<ResponseBody> {
        let _loading = LoadingGuard::show(self.notifier.as_ref());
        let params = QueryParams::new().with("mail", email);

        match self
            .client
            .get(&self.client.config().api_paths.mail.send, &params, AuthMode::Anonymous)
            .await
        {
            Ok(body) => {
                info!(email, "Verification mail sent");
                self.notifier.show_success(messages::MAIL_SENT);
                Ok(body)
            }
            Err(error) => {
                warn!(email, %error, "Verification mail failed");
                self.notifier
                    .show_error(message_for(&error, MAIL_ERRORS).unwrap_or(messages::MAIL_FAILED));
                Err(error)
            }
        }
    }

    /// Returns true when `username` is already taken.
    ///
    /// Any failure, including a reply that is not a boolean, counts as taken.
    pub async fn check_username_duplicate(&self, username: &str) -> bool {
        let params = QueryParams::new().with("username", username);
        let result = self
            .client
            .get(
                &self.client.config().api_paths.auth.duplicate_username,
                &params,
                AuthMode::Anonymous,
            )
            .await;

        match result.map(|body| body.as_bool()) {
            Ok(Some(taken)) => taken,
            Ok(None) => {
                warn!(username, "Username check returned a non-boolean body");
                self.notifier.show_error(messages::USERNAME_CHECK_FAILED);
                true
            }
            Err(error) => {
                warn!(username, %error, "Username check failed");
                self.notifier.show_error(messages::USERNAME_CHECK_FAILED);
                true
            }
        }
    }

    /// Submits the sign-up form.
    ///
    /// # Errors
    ///
    /// Returns the client error unchanged after notifying the user.
    pub async fn register(&self, form: RegistrationForm) -> ApiResult<ResponseBody> {
        let _loading = LoadingGuard::show(self.notifier.as_ref());
        let request = RegistrationRequest::from_form(form, self.clock.now().year());

        match self
            .client
            .post(&self.client.config().api_paths.auth.register, &request, AuthMode::Anonymous)
            .await
        {
            Ok(body) => {
                info!(username = %request.username, "Registration complete");
                self.notifier.show_success(messages::REGISTERED);
                Ok(body)
            }
            Err(error) => {
                warn!(username = %request.username, %error, "Registration failed");
                self.notifier.show_error(
                    message_for(&error, REGISTER_ERRORS).unwrap_or(messages::REGISTER_FAILED),
                );
                Err(error)
            }
        }
    }

    /// Returns true if `email` has been marked verified in session storage.
    ///
    /// Verification completes out of band (the user follows the mailed link),
    /// so this only consults what the session has recorded.
    #[must_use]
    pub fn check_verification_status(&self, email: &str) -> bool {
        self.storage
            .get(VERIFIED_EMAILS_KEY)
            .and_then(|raw| serde_json::from_str::<HashMap<String, serde_json::Value>>(&raw).ok())
            .and_then(|verified| verified.get(email).and_then(serde_json::Value::as_bool))
            .unwrap_or(false)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::ports::TransportError;
    use crate::testing::{Harness, Notice};
    use freemate_domain::RawResponse;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn service(harness: &Harness) -> RegistrationService {
        RegistrationService::new(
            harness.client.clone(),
            harness.notifier.clone(),
            harness.clock.clone(),
            harness.storage.clone(),
        )
    }

    fn form(gender: &str, birth_year: i32) -> RegistrationForm {
        RegistrationForm {
            username: "neo".to_string(),
            password: "secret1".to_string(),
            nickname: "The One".to_string(),
            email: "neo@example.com".to_string(),
            gender: gender.to_string(),
            birth_year,
        }
    }

    #[tokio::test]
    async fn test_send_verification_email_success() {
        let harness = Harness::new(vec![Ok(RawResponse::text(200, "sent"))]);

        let body = service(&harness)
            .send_verification_email("a b@example.com")
            .await
            .unwrap();

        assert_eq!(body, ResponseBody::Text("sent".to_string()));
        let request = &harness.transport.requests()[0];
        assert_eq!(request.url, "https://api.test/api/mail/send?mail=a%20b%40example.com");
        assert_eq!(
            harness.notifier.notices(),
            vec![
                Notice::Loading(true),
                Notice::Success(messages::MAIL_SENT.to_string()),
                Notice::Loading(false),
            ]
        );
    }

    #[tokio::test]
    async fn test_send_verification_email_duplicate_rethrows_original() {
        let body = json!({"message": "DUPLICATE_EMAIL: already registered"});
        let harness = Harness::new(vec![Ok(RawResponse::json(400, &body))]);

        let error = service(&harness)
            .send_verification_email("neo@example.com")
            .await
            .unwrap_err();

        assert_eq!(
            error,
            ApiError::Status {
                status: 400,
                body: ResponseBody::Json(body),
            }
        );
        assert_eq!(
            harness.notifier.notices(),
            vec![
                Notice::Loading(true),
                Notice::Error(messages::MAIL_DUPLICATE_EMAIL.to_string()),
                Notice::Loading(false),
            ]
        );
    }

    #[tokio::test]
    async fn test_send_verification_email_error_mapping() {
        let cases = [
            (
                Ok(RawResponse::json(400, &json!({"errorCode": "INVALID_EMAIL", "errorMessage": "bad"}))),
                messages::MAIL_INVALID_EMAIL,
            ),
            (
                Ok(RawResponse::json(409, &json!({"errorCode": "DUPLICATE_EMAIL"}))),
                messages::MAIL_DUPLICATE_EMAIL,
            ),
            (
                Ok(RawResponse::json(500, &json!({"message": "boom"}))),
                messages::MAIL_FAILED,
            ),
            (
                Err(TransportError::ConnectionFailed("down".to_string())),
                messages::MAIL_FAILED,
            ),
        ];

        for (response, expected) in cases {
            let harness = Harness::new(vec![response]);
            let result = service(&harness).send_verification_email("x@y.z").await;
            assert!(result.is_err());
            assert_eq!(harness.notifier.errors(), vec![expected.to_string()]);
            assert_eq!(harness.notifier.notices().last(), Some(&Notice::Loading(false)));
        }
    }

    #[tokio::test]
    async fn test_check_username_duplicate() {
        let harness = Harness::new(vec![
            Ok(RawResponse::json(200, &json!(false))),
            Ok(RawResponse::json(200, &json!(true))),
        ]);
        let service = service(&harness);

        assert!(!service.check_username_duplicate("neo").await);
        assert!(service.check_username_duplicate("trinity").await);
        assert_eq!(
            harness.transport.requests()[0].url,
            "https://api.test/api/auth/duplicate/username?username=neo"
        );
        assert!(harness.notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn test_check_username_duplicate_fails_closed() {
        let harness = Harness::new(vec![
            Err(TransportError::Timeout { timeout_ms: 30_000 }),
            Ok(RawResponse::json(500, &json!({"message": "boom"}))),
            Ok(RawResponse::text(200, "maybe")),
        ]);
        let service = service(&harness);

        for _ in 0..3 {
            assert!(service.check_username_duplicate("neo").await);
        }
        assert_eq!(
            harness.notifier.errors(),
            vec![messages::USERNAME_CHECK_FAILED.to_string(); 3]
        );
    }

    #[tokio::test]
    async fn test_register_normalizes_payload() {
        let harness = Harness::new(vec![Ok(RawResponse::json(200, &json!({"id": 1})))]);

        service(&harness).register(form("male", 2000)).await.unwrap();

        let request = &harness.transport.requests()[0];
        assert_eq!(request.url, "https://api.test/api/auth/register");
        assert_eq!(request.header(freemate_domain::request::AUTHORIZATION), None);
        let sent: serde_json::Value =
            serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            sent,
            json!({
                "username": "neo",
                "password": "secret1",
                "nickname": "The One",
                "email": "neo@example.com",
                "gender": "MALE",
                "age": harness.clock.now().year() - 2000,
            })
        );
        assert!(
            harness
                .notifier
                .notices()
                .contains(&Notice::Success(messages::REGISTERED.to_string()))
        );
    }

    #[tokio::test]
    async fn test_register_other_gender_tokens_map_to_female() {
        let harness = Harness::new(vec![Ok(RawResponse::json(200, &json!({})))]);

        service(&harness).register(form("female", 1990)).await.unwrap();

        let sent: serde_json::Value =
            serde_json::from_str(harness.transport.requests()[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(sent["gender"], "FEMALE");
    }

    #[tokio::test]
    async fn test_register_error_mapping() {
        let cases = [
            ("DUPLICATE_NICKNAME", messages::REGISTER_DUPLICATE_NICKNAME),
            ("INVALID_AGE", messages::REGISTER_INVALID_AGE),
            ("DUPLICATE_USERNAME", messages::REGISTER_DUPLICATE_USERNAME),
            ("SOMETHING_ELSE", messages::REGISTER_FAILED),
        ];

        for (code, expected) in cases {
            let body = json!({"message": format!("rejected: {code}")});
            let harness = Harness::new(vec![Ok(RawResponse::json(400, &body))]);

            let error = service(&harness).register(form("male", 2000)).await.unwrap_err();

            assert_eq!(error.body(), Some(&ResponseBody::Json(body)));
            assert_eq!(harness.notifier.errors(), vec![expected.to_string()]);
            assert_eq!(harness.notifier.notices().last(), Some(&Notice::Loading(false)));
        }
    }

    #[test]
    fn test_check_verification_status() {
        let harness = Harness::new(Vec::new());
        let service = service(&harness);
        assert!(!service.check_verification_status("neo@example.com"));

        harness.storage.set(
            VERIFIED_EMAILS_KEY,
            r#"{"neo@example.com": true, "smith@example.com": false}"#,
        );
        assert!(service.check_verification_status("neo@example.com"));
        assert!(!service.check_verification_status("smith@example.com"));
        assert!(!service.check_verification_status("other@example.com"));

        harness.storage.set(VERIFIED_EMAILS_KEY, "not json");
        assert!(!service.check_verification_status("neo@example.com"));
    }
}
