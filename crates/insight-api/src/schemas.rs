// Request and response schemas

use crate::error::{ApiError, ValidationIssue};
use insight_commons::{InternalUser, Prediction, Role};
use serde::{Deserialize, Serialize};

const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 64;
const MAX_USERNAME_LENGTH: usize = 64;

/// Registration payload.
#[derive(Debug, Clone, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    pub age: u32,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

impl UserCreate {
    /// Shape validation; everything wrong with the payload is reported at
    /// once rather than one field per round trip.
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut issues = Vec::new();

        if self.username.trim().is_empty() {
            issues.push(ValidationIssue::new("username", "must not be empty"));
        } else if self.username.len() > MAX_USERNAME_LENGTH {
            issues.push(ValidationIssue::new(
                "username",
                format!("must be at most {} characters", MAX_USERNAME_LENGTH),
            ));
        }

        if !is_plausible_email(&self.email) {
            issues.push(ValidationIssue::new("email", "must be a valid email address"));
        }

        if self.password.len() < MIN_PASSWORD_LENGTH {
            issues.push(ValidationIssue::new(
                "password",
                format!("must be at least {} characters", MIN_PASSWORD_LENGTH),
            ));
        } else if self.password.len() > MAX_PASSWORD_LENGTH {
            issues.push(ValidationIssue::new(
                "password",
                format!("must be at most {} characters", MAX_PASSWORD_LENGTH),
            ));
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(issues))
        }
    }
}

/// User data returned by the API. No password field exists on this type.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub username: String,
    pub email: String,
    pub age: u32,
    pub role: Role,
}

impl From<&InternalUser> for UserResponse {
    fn from(user: &InternalUser) -> Self {
        Self {
            username: user.username.as_str().to_string(),
            email: user.email.clone(),
            age: user.age,
            role: user.role,
        }
    }
}

/// Credentials presented to the token-issuance endpoint.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

/// Issued bearer token.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Prediction result wrapper.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: Prediction,
}

/// Good-enough email shape check: one `@` with a non-empty local part and a
/// dotted domain. Full RFC 5322 parsing buys nothing here.
fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> UserCreate {
        UserCreate {
            username: "new_user".to_string(),
            email: "new_user@example.com".to_string(),
            age: 30,
            password: "supersecret123".to_string(),
            role: Role::User,
        }
    }

    #[test]
    fn test_valid_payload_passes() {
        assert!(valid_payload().validate().is_ok());
    }

    #[test]
    fn test_short_password_is_rejected() {
        let mut payload = valid_payload();
        payload.password = "short".to_string();
        let err = payload.validate().unwrap_err();
        match err {
            ApiError::Validation(issues) => {
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].field, "password");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_multiple_issues_reported_together() {
        let payload = UserCreate {
            username: "".to_string(),
            email: "not-an-email".to_string(),
            age: 30,
            password: "x".to_string(),
            role: Role::User,
        };
        match payload.validate().unwrap_err() {
            ApiError::Validation(issues) => assert_eq!(issues.len(), 3),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_role_defaults_to_user() {
        let payload: UserCreate = serde_json::from_value(serde_json::json!({
            "username": "new_user",
            "email": "new_user@example.com",
            "age": 30,
            "password": "supersecret123"
        }))
        .unwrap();
        assert_eq!(payload.role, Role::User);
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_plausible_email("john@gmail.de"));
        assert!(is_plausible_email("a.b+c@sub.example.com"));
        assert!(!is_plausible_email("john"));
        assert!(!is_plausible_email("john@"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("john@nodot"));
        assert!(!is_plausible_email("john doe@example.com"));
    }
}
