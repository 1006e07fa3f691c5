//! Login credentials, account registration and the bearer token.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, VibraeError};

/// Body of `POST /users/login`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] when either field is blank.
    pub fn new(username: &str, password: &str) -> Result<Self, VibraeError> {
        let username = non_blank(username, "username")?;
        if password.trim().is_empty() {
            return Err(ValidationError::EmptyField("password").into());
        }
        Ok(Self {
            username,
            password: password.to_string(),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Body of `POST /users`.
///
/// The repeated password is checked locally and never sent.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub admin_token: String,
}

impl NewAccount {
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] when any field is blank and
    /// [`ValidationError::PasswordMismatch`] when the passwords differ.
    pub fn new(
        username: &str,
        password: &str,
        repeat_password: &str,
        admin_token: &str,
    ) -> Result<Self, VibraeError> {
        let admin_token = non_blank(admin_token, "admin_token")?;
        let username = non_blank(username, "username")?;
        if password.trim().is_empty() {
            return Err(ValidationError::EmptyField("password").into());
        }
        if repeat_password.trim().is_empty() {
            return Err(ValidationError::EmptyField("repeat_password").into());
        }
        if password != repeat_password {
            return Err(ValidationError::PasswordMismatch.into());
        }
        Ok(Self {
            username,
            password: password.to_string(),
            admin_token,
        })
    }
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Response of `POST /users`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    pub id: i64,
    pub username: String,
}

/// Bearer token issued by `POST /users/login`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Response of `POST /users/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: AccessToken,
}

fn non_blank(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_require_username_and_password() {
        assert!(matches!(
            Credentials::new(" ", "x"),
            Err(VibraeError::Validation(ValidationError::EmptyField("username")))
        ));
        assert!(matches!(
            Credentials::new("ana", "  "),
            Err(VibraeError::Validation(ValidationError::EmptyField("password")))
        ));
        let creds = Credentials::new(" ana ", "secret").unwrap();
        assert_eq!(creds.username, "ana");
    }

    #[test]
    fn should_hide_password_in_debug_output() {
        let creds = Credentials::new("ana", "secret").unwrap();
        assert!(!format!("{creds:?}").contains("secret"));
        let token = AccessToken::new("abc.def");
        assert!(!format!("{token:?}").contains("abc"));
    }

    #[test]
    fn should_reject_mismatched_passwords() {
        let result = NewAccount::new("ana", "one", "two", "admin");
        assert!(matches!(
            result,
            Err(VibraeError::Validation(ValidationError::PasswordMismatch))
        ));
    }

    #[test]
    fn should_require_admin_token() {
        let result = NewAccount::new("ana", "pw", "pw", "");
        assert!(matches!(
            result,
            Err(VibraeError::Validation(ValidationError::EmptyField(
                "admin_token"
            )))
        ));
    }

    #[test]
    fn should_serialize_account_without_repeat_password() {
        let account = NewAccount::new("ana", "pw", "pw", "adm").unwrap();
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"username": "ana", "password": "pw", "admin_token": "adm"})
        );
    }

    #[test]
    fn should_read_login_response() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"access_token":"tok","token_type":"bearer"}"#).unwrap();
        assert_eq!(resp.access_token.as_str(), "tok");
    }
}
