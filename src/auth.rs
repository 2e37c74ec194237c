//! Authentication Flow
//!
//! Login and registration forms: local checks, the request, and persisting
//! the resulting session.

use crate::api::ApiClient;
use crate::error::{Error, ValidationError, MIN_PASSWORD_LENGTH};
use crate::models::{AuthResponse, User};
use crate::session::Session;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    /// Required fields, then length, then confirmation
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [&self.username, &self.email, &self.password, &self.confirm_password];
        if fields.iter().any(|f| f.is_empty()) {
            return Err(ValidationError::MissingFields);
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::PasswordTooShort);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}

fn open_session(client: &ApiClient, auth: AuthResponse) -> User {
    let user = auth.user.clone();
    client.start_session(Session { token: auth.token, user: auth.user });
    log::info!("[Auth] Signed in as {}", user.username);
    user
}

pub async fn sign_in(client: &ApiClient, form: &LoginForm) -> Result<User, Error> {
    form.validate()?;
    let auth = client.login(&form.email, &form.password).await?;
    Ok(open_session(client, auth))
}

pub async fn sign_up(client: &ApiClient, form: &RegisterForm) -> Result<User, Error> {
    form.validate()?;
    let auth = client
        .register(&form.username, &form.email, &form.password)
        .await?;
    Ok(open_session(client, auth))
}

pub fn sign_out(client: &ApiClient) {
    client.end_session();
    log::info!("[Auth] Signed out");
}

// ========================
// Password Strength (cosmetic)
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    Weak,
    Medium,
    Strong,
}

impl Strength {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=39 => Strength::Weak,
            40..=69 => Strength::Medium,
            _ => Strength::Strong,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Strength::Weak => "Weak",
            Strength::Medium => "Medium",
            Strength::Strong => "Strong",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Strength::Weak => "strength-weak",
            Strength::Medium => "strength-medium",
            Strength::Strong => "strength-strong",
        }
    }
}

/// 0..=100 score from length and character classes. Not a security control.
pub fn password_strength(password: &str) -> u8 {
    if password.is_empty() {
        return 0;
    }
    let len = password.chars().count();
    let mut score: u32 = 0;
    if len >= 6 {
        score += 25;
    }
    if len >= 10 {
        score += 25;
    }
    if password.chars().any(|c| c.is_ascii_lowercase()) && password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 25;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 15;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        score += 10;
    }
    score.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{test_client, FakeTransport};
    use crate::session::SessionStore;
    use serde_json::json;
    use std::rc::Rc;

    fn register_form(password: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            username: "ada".into(),
            email: "ada@example.com".into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    #[tokio::test]
    async fn test_password_mismatch_blocks_registration() {
        let fake = Rc::new(FakeTransport::new());
        let (client, session) = test_client(&fake);

        let result = sign_up(&client, &register_form("secret1", "secret2")).await;

        assert_eq!(result, Err(Error::Validation(ValidationError::PasswordMismatch)));
        assert_eq!(fake.call_count(), 0);
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_registration_check_order() {
        let mut form = register_form("abc", "xyz");
        form.username.clear();
        assert_eq!(form.validate(), Err(ValidationError::MissingFields));

        let form = register_form("abc", "xyz");
        assert_eq!(form.validate(), Err(ValidationError::PasswordTooShort));

        let form = register_form("secret1", "secret1");
        assert_eq!(form.validate(), Ok(()));
    }

    #[tokio::test]
    async fn test_sign_up_persists_session() {
        let fake = Rc::new(FakeTransport::new());
        fake.respond(201, json!({"token": "tok-9", "user": {"id": 5, "username": "ada", "email": "ada@example.com"}}));
        let (client, session) = test_client(&fake);

        let user = sign_up(&client, &register_form("secret1", "secret1")).await.unwrap();

        assert_eq!(user.username, "ada");
        assert_eq!(session.token().as_deref(), Some("tok-9"));
        assert_eq!(
            fake.calls()[0].body,
            Some(json!({"username": "ada", "email": "ada@example.com", "password": "secret1"}))
        );
    }

    #[tokio::test]
    async fn test_login_missing_fields_makes_no_request() {
        let fake = Rc::new(FakeTransport::new());
        let (client, _session) = test_client(&fake);

        let form = LoginForm { email: "ada@example.com".into(), password: String::new() };
        let err = sign_in(&client, &form).await.unwrap_err();

        assert_eq!(err.user_message("Login failed"), "Please fill in all fields");
        assert_eq!(fake.call_count(), 0);
    }

    #[tokio::test]
    async fn test_login_failure_shows_server_message() {
        let fake = Rc::new(FakeTransport::new());
        fake.respond(401, json!({"error": "Invalid credentials"}));
        let (client, session) = test_client(&fake);

        let form = LoginForm { email: "ada@example.com".into(), password: "wrong-pass".into() };
        let err = sign_in(&client, &form).await.unwrap_err();

        assert_eq!(err.user_message("Login failed"), "Invalid credentials");
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_sign_out_clears_session() {
        let fake = Rc::new(FakeTransport::new());
        let (client, session) = test_client(&fake);
        client.start_session(Session {
            token: "t".into(),
            user: User { id: crate::models::RecordId::new("1"), username: "ada".into(), email: String::new() },
        });

        sign_out(&client);

        assert!(!client.has_session());
        assert_eq!(session.user(), None);
    }

    #[test]
    fn test_password_strength() {
        assert_eq!(password_strength(""), 0);
        assert_eq!(password_strength("abc"), 0);
        assert_eq!(password_strength("abcdef"), 25);
        assert_eq!(password_strength("abcdef1"), 40);
        assert_eq!(password_strength("Abcdefgh12"), 90);
        assert_eq!(password_strength("Abcdefgh12!"), 100);
        assert_eq!(password_strength("!!"), 10);
    }

    #[test]
    fn test_strength_thresholds() {
        assert_eq!(Strength::from_score(39), Strength::Weak);
        assert_eq!(Strength::from_score(40), Strength::Medium);
        assert_eq!(Strength::from_score(69), Strength::Medium);
        assert_eq!(Strength::from_score(70), Strength::Strong);
        assert_eq!(Strength::from_score(password_strength("Abcdefgh12")).label(), "Strong");
    }
}
