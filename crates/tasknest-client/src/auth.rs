//! Auth Gateway
//!
//! Login, registration and stored-token validation. Form input is checked
//! locally first; a rule violation never reaches the network.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::AuthError;
use crate::models::{AuthGrant, LoginBody, RegisterBody};
use crate::transport::{ApiRequest, ApiResponse, Transport};

pub const MIN_PASSWORD_LEN: usize = 6;

const FILL_ALL_FIELDS: &str = "Please fill in all fields";
const PASSWORDS_DIFFER: &str = "Passwords do not match";
const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters long";
const INVALID_EMAIL: &str = "Please enter a valid email address";

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
}

/// `local@domain.tld`-shaped check
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

// ========================
// Forms
// ========================

/// Raw login form input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Trimmed credentials ready for submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }

    pub fn validate(&self) -> Result<Credentials, AuthError> {
        let username = self.username.trim();
        let password = self.password.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(FILL_ALL_FIELDS.into()));
        }
        Ok(Credentials { username: username.to_string(), password: password.to_string() })
    }
}

/// Raw registration form input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Trimmed registration ready for submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegistrationForm {
    /// Rules apply in order; the first failure is reported.
    pub fn validate(&self) -> Result<Registration, AuthError> {
        let fields = [&self.username, &self.email, &self.password, &self.confirm_password];
        if fields.iter().any(|field| field.trim().is_empty()) {
            return Err(AuthError::Validation(FILL_ALL_FIELDS.into()));
        }
        if self.password != self.confirm_password {
            return Err(AuthError::Validation(PASSWORDS_DIFFER.into()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(PASSWORD_TOO_SHORT.into()));
        }
        if !is_valid_email(&self.email) {
            return Err(AuthError::Validation(INVALID_EMAIL.into()));
        }
        Ok(Registration {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.trim().to_string(),
        })
    }
}

// ========================
// Gateway
// ========================

/// Wraps `/api/auth/*`
#[derive(Debug, Clone)]
pub struct AuthGateway<T> {
    transport: T,
}

impl<T: Transport> AuthGateway<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Any non-success outcome, network failure included, is `Unauthorized`.
    pub async fn validate(&self, token: &str) -> Result<(), AuthError> {
        let request = ApiRequest::get("/api/auth/validate").bearer(token);
        match self.transport.send(request).await {
            Ok(response) if response.is_success() => Ok(()),
            Ok(response) => {
                log::debug!("token rejected with status {}", response.status);
                Err(AuthError::Unauthorized)
            }
            Err(e) => {
                log::warn!("token validation failed: {}", e);
                Err(AuthError::Unauthorized)
            }
        }
    }

    pub async fn login(&self, form: &LoginForm) -> Result<AuthGrant, AuthError> {
        let credentials = form.validate()?;
        let request = ApiRequest::post("/api/auth/login")
            .json(&LoginBody { username: &credentials.username, password: &credentials.password })
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        let response = self.transport.send(request).await.map_err(|e| {
            log::error!("login error: {}", e);
            AuthError::Network
        })?;
        if response.status == 401 {
            return Err(AuthError::InvalidCredentials);
        }
        grant_from(response, "Login failed")
    }

    pub async fn register(&self, form: &RegistrationForm) -> Result<AuthGrant, AuthError> {
        let registration = form.validate()?;
        let request = ApiRequest::post("/api/auth/register")
            .json(&RegisterBody {
                username: &registration.username,
                email: &registration.email,
                password: &registration.password,
            })
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        let response = self.transport.send(request).await.map_err(|e| {
            log::error!("registration error: {}", e);
            AuthError::Network
        })?;
        grant_from(response, "Registration failed")
    }
}

fn grant_from(response: ApiResponse, fallback: &str) -> Result<AuthGrant, AuthError> {
    if !response.is_success() {
        let message = response.error_message().unwrap_or_else(|| fallback.to_string());
        return Err(AuthError::Validation(message));
    }
    let grant = response.json::<AuthGrant>().map_err(|e| {
        log::error!("unexpected auth response: {}", e);
        AuthError::Validation(fallback.to_string())
    })?;
    if grant.token.trim().is_empty() {
        log::error!("auth response for {} carried no token", grant.username);
        return Err(AuthError::Validation(fallback.to_string()));
    }
    Ok(grant)
}
