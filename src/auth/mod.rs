//! Seam to the hosted authentication service.
//!
//! Pages call an [`AuthProvider`] directly and show the error's message next
//! to the form on failure. Nothing here retries.

mod memory;

pub use memory::MemoryAuth;

use serde::Serialize;
use thiserror::Error;

pub type AuthResult<T> = std::result::Result<T, AuthError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid login credentials")]
    InvalidCredentials,
    #[error("User already registered")]
    AlreadyRegistered,
    #[error("Email not confirmed")]
    EmailNotConfirmed,
    #[error("Unable to validate email address: invalid format")]
    InvalidEmail,
    #[error("Password should be at least {0} characters")]
    WeakPassword(usize),
    #[error("Token has expired or is invalid")]
    InvalidOtp,
    #[error("No user found for {0}")]
    UnknownUser(String),
    #[error("Auth session missing")]
    NoSession,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub confirmed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub access_token: String,
    pub user: User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    UserUpdated,
    PasswordRecovery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

pub type AuthStateHandler = Box<dyn FnMut(AuthEvent, Option<&Session>)>;

pub trait AuthProvider {
    /// Registers an unconfirmed account and sends a one-time code.
    fn sign_up(&mut self, email: &str, password: &str) -> AuthResult<User>;

    fn sign_in(&mut self, email: &str, password: &str) -> AuthResult<Session>;

    fn sign_out(&mut self) -> AuthResult<()>;

    fn current_user(&self) -> Option<User>;

    fn on_auth_state_change(&mut self, handler: AuthStateHandler) -> SubscriptionId;

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;

    /// Confirms the email with the code sent on sign-up and opens a session.
    fn verify_otp(&mut self, email: &str, code: &str) -> AuthResult<Session>;

    fn reset_password(&mut self, email: &str) -> AuthResult<()>;
}
