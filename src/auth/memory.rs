use super::{
    AuthError, AuthEvent, AuthProvider, AuthResult, AuthStateHandler, Session, SubscriptionId,
    User,
};
use crate::config::AppConfig;
use crate::state::validation::FieldRule;
use std::collections::HashMap;
use std::thread;
use std::time::Duration;

struct Account {
    user: User,
    password: String,
}

/// Simulated provider: accounts live in memory and every call waits a fixed
/// latency before answering.
pub struct MemoryAuth {
    accounts: HashMap<String, Account>,
    session: Option<Session>,
    handlers: Vec<(SubscriptionId, AuthStateHandler)>,
    next_subscription: u64,
    issued_tokens: u64,
    latency: Duration,
    min_password_length: usize,
    otp_length: usize,
}

impl MemoryAuth {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            accounts: HashMap::new(),
            session: None,
            handlers: Vec::new(),
            next_subscription: 0,
            issued_tokens: 0,
            latency: config.auth_latency(),
            min_password_length: config.min_password_length,
            otp_length: config.otp_length,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
    }

    fn open_session(&mut self, user: User) -> Session {
        self.issued_tokens += 1;
        let session = Session {
            access_token: format!("sim-{}-{}", user.id, self.issued_tokens),
            user,
        };
        self.session = Some(session.clone());
        self.notify(AuthEvent::SignedIn);
        session
    }

    fn notify(&mut self, event: AuthEvent) {
        tracing::info!(?event, "auth state changed");
        for (_, handler) in self.handlers.iter_mut() {
            handler(event, self.session.as_ref());
        }
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

impl AuthProvider for MemoryAuth {
    fn sign_up(&mut self, email: &str, password: &str) -> AuthResult<User> {
        self.simulate_latency();
        let email = normalize(email);
        FieldRule::Email
            .check(email.as_str())
            .map_err(|_| AuthError::InvalidEmail)?;
        if password.chars().count() < self.min_password_length {
            return Err(AuthError::WeakPassword(self.min_password_length));
        }
        if self.accounts.contains_key(&email) {
            return Err(AuthError::AlreadyRegistered);
        }

        let user = User {
            id: format!("user-{}", self.accounts.len() + 1),
            email: email.clone(),
            confirmed: false,
        };
        self.accounts.insert(
            email,
            Account {
                user: user.clone(),
                password: password.to_string(),
            },
        );
        tracing::info!(user = %user.id, "account created, awaiting confirmation");
        Ok(user)
    }

    fn sign_in(&mut self, email: &str, password: &str) -> AuthResult<Session> {
        self.simulate_latency();
        let account = self
            .accounts
            .get(&normalize(email))
            .filter(|account| account.password == password)
            .ok_or(AuthError::InvalidCredentials)?;
        if !account.user.confirmed {
            return Err(AuthError::EmailNotConfirmed);
        }
        let user = account.user.clone();
        Ok(self.open_session(user))
    }

    fn sign_out(&mut self) -> AuthResult<()> {
        self.simulate_latency();
        if self.session.take().is_none() {
            return Err(AuthError::NoSession);
        }
        self.notify(AuthEvent::SignedOut);
        Ok(())
    }

    fn current_user(&self) -> Option<User> {
        self.session.as_ref().map(|session| session.user.clone())
    }

    fn on_auth_state_change(&mut self, handler: AuthStateHandler) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.handlers.push((id, handler));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(existing, _)| *existing != id);
        self.handlers.len() != before
    }

    /// Any all-digit code of the configured length is accepted.
    fn verify_otp(&mut self, email: &str, code: &str) -> AuthResult<Session> {
        self.simulate_latency();
        let email = normalize(email);
        let code = code.trim();
        if code.len() != self.otp_length || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(AuthError::InvalidOtp);
        }
        let account = self
            .accounts
            .get_mut(&email)
            .ok_or_else(|| AuthError::UnknownUser(email.clone()))?;
        let newly_confirmed = !account.user.confirmed;
        account.user.confirmed = true;
        let user = account.user.clone();
        if newly_confirmed {
            self.notify(AuthEvent::UserUpdated);
        }
        Ok(self.open_session(user))
    }

    fn reset_password(&mut self, email: &str) -> AuthResult<()> {
        self.simulate_latency();
        let email = normalize(email);
        if !self.accounts.contains_key(&email) {
            return Err(AuthError::UnknownUser(email));
        }
        tracing::info!(%email, "password reset link sent");
        self.notify(AuthEvent::PasswordRecovery);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryAuth;
    use crate::auth::{AuthError, AuthEvent, AuthProvider};
    use crate::config::AppConfig;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn provider() -> MemoryAuth {
        MemoryAuth::new(&AppConfig::for_tests())
    }

    #[test]
    fn sign_in_requires_confirmation() {
        let mut auth = provider();
        auth.sign_up("Ana@Mine.com.au", "hunter22").expect("sign up");

        assert_eq!(
            auth.sign_in("ana@mine.com.au", "hunter22"),
            Err(AuthError::EmailNotConfirmed)
        );

        auth.verify_otp("ana@mine.com.au", "123456").expect("otp");
        auth.sign_out().expect("sign out");

        let session = auth.sign_in("ana@mine.com.au", "hunter22").expect("sign in");
        assert!(session.user.confirmed);
        assert_eq!(auth.current_user(), Some(session.user));
    }

    #[test]
    fn sign_up_rejects_bad_input() {
        let mut auth = provider();
        assert_eq!(auth.sign_up("not-an-email", "hunter22"), Err(AuthError::InvalidEmail));
        assert_eq!(auth.sign_up("a@b.co", "short"), Err(AuthError::WeakPassword(8)));
        auth.sign_up("a@b.co", "hunter22").expect("first");
        assert_eq!(auth.sign_up("A@B.co", "hunter22"), Err(AuthError::AlreadyRegistered));
    }

    #[test]
    fn errors_render_as_single_messages() {
        let mut auth = provider();
        let err = auth.sign_in("ghost@b.co", "whatever").expect_err("no account");
        assert_eq!(err.to_string(), "Invalid login credentials");
        assert_eq!(auth.sign_out().expect_err("no session").to_string(), "Auth session missing");
    }

    #[test]
    fn otp_must_be_digits_of_configured_length() {
        let mut auth = provider();
        auth.sign_up("a@b.co", "hunter22").expect("sign up");
        assert_eq!(auth.verify_otp("a@b.co", "12ab56"), Err(AuthError::InvalidOtp));
        assert_eq!(auth.verify_otp("a@b.co", "1234"), Err(AuthError::InvalidOtp));
        assert!(auth.verify_otp("a@b.co", "000000").is_ok());
    }

    #[test]
    fn handlers_observe_events_until_unsubscribed() {
        let mut auth = provider();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = auth.on_auth_state_change(Box::new(move |event, session| {
            sink.borrow_mut().push((event, session.is_some()));
        }));

        auth.sign_up("a@b.co", "hunter22").expect("sign up");
        auth.verify_otp("a@b.co", "654321").expect("otp");
        auth.sign_out().expect("sign out");
        assert!(auth.unsubscribe(id));
        auth.reset_password("a@b.co").expect("reset");

        assert_eq!(
            *seen.borrow(),
            vec![
                (AuthEvent::UserUpdated, false),
                (AuthEvent::SignedIn, true),
                (AuthEvent::SignedOut, false)
            ]
        );
    }

    #[test]
    fn confirmation_is_reported_once() {
        let mut auth = provider();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        auth.on_auth_state_change(Box::new(move |event, _| sink.borrow_mut().push(event)));

        auth.sign_up("a@b.co", "hunter22").expect("sign up");
        auth.verify_otp("a@b.co", "111111").expect("first code");
        auth.verify_otp("a@b.co", "222222").expect("second code");

        let updates = seen
            .borrow()
            .iter()
            .filter(|event| **event == AuthEvent::UserUpdated)
            .count();
        assert_eq!(updates, 1);
    }
}
