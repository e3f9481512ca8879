//! In-memory credential backend with the same sign-in throttling shape
//! as a hosted provider: a rolling failure window and a temporary
//! lockout once the attempt budget is spent.
//!
//! Passwords are held in plain text, which keeps this provider strictly
//! a development and test double.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::watch;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::{AuthError, AuthProvider, Principal};
use crate::validation::account::PASSWORD_MIN_LEN;

/// Sign-in throttling knobs: failures inside `window` accumulate, and
/// reaching `max_attempts` locks the email out for `lockout`.
#[derive(Debug, Clone)]
pub struct RateLimitSettings {
    pub max_attempts: u32,
    pub window: Duration,
    pub lockout: Duration,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window: Duration::from_secs(5 * 60),
            lockout: Duration::from_secs(15 * 60),
        }
    }
}

struct Account {
    principal: Principal,
    password: String,
}

struct AttemptWindow {
    attempts: u32,
    first_attempt: Instant,
    locked_until: Option<Instant>,
}

pub struct MemoryAuthProvider {
    /// Keyed by normalized (trimmed, lowercased) email.
    accounts: DashMap<String, Account>,
    attempts: DashMap<String, AttemptWindow>,
    limits: RateLimitSettings,
    state: watch::Sender<Option<Principal>>,
}

impl Default for MemoryAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAuthProvider {
    pub fn new() -> Self {
        Self::with_limits(RateLimitSettings::default())
    }

    pub fn with_limits(limits: RateLimitSettings) -> Self {
        let (state, _) = watch::channel(None);
        Self {
            accounts: DashMap::new(),
            attempts: DashMap::new(),
            limits,
            state,
        }
    }

    fn normalize(email: &str) -> String {
        email.trim().to_lowercase()
    }

    fn is_locked(&self, key: &str) -> bool {
        self.attempts
            .get(key)
            .and_then(|entry| entry.locked_until)
            .is_some_and(|until| Instant::now() < until)
    }

    fn record_failure(&self, key: &str) {
        let now = Instant::now();
        let mut entry = self.attempts.entry(key.to_owned()).or_insert(AttemptWindow {
            attempts: 0,
            first_attempt: now,
            locked_until: None,
        });
        if now.duration_since(entry.first_attempt) > self.limits.window {
            entry.attempts = 0;
            entry.first_attempt = now;
        }
        entry.attempts += 1;
        if entry.attempts >= self.limits.max_attempts {
            entry.locked_until = Some(now + self.limits.lockout);
            warn!(email = %key, attempts = entry.attempts, "sign-in locked out");
        }
    }
}

#[async_trait]
impl AuthProvider for MemoryAuthProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Principal, AuthError> {
        let key = Self::normalize(email);
        if self.accounts.contains_key(&key) {
            return Err(AuthError::EmailAlreadyInUse);
        }
        if password.chars().count() < PASSWORD_MIN_LEN {
            return Err(AuthError::WeakPassword);
        }

        let principal = Principal {
            id: Uuid::new_v4(),
            email: key.clone(),
        };
        self.accounts.insert(
            key,
            Account {
                principal: principal.clone(),
                password: password.to_owned(),
            },
        );
        info!(user_id = %principal.id, "account created");
        self.state.send_replace(Some(principal.clone()));
        Ok(principal)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Principal, AuthError> {
        let key = Self::normalize(email);
        if self.is_locked(&key) {
            return Err(AuthError::RateLimited);
        }

        let stored = self
            .accounts
            .get(&key)
            .map(|account| (account.principal.clone(), account.password.clone()));
        match stored {
            None => {
                self.record_failure(&key);
                Err(AuthError::UserNotFound)
            }
            Some((_, stored_password)) if stored_password != password => {
                self.record_failure(&key);
                Err(AuthError::WrongPassword)
            }
            Some((principal, _)) => {
                self.attempts.remove(&key);
                self.state.send_replace(Some(principal.clone()));
                Ok(principal)
            }
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.state.send_replace(None);
        Ok(())
    }

    fn watch(&self) -> watch::Receiver<Option<Principal>> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn sign_up_then_sign_in_round_trip() {
        let provider = MemoryAuthProvider::new();
        let created = provider
            .sign_up("Maria@Example.com ", "segredo1")
            .await
            .unwrap();
        assert_eq!(created.email, "maria@example.com");

        let signed_in = provider
            .sign_in("maria@example.com", "segredo1")
            .await
            .unwrap();
        assert_eq!(signed_in.id, created.id);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let provider = MemoryAuthProvider::new();
        provider.sign_up("a@b.com", "segredo1").await.unwrap();
        let err = provider.sign_up("A@B.COM", "outrasenha").await.unwrap_err();
        assert_matches!(err, AuthError::EmailAlreadyInUse);
    }

    #[tokio::test]
    async fn short_password_is_weak() {
        let provider = MemoryAuthProvider::new();
        let err = provider.sign_up("a@b.com", "12345").await.unwrap_err();
        assert_matches!(err, AuthError::WeakPassword);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_distinct() {
        let provider = MemoryAuthProvider::new();
        provider.sign_up("a@b.com", "segredo1").await.unwrap();

        let err = provider.sign_in("a@b.com", "errada99").await.unwrap_err();
        assert_matches!(err, AuthError::WrongPassword);

        let err = provider.sign_in("x@y.com", "whatever1").await.unwrap_err();
        assert_matches!(err, AuthError::UserNotFound);
    }

    #[tokio::test]
    async fn lockout_engages_after_the_attempt_budget() {
        let provider = MemoryAuthProvider::with_limits(RateLimitSettings {
            max_attempts: 3,
            window: Duration::from_secs(60),
            lockout: Duration::from_secs(60),
        });
        provider.sign_up("a@b.com", "segredo1").await.unwrap();

        for _ in 0..3 {
            let _ = provider.sign_in("a@b.com", "errada99").await;
        }
        // Even the right password is refused while locked.
        let err = provider.sign_in("a@b.com", "segredo1").await.unwrap_err();
        assert_matches!(err, AuthError::RateLimited);
    }

    #[tokio::test]
    async fn success_clears_the_failure_window() {
        let provider = MemoryAuthProvider::with_limits(RateLimitSettings {
            max_attempts: 3,
            window: Duration::from_secs(60),
            lockout: Duration::from_secs(60),
        });
        provider.sign_up("a@b.com", "segredo1").await.unwrap();

        for _ in 0..2 {
            let _ = provider.sign_in("a@b.com", "errada99").await;
        }
        provider.sign_in("a@b.com", "segredo1").await.unwrap();

        // Budget is fresh again: two more failures do not lock.
        for _ in 0..2 {
            let _ = provider.sign_in("a@b.com", "errada99").await;
        }
        provider.sign_in("a@b.com", "segredo1").await.unwrap();
    }

    #[tokio::test]
    async fn watchers_observe_state_transitions() {
        let provider = MemoryAuthProvider::new();
        let rx = provider.watch();
        assert!(rx.borrow().is_none());

        let principal = provider.sign_up("a@b.com", "segredo1").await.unwrap();
        assert_eq!(
            rx.borrow().as_ref().map(|p| p.id),
            Some(principal.id)
        );

        provider.sign_out().await.unwrap();
        assert!(rx.borrow().is_none());
    }
}
