/*!
 * # Authentication
 *
 * The provider seam ([`AuthProvider`]), the auth error taxonomy with its
 * per-code message keys, and [`AuthService`], which keeps the stored
 * `users/{id}` profile document in step with the provider:
 *
 * - sign-in resolves the profile and rewrites it whole with a fresh
 *   `lastLogin`
 * - registration creates the profile document keyed by the new
 *   principal's id
 * - auth state is observed through a `tokio::sync::watch` channel;
 *   dropping the receiver is the unsubscribe
 */

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::DomainError;
use crate::i18n::MessageKey;
use crate::models::{LoginCredentials, ProfileForm, RegisterCredentials, UpdateProfileRequest, User};
use crate::store::{self, timestamp, DocumentStore, StoreError};
use crate::validation::account;

pub mod memory;

pub use memory::MemoryAuthProvider;

/// Collection holding one profile document per principal, keyed by the
/// principal's id rather than a generated one.
pub const USERS_COLLECTION: &str = "users";

/// The identity a provider vouches for. Everything else about the
/// account lives in the stored profile document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub email: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("wrong password")]
    WrongPassword,
    #[error("no account for this email")]
    UserNotFound,
    #[error("email already in use")]
    EmailAlreadyInUse,
    #[error("password below the minimum length")]
    WeakPassword,
    #[error("too many sign-in attempts")]
    RateLimited,
    #[error("auth provider error: {0}")]
    Provider(String),
}

impl AuthError {
    /// Stable machine code, one per variant.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::WrongPassword => "AUTH_WRONG_PASSWORD",
            AuthError::UserNotFound => "AUTH_USER_NOT_FOUND",
            AuthError::EmailAlreadyInUse => "AUTH_EMAIL_IN_USE",
            AuthError::WeakPassword => "AUTH_WEAK_PASSWORD",
            AuthError::RateLimited => "AUTH_RATE_LIMITED",
            AuthError::Provider(_) => "AUTH_PROVIDER",
        }
    }

    /// Message key shown for this failure; provider breakage collapses
    /// into the generic sign-in failure.
    pub fn message_key(&self) -> MessageKey {
        match self {
            AuthError::WrongPassword => MessageKey::AuthWrongPassword,
            AuthError::UserNotFound => MessageKey::AuthUserNotFound,
            AuthError::EmailAlreadyInUse => MessageKey::AuthEmailInUse,
            AuthError::WeakPassword => MessageKey::AuthWeakPassword,
            AuthError::RateLimited => MessageKey::AuthTooManyAttempts,
            AuthError::Provider(_) => MessageKey::AuthSignInFailed,
        }
    }
}

/// Credential backend. Implementations own nothing but identity: the
/// profile document is the service's business.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Principal, AuthError>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<Principal, AuthError>;
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Current signed-in principal, `None` when signed out. Cloned
    /// receivers observe every transition; dropping one unsubscribes it.
    fn watch(&self) -> watch::Receiver<Option<Principal>>;
}

#[derive(Clone)]
pub struct AuthService {
    provider: Arc<dyn AuthProvider>,
    store: Arc<dyn DocumentStore>,
}

impl AuthService {
    pub fn new(provider: Arc<dyn AuthProvider>, store: Arc<dyn DocumentStore>) -> Self {
        Self { provider, store }
    }

    /// Signs in against the provider, loads the profile document and
    /// rewrites it whole with a fresh `lastLogin`. A principal without a
    /// stored profile is treated as an unknown user.
    #[instrument(skip(self, credentials))]
    pub async fn sign_in(&self, credentials: &LoginCredentials) -> Result<User, DomainError> {
        let principal = self
            .provider
            .sign_in(&credentials.email, &credentials.password)
            .await?;

        let doc = self.store.get(USERS_COLLECTION, principal.id).await?;
        let Some(doc) = doc else {
            warn!(user_id = %principal.id, "principal has no stored profile");
            return Err(AuthError::UserNotFound.into());
        };

        let mut user = User::decode(&doc)?;
        user.last_login = Some(Utc::now());
        self.store
            .put(USERS_COLLECTION, principal.id, store::to_document(&user)?)
            .await?;
        info!(user_id = %user.id, "user signed in");
        Ok(user)
    }

    /// Validates the registration form, creates the account at the
    /// provider and writes the initial profile document. The email is
    /// stored trimmed and lowercased; company name and phone are kept
    /// only when filled in.
    #[instrument(skip(self, credentials))]
    pub async fn register(&self, credentials: &RegisterCredentials) -> Result<User, DomainError> {
        let errors = account::validate_register(credentials);
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        let email = credentials.email.trim().to_lowercase();
        let principal = self.provider.sign_up(&email, &credentials.password).await?;

        let now = Utc::now();
        let company = credentials.company_name.trim();
        let phone = credentials.phone.trim();
        let user = User {
            id: principal.id,
            name: credentials.name.trim().to_owned(),
            email,
            company_name: (!company.is_empty()).then(|| company.to_owned()),
            phone: (!phone.is_empty()).then(|| phone.to_owned()),
            cpf: None,
            rg: None,
            photo_url: None,
            role: Some("user".into()),
            language: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        self.store
            .put(USERS_COLLECTION, principal.id, store::to_document(&user)?)
            .await?;
        info!(user_id = %user.id, "account registered");
        Ok(user)
    }

    pub async fn sign_out(&self) -> Result<(), DomainError> {
        self.provider.sign_out().await?;
        info!("user signed out");
        Ok(())
    }

    pub fn watch(&self) -> watch::Receiver<Option<Principal>> {
        self.provider.watch()
    }

    /// Profile for a principal, `None` when the document is missing
    /// (signed in at the provider but never registered here).
    pub async fn current_user(&self, principal: &Principal) -> Result<Option<User>, DomainError> {
        match self.store.get(USERS_COLLECTION, principal.id).await? {
            Some(doc) => Ok(Some(User::decode(&doc)?)),
            None => Ok(None),
        }
    }

    /// Merges a profile patch into the stored document, stamping
    /// `updatedAt`.
    #[instrument(skip(self, patch), fields(%user_id))]
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        patch: &UpdateProfileRequest,
    ) -> Result<(), DomainError> {
        let mut data = store::to_document(patch)?;
        data.insert("updatedAt".into(), timestamp::to_value(Utc::now()));
        match self.store.update(USERS_COLLECTION, user_id, data).await {
            Ok(()) => Ok(()),
            Err(StoreError::NotFound { .. }) => {
                warn!(%user_id, "profile update on missing user");
                Err(DomainError::NotFound(format!("user {user_id} not found")))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Runs the profile form validator, then normalizes and applies the
    /// edit.
    #[instrument(skip(self, form), fields(%user_id))]
    pub async fn save_profile(&self, user_id: Uuid, form: &ProfileForm) -> Result<(), DomainError> {
        let errors = account::validate_profile(form);
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }
        self.update_profile(user_id, &form.to_update()).await
    }
}
