//! Application session state: who is signed in, which language is
//! active, and which screen is showing.
//!
//! These are plain structs owned by the controller layer and passed by
//! reference; dropping them is the whole teardown. None of them is a
//! global.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::watch;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::auth::{AuthService, Principal};
use crate::errors::DomainError;
use crate::i18n::{Locale, Translator};
use crate::models::{UpdateProfileRequest, User};

/// Narrow key-value persistence seam for user preferences, the only
/// thing the session layer stores outside the document store.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;
}

/// In-memory [`PreferenceStore`] used by tests and local runs.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: DashMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferences {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.values.get(key).map(|entry| entry.clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Active language plus its persistence.
///
/// The saved preference wins on startup; after sign-in the language on
/// the user profile takes over. Storage failures are logged and the
/// in-memory language still switches, so a broken preference store never
/// blocks the UI.
pub struct LanguageSession {
    prefs: Arc<dyn PreferenceStore>,
    storage_key: String,
    current: Locale,
}

impl LanguageSession {
    /// Reads the saved language under `namespace`, falling back to
    /// Portuguese when nothing valid is stored.
    pub async fn load(prefs: Arc<dyn PreferenceStore>, namespace: &str) -> Self {
        let storage_key = format!("{namespace}:language");
        let mut current = Locale::default();
        match prefs.get(&storage_key).await {
            Ok(Some(saved)) => match saved.parse() {
                Ok(locale) => current = locale,
                // An unrecognized value is ignored, not an error.
                Err(_) => warn!(saved, "ignoring unknown saved language"),
            },
            Ok(None) => {}
            Err(err) => warn!(error = %err, "could not read saved language"),
        }
        Self {
            prefs,
            storage_key,
            current,
        }
    }

    pub fn locale(&self) -> Locale {
        self.current
    }

    pub fn translator(&self) -> Translator {
        Translator::new(self.current)
    }

    #[instrument(skip(self), fields(locale = %locale))]
    pub async fn set_locale(&mut self, locale: Locale) {
        self.current = locale;
        self.persist(locale).await;
        info!("language switched");
    }

    /// Adopts the language saved on the signed-in user's profile, if any.
    pub async fn sync_from_user(&mut self, user: &User) {
        if let Some(locale) = user.language {
            if locale != self.current {
                self.current = locale;
                self.persist(locale).await;
            }
        }
    }

    /// Saves `locale` on the user profile as well as locally, so the
    /// choice follows the account to other devices.
    pub async fn update_user_language(
        &mut self,
        auth: &AuthService,
        user_id: Uuid,
        locale: Locale,
    ) -> Result<(), DomainError> {
        let patch = UpdateProfileRequest {
            language: Some(locale),
            ..Default::default()
        };
        auth.update_profile(user_id, &patch).await?;
        self.set_locale(locale).await;
        Ok(())
    }

    async fn persist(&self, locale: Locale) {
        let value = locale.to_string();
        if let Err(err) = self.prefs.set(&self.storage_key, &value).await {
            warn!(error = %err, "could not persist language preference");
        }
    }
}

/// Watch-subscribed view of the signed-in user.
///
/// `loading` is true until the first [`refresh`](Self::refresh), letting
/// callers tell "not signed in" apart from "not resolved yet".
pub struct AuthSession {
    auth: Arc<AuthService>,
    updates: watch::Receiver<Option<Principal>>,
    user: Option<User>,
    loading: bool,
}

impl AuthSession {
    pub fn new(auth: Arc<AuthService>) -> Self {
        let updates = auth.watch();
        Self {
            auth,
            updates,
            user: None,
            loading: true,
        }
    }

    /// Resolves the profile for the provider's current identity.
    pub async fn refresh(&mut self) -> Result<(), DomainError> {
        let principal = self.updates.borrow_and_update().clone();
        self.user = match principal {
            Some(principal) => self.auth.current_user(&principal).await?,
            None => None,
        };
        self.loading = false;
        Ok(())
    }

    /// Waits for the next sign-in or sign-out and refreshes the profile.
    /// Returns `false` once the provider side has been dropped.
    pub async fn changed(&mut self) -> Result<bool, DomainError> {
        if self.updates.changed().await.is_err() {
            return Ok(false);
        }
        self.refresh().await?;
        Ok(true)
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

/// Every screen the app can show.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Screen {
    #[default]
    LanguageSelection,
    Login,
    Register,
    Dashboard,
    Profile,
    Workshops,
    Cuts,
    Batches,
    WorkshopStatus,
    FinishedProduction,
    ReceivePieces,
    Payments,
    FinancialHistory,
    GeneralHistory,
    Metrics,
    Plans,
}

impl Screen {
    /// Screens reachable without a signed-in user.
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            Screen::LanguageSelection | Screen::Login | Screen::Register
        )
    }
}

/// One current screen and at most one entity-id parameter. There is no
/// back stack; navigating replaces both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    current: Screen,
    param: Option<Uuid>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn param(&self) -> Option<Uuid> {
        self.param
    }

    pub fn navigate(&mut self, screen: Screen) {
        self.current = screen;
        self.param = None;
    }

    pub fn navigate_with(&mut self, screen: Screen, entity_id: Uuid) {
        self.current = screen;
        self.param = Some(entity_id);
    }

    /// Applies the auth redirects: a signed-in user never sees the
    /// login or register screens, a signed-out user is sent to login
    /// from anything protected.
    pub fn resolve(&mut self, signed_in: bool) {
        if signed_in && matches!(self.current, Screen::Login | Screen::Register) {
            self.navigate(Screen::Dashboard);
        } else if !signed_in && !self.current.is_public() {
            self.navigate(Screen::Login);
        }
    }
}
