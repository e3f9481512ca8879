use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::i18n::Locale;
use crate::store::{timestamp, Document, DocumentId, StoreError};

/// Account profile stored under `users/{principal id}`. Unlike the
/// production entities this document is keyed by the auth principal, not
/// by a generated id, and is written whole on sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(skip)]
    pub id: DocumentId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// CPF digits only, mask applied at display time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    /// RG digits only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rg: Option<String>,
    #[serde(default, rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Preferred locale; session language follows this when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Locale>,
    #[serde(
        default,
        with = "timestamp::ts_millis_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(with = "timestamp::ts_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp::ts_millis")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn decode(doc: &Document) -> Result<Self, StoreError> {
        let mut user: Self = serde_json::from_value(doc.data.clone().into())?;
        user.id = doc.id;
        Ok(user)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Registration form. `company_name` and `phone` are collected and
/// validated alongside the credentials and persisted on the new profile
/// when non-empty.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCredentials {
    #[validate(length(min = 1, message = "register.nameRequired"))]
    pub name: String,
    #[serde(default)]
    pub company_name: String,
    #[validate(length(min = 1, message = "register.emailRequired"))]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[validate(length(min = 1, message = "register.passwordRequired"))]
    pub password: String,
    #[validate(length(min = 1, message = "register.confirmPasswordRequired"))]
    pub confirm_password: String,
}

/// Raw profile edit form: text exactly as typed, masks included. The
/// screen validator checks it and [`ProfileForm::to_update`] normalizes
/// it into the stored patch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    pub name: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub cpf: String,
    #[serde(default)]
    pub rg: String,
}

fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

impl ProfileForm {
    /// Trims the name and phone, strips CPF/RG down to digits and drops
    /// an empty company name from the patch entirely, leaving the stored
    /// value untouched.
    pub fn to_update(&self) -> UpdateProfileRequest {
        let company = self.company_name.trim();
        UpdateProfileRequest {
            name: Some(self.name.trim().to_owned()),
            company_name: (!company.is_empty()).then(|| company.to_owned()),
            phone: Some(self.phone.trim().to_owned()),
            cpf: Some(digits_only(&self.cpf)),
            rg: Some(digits_only(&self.rg)),
            ..Default::default()
        }
    }
}

/// Partial profile patch merged into the stored user document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rg: Option<String>,
    #[serde(rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Locale>,
}
