//! Typed user-facing message keys and their per-locale catalogs.
//!
//! Validators and error mapping return [`MessageKey`] values instead of
//! translated strings; the UI resolves them through a [`Translator`].
//! Lookup falls back from the active locale to Portuguese, then to the
//! canonical key id, so a catalog that lags behind never breaks a screen.

use std::collections::HashMap;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Languages the app ships. Portuguese is both the default and the
/// fallback for incomplete catalogs.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Locale {
    #[default]
    Pt,
    Es,
}

/// Locale consulted when the active catalog has no entry for a key.
pub const FALLBACK_LOCALE: Locale = Locale::Pt;

/// Every message id the domain layer can emit.
///
/// The serialized form keeps the dotted ids the app's catalogs are keyed
/// by, so logs and stored payloads stay greppable against the UI tables.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
pub enum MessageKey {
    #[strum(serialize = "workshops.nameRequired")]
    WorkshopNameRequired,
    #[strum(serialize = "workshops.addressRequired")]
    WorkshopAddressRequired,
    #[strum(serialize = "workshops.contact1Required")]
    WorkshopContact1Required,
    #[strum(serialize = "cuts.typeRequired")]
    CutTypeRequired,
    #[strum(serialize = "cuts.piecesRequired")]
    CutPiecesRequired,
    #[strum(serialize = "batches.nameRequired")]
    BatchNameRequired,
    #[strum(serialize = "batches.piecesRequired")]
    BatchPiecesRequired,
    #[strum(serialize = "payments.descriptionRequired")]
    PaymentDescriptionRequired,
    #[strum(serialize = "payments.amountRequired")]
    PaymentAmountRequired,
    #[strum(serialize = "payments.dueDateRequired")]
    PaymentDueDateRequired,
    #[strum(serialize = "payments.dueDateInvalid")]
    PaymentDueDateInvalid,
    #[strum(serialize = "payments.paidDateInvalid")]
    PaymentPaidDateInvalid,
    #[strum(serialize = "receivePieces.batchRequired")]
    ReceiveBatchRequired,
    #[strum(serialize = "receivePieces.piecesRequired")]
    ReceivePiecesRequired,
    #[strum(serialize = "receivePieces.dateRequired")]
    ReceiveDateRequired,
    #[strum(serialize = "receivePieces.dateInvalid")]
    ReceiveDateInvalid,
    #[strum(serialize = "profile.nameRequired")]
    ProfileNameRequired,
    #[strum(serialize = "profile.phoneRequired")]
    ProfilePhoneRequired,
    #[strum(serialize = "profile.phoneInvalid")]
    ProfilePhoneInvalid,
    #[strum(serialize = "profile.cpfRequired")]
    ProfileCpfRequired,
    #[strum(serialize = "profile.cpfInvalid")]
    ProfileCpfInvalid,
    #[strum(serialize = "profile.rgRequired")]
    ProfileRgRequired,
    #[strum(serialize = "profile.rgInvalid")]
    ProfileRgInvalid,
    #[strum(serialize = "register.nameRequired")]
    RegisterNameRequired,
    #[strum(serialize = "register.nameTooShort")]
    RegisterNameTooShort,
    #[strum(serialize = "register.companyNameRequired")]
    RegisterCompanyRequired,
    #[strum(serialize = "register.companyNameTooShort")]
    RegisterCompanyTooShort,
    #[strum(serialize = "register.emailRequired")]
    RegisterEmailRequired,
    #[strum(serialize = "register.emailInvalid")]
    RegisterEmailInvalid,
    #[strum(serialize = "register.phoneRequired")]
    RegisterPhoneRequired,
    #[strum(serialize = "register.phoneInvalid")]
    RegisterPhoneInvalid,
    #[strum(serialize = "register.passwordRequired")]
    RegisterPasswordRequired,
    #[strum(serialize = "register.passwordTooShort")]
    RegisterPasswordTooShort,
    #[strum(serialize = "register.confirmPasswordRequired")]
    RegisterConfirmRequired,
    #[strum(serialize = "register.passwordMismatch")]
    RegisterPasswordMismatch,
    #[strum(serialize = "auth.wrongPassword")]
    AuthWrongPassword,
    #[strum(serialize = "auth.userNotFound")]
    AuthUserNotFound,
    #[strum(serialize = "auth.emailInUse")]
    AuthEmailInUse,
    #[strum(serialize = "auth.weakPassword")]
    AuthWeakPassword,
    #[strum(serialize = "auth.tooManyAttempts")]
    AuthTooManyAttempts,
    #[strum(serialize = "auth.signInFailed")]
    AuthSignInFailed,
    #[strum(serialize = "common.storeError")]
    CommonStoreError,
    #[strum(serialize = "common.notFound")]
    CommonNotFound,
    #[strum(serialize = "common.invalidData")]
    CommonInvalidData,
}

impl MessageKey {
    /// Canonical dotted id, e.g. `workshops.nameRequired`.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl Serialize for MessageKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MessageKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        MessageKey::from_str(&raw)
            .map_err(|_| serde::de::Error::custom(format!("unknown message key: {raw}")))
    }
}

static PT: Lazy<HashMap<MessageKey, &'static str>> = Lazy::new(|| {
    use MessageKey::*;
    HashMap::from([
        (WorkshopNameRequired, "Nome deve ter pelo menos 3 caracteres"),
        (WorkshopAddressRequired, "Endereço deve ter pelo menos 5 caracteres"),
        (WorkshopContact1Required, "Contato principal deve ter pelo menos 10 dígitos"),
        (CutTypeRequired, "Tipo da peça deve ter pelo menos 3 caracteres"),
        (CutPiecesRequired, "Quantidade de peças deve ser maior que zero"),
        (BatchNameRequired, "Nome do lote deve ter pelo menos 3 caracteres"),
        (BatchPiecesRequired, "Quantidade de peças deve ser maior que zero"),
        (PaymentDescriptionRequired, "Descrição deve ter pelo menos 3 caracteres"),
        (PaymentAmountRequired, "Valor deve ser maior que zero"),
        (PaymentDueDateRequired, "Data de vencimento é obrigatória"),
        (PaymentDueDateInvalid, "Data de vencimento inválida"),
        (PaymentPaidDateInvalid, "Data de pagamento inválida"),
        (ReceiveBatchRequired, "Selecione um lote"),
        (ReceivePiecesRequired, "Quantidade de peças deve ser maior que zero"),
        (ReceiveDateRequired, "Data de recebimento é obrigatória"),
        (ReceiveDateInvalid, "Data de recebimento inválida"),
        (ProfileNameRequired, "Nome deve ter pelo menos 3 caracteres"),
        (ProfilePhoneRequired, "Telefone é obrigatório"),
        (ProfilePhoneInvalid, "Telefone inválido"),
        (ProfileCpfRequired, "CPF é obrigatório"),
        (ProfileCpfInvalid, "CPF deve ter 11 dígitos"),
        (ProfileRgRequired, "RG é obrigatório"),
        (ProfileRgInvalid, "RG deve ter pelo menos 7 dígitos"),
        (RegisterNameRequired, "Nome é obrigatório"),
        (RegisterNameTooShort, "Nome deve ter pelo menos 3 caracteres"),
        (RegisterCompanyRequired, "Nome da confecção é obrigatório"),
        (RegisterCompanyTooShort, "Nome da confecção deve ter pelo menos 3 caracteres"),
        (RegisterEmailRequired, "E-mail é obrigatório"),
        (RegisterEmailInvalid, "E-mail inválido"),
        (RegisterPhoneRequired, "Telefone é obrigatório"),
        (RegisterPhoneInvalid, "Telefone inválido"),
        (RegisterPasswordRequired, "Senha é obrigatória"),
        (RegisterPasswordTooShort, "Senha deve ter pelo menos 6 caracteres"),
        (RegisterConfirmRequired, "Confirmação de senha é obrigatória"),
        (RegisterPasswordMismatch, "As senhas não coincidem"),
        (AuthWrongPassword, "Senha incorreta"),
        (AuthUserNotFound, "Usuário não encontrado"),
        (AuthEmailInUse, "Este e-mail já está em uso"),
        (AuthWeakPassword, "A senha deve ter pelo menos 6 caracteres"),
        (AuthTooManyAttempts, "Muitas tentativas. Tente novamente mais tarde"),
        (AuthSignInFailed, "Erro ao fazer login"),
        (CommonStoreError, "Erro de conexão. Tente novamente"),
        (CommonNotFound, "Registro não encontrado"),
        (CommonInvalidData, "Verifique os campos destacados"),
    ])
});

// The Spanish catalog lags the Portuguese one; missing entries resolve
// through the fallback chain.
static ES: Lazy<HashMap<MessageKey, &'static str>> = Lazy::new(|| {
    use MessageKey::*;
    HashMap::from([
        (WorkshopNameRequired, "El nombre debe tener al menos 3 caracteres"),
        (WorkshopAddressRequired, "La dirección debe tener al menos 5 caracteres"),
        (WorkshopContact1Required, "El contacto principal debe tener al menos 10 dígitos"),
        (CutTypeRequired, "El tipo de prenda debe tener al menos 3 caracteres"),
        (CutPiecesRequired, "La cantidad de piezas debe ser mayor que cero"),
        (BatchNameRequired, "El nombre del lote debe tener al menos 3 caracteres"),
        (BatchPiecesRequired, "La cantidad de piezas debe ser mayor que cero"),
        (PaymentDescriptionRequired, "La descripción debe tener al menos 3 caracteres"),
        (PaymentAmountRequired, "El monto debe ser mayor que cero"),
        (PaymentDueDateRequired, "La fecha de vencimiento es obligatoria"),
        (PaymentDueDateInvalid, "Fecha de vencimiento inválida"),
        (PaymentPaidDateInvalid, "Fecha de pago inválida"),
        (ReceiveBatchRequired, "Seleccione un lote"),
        (ReceivePiecesRequired, "La cantidad de piezas debe ser mayor que cero"),
        (ReceiveDateRequired, "La fecha de recepción es obligatoria"),
        (ReceiveDateInvalid, "Fecha de recepción inválida"),
        (ProfileNameRequired, "El nombre debe tener al menos 3 caracteres"),
        (ProfilePhoneRequired, "El teléfono es obligatorio"),
        (ProfilePhoneInvalid, "Teléfono inválido"),
        (ProfileCpfRequired, "El CPF es obligatorio"),
        (ProfileCpfInvalid, "El CPF debe tener 11 dígitos"),
        (RegisterNameRequired, "El nombre es obligatorio"),
        (RegisterNameTooShort, "El nombre debe tener al menos 3 caracteres"),
        (RegisterEmailRequired, "El correo es obligatorio"),
        (RegisterEmailInvalid, "Correo inválido"),
        (RegisterPhoneRequired, "El teléfono es obligatorio"),
        (RegisterPhoneInvalid, "Teléfono inválido"),
        (RegisterPasswordRequired, "La contraseña es obligatoria"),
        (RegisterPasswordTooShort, "La contraseña debe tener al menos 6 caracteres"),
        (RegisterConfirmRequired, "La confirmación de contraseña es obligatoria"),
        (RegisterPasswordMismatch, "Las contraseñas no coinciden"),
        (AuthWrongPassword, "Contraseña incorrecta"),
        (AuthUserNotFound, "Usuario no encontrado"),
        (AuthEmailInUse, "Este correo ya está en uso"),
        (AuthWeakPassword, "La contraseña debe tener al menos 6 caracteres"),
        (AuthTooManyAttempts, "Demasiados intentos. Inténtelo de nuevo más tarde"),
        (AuthSignInFailed, "Error al iniciar sesión"),
        (CommonStoreError, "Error de conexión. Inténtelo de nuevo"),
        (CommonNotFound, "Registro no encontrado"),
        (CommonInvalidData, "Revise los campos marcados"),
    ])
});

fn lookup(locale: Locale, key: MessageKey) -> Option<&'static str> {
    let catalog = match locale {
        Locale::Pt => &PT,
        Locale::Es => &ES,
    };
    catalog.get(&key).copied()
}

/// Resolves message keys for one locale.
#[derive(Debug, Clone, Copy)]
pub struct Translator {
    locale: Locale,
}

impl Translator {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Active locale, then [`FALLBACK_LOCALE`], then the canonical id.
    pub fn translate(&self, key: MessageKey) -> &'static str {
        lookup(self.locale, key)
            .or_else(|| lookup(FALLBACK_LOCALE, key))
            .unwrap_or_else(|| key.as_str())
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}
