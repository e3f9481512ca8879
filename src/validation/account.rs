use once_cell::sync::Lazy;
use regex::Regex;

use crate::i18n::MessageKey;
use crate::models::{ProfileForm, RegisterCredentials};
use crate::validation::{digit_count, trimmed_len, FieldErrors};

/// Deliberately loose shape check: something@something.something.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Minimum password length, shared with the auth provider's weak
/// password check.
pub const PASSWORD_MIN_LEN: usize = 6;

/// Registration form rules. Text fields distinguish "missing" from "too
/// short" with separate keys; the email is matched against a loose
/// shape, not a full address grammar.
pub fn validate_register(data: &RegisterCredentials) -> FieldErrors {
    let mut errors = FieldErrors::new();

    match trimmed_len(&data.name) {
        0 => {
            errors.insert("name", MessageKey::RegisterNameRequired);
        }
        1..=2 => {
            errors.insert("name", MessageKey::RegisterNameTooShort);
        }
        _ => {}
    }

    match trimmed_len(&data.company_name) {
        0 => {
            errors.insert("company_name", MessageKey::RegisterCompanyRequired);
        }
        1..=2 => {
            errors.insert("company_name", MessageKey::RegisterCompanyTooShort);
        }
        _ => {}
    }

    if data.email.is_empty() {
        errors.insert("email", MessageKey::RegisterEmailRequired);
    } else if !EMAIL_RE.is_match(&data.email) {
        errors.insert("email", MessageKey::RegisterEmailInvalid);
    }

    if data.phone.is_empty() {
        errors.insert("phone", MessageKey::RegisterPhoneRequired);
    } else if digit_count(&data.phone) < 10 {
        errors.insert("phone", MessageKey::RegisterPhoneInvalid);
    }

    if data.password.is_empty() {
        errors.insert("password", MessageKey::RegisterPasswordRequired);
    } else if data.password.chars().count() < PASSWORD_MIN_LEN {
        errors.insert("password", MessageKey::RegisterPasswordTooShort);
    }

    if data.confirm_password.is_empty() {
        errors.insert("confirm_password", MessageKey::RegisterConfirmRequired);
    } else if data.confirm_password != data.password {
        errors.insert("confirm_password", MessageKey::RegisterPasswordMismatch);
    }

    errors
}

/// Profile form rules: the phone needs its full 10 digits minimum, the
/// CPF exactly 11 digits, the RG at least 7. Mask punctuation never
/// counts.
pub fn validate_profile(data: &ProfileForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if trimmed_len(&data.name) < 3 {
        errors.insert("name", MessageKey::ProfileNameRequired);
    }

    if data.phone.trim().is_empty() {
        errors.insert("phone", MessageKey::ProfilePhoneRequired);
    } else if digit_count(&data.phone) < 10 {
        errors.insert("phone", MessageKey::ProfilePhoneInvalid);
    }

    if data.cpf.trim().is_empty() {
        errors.insert("cpf", MessageKey::ProfileCpfRequired);
    } else if digit_count(&data.cpf) != 11 {
        errors.insert("cpf", MessageKey::ProfileCpfInvalid);
    }

    if data.rg.trim().is_empty() {
        errors.insert("rg", MessageKey::ProfileRgRequired);
    } else if digit_count(&data.rg) < 7 {
        errors.insert("rg", MessageKey::ProfileRgInvalid);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn register_draft() -> RegisterCredentials {
        RegisterCredentials {
            name: "Maria Silva".into(),
            company_name: "Confecção Sul".into(),
            email: "maria@example.com".into(),
            phone: "(11) 98765-4321".into(),
            password: "segredo1".into(),
            confirm_password: "segredo1".into(),
        }
    }

    #[test]
    fn complete_registration_passes() {
        assert!(validate_register(&register_draft()).is_empty());
    }

    #[test]
    fn required_and_too_short_are_distinct() {
        let mut data = register_draft();
        data.name = String::new();
        assert_eq!(
            validate_register(&data)["name"],
            MessageKey::RegisterNameRequired
        );

        data.name = "Jo".into();
        assert_eq!(
            validate_register(&data)["name"],
            MessageKey::RegisterNameTooShort
        );
    }

    #[test_case("no-at-sign.com", MessageKey::RegisterEmailInvalid)]
    #[test_case("a@b", MessageKey::RegisterEmailInvalid ; "missing dot after host")]
    #[test_case("a b@c.com", MessageKey::RegisterEmailInvalid ; "whitespace")]
    fn bad_emails_are_invalid(email: &str, expected: MessageKey) {
        let mut data = register_draft();
        data.email = email.into();
        assert_eq!(validate_register(&data)["email"], expected);
    }

    #[test]
    fn empty_email_is_required_not_invalid() {
        let mut data = register_draft();
        data.email = String::new();
        assert_eq!(
            validate_register(&data)["email"],
            MessageKey::RegisterEmailRequired
        );
    }

    #[test]
    fn password_rules() {
        let mut data = register_draft();
        data.password = "12345".into();
        data.confirm_password = "12345".into();
        assert_eq!(
            validate_register(&data)["password"],
            MessageKey::RegisterPasswordTooShort
        );

        data.password = "123456".into();
        data.confirm_password = "654321".into();
        let errors = validate_register(&data);
        assert!(!errors.contains_key("password"));
        assert_eq!(
            errors["confirm_password"],
            MessageKey::RegisterPasswordMismatch
        );
    }

    #[test]
    fn short_phone_is_invalid() {
        let mut data = register_draft();
        data.phone = "(11) 9876".into();
        assert_eq!(
            validate_register(&data)["phone"],
            MessageKey::RegisterPhoneInvalid
        );
    }

    #[test]
    fn complete_profile_passes() {
        let data = ProfileForm {
            name: "Maria Silva".into(),
            company_name: String::new(),
            phone: "(11) 98765-4321".into(),
            cpf: "123.456.789-01".into(),
            rg: "12.345.678-9".into(),
        };
        assert!(validate_profile(&data).is_empty());
    }

    #[test_case("123.456.789-0", MessageKey::ProfileCpfInvalid ; "ten digits")]
    #[test_case("123.456.789-012", MessageKey::ProfileCpfInvalid ; "twelve digits")]
    fn cpf_must_have_exactly_eleven_digits(cpf: &str, expected: MessageKey) {
        let mut data = ProfileForm {
            name: "Maria Silva".into(),
            company_name: String::new(),
            phone: "(11) 98765-4321".into(),
            cpf: cpf.into(),
            rg: "12.345.678-9".into(),
        };
        assert_eq!(validate_profile(&data)["cpf"], expected);
        data.cpf = String::new();
        assert_eq!(validate_profile(&data)["cpf"], MessageKey::ProfileCpfRequired);
    }

    #[test]
    fn rg_needs_at_least_seven_digits() {
        let data = ProfileForm {
            name: "Maria Silva".into(),
            company_name: String::new(),
            phone: "(11) 98765-4321".into(),
            cpf: "123.456.789-01".into(),
            rg: "12.345.6".into(),
        };
        assert_eq!(validate_profile(&data)["rg"], MessageKey::ProfileRgInvalid);
    }
}
