mod common;

use common::{register_draft, TestApp};
use costura_core::auth::Principal;
use costura_core::errors::DomainError;
use costura_core::i18n::MessageKey;
use costura_core::models::{LoginCredentials, ProfileForm, RegisterCredentials, UpdateProfileRequest};
use costura_core::session::AuthSession;
use uuid::Uuid;

#[tokio::test]
async fn register_then_sign_in_stamps_last_login() {
    let app = TestApp::new();
    let registered = app
        .services
        .auth
        .register(&register_draft("maria@example.com"))
        .await
        .unwrap();
    assert_eq!(registered.email, "maria@example.com");
    assert_eq!(registered.company_name.as_deref(), Some("Confecções Silva"));
    assert!(registered.last_login.is_none());

    let signed_in = app
        .services
        .auth
        .sign_in(&LoginCredentials {
            email: "maria@example.com".into(),
            password: "segredo1".into(),
        })
        .await
        .unwrap();
    assert_eq!(signed_in.id, registered.id);
    assert!(signed_in.last_login.is_some());
}

#[tokio::test]
async fn emails_are_normalized_before_the_provider_sees_them() {
    let app = TestApp::new();
    let registered = app
        .services
        .auth
        .register(&register_draft("Maria@Example.COM"))
        .await
        .unwrap();
    assert_eq!(registered.email, "maria@example.com");

    let err = app
        .services
        .auth
        .register(&register_draft("maria@example.com"))
        .await
        .unwrap_err();
    assert_eq!(err.message_key(), MessageKey::AuthEmailInUse);
}

#[tokio::test]
async fn unknown_email_and_wrong_password_map_to_their_own_keys() {
    let app = TestApp::new();
    app.services
        .auth
        .register(&register_draft("ana@example.com"))
        .await
        .unwrap();

    let err = app
        .services
        .auth
        .sign_in(&LoginCredentials {
            email: "ninguem@example.com".into(),
            password: "segredo1".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.message_key(), MessageKey::AuthUserNotFound);

    let err = app
        .services
        .auth
        .sign_in(&LoginCredentials {
            email: "ana@example.com".into(),
            password: "errada99".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.message_key(), MessageKey::AuthWrongPassword);
}

#[tokio::test]
async fn repeated_failures_lock_the_account_out() {
    let app = TestApp::new();
    app.services
        .auth
        .register(&register_draft("jose@example.com"))
        .await
        .unwrap();

    for _ in 0..5 {
        let _ = app
            .services
            .auth
            .sign_in(&LoginCredentials {
                email: "jose@example.com".into(),
                password: "errada99".into(),
            })
            .await;
    }

    // Budget spent: even the correct password is refused now.
    let err = app
        .services
        .auth
        .sign_in(&LoginCredentials {
            email: "jose@example.com".into(),
            password: "segredo1".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.message_key(), MessageKey::AuthTooManyAttempts);
}

#[tokio::test]
async fn short_password_fails_the_form_before_the_provider() {
    let app = TestApp::new();
    let mut draft = register_draft("curta@example.com");
    draft.password = "12345".into();
    draft.confirm_password = "12345".into();

    let err = app.services.auth.register(&draft).await.unwrap_err();
    let DomainError::Validation(fields) = err else {
        panic!("expected a validation error");
    };
    assert_eq!(
        fields.get("password"),
        Some(&MessageKey::RegisterPasswordTooShort)
    );
}

#[tokio::test]
async fn empty_registration_reports_every_field() {
    let app = TestApp::new();
    let blank = RegisterCredentials {
        name: String::new(),
        company_name: String::new(),
        email: String::new(),
        phone: String::new(),
        password: String::new(),
        confirm_password: String::new(),
    };

    let err = app.services.auth.register(&blank).await.unwrap_err();
    let DomainError::Validation(fields) = err else {
        panic!("expected a validation error");
    };
    assert_eq!(fields.len(), 6);
    assert_eq!(fields.get("name"), Some(&MessageKey::RegisterNameRequired));
    assert_eq!(
        fields.get("confirm_password"),
        Some(&MessageKey::RegisterConfirmRequired)
    );
}

#[tokio::test]
async fn auth_session_follows_sign_in_and_sign_out() {
    let app = TestApp::new();
    let mut session = AuthSession::new(app.services.auth.clone());
    assert!(session.is_loading());

    session.refresh().await.unwrap();
    assert!(!session.is_loading());
    assert!(!session.is_signed_in());

    // Registration signs the new principal in at the provider.
    app.services
        .auth
        .register(&register_draft("clara@example.com"))
        .await
        .unwrap();
    assert!(session.changed().await.unwrap());
    assert!(session.is_signed_in());
    assert_eq!(session.user().unwrap().email, "clara@example.com");

    app.services.auth.sign_out().await.unwrap();
    assert!(session.changed().await.unwrap());
    assert!(!session.is_signed_in());
    assert!(session.user().is_none());
}

#[tokio::test]
async fn save_profile_normalizes_the_masked_fields() {
    let app = TestApp::new();
    let user = app
        .services
        .auth
        .register(&register_draft("paula@example.com"))
        .await
        .unwrap();

    let form = ProfileForm {
        name: "  Paula Mendes  ".into(),
        company_name: String::new(),
        phone: " (11) 98765-4321 ".into(),
        cpf: "123.456.789-01".into(),
        rg: "12.345.678-9".into(),
    };
    app.services.auth.save_profile(user.id, &form).await.unwrap();

    let principal = Principal {
        id: user.id,
        email: user.email.clone(),
    };
    let stored = app
        .services
        .auth
        .current_user(&principal)
        .await
        .unwrap()
        .expect("profile should exist");
    assert_eq!(stored.name, "Paula Mendes");
    assert_eq!(stored.phone.as_deref(), Some("(11) 98765-4321"));
    assert_eq!(stored.cpf.as_deref(), Some("12345678901"));
    assert_eq!(stored.rg.as_deref(), Some("123456789"));
    // The blank company field was dropped from the patch, so the value
    // captured at registration survives.
    assert_eq!(stored.company_name.as_deref(), Some("Confecções Silva"));
}

#[tokio::test]
async fn profile_update_on_a_missing_user_is_not_found() {
    let app = TestApp::new();
    let err = app
        .services
        .auth
        .update_profile(Uuid::new_v4(), &UpdateProfileRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}
