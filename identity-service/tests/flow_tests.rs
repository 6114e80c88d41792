mod common;

use std::sync::Arc;

use auth::RequestMetadata;
use auth::TokenError;
use common::bearer;
use common::TestApp;
use identity_service::credential::errors::IdentityError;
use identity_service::credential::models::LoginCommand;
use identity_service::credential::models::RegisterCommand;
use identity_service::credential::models::Username;
use identity_service::credential::ports::CredentialStore;
use identity_service::credential::ports::IdentityServicePort;

async fn register(app: &TestApp, username: &str, password: &str) {
    let command = RegisterCommand::new(username, password).expect("Invalid command");
    app.service
        .register(command)
        .await
        .expect("Registration failed");
}

#[tokio::test]
async fn test_register_login_and_verify() {
    let app = TestApp::spawn();

    register(&app, "alice", "correct-horse").await;

    let session = app
        .service
        .login(LoginCommand::new("alice", "correct-horse"))
        .await
        .expect("Login failed");

    let claims = app
        .service
        .authenticate(&bearer(&session.access_token))
        .await
        .expect("Token verification failed");
    assert_eq!(claims.subject(), session.subject_id.to_string());

    let profile = app
        .service
        .current_user(&bearer(&session.access_token))
        .await
        .expect("Failed to resolve current user");
    assert_eq!(profile.username.as_str(), "alice");
    assert_eq!(profile.subject_id, session.subject_id);

    let result = app
        .service
        .login(LoginCommand::new("alice", "wrong"))
        .await;
    assert!(matches!(result, Err(IdentityError::InvalidCredentials)));
}

#[tokio::test]
async fn test_login_unknown_user() {
    let app = TestApp::spawn();

    let result = app
        .service
        .login(LoginCommand::new("nobody", "correct-horse"))
        .await;
    assert!(matches!(result, Err(IdentityError::InvalidCredentials)));
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn();

    register(&app, "alice", "correct-horse").await;

    let command = RegisterCommand::new("alice", "battery-staple").unwrap();
    let result = app.service.register(command).await;

    assert!(matches!(result, Err(IdentityError::UsernameTaken(_))));
    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn test_stored_hash_is_not_the_password() {
    let app = TestApp::spawn();

    register(&app, "alice", "correct-horse").await;
    register(&app, "bob", "correct-horse").await;

    let alice = app
        .store
        .find_by_name(&Username::new("alice").unwrap())
        .await
        .unwrap();
    let bob = app
        .store
        .find_by_name(&Username::new("bob").unwrap())
        .await
        .unwrap();

    assert!(!alice.password_hash.contains("correct-horse"));
    assert_ne!(alice.password_hash, bob.password_hash);
}

#[tokio::test]
async fn test_token_from_other_key_is_rejected() {
    let issuer = TestApp::with_secret("first-secret-key-for-token-signing-32b");
    let verifier = TestApp::with_secret("second-secret-key-for-token-signing-32");

    register(&issuer, "alice", "correct-horse").await;
    let session = issuer
        .service
        .login(LoginCommand::new("alice", "correct-horse"))
        .await
        .unwrap();

    let result = verifier
        .service
        .authenticate(&bearer(&session.access_token))
        .await;
    assert!(matches!(
        result,
        Err(IdentityError::Token(TokenError::InvalidSignature))
    ));
}

#[tokio::test]
async fn test_authenticate_without_scheme_prefix() {
    let app = TestApp::spawn();

    register(&app, "alice", "correct-horse").await;
    let session = app
        .service
        .login(LoginCommand::new("alice", "correct-horse"))
        .await
        .unwrap();

    let metadata = RequestMetadata::new().with("authorization", session.access_token.clone());
    let claims = app.service.authenticate(&metadata).await.unwrap();

    assert_eq!(claims.subject(), session.subject_id.to_string());
}

#[tokio::test]
async fn test_authenticate_without_metadata() {
    let app = TestApp::spawn();

    let result = app.service.authenticate(&RequestMetadata::new()).await;
    assert!(matches!(result, Err(IdentityError::Unauthenticated)));
}

#[tokio::test]
async fn test_concurrent_logins() {
    let app = Arc::new(TestApp::spawn());

    register(&app, "alice", "correct-horse").await;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let app = Arc::clone(&app);
            tokio::spawn(async move {
                app.service
                    .login(LoginCommand::new("alice", "correct-horse"))
                    .await
            })
        })
        .collect();

    for handle in handles {
        let session = handle.await.expect("Task panicked").expect("Login failed");
        let claims = app
            .authenticator
            .validate_token(&session.access_token)
            .expect("Token validation failed");
        assert_eq!(claims.subject(), session.subject_id.to_string());
    }
}
