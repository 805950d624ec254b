//! Registration and login scenarios.

use campus_canteen_integration_tests::TestContext;
use campus_canteen_storefront::{AuthError, AuthService};

#[test]
fn test_register_login_wrong_password_duplicate() {
    let ctx = TestContext::new();
    let auth = AuthService::new(&ctx.store);

    // Register a student account.
    let alice = auth.register("alice", "correct-horse", false).unwrap();
    assert!(!alice.is_merchant);

    // Login succeeds with matching credentials.
    let logged_in = auth.login("alice", "correct-horse").unwrap();
    assert_eq!(logged_in.id, alice.id);

    // Login fails with the wrong password.
    assert!(matches!(
        auth.login("alice", "battery-staple"),
        Err(AuthError::InvalidCredentials)
    ));

    // Registering the same username again fails.
    assert!(matches!(
        auth.register("alice", "other-pw", true),
        Err(AuthError::UsernameTaken)
    ));
}

#[test]
fn test_password_is_compared_verbatim() {
    let ctx = TestContext::new();
    let auth = AuthService::new(&ctx.store);
    auth.register("bob", "PassWord", false).unwrap();

    // Stored as-is, compared as-is: case matters, no normalization.
    assert!(auth.login("bob", "password").is_err());
    assert!(auth.login("bob", "PassWord").is_ok());

    let db = ctx.store.load();
    assert_eq!(db.find_user("bob").unwrap().password_hash, "PassWord");
}

#[test]
fn test_merchant_flag_round_trips() {
    let ctx = TestContext::new();
    let auth = AuthService::new(&ctx.store);
    auth.register("laowang", "pw", true).unwrap();

    let merchant = auth.login("laowang", "pw").unwrap();
    assert!(merchant.is_merchant);
}

#[test]
fn test_username_whitespace_is_trimmed_on_login() {
    let ctx = TestContext::new();
    let auth = AuthService::new(&ctx.store);
    auth.register("  carol  ", "pw", false).unwrap();

    assert!(auth.login("carol", "pw").is_ok());
    assert!(auth.login(" carol ", "pw").is_ok());
}
