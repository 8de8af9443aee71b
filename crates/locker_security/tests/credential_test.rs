//! Registration and login flow checks.

use locker_error::LockerErrorKind;
use locker_security::{CredentialErrorKind, CredentialHasher, PasswordPolicy, PasswordStrength};

#[test]
fn test_register_then_login() {
    let policy = PasswordPolicy::default();
    let password = "Summer(2024)";

    policy.validate(password).unwrap();
    assert_eq!(policy.strength(password), PasswordStrength::Strong);

    let stored = CredentialHasher::hash(password);
    assert!(CredentialHasher::verify(password, &stored));
    assert!(!CredentialHasher::verify("Summer(2025)", &stored));
}

#[test]
fn test_weak_password_error_kind() {
    let err = PasswordPolicy::default().validate("alllowercase").unwrap_err();
    match err.kind() {
        LockerErrorKind::Credential(credential) => {
            assert!(matches!(credential.kind(), CredentialErrorKind::WeakPassword(_)));
        }
        other => panic!("unexpected error kind: {}", other),
    }
}

#[test]
fn test_digest_matches_known_vector() {
    assert_eq!(
        CredentialHasher::hash("abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}
