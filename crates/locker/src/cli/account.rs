//! Interaction and credential command handlers.

use locker::{CredentialHasher, Locker, LockerResult, PasswordPolicy};

/// Link two users.
pub async fn interact(locker: &Locker, first: &str, second: &str) -> LockerResult<()> {
    locker.interactions().register(first, second).await?;
    println!("{} and {} have interacted", first, second);
    Ok(())
}

/// Report whether two users may message each other.
pub async fn can_message(locker: &Locker, first: &str, second: &str) -> LockerResult<()> {
    let allowed = locker.interactions().can_message(first, second).await;
    println!("{}", allowed);
    Ok(())
}

/// Grade a password, then print its digest or check it against one.
pub fn hash_password(password: &str, verify: Option<&str>) -> LockerResult<()> {
    let policy = PasswordPolicy::default();
    println!("strength: {}", policy.strength(password));
    if let Err(e) = policy.validate(password) {
        eprintln!("warning: {}", e);
    }

    match verify {
        Some(stored) => println!("matches: {}", CredentialHasher::verify(password, stored)),
        None => println!("{}", CredentialHasher::hash(password)),
    }
    Ok(())
}
