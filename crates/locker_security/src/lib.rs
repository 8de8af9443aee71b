//! Credential utilities for Locker.
//!
//! Authentication itself lives outside Locker. This crate only provides the
//! two primitives the login and registration flows need:
//!
//! 1. **Credential hashing** - one-way digest of a password for storage and comparison
//! 2. **Password policy** - the registration rules and the strength meter grades
//!
//! # Example
//!
//! ```rust
//! use locker_security::{CredentialHasher, PasswordPolicy, PasswordStrength};
//!
//! let policy = PasswordPolicy::default();
//! policy.validate("Tr0ub4dor&3").unwrap();
//! assert_eq!(policy.strength("Tr0ub4dor&3"), PasswordStrength::Strong);
//!
//! let stored = CredentialHasher::hash("Tr0ub4dor&3");
//! assert!(CredentialHasher::verify("Tr0ub4dor&3", &stored));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod credential;
mod policy;

pub use credential::CredentialHasher;
pub use policy::{PasswordPolicy, PasswordStrength, SPECIAL_CHARACTERS};

// Re-export error types from locker_error
pub use locker_error::{CredentialError, CredentialErrorKind};
