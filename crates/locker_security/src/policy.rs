//! Password rules and the strength meter.

use locker_error::{CredentialError, CredentialErrorKind, LockerResult};
use tracing::{debug, instrument};

/// Characters that satisfy the special-character rule.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*()";

/// Grade shown by the registration strength meter.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum PasswordStrength {
    /// Shorter than the minimum length
    #[display("weak")]
    Weak,
    /// Long enough but missing an uppercase letter, a digit or a special character
    #[display("fair")]
    Fair,
    /// Long enough with an uppercase letter, a digit and a special character
    #[display("strong")]
    Strong,
}

/// Registration rules for new passwords.
///
/// A password is accepted when it has at least `min_length` characters, an
/// uppercase letter, a lowercase letter, a digit and one of
/// [`SPECIAL_CHARACTERS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    /// Minimum number of characters
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}

#[derive(Debug, Default)]
struct Traits {
    length: usize,
    upper: bool,
    lower: bool,
    digit: bool,
    special: bool,
}

impl Traits {
    fn of(password: &str) -> Self {
        password.chars().fold(Self::default(), |mut traits, c| {
            traits.length += 1;
            traits.upper |= c.is_uppercase();
            traits.lower |= c.is_lowercase();
            traits.digit |= c.is_ascii_digit();
            traits.special |= SPECIAL_CHARACTERS.contains(c);
            traits
        })
    }
}

impl PasswordPolicy {
    /// Check `password` against every rule.
    ///
    /// # Errors
    ///
    /// `WeakPassword` listing each unmet rule.
    #[instrument(skip_all)]
    pub fn validate(&self, password: &str) -> LockerResult<()> {
        let traits = Traits::of(password);
        let mut missing = Vec::new();
        if traits.length < self.min_length {
            missing.push(format!("at least {} characters", self.min_length));
        }
        if !traits.upper {
            missing.push("an uppercase letter".to_string());
        }
        if !traits.lower {
            missing.push("a lowercase letter".to_string());
        }
        if !traits.digit {
            missing.push("a digit".to_string());
        }
        if !traits.special {
            missing.push(format!("one of {}", SPECIAL_CHARACTERS));
        }

        if missing.is_empty() {
            debug!("Password accepted");
            Ok(())
        } else {
            debug!(unmet = missing.len(), "Password rejected");
            Err(CredentialError::new(CredentialErrorKind::WeakPassword(format!(
                "needs {}",
                missing.join(", ")
            )))
            .into())
        }
    }

    /// Grade `password` for the strength meter.
    pub fn strength(&self, password: &str) -> PasswordStrength {
        let traits = Traits::of(password);
        if traits.length < self.min_length {
            PasswordStrength::Weak
        } else if traits.upper && traits.digit && traits.special {
            PasswordStrength::Strong
        } else {
            PasswordStrength::Fair
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_validate_accepts_compliant_password() {
        assert!(PasswordPolicy::default().validate("Passw0rd!").is_ok());
    }

    #[test]
    fn test_validate_lists_unmet_rules() {
        let err = PasswordPolicy::default().validate("short").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("at least 8 characters"));
        assert!(message.contains("uppercase"));
        assert!(message.contains("digit"));
        assert!(!message.contains("lowercase"));
    }

    #[test]
    fn test_strength_grades() {
        let policy = PasswordPolicy::default();
        assert_eq!(policy.strength("Ab1!"), PasswordStrength::Weak);
        assert_eq!(policy.strength("longenough"), PasswordStrength::Fair);
        assert_eq!(policy.strength("Longenough1"), PasswordStrength::Fair);
        assert_eq!(policy.strength("Longenough1!"), PasswordStrength::Strong);
    }

    #[test]
    fn test_strength_is_ordered() {
        let grades: Vec<_> = PasswordStrength::iter().collect();
        assert!(grades.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(grades[0].to_string(), "weak");
    }

    #[test]
    fn test_custom_minimum_length() {
        let policy = PasswordPolicy { min_length: 12 };
        assert_eq!(policy.strength("Passw0rd!"), PasswordStrength::Weak);
        assert!(policy.validate("Passw0rd!").is_err());
    }
}
