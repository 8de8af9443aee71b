//! Locators for stored media content.

use locker_error::{LockerResult, StorageError, StorageErrorKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable reference to where an item's bytes live on durable storage.
///
/// The canonical form is `<uuid>/<file name>`, relative to the storage root.
/// Every save and every rename draws a fresh UUID, so a locator is never
/// reused once its content has been deleted or moved away.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    /// Derive a fresh locator for a file name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` if the name is empty, is `.` or `..`, or contains
    /// a path separator or NUL byte.
    pub fn for_file_name(file_name: &str) -> LockerResult<Self> {
        validate_file_name(file_name)?;
        Ok(Self(format!("{}/{}", Uuid::new_v4().simple(), file_name)))
    }

    /// Parse a locator from its persisted canonical string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` if the string is not `<segment>/<file name>`.
    pub fn parse(canonical: &str) -> LockerResult<Self> {
        let Some((segment, file_name)) = canonical.split_once('/') else {
            return Err(StorageError::new(StorageErrorKind::InvalidName(format!(
                "locator '{}' has no directory segment",
                canonical
            )))
            .into());
        };
        validate_file_name(segment)?;
        validate_file_name(file_name)?;
        Ok(Self(canonical.to_string()))
    }

    /// Canonical string form, used as the metadata key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name component.
    pub fn file_name(&self) -> &str {
        self.0
            .rsplit_once('/')
            .map(|(_, name)| name)
            .unwrap_or(&self.0)
    }

    /// Extension of the file name component, without the dot.
    pub fn extension(&self) -> Option<&str> {
        self.file_name()
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
    }
}

/// Apply the rename rule: keep the old extension unless the new name already ends with it.
///
/// # Examples
///
/// ```
/// use locker_storage::renamed_file_name;
///
/// assert_eq!(renamed_file_name(Some("jpg"), "sunset"), "sunset.jpg");
/// assert_eq!(renamed_file_name(Some("jpg"), "sunset.JPG"), "sunset.JPG");
/// assert_eq!(renamed_file_name(None, "sunset"), "sunset");
/// ```
pub fn renamed_file_name(old_extension: Option<&str>, new_name: &str) -> String {
    let new_name = new_name.trim();
    match old_extension {
        Some(ext)
            if !new_name
                .to_ascii_lowercase()
                .ends_with(&format!(".{}", ext.to_ascii_lowercase())) =>
        {
            format!("{}.{}", new_name, ext)
        }
        _ => new_name.to_string(),
    }
}

fn validate_file_name(file_name: &str) -> LockerResult<()> {
    let reason = if file_name.trim().is_empty() {
        Some("name is empty")
    } else if file_name == "." || file_name == ".." {
        Some("name is a relative path component")
    } else if file_name.contains(['/', '\\']) {
        Some("name contains a path separator")
    } else if file_name.contains('\0') {
        Some("name contains a NUL byte")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(StorageError::new(StorageErrorKind::InvalidName(format!(
            "'{}': {}",
            file_name, reason
        )))
        .into()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_locators_are_unique() {
        let a = Locator::for_file_name("photo.jpg").unwrap();
        let b = Locator::for_file_name("photo.jpg").unwrap();
        assert_ne!(a, b);
        assert_eq!(a.file_name(), "photo.jpg");
        assert_eq!(a.extension(), Some("jpg"));
    }

    #[test]
    fn test_rejects_path_traversal() {
        assert!(Locator::for_file_name("../etc/passwd").is_err());
        assert!(Locator::for_file_name("..").is_err());
        assert!(Locator::for_file_name("a\\b.png").is_err());
        assert!(Locator::for_file_name("   ").is_err());
    }

    #[test]
    fn test_parse_round_trips_canonical_form() {
        let locator = Locator::for_file_name("clip.mov").unwrap();
        let parsed = Locator::parse(locator.as_str()).unwrap();
        assert_eq!(parsed, locator);

        assert!(Locator::parse("no-segment.jpg").is_err());
        assert!(Locator::parse("a/b/c.jpg").is_err());
        assert!(Locator::parse("../c.jpg").is_err());
    }

    #[test]
    fn test_extension_absent() {
        let locator = Locator::for_file_name("README").unwrap();
        assert_eq!(locator.extension(), None);
    }

    #[test]
    fn test_renamed_file_name_appends_missing_extension() {
        assert_eq!(renamed_file_name(Some("mov"), "holiday"), "holiday.mov");
        assert_eq!(renamed_file_name(Some("mov"), "holiday.mov"), "holiday.mov");
        // A different extension is treated as part of the name
        assert_eq!(renamed_file_name(Some("mov"), "holiday.mp4"), "holiday.mp4.mov");
    }
}
