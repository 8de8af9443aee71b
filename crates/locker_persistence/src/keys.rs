//! Keys of the records Locker persists.

/// Ordered sequence of locator strings.
pub const MEDIA_CATALOG: &str = "mediaCatalog";

/// Mapping of locator string to media metadata record.
pub const MEDIA_METADATA: &str = "mediaMetadata";

/// Mapping of user identifier to the identifiers it has interacted with.
pub const INTERACTIONS: &str = "interactions";
