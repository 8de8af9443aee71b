//! Catalog change notifications.

use crate::Locator;

/// Emitted once per successful catalog mutation.
///
/// Presentation layers subscribe through
/// [`MediaStore::subscribe`](crate::MediaStore::subscribe) and refresh on
/// receipt; events carry enough to target the refresh but no diff.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum CatalogEvent {
    /// A new item was appended
    #[display("saved {}", locator)]
    Saved {
        /// Locator of the new item
        locator: Locator,
    },
    /// An item was removed
    #[display("deleted {}", locator)]
    Deleted {
        /// Locator the item had
        locator: Locator,
    },
    /// An item moved to a new locator
    #[display("renamed {} to {}", from, to)]
    Renamed {
        /// Previous locator
        from: Locator,
        /// New locator
        to: Locator,
    },
    /// An item's hash tag was overwritten
    #[display("hash updated for {}", locator)]
    HashUpdated {
        /// Locator of the item
        locator: Locator,
    },
    /// The catalog was rebuilt from persistence
    #[display("reloaded {} items", count)]
    Reloaded {
        /// Items in the hydrated catalog
        count: usize,
    },
}
