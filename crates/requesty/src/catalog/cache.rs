//! Write-once cache for the normalized catalog.

use std::future::Future;

use tokio::sync::OnceCell;

use super::entry::{ModelEntry, sort_entries};
use super::error::CatalogError;

/// Holds the catalog for the lifetime of its owner.
///
/// Populated at most once. Concurrent first callers share a single populate;
/// a failed populate leaves the cache unset so a later call can retry.
#[derive(Debug, Default)]
pub struct CatalogCache {
    cell: OnceCell<Vec<ModelEntry>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache that starts populated. Entries are put into listing order.
    pub fn seeded(mut entries: Vec<ModelEntry>) -> Self {
        sort_entries(&mut entries);
        Self {
            cell: OnceCell::from(entries),
        }
    }

    pub fn get(&self) -> Option<&[ModelEntry]> {
        self.cell.get().map(Vec::as_slice)
    }

    pub fn is_populated(&self) -> bool {
        self.cell.initialized()
    }

    pub(crate) async fn get_or_try_populate<F, Fut>(
        &self,
        populate: F,
    ) -> Result<&[ModelEntry], CatalogError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<ModelEntry>, CatalogError>>,
    {
        self.cell.get_or_try_init(populate).await.map(Vec::as_slice)
    }
}
