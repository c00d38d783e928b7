use async_trait::async_trait;
use std::sync::Arc;

use crate::error::CloudResourceResult;
use crate::models::{ResourceKind, ResourceSummary};

/// Read-only view of the resources in a cloud folder
///
/// Implementations return every resource of the requested kind, following
/// pagination internally, in the order the backend reports them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryClient: Send + Sync {
    async fn list(
        &self,
        kind: ResourceKind,
        folder_id: &str,
    ) -> CloudResourceResult<Vec<ResourceSummary>>;
}

#[async_trait]
impl<T: InventoryClient + ?Sized> InventoryClient for Arc<T> {
    async fn list(
        &self,
        kind: ResourceKind,
        folder_id: &str,
    ) -> CloudResourceResult<Vec<ResourceSummary>> {
        (**self).list(kind, folder_id).await
    }
}
