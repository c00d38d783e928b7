use crate::{
    error::CloudResourceResult,
    inventory::InventoryClient,
    models::{ResourceKind, ResourceSummary},
};

/// Cloud Resource Service - inventory queries scoped to one folder
pub struct CloudResourceService<C: InventoryClient> {
    client: C,
    folder_id: String,
}

impl<C: InventoryClient> CloudResourceService<C> {
    pub fn new(client: C, folder_id: impl Into<String>) -> Self {
        Self {
            client,
            folder_id: folder_id.into(),
        }
    }

    pub fn folder_id(&self) -> &str {
        &self.folder_id
    }

    /// List resources of one kind in the configured folder
    pub async fn list(&self, kind: ResourceKind) -> CloudResourceResult<Vec<ResourceSummary>> {
        let resources = self.client.list(kind, &self.folder_id).await?;
        tracing::info!(
            kind = %kind,
            folder_id = %self.folder_id,
            count = resources.len(),
            "Listed cloud resources"
        );
        Ok(resources)
    }

    pub async fn list_databases(&self) -> CloudResourceResult<Vec<ResourceSummary>> {
        self.list(ResourceKind::Database).await
    }

    pub async fn list_compute_instances(&self) -> CloudResourceResult<Vec<ResourceSummary>> {
        self.list(ResourceKind::Compute).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CloudResourceError;
    use crate::inventory::MockInventoryClient;
    use mockall::predicate::*;

    #[tokio::test]
    async fn test_list_databases_uses_folder() {
        let mut mock = MockInventoryClient::new();
        mock.expect_list()
            .with(eq(ResourceKind::Database), eq("b1gfolder"))
            .times(1)
            .returning(|_, _| {
                Ok(vec![
                    ResourceSummary::new("db1", "orders", "RUNNING", "serverless"),
                    ResourceSummary::new("db2", "events", "RUNNING", "dedicated"),
                ])
            });

        let service = CloudResourceService::new(mock, "b1gfolder");
        let databases = service.list_databases().await.unwrap();

        assert_eq!(databases.len(), 2);
        assert_eq!(databases[0].id, "db1");
        assert_eq!(databases[1].id, "db2");
    }

    #[tokio::test]
    async fn test_list_compute_instances() {
        let mut mock = MockInventoryClient::new();
        mock.expect_list()
            .with(eq(ResourceKind::Compute), always())
            .returning(|_, _| {
                Ok(vec![ResourceSummary::new(
                    "vm1",
                    "web",
                    "RUNNING",
                    "standard-v3",
                )])
            });

        let service = CloudResourceService::new(mock, "b1gfolder");
        let instances = service.list_compute_instances().await.unwrap();
        assert_eq!(instances[0].resource_type, "standard-v3");
    }

    #[tokio::test]
    async fn test_list_propagates_errors() {
        let mut mock = MockInventoryClient::new();
        mock.expect_list().returning(|_, _| {
            Err(CloudResourceError::Api {
                status: 403,
                body: "denied".to_string(),
            })
        });

        let service = CloudResourceService::new(mock, "b1gfolder");
        assert!(matches!(
            service.list_databases().await,
            Err(CloudResourceError::Api { status: 403, .. })
        ));
    }
}
