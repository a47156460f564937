use tracing::{debug, info, instrument, warn};

use crate::actor_framework::{Record, RecordClient};
use crate::catalog_actor::{CatalogAction, CatalogActionResult, CatalogError};
use crate::domain::{now_millis, Catalog, Product, ProductDraft, ProductFilter, SearchPage, TimeOfDay};
use crate::error::FrameworkError;

/// Password accepted by [`CatalogClient::login`].
///
/// A hardcoded demo stub. It keeps casual visitors out of the editor and is
/// not an access-control boundary.
pub const ADMIN_PASSWORD: &str = "admin123";

/// Proof of a successful admin login, required by every catalog edit.
#[derive(Debug)]
pub struct AdminSession {
    _private: (),
}

/// Client for interacting with the catalog actor.
#[derive(Clone)]
pub struct CatalogClient {
    inner: RecordClient<Catalog>,
}

impl_record_client!(CatalogClient, Catalog, CatalogError, catalog, pub(self));

impl CatalogClient {
    /// Matching products, at most `filter.limit` of them, with the total match count.
    #[instrument(skip(self))]
    pub async fn search(&self, filter: &ProductFilter) -> Result<SearchPage, CatalogError> {
        Ok(self.catalog().await?.page(filter))
    }

    #[instrument(skip(self))]
    pub async fn product(&self, id: &str) -> Result<Option<Product>, CatalogError> {
        Ok(self.catalog().await?.product(id).cloned())
    }

    #[instrument(skip(self))]
    pub async fn suggestions(&self, time: TimeOfDay) -> Result<Vec<Product>, CatalogError> {
        Ok(self.catalog().await?.suggestions(time))
    }

    #[instrument(skip_all)]
    pub fn login(&self, password: &str) -> Result<AdminSession, CatalogError> {
        if password != ADMIN_PASSWORD {
            warn!("Admin login rejected");
            return Err(CatalogError::InvalidPassword);
        }
        info!("Admin logged in");
        Ok(AdminSession { _private: () })
    }

    /// Adds a product with the current epoch milliseconds as its id.
    #[instrument(skip(self, _session, draft), fields(name = %draft.name))]
    pub async fn add_product(
        &self,
        _session: &AdminSession,
        draft: ProductDraft,
    ) -> Result<Product, CatalogError> {
        debug!("Sending request");
        let product = draft.into_product(now_millis().to_string());
        match self.inner.perform_action(CatalogAction::Add(product)).await? {
            CatalogActionResult::Add(product) => {
                info!(product_id = %product.id, "Product added");
                Ok(product)
            }
            _ => Err(FrameworkError::UnexpectedResult(Catalog::NAME).into()),
        }
    }

    #[instrument(skip(self, _session, product), fields(product_id = %product.id))]
    pub async fn update_product(
        &self,
        _session: &AdminSession,
        product: Product,
    ) -> Result<Product, CatalogError> {
        debug!("Sending request");
        match self.inner.perform_action(CatalogAction::Update(product)).await? {
            CatalogActionResult::Update(product) => Ok(product),
            _ => Err(FrameworkError::UnexpectedResult(Catalog::NAME).into()),
        }
    }

    #[instrument(skip(self, _session))]
    pub async fn delete_product(
        &self,
        _session: &AdminSession,
        product_id: &str,
    ) -> Result<Product, CatalogError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(CatalogAction::Delete(product_id.to_string()))
            .await?
        {
            CatalogActionResult::Delete(product) => Ok(product),
            _ => Err(FrameworkError::UnexpectedResult(Catalog::NAME).into()),
        }
    }

    /// Drops the override so browsing falls back to the built-in products.
    pub async fn reset_catalog(&self, _session: &AdminSession) -> Result<(), CatalogError> {
        info!("Resetting catalog to the built-in products");
        self.clear_catalog().await
    }
}
