use super::actions::{CatalogAction, CatalogActionResult};
use super::error::CatalogError;
use crate::actor_framework::Record;
use crate::domain::{Catalog, Product};
use crate::error::FrameworkError;
use crate::storage::Repository;

impl Record for Catalog {
    const NAME: &'static str = "catalog";
    type Action = CatalogAction;
    type ActionResult = CatalogActionResult;
    type Error = CatalogError;

    /// An empty override counts as no override.
    fn load(repo: &dyn Repository) -> Result<Option<Self>, FrameworkError> {
        let products = repo.product_override()?;
        Ok((!products.is_empty()).then(|| Catalog::new(products)))
    }

    fn save(&self, repo: &dyn Repository) -> Result<(), FrameworkError> {
        Ok(repo.save_product_override(&self.products)?)
    }

    fn clear(repo: &dyn Repository) -> Result<(), FrameworkError> {
        Ok(repo.clear_product_override()?)
    }

    fn vacant() -> Option<Self> {
        Some(Catalog::default())
    }

    fn handle_action(&mut self, action: CatalogAction) -> Result<CatalogActionResult, CatalogError> {
        match action {
            CatalogAction::Add(product) => {
                validate(&product)?;
                if self.product(&product.id).is_some() {
                    return Err(CatalogError::DuplicateProduct(product.id));
                }
                self.products.push(product.clone());
                Ok(CatalogActionResult::Add(product))
            }
            CatalogAction::Update(product) => {
                validate(&product)?;
                let slot = self
                    .products
                    .iter_mut()
                    .find(|p| p.id == product.id)
                    .ok_or_else(|| CatalogError::ProductNotFound(product.id.clone()))?;
                *slot = product.clone();
                Ok(CatalogActionResult::Update(product))
            }
            CatalogAction::Delete(id) => {
                let index = self
                    .products
                    .iter()
                    .position(|p| p.id == id)
                    .ok_or(CatalogError::ProductNotFound(id))?;
                Ok(CatalogActionResult::Delete(self.products.remove(index)))
            }
        }
    }
}

/// Name and image must be present and the price positive.
fn validate(product: &Product) -> Result<(), CatalogError> {
    if product.name.trim().is_empty() {
        return Err(CatalogError::MissingField("name"));
    }
    if product.image.trim().is_empty() {
        return Err(CatalogError::MissingField("image"));
    }
    if product.price == 0 {
        return Err(CatalogError::MissingField("price"));
    }
    Ok(())
}
