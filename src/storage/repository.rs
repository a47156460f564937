use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::backend::KeyValueStore;
use crate::domain::{CartItem, LoyaltyProfile, Order, Product};
use crate::error::{StorageError, StorageResult};

pub const CART_KEY: &str = "quickcommerce_cart";
pub const USER_KEY: &str = "quickcommerce_user";
pub const LAST_ORDER_KEY: &str = "quickcommerce_last_order";
pub const CURRENT_ORDER_KEY: &str = "quickcommerce_current_order";
pub const PRODUCTS_KEY: &str = "quickcommerce_products";

/// Typed access to every persisted record kind.
///
/// Readers return the record's default when nothing is stored: an empty
/// cart, a fresh Bronze profile, no orders, an empty catalog override.
pub trait Repository: Send + Sync {
    fn cart(&self) -> StorageResult<Vec<CartItem>>;
    fn save_cart(&self, items: &[CartItem]) -> StorageResult<()>;
    fn clear_cart(&self) -> StorageResult<()>;

    fn user(&self) -> StorageResult<LoyaltyProfile>;
    fn save_user(&self, profile: &LoyaltyProfile) -> StorageResult<()>;
    fn clear_user(&self) -> StorageResult<()>;

    fn last_order(&self) -> StorageResult<Option<Order>>;
    fn save_last_order(&self, order: &Order) -> StorageResult<()>;

    fn current_order(&self) -> StorageResult<Option<Order>>;
    fn save_current_order(&self, order: &Order) -> StorageResult<()>;
    fn clear_current_order(&self) -> StorageResult<()>;

    fn product_override(&self) -> StorageResult<Vec<Product>>;
    fn save_product_override(&self, products: &[Product]) -> StorageResult<()>;
    fn clear_product_override(&self) -> StorageResult<()>;
}

/// [`Repository`] that JSON-encodes each record under its own key.
#[derive(Debug, Default)]
pub struct StoreRepository<S> {
    store: S,
}

impl<S: KeyValueStore> StoreRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        match self.store.get_item(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StorageError::Decode {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StorageResult<()> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
            key: key.to_string(),
            source,
        })?;
        debug!(key, bytes = raw.len(), "Persisting record");
        self.store.set_item(key, &raw)
    }
}

impl<S: KeyValueStore> Repository for StoreRepository<S> {
    fn cart(&self) -> StorageResult<Vec<CartItem>> {
        Ok(self.read(CART_KEY)?.unwrap_or_default())
    }

    fn save_cart(&self, items: &[CartItem]) -> StorageResult<()> {
        self.write(CART_KEY, items)
    }

    fn clear_cart(&self) -> StorageResult<()> {
        self.store.remove_item(CART_KEY)
    }

    fn user(&self) -> StorageResult<LoyaltyProfile> {
        Ok(self.read(USER_KEY)?.unwrap_or_default())
    }

    fn save_user(&self, profile: &LoyaltyProfile) -> StorageResult<()> {
        self.write(USER_KEY, profile)
    }

    fn clear_user(&self) -> StorageResult<()> {
        self.store.remove_item(USER_KEY)
    }

    fn last_order(&self) -> StorageResult<Option<Order>> {
        self.read(LAST_ORDER_KEY)
    }

    fn save_last_order(&self, order: &Order) -> StorageResult<()> {
        self.write(LAST_ORDER_KEY, order)
    }

    fn current_order(&self) -> StorageResult<Option<Order>> {
        self.read(CURRENT_ORDER_KEY)
    }

    fn save_current_order(&self, order: &Order) -> StorageResult<()> {
        self.write(CURRENT_ORDER_KEY, order)
    }

    fn clear_current_order(&self) -> StorageResult<()> {
        self.store.remove_item(CURRENT_ORDER_KEY)
    }

    fn product_override(&self) -> StorageResult<Vec<Product>> {
        Ok(self.read(PRODUCTS_KEY)?.unwrap_or_default())
    }

    fn save_product_override(&self, products: &[Product]) -> StorageResult<()> {
        self.write(PRODUCTS_KEY, products)
    }

    fn clear_product_override(&self) -> StorageResult<()> {
        self.store.remove_item(PRODUCTS_KEY)
    }
}
