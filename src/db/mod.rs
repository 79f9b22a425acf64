use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{Location, ProductQuery, ProductRow};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgProductStore;

/// Read access to the product table. Injected into the catalog service so no
/// handler reaches for a process-wide connection.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Active products with a country and city, narrowed by the query's
    /// optional exact-match filters and ordered by country then city.
    async fn fetch_products(&self, query: &ProductQuery) -> AppResult<Vec<ProductRow>>;

    /// Distinct `(country, city)` pairs of active products, ordered by
    /// country then city.
    async fn fetch_locations(&self) -> AppResult<Vec<Location>>;
}
