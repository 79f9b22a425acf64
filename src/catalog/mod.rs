use std::sync::Arc;

use indexmap::IndexMap;

use crate::db::ProductStore;
use crate::error::AppResult;
use crate::models::{CatalogEntry, Location, LocationFilters, ProductQuery};

/// Cities of active products keyed by country, both in sorted order.
pub type CitiesByCountry = IndexMap<String, Vec<String>>;

/// The read operations exposed to the automation endpoints.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn ProductStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub async fn list_products(&self) -> AppResult<Vec<CatalogEntry>> {
        self.entries(ProductQuery::active()).await
    }

    pub async fn list_products_by_location(&self, filters: LocationFilters) -> AppResult<Vec<CatalogEntry>> {
        self.entries(ProductQuery::with_filters(filters)).await
    }

    pub async fn cities_by_country(&self) -> AppResult<CitiesByCountry> {
        let locations = self.store.fetch_locations().await?;
        Ok(group_cities(locations))
    }

    async fn entries(&self, query: ProductQuery) -> AppResult<Vec<CatalogEntry>> {
        let rows = self.store.fetch_products(&query).await?;
        Ok(rows.into_iter().map(CatalogEntry::from).collect())
    }
}

/// Group already-sorted pairs by country, keeping first-seen order and
/// dropping repeated cities.
fn group_cities(locations: Vec<Location>) -> CitiesByCountry {
    let mut grouped = CitiesByCountry::new();
    for Location { country, city } in locations {
        let cities = grouped.entry(country).or_default();
        if !cities.contains(&city) {
            cities.push(city);
        }
    }
    grouped
}
