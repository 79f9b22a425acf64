//! In-process stores used by the service and HTTP tests.

use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::models::{Location, ProductQuery, ProductRow, ACTIVE_STATUS};

use super::ProductStore;

/// A stored product with every column the table carries, nulls included.
#[derive(Debug, Clone)]
pub struct StoredProduct {
    pub id: i64,
    pub status: String,
    pub country: Option<String>,
    pub city: Option<String>,
    pub title: Option<String>,
    pub sub_category_id: Option<i64>,
    pub category_id: Option<i64>,
}

impl StoredProduct {
    pub fn active(id: i64, country: &str, city: &str, title: &str) -> Self {
        Self {
            id,
            status: ACTIVE_STATUS.to_string(),
            country: Some(country.to_string()),
            city: Some(city.to_string()),
            title: Some(title.to_string()),
            sub_category_id: None,
            category_id: Some(1),
        }
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    pub fn with_categories(mut self, sub_category_id: Option<i64>, category_id: Option<i64>) -> Self {
        self.sub_category_id = sub_category_id;
        self.category_id = category_id;
        self
    }
}

#[derive(Debug, Default)]
pub struct MemoryProductStore {
    rows: Vec<StoredProduct>,
}

impl MemoryProductStore {
    pub fn new(rows: Vec<StoredProduct>) -> Self {
        Self { rows }
    }

    fn visible(&self, status: &str) -> impl Iterator<Item = (&StoredProduct, &String, &String)> + '_ {
        let status = status.to_string();
        self.rows.iter().filter_map(move |p| match (&p.country, &p.city) {
            (Some(country), Some(city)) if p.status == status => Some((p, country, city)),
            _ => None,
        })
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn fetch_products(&self, query: &ProductQuery) -> AppResult<Vec<ProductRow>> {
        let mut rows: Vec<ProductRow> = self
            .visible(query.status)
            .filter(|(_, country, _)| query.country.as_ref().map_or(true, |c| c == *country))
            .filter(|(_, _, city)| query.city.as_ref().map_or(true, |c| c == *city))
            .map(|(p, country, city)| ProductRow {
                product_id: p.id,
                country: country.clone(),
                city: city.clone(),
                title: p.title.clone(),
                sub_category_id: p.sub_category_id,
                category_id: p.category_id,
            })
            .collect();

        rows.sort_by(|a, b| (&a.country, &a.city).cmp(&(&b.country, &b.city)));
        Ok(rows)
    }

    async fn fetch_locations(&self) -> AppResult<Vec<Location>> {
        let mut locations: Vec<Location> = self
            .visible(ACTIVE_STATUS)
            .map(|(_, country, city)| Location {
                country: country.clone(),
                city: city.clone(),
            })
            .collect();

        locations.sort_by(|a, b| (&a.country, &a.city).cmp(&(&b.country, &b.city)));
        locations.dedup();
        Ok(locations)
    }
}

/// Store whose every query fails the way an unreachable database does.
#[derive(Debug, Default)]
pub struct FailingProductStore;

#[async_trait]
impl ProductStore for FailingProductStore {
    async fn fetch_products(&self, _query: &ProductQuery) -> AppResult<Vec<ProductRow>> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn fetch_locations(&self) -> AppResult<Vec<Location>> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }
}
