use serde::Serialize;

/// Only rows carrying this status are ever visible to automation clients.
pub const ACTIVE_STATUS: &str = "active";

/// Projection of one product row as read from the store. The title column is
/// aliased to `title` whatever its physical name is.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ProductRow {
    pub product_id: i64,
    pub country: String,
    pub city: String,
    pub title: Option<String>,
    pub sub_category_id: Option<i64>,
    pub category_id: Option<i64>,
}

/// Row shape consumed by the workflow tool, which matches on `activity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub product_id: i64,
    pub country: String,
    pub city: String,
    pub activity: String,
    pub title: String,
    pub sub_category_id: Option<i64>,
}

impl From<ProductRow> for CatalogEntry {
    fn from(row: ProductRow) -> Self {
        let title = row.title.as_deref().unwrap_or_default().trim().to_string();
        Self {
            product_id: row.product_id,
            country: row.country.trim().to_string(),
            city: row.city.trim().to_string(),
            activity: title.clone(),
            title,
            sub_category_id: row.sub_category_id.or(row.category_id),
        }
    }
}

/// Distinct `(country, city)` pair of an active product.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Location {
    pub country: String,
    pub city: String,
}

// ── Query parameters ──────────────────────────────────────────────────────────

/// `?country=` and `?city=` filters. A key that is present applies as an exact
/// match even when its value is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationFilters {
    pub country: Option<String>,
    pub city: Option<String>,
}

impl LocationFilters {
    /// Read the filters from a raw query string. Repeated keys resolve to
    /// their last value and unknown keys are ignored.
    pub fn from_query(query: Option<&str>) -> Self {
        let mut filters = Self::default();
        let pairs = url::form_urlencoded::parse(query.unwrap_or_default().as_bytes());
        for (key, value) in pairs {
            match key.as_ref() {
                "country" => filters.country = Some(value.into_owned()),
                "city" => filters.city = Some(value.into_owned()),
                _ => {}
            }
        }
        filters
    }

    pub fn is_empty(&self) -> bool {
        self.country.is_none() && self.city.is_none()
    }
}

/// Everything a product select needs. The active-status and not-null
/// country/city conditions always apply; results are always ordered by
/// country then city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub status: &'static str,
    pub country: Option<String>,
    pub city: Option<String>,
}

impl ProductQuery {
    pub fn active() -> Self {
        Self {
            status: ACTIVE_STATUS,
            country: None,
            city: None,
        }
    }

    pub fn with_filters(filters: LocationFilters) -> Self {
        Self {
            country: filters.country,
            city: filters.city,
            ..Self::active()
        }
    }
}
