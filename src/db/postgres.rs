use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::config::ProductSchema;
use crate::error::AppResult;
use crate::models::{Location, ProductQuery, ProductRow, ACTIVE_STATUS};

use super::ProductStore;

#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: PgPool,
    schema: ProductSchema,
}

impl PgProductStore {
    pub fn new(pool: PgPool, schema: ProductSchema) -> Self {
        Self { pool, schema }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn fetch_products(&self, query: &ProductQuery) -> AppResult<Vec<ProductRow>> {
        let products = select_products(&self.schema, query)
            .build_query_as::<ProductRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    async fn fetch_locations(&self) -> AppResult<Vec<Location>> {
        let locations = select_locations(&self.schema)
            .build_query_as::<Location>()
            .fetch_all(&self.pool)
            .await?;

        Ok(locations)
    }
}

// Integer columns are widened to bigint so INT4 and INT8 schemas both decode
// into i64; the configured title column is aliased to `title`.
fn select_products<'a>(schema: &ProductSchema, query: &'a ProductQuery) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new(format!(
        "SELECT id::bigint AS product_id, country::text AS country, city::text AS city, \
         {title}::text AS title, sub_category_id::bigint AS sub_category_id, \
         category_id::bigint AS category_id \
         FROM {table} WHERE status = ",
        title = schema.title_column,
        table = schema.table,
    ));
    builder.push_bind(query.status);
    builder.push(" AND country IS NOT NULL AND city IS NOT NULL");

    if let Some(country) = &query.country {
        builder.push(" AND country = ");
        builder.push_bind(country.as_str());
    }
    if let Some(city) = &query.city {
        builder.push(" AND city = ");
        builder.push_bind(city.as_str());
    }

    builder.push(" ORDER BY country ASC, city ASC");
    builder
}

fn select_locations(schema: &ProductSchema) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!(
        "SELECT country::text AS country, city::text AS city FROM {table} WHERE status = ",
        table = schema.table,
    ));
    builder.push_bind(ACTIVE_STATUS);
    builder.push(
        " AND country IS NOT NULL AND city IS NOT NULL \
         GROUP BY country, city ORDER BY country ASC, city ASC",
    );
    builder
}
