use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

/// A source lodging listing. Read-only input to the enrichment pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ListingRow {
    pub id: i64,
    pub listing_id: String,
    pub city: String,
    pub title: String,
    pub location: String,
    pub price: Option<f64>,
    pub rating: Option<f64>,
    pub room_type: Option<String>,
}

/// Loads the listings to enrich. `limit` bounds the batch to the N most
/// recently added rows, used for smoke runs.
pub async fn fetch_listings(
    pool: &PgPool,
    limit: Option<i64>,
) -> Result<Vec<ListingRow>, sqlx::Error> {
    match limit {
        Some(n) => {
            sqlx::query_as::<_, ListingRow>(
                "SELECT id, listing_id, city, title, location, price, rating, room_type \
                 FROM listings ORDER BY id DESC LIMIT $1",
            )
            .bind(n)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, ListingRow>(
                "SELECT id, listing_id, city, title, location, price, rating, room_type \
                 FROM listings ORDER BY id",
            )
            .fetch_all(pool)
            .await
        }
    }
}
