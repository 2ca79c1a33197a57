use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::{ListingStore, StoreError};
use crate::enrichment::parser::{GeneratedContent, GeneratedReview, GeneratedSummary};

/// PostgreSQL-backed `ListingStore`. Plain inserts, one `sqlx::Transaction`
/// per listing.
#[derive(Clone)]
pub struct PgListingStore {
    pool: PgPool,
}

impl PgListingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingStore for PgListingStore {
    type Tx = Transaction<'static, Postgres>;

    async fn begin(&self) -> Result<Self::Tx, StoreError> {
        Ok(self.pool.begin().await?)
    }

    async fn create_content(
        &self,
        tx: &mut Self::Tx,
        listing_id: &str,
        content: &GeneratedContent,
    ) -> Result<Uuid, StoreError> {
        let content_id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO listing_content (id, listing_id, title, description, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(content_id)
        .bind(listing_id)
        .bind(&content.title)
        .bind(&content.description)
        .bind(Utc::now())
        .execute(&mut **tx)
        .await?;

        Ok(content_id)
    }

    async fn create_summary(
        &self,
        tx: &mut Self::Tx,
        content_id: Uuid,
        listing_id: &str,
        summary: &GeneratedSummary,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO listing_summaries (id, content_id, listing_id, summary, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(content_id)
        .bind(listing_id)
        .bind(&summary.summary)
        .bind(Utc::now())
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    async fn create_review(
        &self,
        tx: &mut Self::Tx,
        content_id: Uuid,
        listing_id: &str,
        review: &GeneratedReview,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO listing_reviews (id, content_id, listing_id, rating, review, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(content_id)
        .bind(listing_id)
        .bind(review.rating)
        .bind(&review.review)
        .bind(Utc::now())
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    async fn commit(&self, tx: Self::Tx) -> Result<(), StoreError> {
        Ok(tx.commit().await?)
    }
}
