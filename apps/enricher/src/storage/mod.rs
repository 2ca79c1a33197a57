//! Persistence gateway for generated artifacts.
//!
//! The pipeline talks to storage through `ListingStore`, a narrow
//! unit-of-work interface: `begin` opens a per-listing transaction, the
//! three `create_*` calls stage rows into it, and `commit` makes them
//! visible. Dropping the transaction without committing rolls the listing's
//! rows back.

pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::enrichment::parser::{GeneratedContent, GeneratedReview, GeneratedSummary};

/// Storage write failure, surfaced as a record-level failure by the pipeline.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Per-listing unit of work.
    type Tx: Send;

    async fn begin(&self) -> Result<Self::Tx, StoreError>;

    /// Inserts the content row and returns its id, which the summary and
    /// review rows reference.
    async fn create_content(
        &self,
        tx: &mut Self::Tx,
        listing_id: &str,
        content: &GeneratedContent,
    ) -> Result<Uuid, StoreError>;

    async fn create_summary(
        &self,
        tx: &mut Self::Tx,
        content_id: Uuid,
        listing_id: &str,
        summary: &GeneratedSummary,
    ) -> Result<(), StoreError>;

    async fn create_review(
        &self,
        tx: &mut Self::Tx,
        content_id: Uuid,
        listing_id: &str,
        review: &GeneratedReview,
    ) -> Result<(), StoreError>;

    async fn commit(&self, tx: Self::Tx) -> Result<(), StoreError>;
}
