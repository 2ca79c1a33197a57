//! Batch orchestrator — sequences the three generation steps per listing and
//! isolates failure to the listing it occurred on.
//!
//! Flow per listing: content prompt → generate → parse → stage content row →
//! summary prompt (listing + generated content) → generate → parse → stage
//! summary row → review prompt → generate → parse → stage review row →
//! commit. The three creates ride one transaction opened at the start of the
//! listing; any error before commit drops it, and with it the listing's
//! partial rows. The batch then continues with the next listing.

use tracing::{error, info};

use crate::enrichment::parser::{
    parse_rating_and_review, parse_summary, parse_title_and_description, ParsePolicy,
};
use crate::enrichment::prompts::{build_content_prompt, build_review_prompt, build_summary_prompt};
use crate::errors::EnrichError;
use crate::llm_client::TextGenerator;
use crate::models::listing::ListingRow;
use crate::storage::ListingStore;

/// End-of-run tallies for one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Drives enrichment across a batch of listings.
pub struct Enricher<G, S> {
    generator: G,
    store: S,
    policy: ParsePolicy,
}

impl<G: TextGenerator, S: ListingStore> Enricher<G, S> {
    pub fn new(generator: G, store: S, policy: ParsePolicy) -> Self {
        Self {
            generator,
            store,
            policy,
        }
    }

    /// Processes every listing start-to-finish, strictly sequentially.
    /// A failed listing is logged and counted; the batch continues.
    pub async fn run(&self, listings: &[ListingRow]) -> BatchReport {
        let mut report = BatchReport::default();

        for listing in listings {
            report.attempted += 1;
            match self.enrich_listing(listing).await {
                Ok(()) => {
                    report.succeeded += 1;
                    info!("Successfully processed listing {}", listing.listing_id);
                }
                Err(e) => {
                    report.failed += 1;
                    error!("Error processing listing {}: {e}", listing.listing_id);
                }
            }
        }

        report
    }

    /// One listing: content → summary → review. Later prompts consume earlier
    /// generated text, so the steps are strictly ordered.
    async fn enrich_listing(&self, listing: &ListingRow) -> Result<(), EnrichError> {
        let mut tx = self.store.begin().await?;

        let raw = self
            .generator
            .generate(&build_content_prompt(listing))
            .await?;
        let content = parse_title_and_description(&raw, self.policy)?;
        let content_id = self
            .store
            .create_content(&mut tx, &listing.listing_id, &content)
            .await?;

        let raw = self
            .generator
            .generate(&build_summary_prompt(listing, &content))
            .await?;
        let summary = parse_summary(&raw, self.policy)?;
        self.store
            .create_summary(&mut tx, content_id, &listing.listing_id, &summary)
            .await?;

        let raw = self
            .generator
            .generate(&build_review_prompt(listing, &content))
            .await?;
        let review = parse_rating_and_review(&raw, self.policy)?;
        self.store
            .create_review(&mut tx, content_id, &listing.listing_id, &review)
            .await?;

        self.store.commit(tx).await?;

        Ok(())
    }
}
