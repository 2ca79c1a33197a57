// All prompt templates for the enrichment pipeline. The marker tokens the
// templates ask the model to emit (TITLE:, DESCRIPTION:, SUMMARY:, RATING:,
// REVIEW:) are the ones enrichment::parser scans for.

use crate::enrichment::parser::GeneratedContent;
use crate::models::listing::ListingRow;

/// Content prompt template. Replace: {title}, {location}, {city}, {price},
/// {room_type}, {rating}.
pub const CONTENT_PROMPT_TEMPLATE: &str = r#"Rewrite the title and generate a description for this lodging listing. Respond EXACTLY in this format:
TITLE: [a catchy, SEO-friendly title under 100 characters]
DESCRIPTION: [a detailed description highlighting the location, amenities, and unique features]

Listing information:
- Title: {title}
- Location: {location}, {city}
- Price: ${price}
- Room Type: {room_type}
- Rating: {rating}"#;

/// Summary prompt template. Replace: {location}, {city}, {generated_title},
/// {generated_description}.
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Create a concise one-paragraph summary of the following listing. Respond EXACTLY in this format:
SUMMARY: [your summary here]

Title: {generated_title}
Location: {location}, {city}
Description: {generated_description}

Keep the summary under 500 characters and focus on the key selling points."#;

/// Review prompt template. Replace: {location}, {city}, {generated_title},
/// {generated_description}.
pub const REVIEW_PROMPT_TEMPLATE: &str = r#"Generate a realistic guest review based on this listing. Respond EXACTLY in this format:
RATING: [number between 1.0-5.0]
REVIEW: [detailed guest review]

Title: {generated_title}
Location: {location}, {city}
Description: {generated_description}"#;

pub fn build_content_prompt(listing: &ListingRow) -> String {
    CONTENT_PROMPT_TEMPLATE
        .replace("{title}", &listing.title)
        .replace("{location}", &listing.location)
        .replace("{city}", &listing.city)
        .replace("{price}", &format_number(listing.price))
        .replace(
            "{room_type}",
            listing.room_type.as_deref().unwrap_or("Unknown"),
        )
        .replace("{rating}", &format_number(listing.rating))
}

pub fn build_summary_prompt(listing: &ListingRow, content: &GeneratedContent) -> String {
    SUMMARY_PROMPT_TEMPLATE
        .replace("{location}", &listing.location)
        .replace("{city}", &listing.city)
        .replace("{generated_title}", &content.title)
        .replace("{generated_description}", &content.description)
}

pub fn build_review_prompt(listing: &ListingRow, content: &GeneratedContent) -> String {
    REVIEW_PROMPT_TEMPLATE
        .replace("{location}", &listing.location)
        .replace("{city}", &listing.city)
        .replace("{generated_title}", &content.title)
        .replace("{generated_description}", &content.description)
}

fn format_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "N/A".to_string())
}
