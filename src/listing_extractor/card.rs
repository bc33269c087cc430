//! Card extractor
//!
//! Turns one listing card into a `ListingRecord`. Each field is looked up by
//! its own helper against its own locator chain, so a missing or malformed
//! field never affects its siblings. Only a problem with the fragment as a
//! whole produces `ParseOutcome::Failed`.

use scraper::ElementRef;
use tracing::{debug, error, warn};

use super::cleaners::{clean_price, clean_rating, clean_reviews};
use super::locators::{CardLocators, PageLocators, element_text};
use super::schema::{CardError, CardPosition, ListingRecord, ParseOutcome};
use crate::utils::{MAX_FRAGMENT_BYTES, NOT_AVAILABLE, SITE_ORIGIN, ZERO_REVIEWS, normalize_listing_url};

/// Extracts listing records from rendered search result markup
#[derive(Debug, Clone)]
pub struct ListingExtractor {
    pub(crate) card: CardLocators,
    pub(crate) page: PageLocators,
    pub(crate) site_origin: String,
}

impl Default for ListingExtractor {
    fn default() -> Self {
        Self::new(SITE_ORIGIN)
    }
}

impl ListingExtractor {
    /// Extractor with the built-in locator chains, resolving relative
    /// listing links against `site_origin`
    #[must_use]
    pub fn new(site_origin: impl Into<String>) -> Self {
        Self {
            card: CardLocators::default(),
            page: PageLocators::default(),
            site_origin: site_origin.into().trim_end_matches('/').to_string(),
        }
    }

    /// Replace the per-field locator chains
    #[must_use]
    pub fn with_card_locators(mut self, card: CardLocators) -> Self {
        self.card = card;
        self
    }

    /// Replace the card-finding strategy
    #[must_use]
    pub fn with_page_locators(mut self, page: PageLocators) -> Self {
        self.page = page;
        self
    }

    #[must_use]
    pub fn site_origin(&self) -> &str {
        &self.site_origin
    }

    /// Extract one record from a card fragment
    #[must_use]
    pub fn extract_card(&self, card: ElementRef<'_>, position: CardPosition) -> ParseOutcome {
        if let Err(reason) = check_fragment(card) {
            error!(%position, error = %reason, "card could not be parsed");
            return ParseOutcome::Failed {
                index: position.index,
                reason,
            };
        }

        let mut record = ListingRecord::default();

        if let Some((title, url)) = self.title_and_url(card, position) {
            record.title = title;
            record.listing_url = url;
        }

        let seller = self.card.seller_name.find_text(card);
        let seller_container = seller.as_ref().and_then(|(el, _)| self.seller_container(card, *el));
        record.seller_name = seller.map(|(_, name)| name);

        record.seller_level = Some(self.seller_level(card));
        if let Some(country) = self.seller_country(card, seller_container) {
            record.seller_country = country;
        }

        record.price = self
            .card
            .price
            .find_text(card)
            .and_then(|(_, text)| clean_price(&text));

        let (rating, reviews) = self.rating_and_reviews(card);
        record.rating = rating;
        record.num_reviews = reviews;

        report_gaps(&record, position);
        ParseOutcome::Parsed(record)
    }

    fn title_and_url(
        &self,
        card: ElementRef<'_>,
        position: CardPosition,
    ) -> Option<(Option<String>, Option<String>)> {
        let link = self
            .card
            .title_link
            .find(card, |el| {
                !element_text(el).is_empty() || el.value().attr("href").is_some()
            })?
            .element;

        let title = Some(element_text(&link)).filter(|t| !t.is_empty());
        let url = link.value().attr("href").map(|href| {
            let normalized = normalize_listing_url(href, &self.site_origin);
            if normalized.is_unrecognized() {
                warn!(%position, href, "listing link is neither root-relative nor absolute, kept as-is");
            }
            normalized.into_string()
        });
        Some((title, url))
    }

    /// Element grouping the seller's metadata, used to narrow the country lookup
    ///
    /// Walks up from the seller-name element, never past the card root, looking
    /// for a `div` whose class carries one of the seller-group tokens; falls back
    /// to the seller element's parent.
    fn seller_container<'a>(
        &self,
        card: ElementRef<'a>,
        seller: ElementRef<'a>,
    ) -> Option<ElementRef<'a>> {
        let mut parent = None;
        for node in seller.ancestors() {
            let Some(el) = ElementRef::wrap(node) else {
                break;
            };
            parent.get_or_insert(el);
            if el.value().name() == "div" && self.is_seller_group(&el) {
                return Some(el);
            }
            if el.id() == card.id() {
                break;
            }
        }
        parent
    }

    fn is_seller_group(&self, el: &ElementRef<'_>) -> bool {
        el.value().attr("class").is_some_and(|class| {
            self.card
                .seller_group_tokens
                .iter()
                .any(|token| class.contains(token.as_str()))
        })
    }

    fn seller_level(&self, card: ElementRef<'_>) -> String {
        self.card
            .seller_level
            .find_text(card)
            .map_or_else(|| NOT_AVAILABLE.to_string(), |(_, level)| level)
    }

    fn seller_country(
        &self,
        card: ElementRef<'_>,
        seller_container: Option<ElementRef<'_>>,
    ) -> Option<String> {
        let text = seller_container
            .and_then(|container| self.card.country_in_seller.find_text(container))
            .or_else(|| self.card.country_in_card.find_text(card))
            .map(|(_, text)| text)
            .or_else(|| self.card.flag_icon.find_attr(card, "title"))?;

        // flag tooltips read "From <country>" too, so every source is stripped
        let country = strip_from_prefix(&text);
        (!country.is_empty()).then(|| country.to_string())
    }

    fn rating_and_reviews(&self, card: ElementRef<'_>) -> (Option<String>, String) {
        let (rating, reviews) = match self.card.rating_area.find_element(card) {
            Some(area) => (
                self.card.rating_in_area.find_text(area),
                self.card.review_count.find_text(area),
            ),
            None => {
                debug!("no rating area in card, searching the whole fragment");
                (
                    self.card.rating_fallback.find_text(card),
                    self.card.review_count.find_text(card),
                )
            }
        };

        (
            rating.and_then(|(_, text)| clean_rating(&text)),
            reviews.map_or_else(|| ZERO_REVIEWS.to_string(), |(_, text)| clean_reviews(&text)),
        )
    }
}

/// Reject fragments that cannot be a listing at all
fn check_fragment(card: ElementRef<'_>) -> Result<(), CardError> {
    let bytes = card.html().len();
    if bytes > MAX_FRAGMENT_BYTES {
        return Err(CardError::Oversized {
            bytes,
            limit: MAX_FRAGMENT_BYTES,
        });
    }
    let has_text = card.text().any(|t| !t.trim().is_empty());
    let has_children = card.children().any(|c| c.value().is_element());
    if !has_text && !has_children {
        return Err(CardError::EmptyFragment);
    }
    Ok(())
}

/// Drop a leading "from " (any case) as in "From United States"
fn strip_from_prefix(text: &str) -> &str {
    let text = text.trim();
    match text.get(..5) {
        Some(prefix) if prefix.eq_ignore_ascii_case("from ") => text[5..].trim_start(),
        _ => text,
    }
}

fn report_gaps(record: &ListingRecord, position: CardPosition) {
    let mut missing = Vec::new();
    if record.title.is_none() {
        missing.push("title");
    }
    if record.listing_url.is_none() {
        missing.push("listing_url");
    }
    if record.seller_name.is_none() {
        missing.push("seller_name");
    }
    if record.price.is_none() {
        missing.push("price");
    }
    if record.rating.is_none() {
        missing.push("rating");
    }
    if !missing.is_empty() {
        warn!(%position, ?missing, "card is missing fields");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_prefix_is_case_insensitive() {
        assert_eq!(strip_from_prefix("From Germany"), "Germany");
        assert_eq!(strip_from_prefix("FROM  India "), "India");
        assert_eq!(strip_from_prefix("Frome"), "Frome");
        assert_eq!(strip_from_prefix("Canada"), "Canada");
    }

    #[test]
    fn multibyte_text_does_not_split_a_char() {
        assert_eq!(strip_from_prefix("Türkiye"), "Türkiye");
        assert_eq!(strip_from_prefix("日本"), "日本");
    }
}
