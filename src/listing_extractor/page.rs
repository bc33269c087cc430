//! Page parser: locate every card in a document and extract each one

use scraper::{ElementRef, Html};
use std::sync::LazyLock;
use tracing::{debug, info};

use super::card::ListingExtractor;
use super::schema::{CardPosition, PageResult};

static DEFAULT_EXTRACTOR: LazyLock<ListingExtractor> = LazyLock::new(ListingExtractor::default);

/// Parse a page with the built-in locators and the default site origin
#[must_use]
pub fn parse_page(html: &str) -> PageResult {
    DEFAULT_EXTRACTOR.parse_page(html)
}

impl ListingExtractor {
    /// Card fragments in document order
    ///
    /// The primary selector group is tried first; only when it finds nothing
    /// are generic containers scanned for the fallback class tokens. Every
    /// match counts, including one nested inside another.
    #[must_use]
    pub fn locate_cards<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        let primary: Vec<_> = document.select(&self.page.primary).collect();
        if !primary.is_empty() {
            return primary;
        }

        debug!("primary card selectors matched nothing, scanning containers");
        document
            .select(&self.page.fallback_containers)
            .filter(|el| self.has_card_tokens(el))
            .collect()
    }

    fn has_card_tokens(&self, el: &ElementRef<'_>) -> bool {
        el.value().attr("class").is_some_and(|class| {
            let class = class.to_lowercase();
            self.page
                .fallback_class_tokens
                .iter()
                .all(|token| class.contains(&token.to_lowercase()))
        })
    }

    /// Locate and extract all cards in `html`
    #[must_use]
    pub fn parse_page(&self, html: &str) -> PageResult {
        let document = Html::parse_document(html);
        let cards = self.locate_cards(&document);
        if cards.is_empty() {
            debug!("no listing cards located");
            return PageResult::no_fragments();
        }

        let total = cards.len();
        let outcomes: Vec<_> = cards
            .into_iter()
            .enumerate()
            .map(|(index, card)| self.extract_card(card, CardPosition { index, total }))
            .collect();

        let result = PageResult::new(total, outcomes);
        info!(
            located = total,
            parsed = result.parsed_count(),
            failed = result.failed_count(),
            "page parsed"
        );
        result
    }
}
