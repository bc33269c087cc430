//! Tiered locator strategies
//!
//! A `LocatorChain` is an ordered list of CSS selectors tried one after the
//! other; the first selector yielding an acceptable element wins and later
//! selectors are never consulted. Markup drift is absorbed by editing these
//! lists rather than the extraction code.

use scraper::{ElementRef, Selector};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid selector '{css}' in {chain}: {message}")]
pub struct LocatorError {
    pub chain: String,
    pub css: String,
    pub message: String,
}

/// One alternative way of finding an element
#[derive(Debug, Clone)]
pub struct Locator {
    css: String,
    selector: Selector,
}

impl Locator {
    #[must_use]
    pub fn css(&self) -> &str {
        &self.css
    }
}

/// Element found by a chain, with the 0-based tier that produced it
#[derive(Debug, Clone, Copy)]
pub struct LocatorMatch<'a> {
    pub element: ElementRef<'a>,
    pub tier: usize,
}

#[derive(Debug, Clone)]
pub struct LocatorChain {
    name: String,
    strategies: Vec<Locator>,
}

impl LocatorChain {
    pub fn parse(name: impl Into<String>, css: &[&str]) -> Result<Self, LocatorError> {
        let name = name.into();
        let strategies = css
            .iter()
            .map(|css| {
                Selector::parse(css)
                    .map(|selector| Locator {
                        css: (*css).to_string(),
                        selector,
                    })
                    .map_err(|e| LocatorError {
                        chain: name.clone(),
                        css: (*css).to_string(),
                        message: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { name, strategies })
    }

    fn builtin(name: &str, css: &[&str]) -> Self {
        match Self::parse(name, css) {
            Ok(chain) => chain,
            Err(e) => panic!("BUG: hardcoded locator chain is invalid: {e}"),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn strategies(&self) -> &[Locator] {
        &self.strategies
    }

    /// First element, by tier then document order, that satisfies `accept`
    pub fn find<'a, P>(&self, scope: ElementRef<'a>, accept: P) -> Option<LocatorMatch<'a>>
    where
        P: Fn(&ElementRef<'a>) -> bool,
    {
        self.strategies.iter().enumerate().find_map(|(tier, locator)| {
            scope
                .select(&locator.selector)
                .find(|el| accept(el))
                .map(|element| LocatorMatch { element, tier })
        })
    }

    /// First element matched by any tier
    #[must_use]
    pub fn find_element<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.find(scope, |_| true).map(|m| m.element)
    }

    /// First element with non-blank text, together with that text
    #[must_use]
    pub fn find_text<'a>(&self, scope: ElementRef<'a>) -> Option<(ElementRef<'a>, String)> {
        self.find(scope, |el| !element_text(el).is_empty())
            .map(|m| (m.element, element_text(&m.element)))
    }

    /// First element carrying a non-blank `attr`, together with its value
    #[must_use]
    pub fn find_attr<'a>(&self, scope: ElementRef<'a>, attr: &str) -> Option<String> {
        self.find(scope, |el| {
            el.value().attr(attr).is_some_and(|v| !v.trim().is_empty())
        })
        .and_then(|m| m.element.value().attr(attr))
        .map(|v| v.trim().to_string())
    }
}

/// Text content of an element with whitespace runs collapsed and ends trimmed
#[must_use]
pub fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Per-field locator chains used by the card extractor
#[derive(Debug, Clone)]
pub struct CardLocators {
    pub title_link: LocatorChain,
    pub seller_name: LocatorChain,
    /// Class fragments marking a `div` that groups seller metadata
    pub seller_group_tokens: Vec<String>,
    pub seller_level: LocatorChain,
    /// Country lookup inside the seller container
    pub country_in_seller: LocatorChain,
    /// Country lookup across the whole card
    pub country_in_card: LocatorChain,
    /// Flag icons whose `title` attribute names the country
    pub flag_icon: LocatorChain,
    pub price: LocatorChain,
    pub rating_area: LocatorChain,
    pub rating_in_area: LocatorChain,
    pub rating_fallback: LocatorChain,
    pub review_count: LocatorChain,
}

impl Default for CardLocators {
    fn default() -> Self {
        Self {
            title_link: LocatorChain::builtin(
                "title link",
                &[
                    r#"a[data-testid="gig-title"]"#,
                    "a.gig-title-link",
                    "h3 a",
                    r#"a[href*="/gigs/"]"#,
                ],
            ),
            seller_name: LocatorChain::builtin(
                "seller name",
                &[
                    r#"a[data-testid="seller-name"]"#,
                    r#"a[href*="/users/"]"#,
                    "p.seller-name",
                ],
            ),
            seller_group_tokens: vec!["seller-info".to_string(), "seller-details".to_string()],
            seller_level: LocatorChain::builtin(
                "seller level",
                &[r#"span[data-testid="seller-level"]"#, "span.seller-level"],
            ),
            country_in_seller: LocatorChain::builtin(
                "seller country (seller block)",
                &[
                    r#"span[data-testid*="country"]"#,
                    r#"span[class*="country"]"#,
                    r#"span[class*="location"]"#,
                ],
            ),
            country_in_card: LocatorChain::builtin(
                "seller country (card)",
                &[
                    r#"span[data-testid*="country"]"#,
                    r#"span[class*="country"]"#,
                    r#"span[class*="location"]"#,
                    "div.seller-location span",
                ],
            ),
            flag_icon: LocatorChain::builtin(
                "flag icon",
                &[r#"img[class*="flag"]"#, r#"span[class*="flag-icon"]"#],
            ),
            price: LocatorChain::builtin(
                "price",
                &[
                    r#"span[data-testid="price"]"#,
                    "p.price",
                    r#"span[class*="price"]"#,
                ],
            ),
            rating_area: LocatorChain::builtin(
                "rating area",
                &[
                    r#"div[data-testid="gig-rating"]"#,
                    r#"span[class*="rating"]"#,
                    r#"div[class*="rating"]"#,
                ],
            ),
            rating_in_area: LocatorChain::builtin(
                "rating score (rating area)",
                &[
                    r#"span[data-testid="star-rating-score"]"#,
                    "span.rating-score",
                    "b",
                ],
            ),
            rating_fallback: LocatorChain::builtin(
                "rating score (card)",
                &[
                    r#"span[data-testid="star-rating-score"]"#,
                    "span.rating-score",
                    r#"b[class*="rating"]"#,
                ],
            ),
            review_count: LocatorChain::builtin(
                "review count",
                &[
                    r#"span[data-testid="review-count"]"#,
                    "span.rating-count",
                    r#"span[class*="reviews"]"#,
                ],
            ),
        }
    }
}

/// Two-tier strategy for finding the cards on a page
#[derive(Debug, Clone)]
pub struct PageLocators {
    /// Selectors believed to identify a card reliably, matched as one group
    pub primary: Selector,
    /// Generic containers scanned when the primary group finds nothing
    pub fallback_containers: Selector,
    /// Every token must appear in a fallback container's class (case-insensitive)
    pub fallback_class_tokens: Vec<String>,
}

impl Default for PageLocators {
    fn default() -> Self {
        Self {
            primary: Selector::parse(
                r#"div[data-testid="gig-card-layout"], div.gig-card, article.gig-card"#,
            )
            .expect("BUG: hardcoded card selector group is invalid"),
            fallback_containers: Selector::parse("article, div")
                .expect("BUG: hardcoded container selector is invalid"),
            fallback_class_tokens: vec!["gig".to_string(), "card".to_string()],
        }
    }
}
