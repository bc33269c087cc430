//! Card extractor: tiered locators, defaults and fault isolation

mod common;

use common::{CardFixture, extract_first, record_of, results_page};
use gigscrape::listing_extractor::{CardError, ParseOutcome};
use proptest::prelude::*;

#[test]
fn test_complete_card_extracts_every_field() {
    let record = record_of(&CardFixture::complete().to_html());

    assert_eq!(record.title.as_deref(), Some("I will build your python API"));
    assert_eq!(
        record.listing_url.as_deref(),
        Some("https://www.fiverr.com/alice/build-python-api")
    );
    assert_eq!(record.seller_name.as_deref(), Some("alice"));
    assert_eq!(record.seller_level.as_deref(), Some("Level 2"));
    assert_eq!(record.seller_country, "United States");
    assert_eq!(record.price.as_deref(), Some("10.50"));
    assert_eq!(record.rating.as_deref(), Some("4.9"));
    assert_eq!(record.num_reviews, "1200");
}

#[test]
fn test_root_relative_link_gets_origin_and_loses_query() {
    let card = CardFixture {
        href: Some("/gigs/foo?source=x"),
        ..CardFixture::titled("Foo")
    };
    let record = record_of(&card.to_html());
    assert_eq!(record.listing_url.as_deref(), Some("https://www.fiverr.com/gigs/foo"));
}

#[test]
fn test_absolute_link_loses_query_only() {
    let card = CardFixture {
        href: Some("https://www.fiverr.com/bob/design-logo?ref=abc"),
        ..CardFixture::titled("Logo")
    };
    let record = record_of(&card.to_html());
    assert_eq!(
        record.listing_url.as_deref(),
        Some("https://www.fiverr.com/bob/design-logo")
    );
}

#[test]
fn test_unrecognized_link_is_kept_verbatim() {
    let card = CardFixture {
        href: Some("gigs/relative-without-slash"),
        ..CardFixture::titled("Odd")
    };
    let record = record_of(&card.to_html());
    assert_eq!(record.listing_url.as_deref(), Some("gigs/relative-without-slash"));
}

#[test]
fn test_missing_fields_fall_back_to_defaults() {
    let record = record_of(&CardFixture::titled("Bare card").to_html());

    assert_eq!(record.title.as_deref(), Some("Bare card"));
    assert_eq!(record.seller_name, None);
    assert_eq!(record.seller_level.as_deref(), Some("N/A"));
    assert_eq!(record.seller_country, "N/A");
    assert_eq!(record.price, None);
    assert_eq!(record.rating, None);
    assert_eq!(record.num_reviews, "0");
}

#[test]
fn test_legacy_class_based_markup() {
    let card = r#"
        <article class="gig-card">
          <div class="seller-details">
            <p class="seller-name">carol_dev</p>
            <span class="seller-level">Top Rated Seller</span>
          </div>
          <a class="gig-title-link" href="/carol_dev/scrape-anything">  I will scrape
              anything  </a>
          <div class="gig-rating"><b>4.7</b><span class="reviews-count">(87)</span></div>
          <p class="price">US$45</p>
        </article>"#;
    let record = record_of(card);

    assert_eq!(record.title.as_deref(), Some("I will scrape anything"));
    assert_eq!(record.seller_name.as_deref(), Some("carol_dev"));
    assert_eq!(record.seller_level.as_deref(), Some("Top Rated Seller"));
    assert_eq!(record.price.as_deref(), Some("45"));
    assert_eq!(record.rating.as_deref(), Some("4.7"));
    assert_eq!(record.num_reviews, "87");
    assert_eq!(
        record.listing_url.as_deref(),
        Some("https://www.fiverr.com/carol_dev/scrape-anything")
    );
}

#[test]
fn test_rating_without_area_searches_whole_card() {
    let card = r#"
        <div class="gig-card">
          <h3><a href="/gigs/x">Title</a></h3>
          <b class="xstar-rating">4.8</b>
        </div>"#;
    let record = record_of(card);
    assert_eq!(record.rating.as_deref(), Some("4.8"));
    assert_eq!(record.num_reviews, "0");
}

#[test]
fn test_reviews_found_without_rating() {
    let card = CardFixture {
        reviews: Some("(15)"),
        ..CardFixture::titled("No stars yet")
    };
    let record = record_of(&card.to_html());
    assert_eq!(record.rating, None);
    assert_eq!(record.num_reviews, "15");
}

#[test]
fn test_country_prefers_seller_block() {
    let card = r#"
        <div class="gig-card">
          <span class="location-badge">Worldwide delivery</span>
          <div class="seller-info">
            <a href="/users/dan">dan</a>
            <span class="seller-location">from Canada</span>
          </div>
          <h3><a href="/gigs/y">Title</a></h3>
        </div>"#;
    let record = record_of(card);
    assert_eq!(record.seller_country, "Canada");
}

#[test]
fn test_country_falls_back_to_card_then_flag() {
    let card = r#"
        <div class="gig-card">
          <div class="seller-info"><a href="/users/eve">eve</a></div>
          <div class="seller-location"><span>India</span></div>
          <h3><a href="/gigs/z">Title</a></h3>
        </div>"#;
    assert_eq!(record_of(card).seller_country, "India");

    let card = r#"
        <div class="gig-card">
          <div class="seller-info"><a href="/users/fay">fay</a></div>
          <img class="country-flag" src="/de.svg" title="From Germany">
          <h3><a href="/gigs/w">Title</a></h3>
        </div>"#;
    assert_eq!(record_of(card).seller_country, "Germany");
}

#[test]
fn test_flag_title_prefix_is_stripped() {
    let card = r#"
        <div class="gig-card">
          <span class="flag-icon flag-icon-br" title="from Brazil"></span>
          <h3><a href="/gigs/b">Title</a></h3>
        </div>"#;
    assert_eq!(record_of(card).seller_country, "Brazil");

    let card = r#"
        <div class="gig-card">
          <img class="flag" src="/jp.svg" title="Japan">
          <h3><a href="/gigs/j">Title</a></h3>
        </div>"#;
    assert_eq!(record_of(card).seller_country, "Japan");
}

#[test]
fn test_seller_parent_is_used_when_no_seller_group() {
    let card = r#"
        <div class="gig-card">
          <span class="country-note">Elsewhere</span>
          <section><a href="/users/gus">gus</a><span class="country">Brazil</span></section>
          <h3><a href="/gigs/v">Title</a></h3>
        </div>"#;
    assert_eq!(record_of(card).seller_country, "Brazil");
}

#[test]
fn test_empty_fragment_fails_without_affecting_siblings() {
    let html = results_page(&[
        r#"<div class="gig-card"></div>"#.to_string(),
        CardFixture::titled("Still parsed").to_html(),
    ]);
    match extract_first(&html) {
        ParseOutcome::Failed { index, reason } => {
            assert_eq!(index, 0);
            assert_eq!(reason, CardError::EmptyFragment);
        }
        other => panic!("expected failure, got {other:?}"),
    }

    let result = gigscrape::parse_page(&html);
    assert_eq!(result.fragments_located, 2);
    assert!(result.outcomes[0].is_failed());
    assert_eq!(
        result.outcomes[1].record().and_then(|r| r.title.as_deref()),
        Some("Still parsed")
    );
}

proptest! {
    #[test]
    fn country_and_reviews_always_defined(
        country in proptest::option::of("[A-Za-z ]{0,12}"),
        reviews in proptest::option::of("[0-9a-z.,() ]{0,10}"),
        rating in proptest::option::of("[0-9. ]{0,5}"),
        title in "[A-Za-z]{1,20}",
    ) {
        let card = CardFixture {
            seller: Some("someone"),
            country: country.as_deref(),
            reviews: reviews.as_deref(),
            rating: rating.as_deref(),
            ..CardFixture::titled(&title)
        };
        let record = record_of(&card.to_html());
        prop_assert!(!record.seller_country.is_empty());
        prop_assert!(!record.num_reviews.is_empty());
        prop_assert!(record.num_reviews.chars().all(|c| c.is_ascii_digit()));
    }
}
