//! Integration tests for filename normalization and asset parsing.
//!
//! Tests cover:
//! - Title, year, season and episode extraction
//! - Pattern precedence
//! - Comparable forms

use asset_assistant::core::normalizer::{
    comparable, extract_episode, extract_season, extract_title_year, is_specials,
    strip_collection_suffix, word_set,
};
use asset_assistant::models::asset::{AssetFile, NamePattern};

// ========== NORMALIZER TESTS ==========

#[test]
fn test_extract_title_year() {
    assert_eq!(
        extract_title_year("The Matrix (1999)"),
        ("The Matrix".to_string(), Some(1999))
    );
    assert_eq!(
        extract_title_year("  Alien (1979) - Director's Cut"),
        ("Alien".to_string(), Some(1979))
    );
    assert_eq!(extract_title_year("No Year Here"), ("No Year Here".to_string(), None));
    assert_eq!(extract_title_year("Bad (19999)"), ("Bad (19999)".to_string(), None));
}

#[test]
fn test_extract_season() {
    assert_eq!(extract_season("Show (2020) - Season 3"), Some(3));
    assert_eq!(extract_season("Show_season04"), Some(4));
    assert_eq!(extract_season("SEASON 12"), Some(12));
    assert_eq!(extract_season("Postseason 2"), None);
    assert_eq!(extract_season("Show S01E02"), None);
}

#[test]
fn test_extract_episode() {
    assert_eq!(extract_episode("Show S01E02"), Some((1, 2)));
    assert_eq!(extract_episode("Show s1e2"), Some((1, 2)));
    assert_eq!(extract_episode("Show.S01.E10"), Some((1, 10)));
    assert_eq!(extract_episode("Show S01 E03"), Some((1, 3)));
    assert_eq!(extract_episode("Show (2020)"), None);
}

#[test]
fn test_is_specials() {
    assert!(is_specials("Doctor Who (2005) - Specials"));
    assert!(is_specials("doctor who SPECIALS"));
    assert!(!is_specials("Special Agent"));
}

#[test]
fn test_strip_collection_suffix() {
    assert_eq!(strip_collection_suffix("Marvel Collection"), "Marvel");
    assert_eq!(strip_collection_suffix("COLLECTION of Bond"), "of Bond");
    assert_eq!(strip_collection_suffix("Alien"), "Alien");
}

#[test]
fn test_comparable_and_word_set() {
    assert_eq!(comparable("Spider-Man: Homecoming"), "spider man homecoming");
    assert_eq!(comparable("Marvel's  Agents of S.H.I.E.L.D."), "marvels agents of shield");
    assert_eq!(word_set("Universe Marvel"), word_set("marvel universe"));
}

// ========== ASSET PARSING TESTS ==========

#[test]
fn test_zero_padding_is_irrelevant() {
    let a = AssetFile::parse("Breaking Bad S1E2.jpg");
    let b = AssetFile::parse("Breaking Bad S01E02.jpg");
    assert_eq!(a.pattern, NamePattern::Episode);
    assert_eq!((a.season, a.episode), (b.season, b.episode));
    assert_eq!(a.title, b.title);
}

#[test]
fn test_bare_episode_has_empty_title() {
    let asset = AssetFile::parse("S01E02.png");
    assert_eq!(asset.pattern, NamePattern::Episode);
    assert_eq!(asset.title, "");
    assert_eq!(asset.season, Some(1));
    assert_eq!(asset.episode, Some(2));
}

#[test]
fn test_specials_without_year() {
    let asset = AssetFile::parse("Doctor Who - Specials.jpg");
    assert_eq!(asset.pattern, NamePattern::Specials);
    assert_eq!(asset.title, "Doctor Who");
    assert_eq!(asset.year, None);
    assert!(asset.is_specials);
}

#[test]
fn test_extension_case_preserved() {
    let asset = AssetFile::parse("Alien (1979).JPG");
    assert_eq!(asset.extension, "JPG");
    assert_eq!(asset.dotted_extension(), ".JPG");
    assert_eq!(asset.pattern, NamePattern::Plain);
}
