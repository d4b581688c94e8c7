//! Filename normalization helpers.
//!
//! Pure string utilities used by the classifier, matcher and planner.
//! Everything here works on the filename only, never on file contents.

/// Image extensions accepted from the staging directory.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Split a filename into stem and extension (without the dot, case preserved).
///
/// A leading dot is treated as part of the stem, so `.hidden` has no extension.
pub fn split_extension(filename: &str) -> (&str, Option<&str>) {
    match filename.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < filename.len() => {
            (&filename[..idx], Some(&filename[idx + 1..]))
        }
        _ => (filename, None),
    }
}

/// Check if a filename has a supported image extension.
pub fn is_supported_image(filename: &str) -> bool {
    split_extension(filename)
        .1
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Check if a filename is a zip archive.
pub fn is_archive(filename: &str) -> bool {
    filename.to_lowercase().ends_with(".zip")
}

/// Extract `<title> (<year>)`.
///
/// The title is the text before the last parenthesised four digit group,
/// trimmed, case preserved. Without a year the whole input is returned trimmed.
pub fn extract_title_year(name: &str) -> (String, Option<u16>) {
    if let Ok(re) = regex::Regex::new(r"^(.+)\s\((\d{4})\)") {
        if let Some(caps) = re.captures(name) {
            let title = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
            let year = caps.get(2).and_then(|m| m.as_str().parse().ok());
            if !title.is_empty() {
                return (title.to_string(), year);
            }
        }
    }

    (name.trim().to_string(), None)
}

/// Extract the number from a `Season <N>` token.
pub fn extract_season(name: &str) -> Option<u32> {
    let re = regex::Regex::new(r"(?i)(?:^|[\s\-_.])season\s*(\d+)").ok()?;
    re.captures(name)?.get(1)?.as_str().parse().ok()
}

/// Byte offset where the `Season <N>` token starts, if present.
fn season_token_start(name: &str) -> Option<usize> {
    let re = regex::Regex::new(r"(?i)season\s*\d+").ok()?;
    re.find(name).map(|m| m.start())
}

/// Extract `(season, episode)` from an `S<NN>E<MM>` token.
///
/// Leading zeros are accepted and an optional space, dot, dash or underscore
/// may sit between the two halves.
pub fn extract_episode(name: &str) -> Option<(u32, u32)> {
    let re = regex::Regex::new(r"(?i)s(\d+)[\s._\-]?e(\d+)").ok()?;
    let caps = re.captures(name)?;
    let season = caps.get(1)?.as_str().parse().ok()?;
    let episode = caps.get(2)?.as_str().parse().ok()?;
    Some((season, episode))
}

/// Byte offset where the `S<NN>E<MM>` token starts, if present.
fn episode_token_start(name: &str) -> Option<usize> {
    let re = regex::Regex::new(r"(?i)s\d+[\s._\-]?e\d+").ok()?;
    re.find(name).map(|m| m.start())
}

/// Check for the "Specials" marker (case-insensitive).
pub fn is_specials(name: &str) -> bool {
    name.to_lowercase().contains("specials")
}

/// Remove every case-insensitive occurrence of "collection" and tidy whitespace.
pub fn strip_collection_suffix(name: &str) -> String {
    match regex::Regex::new(r"(?i)collection") {
        Ok(re) => collapse_whitespace(&re.replace_all(name, " ")),
        Err(_) => collapse_whitespace(name),
    }
}

/// Comparable form of a title.
///
/// Lowercase, apostrophes and dots dropped, any other punctuation turned into a
/// space and whitespace collapsed. `Spider-Man: Homecoming` and
/// `spider man homecoming` compare equal.
pub fn comparable(name: &str) -> String {
    let mapped: String = name
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '\'' | '’' | '.'))
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    collapse_whitespace(&mapped)
}

/// Word-set form used for order-insensitive collection matching.
pub fn word_set(name: &str) -> Vec<String> {
    let mut words: Vec<String> = comparable(name)
        .split(' ')
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect();
    words.sort();
    words
}

/// Title portion of a stem that carries a season, specials or episode marker.
///
/// `Breaking Bad - S01E02` gives `Breaking Bad`; separators left dangling
/// before the marker are trimmed.
pub fn title_before_marker(stem: &str) -> String {
    let cut = [
        season_token_start(stem),
        episode_token_start(stem),
        specials_token_start(stem),
    ]
    .into_iter()
    .flatten()
    .min()
    .unwrap_or(stem.len());

    stem[..cut]
        .trim_end_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '_' | '.'))
        .trim()
        .to_string()
}

fn specials_token_start(name: &str) -> Option<usize> {
    let re = regex::Regex::new(r"(?i)specials").ok()?;
    re.find(name).map(|m| m.start())
}

/// Zero-pad a season or episode number to two digits.
pub fn pad2(n: u32) -> String {
    format!("{:02}", n)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("poster.JPG"), ("poster", Some("JPG")));
        assert_eq!(split_extension("Movie (2020).v2.png"), ("Movie (2020).v2", Some("png")));
        assert_eq!(split_extension("noext"), ("noext", None));
        assert_eq!(split_extension(".hidden"), (".hidden", None));
    }

    #[test]
    fn test_is_supported_image() {
        assert!(is_supported_image("a.jpg"));
        assert!(is_supported_image("a.JPEG"));
        assert!(is_supported_image("a.png"));
        assert!(!is_supported_image("a.webp"));
        assert!(!is_supported_image("a.zip"));
    }

    #[test]
    fn test_extract_title_year() {
        assert_eq!(
            extract_title_year("Breaking Bad (2008) - Season 3"),
            ("Breaking Bad".to_string(), Some(2008))
        );
        assert_eq!(extract_title_year("Marvel Collection"), ("Marvel Collection".to_string(), None));
        assert_eq!(extract_title_year("(2008)"), ("(2008)".to_string(), None));
    }

    #[test]
    fn test_title_before_marker() {
        assert_eq!(title_before_marker("Breaking Bad - S01E02"), "Breaking Bad");
        assert_eq!(title_before_marker("Show.S1.E2"), "Show");
        assert_eq!(title_before_marker("Show - Season 2"), "Show");
        assert_eq!(title_before_marker("Show - Specials"), "Show");
        assert_eq!(title_before_marker("Plain Title"), "Plain Title");
    }

    #[test]
    fn test_pad2() {
        assert_eq!(pad2(3), "03");
        assert_eq!(pad2(12), "12");
        assert_eq!(pad2(100), "100");
    }
}
