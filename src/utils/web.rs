//! URL and web string helpers
//!
//! Encoding and decoding of URL path components in several styles, bot
//! detection from a user-agent string, and small HTML-safety helpers.

use std::sync::OnceLock;

use regex::Regex;

/// Survives the non-word strip so compliant slugs can round-trip hyphens
const HYPHEN_TOKEN: &str = "xx00hyphen00xx";

/// Keywords that identify search engines and other well-known bots
const BOT_KEYWORDS: [&str; 10] = [
    "bot", "spider", "google", "yahoo", "search", "crawl", "slurp", "msn", "teoma", "ask.com",
];

/// How much of the source text a slug preserves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugMode {
    /// Drops more non-alphanumeric characters to create a nicer-looking slug
    Aggressive,
    /// Encodes hyphens (as `--`) so the source text round-trips. Not as nice looking
    Compliant,
}

/// URL-component encoding styles supported by [`encode_url_component`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlEncodingKind {
    /// Standard percent encoding
    Percent,
    /// Lowercase hyphenated slug
    Slug,
    /// Spaces swapped for underscores, nothing else touched
    Underscore,
}

fn non_word_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w-]").unwrap())
}

fn hyphen_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-{2,}").unwrap())
}

fn edge_hyphens() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-|-$").unwrap())
}

/// Encodes a string in a chosen format so that it is URL-safe
pub fn encode_url_component(kind: UrlEncodingKind, mode: SlugMode, text: &str) -> String {
    match kind {
        UrlEncodingKind::Percent => urlencoding::encode(text).into_owned(),
        UrlEncodingKind::Underscore => text.replace(' ', "_"),
        UrlEncodingKind::Slug => {
            let mut slug = if mode == SlugMode::Compliant {
                text.replace('-', HYPHEN_TOKEN)
            } else {
                text.to_string()
            };

            slug = slug.replace(' ', "-");
            slug = non_word_chars().replace_all(&slug, "").into_owned();
            slug = hyphen_runs().replace_all(&slug, "-").into_owned();
            slug = edge_hyphens().replace_all(&slug, "").into_owned();

            if mode == SlugMode::Compliant {
                slug = slug.replace(HYPHEN_TOKEN, "--");
            }

            slug.to_lowercase()
        }
    }
}

/// Aggressive-mode convenience over [`encode_url_component`]
pub fn encode_url_component_aggressive(kind: UrlEncodingKind, text: &str) -> String {
    encode_url_component(kind, SlugMode::Aggressive, text)
}

/// Decodes a string from a chosen URL encoding format
pub fn decode_url_component(kind: UrlEncodingKind, text: &str) -> String {
    match kind {
        UrlEncodingKind::Percent => {
            String::from_utf8_lossy(&urlencoding::decode_binary(text.as_bytes())).into_owned()
        }
        UrlEncodingKind::Underscore => text.replace('_', " "),
        UrlEncodingKind::Slug => {
            let text = text
                .replace("--", HYPHEN_TOKEN)
                .replace('-', " ")
                .replace(HYPHEN_TOKEN, "-");
            String::from_utf8_lossy(&urlencoding::decode_binary(text.as_bytes())).into_owned()
        }
    }
}

/// Returns the page segment of a URL path, i.e. everything after the final `/`
pub fn page_name_from_url(path: &str) -> &str {
    match path.rfind('/') {
        Some(index) => &path[index + 1..],
        None => path,
    }
}

/// Attempts to identify whether a user agent belongs to a search engine or
/// other known bot.
///
/// Won't raise false positives but is not guaranteed to identify all bots.
pub fn is_known_bot(user_agent: &str) -> bool {
    let user_agent = user_agent.to_lowercase();
    BOT_KEYWORDS
        .iter()
        .any(|keyword| user_agent.contains(keyword))
}

/// Ensures a string will not break an HTML element when placed into a
/// double-quoted attribute. Useful for keeping tooltips safe.
pub fn to_safe_html_parameter(text: &str) -> String {
    text.replace('"', "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_encoding_round_trip() {
        let encoded = encode_url_component_aggressive(UrlEncodingKind::Percent, "a b&c");
        assert_eq!(encoded, "a%20b%26c");
        assert_eq!(decode_url_component(UrlEncodingKind::Percent, &encoded), "a b&c");
    }

    #[test]
    fn test_underscore_encoding_round_trip() {
        let encoded = encode_url_component_aggressive(UrlEncodingKind::Underscore, "The Front Page");
        assert_eq!(encoded, "The_Front_Page");
        assert_eq!(
            decode_url_component(UrlEncodingKind::Underscore, &encoded),
            "The Front Page"
        );
    }

    #[test]
    fn test_slug_encoding_aggressive() {
        assert_eq!(
            encode_url_component_aggressive(UrlEncodingKind::Slug, "Hello, World!"),
            "hello-world"
        );
        assert_eq!(
            encode_url_component_aggressive(UrlEncodingKind::Slug, "  spaced   out  "),
            "spaced-out"
        );
        // Aggressive mode folds source hyphens into separators.
        assert_eq!(
            encode_url_component_aggressive(UrlEncodingKind::Slug, "blu-ray discs"),
            "blu-ray-discs"
        );
    }

    #[test]
    fn test_slug_encoding_compliant_round_trips_hyphens() {
        let encoded = encode_url_component(UrlEncodingKind::Slug, SlugMode::Compliant, "blu-ray discs");
        assert_eq!(encoded, "blu--ray-discs");
        assert_eq!(
            decode_url_component(UrlEncodingKind::Slug, &encoded),
            "blu-ray discs"
        );
    }

    #[test]
    fn test_slug_decoding_maps_hyphens_to_spaces() {
        assert_eq!(
            decode_url_component(UrlEncodingKind::Slug, "hello-world"),
            "hello world"
        );
    }

    #[test]
    fn test_page_name_from_url() {
        assert_eq!(page_name_from_url("/gallery/photos/summer.html"), "summer.html");
        assert_eq!(page_name_from_url("index.html"), "index.html");
        assert_eq!(page_name_from_url("/gallery/"), "");
    }

    #[test]
    fn test_is_known_bot() {
        assert!(is_known_bot(
            "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)"
        ));
        assert!(is_known_bot("Yahoo! Slurp"));
        assert!(is_known_bot("SomeCrawler/1.0"));
        assert!(!is_known_bot(
            "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0"
        ));
    }

    #[test]
    fn test_to_safe_html_parameter() {
        assert_eq!(
            to_safe_html_parameter(r#"say "hello""#),
            "say 'hello'"
        );
    }
}
