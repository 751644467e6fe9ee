//! Listing identifier extraction from marketplace URLs.

use std::sync::LazyLock;

use listport_core::ListingId;
use regex::Regex;

use crate::error::MarketplaceError;

/// A 10-character alphanumeric segment, opened by `/` and closed by `/`,
/// `?` or the end of the string.
static LISTING_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)/([A-Z0-9]{10})(?:[/?]|$)").expect("valid listing token regex")
});

/// Extracts the canonical listing identifier from a marketplace URL.
///
/// Only the path (and anything after it) is searched, so a 10-character
/// host name is never mistaken for an identifier. Matching is
/// case-insensitive, the token is returned as written, and the first match
/// wins: `https://marketplace.test/dp/B09BWFX1L6` yields `B09BWFX1L6`.
///
/// # Errors
///
/// Returns [`MarketplaceError::Extraction`] when no such token exists.
pub fn extract_listing_id(url: &str) -> Result<ListingId, MarketplaceError> {
    let path = path_portion(url.trim());
    LISTING_TOKEN_RE
        .captures(path)
        .and_then(|caps| caps.get(1))
        .map(|m| ListingId::new(m.as_str()))
        .ok_or_else(|| MarketplaceError::Extraction {
            url: url.to_owned(),
        })
}

/// Strips `scheme://authority` when present; otherwise returns the input.
fn path_portion(url: &str) -> &str {
    match url.find("://") {
        Some(idx) => {
            let rest = &url[idx + 3..];
            rest.find('/').map_or("", |slash| &rest[slash..])
        }
        None => url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(url: &str) -> Option<String> {
        extract_listing_id(url).ok().map(|id| id.as_str().to_owned())
    }

    #[test]
    fn extracts_dp_token() {
        assert_eq!(
            extract("https://marketplace.test/dp/B09BWFX1L6").as_deref(),
            Some("B09BWFX1L6")
        );
    }

    #[test]
    fn extracts_token_followed_by_slash_or_query() {
        assert_eq!(
            extract("https://www.amazon.com/Widget-Deluxe/dp/B09BWFX1L6/ref=sr_1_1").as_deref(),
            Some("B09BWFX1L6")
        );
        assert_eq!(
            extract("https://www.amazon.com/dp/B09BWFX1L6?th=1&psc=1").as_deref(),
            Some("B09BWFX1L6")
        );
    }

    #[test]
    fn matching_ignores_case_and_keeps_token_as_written() {
        assert_eq!(
            extract("https://marketplace.test/gp/product/b09bwfx1l6").as_deref(),
            Some("b09bwfx1l6")
        );
    }

    #[test]
    fn first_match_wins() {
        assert_eq!(
            extract("https://marketplace.test/AAAAAAAAAA/dp/B09BWFX1L6").as_deref(),
            Some("AAAAAAAAAA")
        );
    }

    #[test]
    fn rejects_tokens_of_the_wrong_length() {
        assert!(extract("https://marketplace.test/dp/B09BWFX1L").is_none());
        assert!(extract("https://marketplace.test/dp/B09BWFX1L6X").is_none());
    }

    #[test]
    fn rejects_non_alphanumeric_tokens() {
        assert!(extract("https://marketplace.test/dp/B09-WFX1L6").is_none());
    }

    #[test]
    fn ignores_ten_character_host() {
        assert!(extract("https://abcdefghij/").is_none());
        assert!(extract("https://abcdefghij").is_none());
    }

    #[test]
    fn accepts_bare_paths() {
        assert_eq!(extract("/dp/B09BWFX1L6").as_deref(), Some("B09BWFX1L6"));
    }

    #[test]
    fn error_carries_original_url() {
        let err = extract_listing_id("not a url").unwrap_err();
        assert!(
            matches!(err, MarketplaceError::Extraction { ref url } if url == "not a url"),
            "expected Extraction, got: {err:?}"
        );
    }
}
