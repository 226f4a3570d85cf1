//! Decoding of the `#access_token=...&expires_in=...` fragment the provider
//! appends to the redirect URI.
//!
//! Pairs are picked out with a global `([^&=]+)=([^&]*)` scan rather than a
//! plain split, so stray separators and keys without a value are skipped
//! instead of producing empty entries.  Both halves are percent-decoded the
//! way `decodeURIComponent` does it: `+` stays a literal plus.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::OAuthResponse;

lazy_static! {
    static ref PAIR: Regex = Regex::new(r"([^&=]+)=([^&]*)").unwrap();
}

/// Parse a URL fragment (with or without the leading `#`).
///
/// Returns an empty record when nothing matches or when any pair decodes to
/// invalid UTF-8; a malformed fragment is treated as no fragment at all.
pub fn parse_fragment(fragment: &str) -> OAuthResponse {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let mut record = OAuthResponse::new();

    for caps in PAIR.captures_iter(fragment) {
        let (Some(key), Some(value)) = (decode(&caps[1]), decode(&caps[2])) else {
            crate::debug_log!("fragment: undecodable pair, ignoring fragment");
            return OAuthResponse::new();
        };
        record.insert(key, value);
    }

    record
}

fn decode(raw: &str) -> Option<String> {
    urlencoding::decode(raw).ok().map(|s| s.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_google_response() {
        let rec = parse_fragment("access_token=ABC&expires_in=3600&state=streamlit-google-oauth");
        let expected: OAuthResponse = [
            ("access_token", "ABC"),
            ("expires_in", "3600"),
            ("state", "streamlit-google-oauth"),
        ]
        .into_iter()
        .collect();
        assert_eq!(rec, expected);
    }

    #[test]
    fn leading_hash_is_optional() {
        assert_eq!(parse_fragment("#a=1"), parse_fragment("a=1"));
    }

    #[test]
    fn empty_and_pairless_fragments_yield_nothing() {
        assert!(parse_fragment("").is_empty());
        assert!(parse_fragment("#").is_empty());
        assert!(parse_fragment("just-a-heading").is_empty());
        assert!(parse_fragment("&&=&").is_empty());
    }

    #[test]
    fn values_are_percent_decoded_without_plus_as_space() {
        let rec = parse_fragment("scope=email%20profile&token_type=Bearer+x");
        assert_eq!(rec.get("scope"), Some("email profile"));
        assert_eq!(rec.get("token_type"), Some("Bearer+x"));
    }

    #[test]
    fn empty_value_is_kept() {
        let rec = parse_fragment("a=&b=2");
        assert_eq!(rec.get("a"), Some(""));
        assert_eq!(rec.get("b"), Some("2"));
    }

    #[test]
    fn equals_sign_inside_value_is_kept() {
        // Values may contain `=`; only `&` ends a pair.
        let rec = parse_fragment("a=b=c&d=e");
        assert_eq!(rec.get("a"), Some("b=c"));
        assert_eq!(rec.get("d"), Some("e"));
        assert_eq!(rec.len(), 2);
    }

    #[test]
    fn padded_token_keeps_trailing_equals() {
        let rec = parse_fragment("#access_token=ya29.abc==&state=streamlit-google-oauth");
        assert_eq!(rec.access_token(), Some("ya29.abc=="));
        assert_eq!(rec.state(), Some("streamlit-google-oauth"));
    }

    #[test]
    fn later_duplicates_win() {
        assert_eq!(parse_fragment("k=1&k=2").get("k"), Some("2"));
    }

    #[test]
    fn invalid_utf8_discards_everything() {
        assert!(parse_fragment("access_token=ok&bad=%FF%FE").is_empty());
    }

    proptest! {
        #[test]
        fn encoded_pairs_survive_parsing(
            pairs in prop::collection::btree_map("[a-z_]{1,12}", "[ -~]{0,16}", 0..6)
        ) {
            let fragment = pairs
                .iter()
                .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            let rec = parse_fragment(&fragment);
            prop_assert_eq!(rec.len(), pairs.len());
            for (k, v) in &pairs {
                prop_assert_eq!(rec.get(k), Some(v.as_str()));
            }
        }
    }
}
