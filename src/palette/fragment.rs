//! URL fragment codec.
//!
//! Colours are joined with `-` and every `#` is stripped on write. On read
//! only the first entry gets a `#` back, the rest stay bare. Links shared
//! from earlier versions rely on this shape, so both directions keep it.

pub const SEPARATOR: char = '-';

/// Serialise a colour list into fragment text (without the leading `#`).
pub fn encode(colors: &[String]) -> String {
    colors.join("-").replace('#', "")
}

/// Parse fragment text (without the leading `#`) back into a colour list.
/// Empty segments are skipped.
pub fn decode(fragment: &str) -> Vec<String> {
    if fragment.is_empty() {
        return Vec::new();
    }
    fragment
        .split(SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .enumerate()
        .map(|(i, segment)| {
            if i == 0 {
                format!("#{}", segment)
            } else {
                segment.to_string()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_encode_strips_every_hash() {
        assert_eq!(encode(&list(&["#AABBCC", "#DDEEFF", "112233"])), "AABBCC-DDEEFF-112233");
    }

    #[test]
    fn test_only_first_entry_gets_hash_back() {
        assert_eq!(decode("AABBCC-DDEEFF-112233"), list(&["#AABBCC", "DDEEFF", "112233"]));
    }

    #[test]
    fn test_round_trip_keeps_mixed_form() {
        let colors = list(&["#AABBCC", "DDEEFF"]);
        assert_eq!(decode(&encode(&colors)), colors);
    }

    #[test]
    fn test_empty_fragment() {
        assert!(decode("").is_empty());
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn test_empty_segments_are_dropped() {
        assert_eq!(decode("AA11BB--CC22DD-"), list(&["#AA11BB", "CC22DD"]));
        assert_eq!(decode("-AA11BB"), list(&["#AA11BB"]));
    }
}
