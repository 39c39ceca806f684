//! Fuzzy line matching
//!
//! PDF text extraction and content-stream payloads rarely agree byte for
//! byte: hyphenation, font substitution artifacts, and escape sequences all
//! introduce small differences. Exact matching would miss slightly
//! re-encoded watermarks, so candidate lines are compared with an
//! edit-distance similarity ratio against a fixed threshold.

/// Default similarity threshold (0-100) for treating a payload as a
/// watermark match.
pub const DEFAULT_THRESHOLD: u32 = 80;

/// Compute a similarity ratio between two strings, scaled 0-100.
///
/// 100 means the strings are identical; 0 means maximally dissimilar for
/// their lengths. The ratio is derived from a weighted Levenshtein distance
/// where insertions and deletions cost 1 and substitutions cost 2:
///
/// ```text
/// ratio = round(100 * (len(a) + len(b) - distance) / (len(a) + len(b)))
/// ```
///
/// Two empty strings are identical by definition.
///
/// Inputs are treated as opaque text: no case folding, no whitespace
/// normalization. Escape sequences are compared literally as they appear in
/// the content stream.
pub fn similarity_ratio(a: &str, b: &str) -> u32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let len_sum = a.len() + b.len();
    if len_sum == 0 {
        return 100;
    }

    let distance = weighted_levenshtein(&a, &b);
    ((len_sum - distance) as f64 * 100.0 / len_sum as f64).round() as u32
}

/// Decide whether `payload` is close enough to `watermark` to be redacted.
pub fn matches(watermark: &str, payload: &str, threshold: u32) -> bool {
    similarity_ratio(watermark, payload) >= threshold
}

/// Levenshtein distance with substitution weighted 2, insert/delete 1.
///
/// Uses the two-row dynamic programming formulation; O(len(a) * len(b))
/// time, O(len(b)) space.
fn weighted_levenshtein(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr: Vec<usize> = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let sub_cost = if ca == cb { 0 } else { 2 };
            curr[j + 1] = (prev[j] + sub_cost)
                .min(prev[j + 1] + 1)
                .min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings_are_100() {
        assert_eq!(similarity_ratio("hello", "hello"), 100);
        assert_eq!(
            similarity_ratio(
                "Downloaded via University X on March 3, 2021",
                "Downloaded via University X on March 3, 2021"
            ),
            100
        );
    }

    #[test]
    fn test_both_empty_is_100() {
        assert_eq!(similarity_ratio("", ""), 100);
    }

    #[test]
    fn test_one_empty_is_0() {
        assert_eq!(similarity_ratio("watermark", ""), 0);
        assert_eq!(similarity_ratio("", "watermark"), 0);
    }

    #[test]
    fn test_disjoint_strings_are_0() {
        assert_eq!(similarity_ratio("abc", "xyz"), 0);
    }

    #[test]
    fn test_symmetry() {
        let a = "Downloaded via Institution on March";
        let b = "Downloaded via Institution on May";
        assert_eq!(similarity_ratio(a, b), similarity_ratio(b, a));
    }

    #[test]
    fn test_single_substitution() {
        // len_sum = 8, one substitution costs 2: round(100 * 6/8) = 75
        assert_eq!(similarity_ratio("abcd", "abXd"), 75);
    }

    #[test]
    fn test_single_deletion() {
        // len_sum = 9, one deletion costs 1: round(100 * 8/9) = 89
        assert_eq!(similarity_ratio("abcde", "abde"), 89);
    }

    #[test]
    fn test_near_match_clears_default_threshold() {
        // A trailing hyphenation artifact should not defeat the match
        let watermark = "Downloaded via University X on March 3, 2021";
        let payload = "Downloaded via University X on March 3, 2021-";
        assert!(matches(watermark, payload, DEFAULT_THRESHOLD));
    }

    #[test]
    fn test_unrelated_body_text_stays_below_threshold() {
        let watermark = "Downloaded via Institution on March";
        let payload = "International Conference on Acoustics, Speech and Signal";
        assert!(similarity_ratio(watermark, payload) < DEFAULT_THRESHOLD);
        assert!(!matches(watermark, payload, DEFAULT_THRESHOLD));
    }

    #[test]
    fn test_blanked_payload_no_longer_matches() {
        // After a redaction pass the payload is all spaces; a second pass
        // with the same watermark must not match it again.
        let watermark = "Downloaded via University X on March 3, 2021";
        let blanked = " ".repeat(watermark.len());
        assert!(!matches(watermark, &blanked, DEFAULT_THRESHOLD));
    }

    #[test]
    fn test_case_is_not_folded() {
        // 44 chars, all substituted at weight 2 would be ratio 0; here only
        // letters differ in case, but no folding happens so the ratio drops
        let ratio = similarity_ratio("WATERMARK", "watermark");
        assert!(ratio < 100);
    }

    #[test]
    fn test_deterministic() {
        let a = "See publisher site for sharing options";
        let b = "See publisher site for sharing optlons";
        assert_eq!(similarity_ratio(a, b), similarity_ratio(a, b));
    }
}
