//! Bounded-length string comparison used by the string-keyed collections.
//!
//! Only the first `max_len` bytes of each key take part in the comparison, so
//! two keys sharing that prefix are considered the same key.

use std::cmp::Ordering;

/// Number of bytes compared by default.
pub const MAX_KEY_LEN: usize = 32;

/// Lexicographic comparison of at most the first `max_len` bytes of `a` and
/// `b`.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use skipindex::key::bounded_cmp;
///
/// assert_eq!(bounded_cmp("apple", "banana", 32), Ordering::Less);
/// assert_eq!(bounded_cmp("prefix-a", "prefix-b", 6), Ordering::Equal);
/// ```
#[inline]
#[must_use]
pub fn bounded_cmp(a: &str, b: &str, max_len: usize) -> Ordering {
    let a = a.as_bytes();
    let b = b.as_bytes();
    a[..a.len().min(max_len)].cmp(&b[..b.len().min(max_len)])
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::{MAX_KEY_LEN, bounded_cmp};

    #[rstest]
    #[case("a", "b", Ordering::Less)]
    #[case("b", "a", Ordering::Greater)]
    #[case("abc", "abc", Ordering::Equal)]
    #[case("ab", "abc", Ordering::Less)]
    #[case("", "a", Ordering::Less)]
    #[case("aaa", "ddd", Ordering::Less)]
    fn ordering(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        assert_eq!(bounded_cmp(a, b, MAX_KEY_LEN), expected);
    }

    #[test]
    fn bounded() {
        let long_a = format!("{}a", "x".repeat(MAX_KEY_LEN));
        let long_b = format!("{}b", "x".repeat(MAX_KEY_LEN));
        assert_eq!(bounded_cmp(&long_a, &long_b, MAX_KEY_LEN), Ordering::Equal);
        assert_eq!(
            bounded_cmp(&long_a, &long_b, MAX_KEY_LEN + 1),
            Ordering::Less
        );
        assert_eq!(bounded_cmp("anything", "else", 0), Ordering::Equal);
    }
}
