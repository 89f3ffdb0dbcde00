//! The ordering rule shared by the canonical store and every room view.
//!
//! Entries sort by room name (byte-wise, case-sensitive, shorter prefix
//! first), then by reading kind code, then by ascending timestamp. Entries
//! that agree on all three are order-equivalent; insertion keeps them in
//! arrival order.

use std::cmp::Ordering;

use crate::reading::ReadingKind;

/// The sort key of an entry.
///
/// Field order matters: the derived `Ord` compares `room`, then `kind`, then
/// `timestamp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct OrderKey<'a> {
    /// Owning room name.
    pub room: &'a str,
    /// Reading kind.
    pub kind: ReadingKind,
    /// Reading timestamp.
    pub timestamp: i64,
}

/// Compares two entry keys.
///
/// A missing key (an entry whose room does not resolve) compares equal to
/// everything.
pub fn compare(a: Option<OrderKey<'_>>, b: Option<OrderKey<'_>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        _ => Ordering::Equal,
    }
}

/// Returns the index of the first handle whose key is strictly greater than
/// `candidate`, or `handles.len()` if there is none.
///
/// Order-equivalent entries therefore land after every existing equivalent.
pub(crate) fn insertion_index<'a, H, F>(handles: &[H], candidate: OrderKey<'_>, key_of: F) -> usize
where
    H: Copy,
    F: Fn(H) -> Option<OrderKey<'a>>,
{
    handles
        .iter()
        .position(|&h| compare(key_of(h), Some(candidate)) == Ordering::Greater)
        .unwrap_or(handles.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(room: &str, kind: ReadingKind, timestamp: i64) -> OrderKey<'_> {
        OrderKey {
            room,
            kind,
            timestamp,
        }
    }

    #[test]
    fn test_room_name_dominates() {
        let a = key("Alpha", ReadingKind::Motion, 999);
        let b = key("Beta", ReadingKind::Temperature, 0);
        assert_eq!(compare(Some(a), Some(b)), Ordering::Less);
    }

    #[test]
    fn test_kind_before_timestamp() {
        let temp = key("Kitchen", ReadingKind::Temperature, 100);
        let sound = key("Kitchen", ReadingKind::SoundLevel, 50);
        assert_eq!(compare(Some(temp), Some(sound)), Ordering::Less);
    }

    #[test]
    fn test_timestamp_ascending() {
        let early = key("Kitchen", ReadingKind::SoundLevel, -5);
        let late = key("Kitchen", ReadingKind::SoundLevel, 5);
        assert_eq!(compare(Some(late), Some(early)), Ordering::Greater);
        assert_eq!(compare(Some(early), Some(early)), Ordering::Equal);
    }

    #[test]
    fn test_prefix_and_case() {
        assert_eq!(
            compare(
                Some(key("Lab", ReadingKind::Temperature, 0)),
                Some(key("Lab2", ReadingKind::Temperature, 0))
            ),
            Ordering::Less
        );
        // Uppercase bytes sort before lowercase.
        assert_eq!(
            compare(
                Some(key("Zoo", ReadingKind::Temperature, 0)),
                Some(key("attic", ReadingKind::Temperature, 0))
            ),
            Ordering::Less
        );
    }

    #[test]
    fn test_missing_key_is_equivalent() {
        let a = key("Kitchen", ReadingKind::Motion, 1);
        assert_eq!(compare(None, Some(a)), Ordering::Equal);
        assert_eq!(compare(Some(a), None), Ordering::Equal);
        assert_eq!(compare(None, None), Ordering::Equal);
    }

    #[test]
    fn test_insertion_index_after_equals() {
        let keys = [
            key("A", ReadingKind::Temperature, 1),
            key("A", ReadingKind::Temperature, 2),
            key("A", ReadingKind::Temperature, 2),
            key("B", ReadingKind::Temperature, 0),
        ];
        let indices: Vec<usize> = (0..keys.len()).collect();
        let lookup = |i: usize| Some(keys[i]);

        assert_eq!(insertion_index(&indices, key("A", ReadingKind::Temperature, 2), lookup), 3);
        assert_eq!(insertion_index(&indices, key("A", ReadingKind::Temperature, 0), lookup), 0);
        assert_eq!(insertion_index(&indices, key("C", ReadingKind::Motion, 0), lookup), 4);
        let empty: [usize; 0] = [];
        assert_eq!(insertion_index(&empty, key("A", ReadingKind::Motion, 0), lookup), 0);
    }
}
