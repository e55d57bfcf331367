//! Order-index arithmetic for columns within a board and tasks within a column.
//!
//! Sibling `order` values always form the dense run `1..=N`. The repositories
//! keep that invariant with three moves, all inside one transaction:
//!
//! - append: the new row takes `max(order) + 1`
//! - insert at `p`: siblings with `order >= p` shift up by one
//! - remove at `k`: siblings with `order > k` shift down by one
//!
//! The functions here compute the positions; the SQL applies the shifts.

/// First position of any sequence.
pub const FIRST_ORDER: i32 = 1;

/// Order for a row appended after the current maximum.
///
/// `current_max` is `0` for an empty parent, so the first child gets `1`.
pub fn next_order(current_max: i32) -> i32 {
    current_max.max(0) + 1
}

/// Position at which a row is inserted among `sibling_count` existing rows.
///
/// `None` appends. Requested positions are clamped to `1..=sibling_count + 1`
/// so the sequence can never gain a gap.
pub fn insertion_position(requested: Option<i32>, sibling_count: i64) -> i32 {
    let last = i32::try_from(sibling_count)
        .unwrap_or(i32::MAX - 1)
        .saturating_add(1);
    match requested {
        Some(position) => position.clamp(FIRST_ORDER, last),
        None => last,
    }
}

/// Whether `orders` is exactly `1..=len` in some permutation.
pub fn is_dense<I>(orders: I) -> bool
where
    I: IntoIterator<Item = i32>,
{
    let mut sorted: Vec<i32> = orders.into_iter().collect();
    sorted.sort_unstable();
    sorted
        .iter()
        .zip(FIRST_ORDER..)
        .all(|(&actual, expected)| actual == expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_order_on_empty_parent_is_one() {
        assert_eq!(next_order(0), 1);
    }

    #[test]
    fn next_order_follows_maximum() {
        assert_eq!(next_order(3), 4);
    }

    #[test]
    fn next_order_ignores_negative_maximum() {
        assert_eq!(next_order(-5), 1);
    }

    #[test]
    fn insertion_without_request_appends() {
        assert_eq!(insertion_position(None, 3), 4);
        assert_eq!(insertion_position(None, 0), 1);
    }

    #[test]
    fn insertion_keeps_requested_position_in_range() {
        assert_eq!(insertion_position(Some(2), 3), 2);
        assert_eq!(insertion_position(Some(4), 3), 4);
    }

    #[test]
    fn insertion_clamps_out_of_range_requests() {
        assert_eq!(insertion_position(Some(0), 3), 1);
        assert_eq!(insertion_position(Some(-7), 3), 1);
        assert_eq!(insertion_position(Some(99), 3), 4);
    }

    #[test]
    fn dense_sequences() {
        assert!(is_dense(Vec::new()));
        assert!(is_dense(vec![1]));
        assert!(is_dense(vec![3, 1, 2]));
    }

    #[test]
    fn sparse_or_duplicated_sequences() {
        assert!(!is_dense(vec![2]));
        assert!(!is_dense(vec![1, 3]));
        assert!(!is_dense(vec![1, 1, 2]));
    }
}
