//! Date ordering over the transaction list.
//!
//! The list invariant is non-increasing by calendar date (newest first), with
//! a stable tie-break: a newly merged transaction goes in front of entries
//! that share its date. Insertion is a linear scan; at a page worth of items
//! (tens, not thousands) that is simpler than a binary search and fast
//! enough. Callers targeting large in-memory lists should switch to a
//! binary-search insertion point with the same tie-break.
//!
//! Dates are `DD/MM/YYYY` strings validated upstream by the form layer.
//! Malformed input here is a contract violation, not a runtime condition:
//! these functions panic rather than guess an order.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::domain::models::Transaction;

fn parse_display_date(date: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date, "%d/%m/%Y")
        .unwrap_or_else(|_| panic!("malformed transaction date: {date:?}"))
}

/// Comparator such that an ascending sort yields descending chronological
/// order (newest first).
pub fn compare_dates(a: &str, b: &str) -> Ordering {
    parse_display_date(b).cmp(&parse_display_date(a))
}

/// First index whose element is not newer than `candidate`; `len` when the
/// candidate is older than everything. Equal dates yield the index of the
/// first equal entry, so the candidate wins ties.
pub fn find_insert_position(sorted: &[Transaction], candidate: &Transaction) -> usize {
    for (i, existing) in sorted.iter().enumerate() {
        if compare_dates(&candidate.date, &existing.date) != Ordering::Greater {
            return i;
        }
    }
    sorted.len()
}

/// Splice `candidate` into its ordered position, returning a new list.
pub fn insert_in_order(list: &[Transaction], candidate: Transaction) -> Vec<Transaction> {
    let position = find_insert_position(list, &candidate);
    let mut result = Vec::with_capacity(list.len() + 1);
    result.extend_from_slice(&list[..position]);
    result.push(candidate);
    result.extend_from_slice(&list[position..]);
    result
}

/// Replace the element matching `updated.id`, then restore order with a full
/// stable sort. A date edit can move an item anywhere in the list, so a
/// local reposition is not enough.
pub fn update_and_reorder(list: &[Transaction], updated: Transaction) -> Vec<Transaction> {
    let mut result: Vec<Transaction> = list
        .iter()
        .map(|t| {
            if t.id == updated.id {
                updated.clone()
            } else {
                t.clone()
            }
        })
        .collect();
    result.sort_by(|a, b| compare_dates(&a.date, &b.date));
    result
}
