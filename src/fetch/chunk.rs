use log::debug;

use crate::error::Result;
use crate::fetch::MAX_BATCH_SIZE;

/// Fetch `total_count` records ending `offset` positions before the most
/// recent one, splitting the work into batches the source's per-request cap
/// allows and reassembling them oldest-first.
///
/// The primitive is called as `fetch(offset, count)` and must return records
/// oldest-first within each batch. Batches are requested newest-first (each
/// call steps another `MAX_BATCH_SIZE` back in time), so the walk is strictly
/// sequential. An empty batch means the source has no history left beyond
/// what was already gathered; the walk stops there and returns what it has.
///
/// Errors from the primitive propagate unchanged. No retry is attempted.
pub fn fetch_all<T, F>(total_count: u64, offset: u64, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(u64, u64) -> Result<Vec<T>>,
{
    if total_count <= MAX_BATCH_SIZE {
        return fetch(offset, total_count);
    }

    let mut batches: Vec<Vec<T>> = Vec::new();
    let mut remaining = total_count;
    let mut cursor = offset;

    while remaining > MAX_BATCH_SIZE {
        let batch = fetch(cursor, MAX_BATCH_SIZE)?;
        if batch.is_empty() {
            debug!("bar source exhausted at offset {cursor}, stopping early");
            remaining = 0;
            break;
        }

        debug!("fetched {} records at offset {cursor}", batch.len());
        batches.push(batch);
        remaining -= MAX_BATCH_SIZE;
        cursor += MAX_BATCH_SIZE;
    }

    if remaining > 0 {
        batches.push(fetch(cursor, remaining)?);
    }

    // Fetch order is newest-first; flattening in reverse restores
    // chronological order without repeated front insertion.
    let total: usize = batches.iter().map(Vec::len).sum();
    let mut records = Vec::with_capacity(total);
    for batch in batches.into_iter().rev() {
        records.extend(batch);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// Fake source holding `depth` records, identified by their age: 0 is the
    /// most recent record, larger is older. Batches come back oldest-first.
    fn scripted_source(depth: u64, calls: &mut Vec<(u64, u64)>) -> impl FnMut(u64, u64) -> Result<Vec<u64>> + '_ {
        move |offset, count| {
            calls.push((offset, count));
            let available = depth.saturating_sub(offset);
            let taken = count.min(available);
            Ok((offset..offset + taken).rev().collect())
        }
    }

    #[test]
    fn small_requests_issue_exactly_one_call() {
        let mut calls = Vec::new();
        let records = fetch_all(700, 25, scripted_source(10_000, &mut calls)).unwrap();
        assert_eq!(records.len(), 700);
        assert_eq!(calls, vec![(25, 700)]);
    }

    #[test]
    fn zero_count_still_reaches_the_source_once() {
        let mut calls = Vec::new();
        let records = fetch_all(0, 0, scripted_source(10_000, &mut calls)).unwrap();
        assert!(records.is_empty());
        assert_eq!(calls, vec![(0, 0)]);
    }

    #[test]
    fn fifteen_hundred_records_take_three_calls() {
        init_logging();
        let mut calls = Vec::new();
        let records = fetch_all(1500, 0, scripted_source(10_000, &mut calls)).unwrap();

        assert_eq!(calls, vec![(0, 700), (700, 700), (1400, 100)]);
        assert_eq!(records.len(), 1500);

        // Oldest-first across batch boundaries: ages descend monotonically.
        assert_eq!(records[0], 1499);
        assert_eq!(*records.last().unwrap(), 0);
        assert!(records.windows(2).all(|pair| pair[0] == pair[1] + 1));
    }

    #[test]
    fn exact_cap_multiple_takes_two_calls() {
        let mut calls = Vec::new();
        let records = fetch_all(1400, 0, scripted_source(10_000, &mut calls)).unwrap();
        assert_eq!(calls, vec![(0, 700), (700, 700)]);
        assert_eq!(records.len(), 1400);
    }

    #[test]
    fn exhausted_source_terminates_with_partial_history() {
        init_logging();
        let mut calls = Vec::new();
        let records = fetch_all(2500, 0, scripted_source(900, &mut calls)).unwrap();

        // Third call lands past the end of history and comes back empty; the
        // remainder call is skipped.
        assert_eq!(calls, vec![(0, 700), (700, 700), (1400, 700)]);
        assert_eq!(records.len(), 900);
        assert_eq!(records[0], 899);
        assert_eq!(*records.last().unwrap(), 0);
    }

    #[test]
    fn empty_source_never_loops() {
        let mut calls = Vec::new();
        let records = fetch_all(1_000_000, 0, scripted_source(0, &mut calls)).unwrap();
        assert!(records.is_empty());
        assert_eq!(calls.len(), 1);
    }

    #[test]
    fn primitive_errors_propagate_unchanged() {
        let mut calls = 0u32;
        let result: Result<Vec<u64>> = fetch_all(1500, 0, |_, _| {
            calls += 1;
            if calls == 2 {
                Err(AppError::source_unavailable("connection reset"))
            } else {
                Ok(vec![0; 700])
            }
        });

        assert!(matches!(result, Err(AppError::SourceUnavailable(_))));
        assert_eq!(calls, 2);
    }
}
