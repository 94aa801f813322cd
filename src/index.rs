//! Interval indexing for fast overlap queries.
//!
//! Each chromosome keeps its intervals sorted by `(start, end)` together with
//! a running maximum of `end`. The running maximum is monotonic, so a binary
//! search finds the first interval that can still reach past the query start
//! even when long intervals enclose shorter ones; the scan then stops at the
//! first interval starting at or after the query end.

use crate::interval::Interval;
use log::debug;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// Sorted coordinate columns for one chromosome.
#[derive(Debug, Default)]
struct ChromIndex {
    starts: Vec<u64>,
    ends: Vec<u64>,
    /// `max_ends[i]` is the largest end among entries `0..=i`.
    max_ends: Vec<u64>,
    /// Position of each entry in the owning index's interval list.
    ids: Vec<usize>,
}

impl ChromIndex {
    fn from_sorted(entries: Vec<(u64, u64, usize)>) -> Self {
        let mut index = ChromIndex {
            starts: Vec::with_capacity(entries.len()),
            ends: Vec::with_capacity(entries.len()),
            max_ends: Vec::with_capacity(entries.len()),
            ids: Vec::with_capacity(entries.len()),
        };
        let mut max_end = 0;
        for (start, end, id) in entries {
            max_end = max_end.max(end);
            index.starts.push(start);
            index.ends.push(end);
            index.max_ends.push(max_end);
            index.ids.push(id);
        }
        index
    }

    /// Ids of entries with `entry.start < end && start < entry.end`, in sorted order.
    fn query(&self, start: u64, end: u64) -> impl Iterator<Item = usize> + '_ {
        let first = self.max_ends.partition_point(|&m| m <= start);
        (first..self.starts.len())
            .take_while(move |&i| self.starts[i] < end)
            .filter(move |&i| self.ends[i] > start)
            .map(move |i| self.ids[i])
    }
}

/// An indexed collection of intervals organized by chromosome.
#[derive(Debug, Default)]
pub struct OverlapIndex {
    by_chrom: FxHashMap<String, ChromIndex>,
    intervals: Vec<Interval>,
}

impl OverlapIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from a collection of intervals.
    ///
    /// Chromosome partitions are sorted in parallel. Ties on `(start, end)`
    /// keep input order, so query results are deterministic.
    pub fn from_intervals(intervals: Vec<Interval>) -> Self {
        let mut partitions: FxHashMap<String, Vec<(u64, u64, usize)>> = FxHashMap::default();
        for (idx, interval) in intervals.iter().enumerate() {
            partitions
                .entry(interval.chrom().to_string())
                .or_default()
                .push((interval.start(), interval.end(), idx));
        }

        let by_chrom: FxHashMap<String, ChromIndex> = partitions
            .into_par_iter()
            .map(|(chrom, mut entries)| {
                entries.sort_unstable();
                (chrom, ChromIndex::from_sorted(entries))
            })
            .collect();

        debug!(
            "built overlap index: {} intervals on {} chromosomes",
            intervals.len(),
            by_chrom.len()
        );

        Self {
            by_chrom,
            intervals,
        }
    }

    /// Indices of all intervals overlapping `[start, end)` on `chrom`.
    pub fn find_overlap_indices(&self, chrom: &str, start: u64, end: u64) -> Vec<usize> {
        match self.by_chrom.get(chrom) {
            Some(index) => index.query(start, end).collect(),
            None => Vec::new(),
        }
    }

    /// All intervals overlapping `[start, end)` on `chrom`.
    pub fn find_range(&self, chrom: &str, start: u64, end: u64) -> Vec<&Interval> {
        match self.by_chrom.get(chrom) {
            Some(index) => index.query(start, end).map(|i| &self.intervals[i]).collect(),
            None => Vec::new(),
        }
    }

    /// Find all intervals overlapping a query interval.
    pub fn find_overlaps(&self, query: &Interval) -> Vec<&Interval> {
        self.find_range(query.chrom(), query.start(), query.end())
    }

    /// Count overlapping intervals.
    pub fn count_overlaps(&self, query: &Interval) -> usize {
        match self.by_chrom.get(query.chrom()) {
            Some(index) => index.query(query.start(), query.end()).count(),
            None => 0,
        }
    }

    /// Check if any interval overlaps the query.
    pub fn has_overlap(&self, query: &Interval) -> bool {
        match self.by_chrom.get(query.chrom()) {
            Some(index) => index.query(query.start(), query.end()).next().is_some(),
            None => false,
        }
    }

    /// Get all chromosomes in the index.
    pub fn chromosomes(&self) -> impl Iterator<Item = &String> {
        self.by_chrom.keys()
    }

    /// Get all intervals, in the order they were indexed.
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Get an interval by index.
    pub fn get(&self, index: usize) -> Option<&Interval> {
        self.intervals.get(index)
    }

    /// Get the total number of intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_intervals() -> Vec<Interval> {
        vec![
            Interval::new("chr1", 100, 200),
            Interval::new("chr1", 150, 250),
            Interval::new("chr1", 300, 400),
            Interval::new("chr2", 100, 200),
        ]
    }

    #[test]
    fn test_build_index() {
        let index = OverlapIndex::from_intervals(sample_intervals());
        assert_eq!(index.len(), 4);
        assert_eq!(index.chromosomes().count(), 2);
    }

    #[test]
    fn test_find_overlaps() {
        let index = OverlapIndex::from_intervals(sample_intervals());

        let query = Interval::new("chr1", 175, 225);
        let overlaps = index.find_overlaps(&query);

        assert_eq!(overlaps.len(), 2);
        assert_eq!(overlaps[0].start(), 100);
        assert_eq!(overlaps[1].start(), 150);
    }

    #[test]
    fn test_adjacent_is_not_overlap() {
        let index = OverlapIndex::from_intervals(sample_intervals());
        assert_eq!(index.count_overlaps(&Interval::new("chr1", 250, 300)), 0);
        assert_eq!(index.count_overlaps(&Interval::new("chr1", 249, 301)), 2);
    }

    #[test]
    fn test_nested_intervals() {
        // A long interval sorted first must still be found after shorter
        // intervals that end before the query start.
        let index = OverlapIndex::from_intervals(vec![
            Interval::new("chr1", 0, 1000),
            Interval::new("chr1", 10, 20),
            Interval::new("chr1", 30, 40),
            Interval::new("chr1", 500, 600),
        ]);
        let hits = index.find_overlap_indices("chr1", 700, 800);
        assert_eq!(hits, vec![0]);
        let hits = index.find_overlap_indices("chr1", 35, 510);
        assert_eq!(hits, vec![0, 2, 3]);
    }

    #[test]
    fn test_zero_length() {
        let index = OverlapIndex::from_intervals(vec![
            Interval::new("chr1", 100, 100),
            Interval::new("chr1", 90, 110),
        ]);
        assert_eq!(index.find_overlap_indices("chr1", 99, 101), vec![1, 0]);
        assert_eq!(index.find_overlap_indices("chr1", 100, 100), vec![1]);
    }

    #[test]
    fn test_no_overlap() {
        let index = OverlapIndex::from_intervals(sample_intervals());

        let query = Interval::new("chr1", 500, 600);
        assert_eq!(index.count_overlaps(&query), 0);
        assert!(!index.has_overlap(&query));
    }

    #[test]
    fn test_different_chrom() {
        let index = OverlapIndex::from_intervals(sample_intervals());

        let query = Interval::new("chr3", 100, 200);
        assert_eq!(index.count_overlaps(&query), 0);
        assert!(index.find_overlaps(&query).is_empty());
    }

    #[test]
    fn test_empty_index() {
        let index = OverlapIndex::new();
        assert!(index.is_empty());
        assert!(index.get(0).is_none());
        assert!(!index.has_overlap(&Interval::new("chr1", 1, 2)));
    }
}
