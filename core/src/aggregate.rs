// core/src/aggregate.rs
//
// Merge of per-file counts into the global mapping, and the final ranking.
//
// Merging is exact integer addition, so the order in which file results
// arrive never changes the totals.

use ahash::AHashMap;

/// Bigram key -> accumulated frequency.
pub type CountMap = AHashMap<String, u64>;

/// Add every entry of `partial` into `global`.
pub fn merge(global: &mut CountMap, partial: CountMap) {
    if global.is_empty() {
        *global = partial;
        return;
    }
    global.reserve(partial.len());
    for (key, count) in partial {
        let entry = global.entry(key).or_insert(0);
        *entry = entry.saturating_add(count);
    }
}

/// Rank a mapping: frequency descending, key ascending among equal counts.
pub fn finalize(global: &CountMap) -> Vec<(String, u64)> {
    let mut ranked: Vec<(String, u64)> = global.iter().map(|(k, &v)| (k.clone(), v)).collect();
    sort_ranked(&mut ranked);
    ranked
}

pub(crate) fn sort_ranked(ranked: &mut [(String, u64)]) {
    ranked.sort_unstable_by(|(k_a, f_a), (k_b, f_b)| f_b.cmp(f_a).then_with(|| k_a.cmp(k_b)));
}

/// Owner of the global count mapping during a run.
///
/// Lives on the driver thread only; workers hand over their partial maps by
/// value and never see this.
#[derive(Debug, Default)]
pub struct Aggregator {
    global: CountMap,
    merged_files: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, partial: CountMap) {
        merge(&mut self.global, partial);
        self.merged_files += 1;
    }

    /// Number of partial maps merged so far.
    pub fn merged_files(&self) -> usize {
        self.merged_files
    }

    /// Distinct bigram keys seen so far.
    pub fn unique_bigrams(&self) -> usize {
        self.global.len()
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.global.get(key).copied()
    }

    /// Consume the accumulator and produce the ranked result.
    pub fn finalize(self) -> Vec<(String, u64)> {
        let mut ranked: Vec<(String, u64)> = self.global.into_iter().collect();
        sort_ranked(&mut ranked);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, u64)]) -> CountMap {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn merge_adds_overlapping_keys() {
        let mut global = map(&[("cat|dog", 5)]);
        merge(&mut global, map(&[("cat|dog", 4), ("cat|fish", 10)]));
        assert_eq!(global, map(&[("cat|dog", 9), ("cat|fish", 10)]));
    }

    #[test]
    fn merge_is_commutative() {
        let a = map(&[("a|b", 3), ("b|c", 7), ("x|y", 1)]);
        let b = map(&[("a|b", 11), ("q|r", 4)]);

        let mut ab = CountMap::new();
        merge(&mut ab, a.clone());
        merge(&mut ab, b.clone());

        let mut ba = CountMap::new();
        merge(&mut ba, b);
        merge(&mut ba, a);

        assert_eq!(ab, ba);
        assert_eq!(ab.get("a|b"), Some(&14));
    }

    #[test]
    fn merge_saturates_instead_of_overflowing() {
        let mut global = map(&[("a|b", u64::MAX - 1)]);
        merge(&mut global, map(&[("a|b", 5)]));
        assert_eq!(global.get("a|b"), Some(&u64::MAX));
    }

    #[test]
    fn finalize_orders_by_count_then_key() {
        let global = map(&[("b|x", 5), ("a|x", 5), ("c|x", 9), ("d|x", 1)]);
        let ranked = finalize(&global);
        let keys: Vec<&str> = ranked.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["c|x", "a|x", "b|x", "d|x"]);
    }

    #[test]
    fn finalize_is_idempotent() {
        let global = map(&[("b|x", 5), ("a|x", 5), ("c|x", 9)]);
        assert_eq!(finalize(&global), finalize(&global));
    }

    #[test]
    fn aggregator_tracks_files_and_pairs() {
        let mut agg = Aggregator::new();
        agg.merge(map(&[("cat|dog", 5)]));
        agg.merge(map(&[("cat|dog", 4), ("cat|fish", 10)]));

        assert_eq!(agg.merged_files(), 2);
        assert_eq!(agg.unique_bigrams(), 2);
        assert_eq!(agg.get("cat|dog"), Some(9));
        assert_eq!(
            agg.finalize(),
            vec![("cat|fish".to_string(), 10), ("cat|dog".to_string(), 9)]
        );
    }
}
