use crate::game::catalog::Catalog;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// Deals out the shuffled left/right title pairs for one playthrough.
///
/// Construction flattens the whole catalog into a deduplicated pool, shuffles
/// it uniformly and pairs adjacent elements. A pool of odd length drops its
/// last title; it is never shown.
#[derive(Debug, Clone)]
pub struct PairSpawner {
    pairs: Vec<(String, String)>,
    cursor: usize,
}

fn dedup_pool(catalog: &Catalog) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut pool = Vec::new();
    for titles in catalog.values() {
        for title in titles {
            if seen.insert(title.as_str()) {
                pool.push(title.clone());
            }
        }
    }
    pool
}

impl PairSpawner {
    pub fn new<R: Rng + ?Sized>(catalog: &Catalog, rng: &mut R) -> Self {
        let mut pool = dedup_pool(catalog);
        pool.shuffle(rng);
        Self::from_pool(pool)
    }

    /// Builds the pair sequence from an already-ordered pool.
    pub fn from_pool(pool: Vec<String>) -> Self {
        let mut pairs = Vec::with_capacity(pool.len() / 2);
        let mut iter = pool.into_iter();
        while let (Some(left), Some(right)) = (iter.next(), iter.next()) {
            pairs.push((left, right));
        }
        Self { pairs, cursor: 0 }
    }

    /// The next pair in shuffled order, advancing the cursor.
    pub fn next(&mut self) -> Option<(String, String)> {
        let pair = self.pairs.get(self.cursor).cloned();
        if pair.is_some() {
            self.cursor += 1;
        }
        pair
    }

    pub fn remaining(&self) -> usize {
        self.pairs.len() - self.cursor
    }

    pub fn total(&self) -> usize {
        self.pairs.len()
    }

    /// Reshuffles from the catalog and rewinds the cursor; every playthrough
    /// sees a fresh random ordering.
    pub fn reset<R: Rng + ?Sized>(&mut self, catalog: &Catalog, rng: &mut R) {
        *self = Self::new(catalog, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::BTreeMap;

    fn catalog(groups: &[(&str, &[&str])]) -> Catalog {
        groups
            .iter()
            .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
            .collect::<BTreeMap<_, _>>()
    }

    #[test]
    fn yields_floor_half_pairs_without_repeats() {
        let cat = catalog(&[
            ("Action", &["A", "B", "C"][..]),
            ("Drama", &["D", "E", "F", "G"][..]),
        ]);
        let mut rng = StdRng::seed_from_u64(7);
        let mut spawner = PairSpawner::new(&cat, &mut rng);
        assert_eq!(spawner.total(), 3); // 7 titles -> 3 pairs, 1 dropped

        let mut seen = HashSet::new();
        while let Some((l, r)) = spawner.next() {
            assert!(seen.insert(l));
            assert!(seen.insert(r));
        }
        assert_eq!(seen.len(), 6);
        assert_eq!(spawner.remaining(), 0);
        assert!(spawner.next().is_none());
    }

    #[test]
    fn duplicate_titles_across_categories_appear_once() {
        let cat = catalog(&[
            ("Best", &["Parasite", "Up"][..]),
            ("Recent", &["Parasite", "Dune"][..]),
        ]);
        let mut rng = StdRng::seed_from_u64(1);
        let spawner = PairSpawner::new(&cat, &mut rng);
        // 3 unique titles -> 1 pair.
        assert_eq!(spawner.total(), 1);
    }

    #[test]
    fn pairs_follow_pool_order() {
        let pool = ["C", "A", "D", "B"].map(String::from).to_vec();
        let mut spawner = PairSpawner::from_pool(pool);
        assert_eq!(spawner.next(), Some(("C".into(), "A".into())));
        assert_eq!(spawner.next(), Some(("D".into(), "B".into())));
        assert_eq!(spawner.next(), None);
    }

    #[test]
    fn reset_rewinds_the_cursor() {
        let cat = catalog(&[("All", &["A", "B", "C", "D"][..])]);
        let mut rng = StdRng::seed_from_u64(3);
        let mut spawner = PairSpawner::new(&cat, &mut rng);
        spawner.next();
        spawner.next();
        assert_eq!(spawner.remaining(), 0);
        spawner.reset(&cat, &mut rng);
        assert_eq!(spawner.remaining(), 2);
    }
}
