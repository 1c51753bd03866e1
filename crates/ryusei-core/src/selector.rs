//! Random word selection with first-kana exclusion.
//!
//! At most one live enemy per first kana may exist, and two live enemies may
//! not share a possible first keystroke. Selecting a word restricts its first
//! kana plus every kana whose first keys overlap with it; `release` lifts one
//! such restriction. Restrictions are reference counted because overlap
//! groups intersect: a kana stays excluded until every restriction that
//! covers it has been released.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, warn};

use crate::vocab::{Vocabulary, WordId};

pub struct WordSelector {
    /// First kana -> words starting with it.
    groups: BTreeMap<char, Vec<WordId>>,
    /// First kana -> other first kana sharing at least one first key.
    incompatible: BTreeMap<char, Vec<char>>,
    /// Kana available for the next pick, in re-admission order.
    selectable: Vec<char>,
    /// Outstanding restrictions per excluded kana. Absent means selectable.
    restrictions: HashMap<char, u32>,
    rng: StdRng,
}

impl WordSelector {
    pub fn new(vocab: &Vocabulary, seed: u64) -> Self {
        let groups = vocab.by_first_kana();

        let first_keys: BTreeMap<char, BTreeSet<char>> = groups
            .iter()
            .map(|(&kana, ids)| {
                let keys = ids
                    .iter()
                    .flat_map(|&id| vocab.entry(id).graph.first_keys())
                    .collect();
                (kana, keys)
            })
            .collect();

        let incompatible = first_keys
            .iter()
            .map(|(&kana, keys)| {
                let others = first_keys
                    .iter()
                    .filter(|&(&other, other_keys)| {
                        other != kana && !keys.is_disjoint(other_keys)
                    })
                    .map(|(&other, _)| other)
                    .collect();
                (kana, others)
            })
            .collect();

        Self {
            selectable: groups.keys().copied().collect(),
            groups,
            incompatible,
            restrictions: HashMap::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick a random selectable first kana, then a random word for it.
    ///
    /// The pick restricts the kana and its incompatible partners. Returns
    /// `None` when every first kana is excluded.
    pub fn select_next(&mut self) -> Option<WordId> {
        let kana = *self.selectable.choose(&mut self.rng)?;
        let id = *self.groups.get(&kana)?.choose(&mut self.rng)?;

        self.restrict(kana);
        for other in self.partners(kana) {
            self.restrict(other);
        }
        debug!(%kana, id, selectable = self.selectable.len(), "selected word");
        Some(id)
    }

    /// Undo the restriction placed by one `select_next` that picked `kana`.
    pub fn release(&mut self, kana: char) {
        self.lift(kana);
        for other in self.partners(kana) {
            self.lift(other);
        }
    }

    pub fn is_selectable(&self, kana: char) -> bool {
        self.groups.contains_key(&kana) && !self.restrictions.contains_key(&kana)
    }

    pub fn restriction_count(&self, kana: char) -> u32 {
        self.restrictions.get(&kana).copied().unwrap_or(0)
    }

    pub fn selectable(&self) -> &[char] {
        &self.selectable
    }

    /// Other first kana that may not be live together with `kana`.
    pub fn incompatible_with(&self, kana: char) -> &[char] {
        self.incompatible.get(&kana).map(Vec::as_slice).unwrap_or(&[])
    }

    fn partners(&self, kana: char) -> Vec<char> {
        self.incompatible_with(kana).to_vec()
    }

    fn restrict(&mut self, kana: char) {
        let count = self.restrictions.entry(kana).or_insert(0);
        if *count == 0 {
            self.selectable.retain(|&k| k != kana);
        }
        *count += 1;
    }

    fn lift(&mut self, kana: char) {
        let Some(count) = self.restrictions.get_mut(&kana) else {
            warn!(%kana, "release without a matching restriction");
            return;
        };
        *count -= 1;
        if *count == 0 {
            self.restrictions.remove(&kana);
            self.selectable.push(kana);
        }
    }
}
