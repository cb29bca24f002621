//! In-memory repository of loaded sections
//!
//! A [`Grimoire`] is filled once by the loader and then only read. Every pick
//! comes in two flavours: one that takes the caller's RNG (seedable, used by
//! tests) and one that uses the calling thread's own generator, so concurrent
//! readers never share RNG state.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

use crate::moccolo::{Moccolo, Section};
use crate::{PrcdError, Result};

/// Mapping from section name to section
#[derive(Debug, Clone, Default)]
pub struct Grimoire {
    sections: HashMap<String, Section>,
}

#[allow(clippy::wrong_self_convention)]
impl Grimoire {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a section, replacing any section with the same name
    pub fn add_section(&mut self, section: Section) {
        self.sections.insert(section.name.clone(), section);
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Names of all sections, in no particular order
    pub fn section_names(&self) -> Vec<String> {
        self.sections.keys().cloned().collect()
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Number of moccoli across all sections
    pub fn total_entries(&self) -> usize {
        self.sections.values().map(Section::len).sum()
    }

    /// Pick a moccolo uniformly from the named section
    pub fn from_section(&self, name: &str) -> Result<Moccolo> {
        self.from_section_with(name, &mut rand::thread_rng())
    }

    pub fn from_section_with<R: Rng + ?Sized>(&self, name: &str, rng: &mut R) -> Result<Moccolo> {
        let section = self
            .sections
            .get(name)
            .ok_or_else(|| PrcdError::SectionNotFound(name.to_string()))?;

        section
            .entries
            .choose(rng)
            .cloned()
            .ok_or_else(|| PrcdError::EmptySection(name.to_string()))
    }

    /// Pick a section uniformly, then a moccolo from it
    ///
    /// Sections are equally likely regardless of their size. The returned
    /// moccolo carries the section name, which is also returned alongside.
    pub fn from_random_section(&self) -> Result<(Moccolo, String)> {
        self.from_random_section_with(&mut rand::thread_rng())
    }

    pub fn from_random_section_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<(Moccolo, String)> {
        // HashMap order is arbitrary; sort so a seeded rng gives repeatable picks
        let mut names: Vec<&String> = self.sections.keys().collect();
        names.sort_unstable();

        let name = names
            .choose(rng)
            .map(|name| name.to_string())
            .ok_or(PrcdError::EmptyGrimoire)?;

        let moccolo = self.from_section_with(&name, rng)?;
        Ok((moccolo.with_section(name.clone()), name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn section(name: &str, size: usize) -> Section {
        let entries = (0..size)
            .map(|i| Moccolo::new(format!("author{}", i), format!("{} #{}", name, i)))
            .collect();
        Section::new(name, entries)
    }

    #[test]
    fn test_add_and_has_section() {
        let mut grimoire = Grimoire::new();
        assert!(grimoire.is_empty());

        grimoire.add_section(section("love", 2));
        assert!(grimoire.has_section("love"));
        assert!(!grimoire.has_section("hate"));
        assert_eq!(grimoire.len(), 1);
        assert_eq!(grimoire.section_names(), vec!["love".to_string()]);
    }

    #[test]
    fn test_add_section_replaces_duplicate() {
        let mut grimoire = Grimoire::new();
        grimoire.add_section(section("love", 2));
        grimoire.add_section(section("love", 5));

        assert_eq!(grimoire.len(), 1);
        assert_eq!(grimoire.section("love").unwrap().len(), 5);
        assert_eq!(grimoire.total_entries(), 5);
    }

    #[test]
    fn test_keys_match_section_names() {
        let mut grimoire = Grimoire::new();
        for name in ["a", "b", "c"] {
            grimoire.add_section(section(name, 1));
        }
        for name in grimoire.section_names() {
            assert_eq!(grimoire.section(&name).unwrap().name, name);
        }
    }

    #[test]
    fn test_from_section_returns_member() {
        let mut grimoire = Grimoire::new();
        let love = section("love", 7);
        grimoire.add_section(love.clone());

        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let m = grimoire.from_section_with("love", &mut rng).unwrap();
            assert!(love.entries.contains(&m));
            assert!(m.section.is_none());
        }
    }

    #[test]
    fn test_from_section_is_uniform() {
        const N: usize = 5;
        const TRIALS: usize = 20_000;

        let mut grimoire = Grimoire::new();
        let love = section("love", N);
        grimoire.add_section(love.clone());

        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0usize; N];
        for _ in 0..TRIALS {
            let m = grimoire.from_section_with("love", &mut rng).unwrap();
            let idx = love.entries.iter().position(|e| *e == m).unwrap();
            counts[idx] += 1;
        }

        let expected = TRIALS as f64 / N as f64;
        for count in counts {
            let deviation = (count as f64 - expected).abs() / expected;
            assert!(deviation < 0.1, "count {} too far from {}", count, expected);
        }
    }

    #[test]
    fn test_from_section_missing() {
        let mut grimoire = Grimoire::new();
        grimoire.add_section(section("love", 3));

        for _ in 0..100 {
            let err = grimoire.from_section("hate").unwrap_err();
            assert!(matches!(err, PrcdError::SectionNotFound(ref n) if n == "hate"));
        }
    }

    #[test]
    fn test_from_section_empty() {
        let mut grimoire = Grimoire::new();
        grimoire.add_section(section("void", 0));

        let err = grimoire.from_section("void").unwrap_err();
        assert!(matches!(err, PrcdError::EmptySection(ref n) if n == "void"));
    }

    #[test]
    fn test_from_random_section_empty_grimoire() {
        let grimoire = Grimoire::new();
        let err = grimoire.from_random_section().unwrap_err();
        assert!(matches!(err, PrcdError::EmptyGrimoire));
    }

    #[test]
    fn test_from_random_section_tags_section() {
        let mut grimoire = Grimoire::new();
        grimoire.add_section(section("love", 3));
        grimoire.add_section(section("war", 3));

        let (m, name) = grimoire.from_random_section().unwrap();
        assert_eq!(m.section.as_deref(), Some(name.as_str()));
        assert!(m.text.starts_with(&name));
    }

    #[test]
    fn test_from_random_section_uniform_over_sections() {
        const TRIALS: usize = 20_000;

        let mut grimoire = Grimoire::new();
        grimoire.add_section(section("tiny", 1));
        grimoire.add_section(section("huge", 99));

        let mut rng = StdRng::seed_from_u64(7);
        let mut tiny = 0usize;
        for _ in 0..TRIALS {
            let (_, name) = grimoire.from_random_section_with(&mut rng).unwrap();
            if name == "tiny" {
                tiny += 1;
            }
        }

        // Weighted by entries this would be ~1%; uniform over sections is ~50%
        let share = tiny as f64 / TRIALS as f64;
        assert!((share - 0.5).abs() < 0.03, "tiny share was {}", share);
    }

    #[test]
    fn test_seeded_picks_repeat() {
        let mut grimoire = Grimoire::new();
        for name in ["a", "b", "c", "d"] {
            grimoire.add_section(section(name, 10));
        }

        let picks = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..20)
                .map(|_| grimoire.from_random_section_with(&mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(3), picks(3));
    }
}
