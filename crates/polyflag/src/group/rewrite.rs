use std::cmp::Ordering;

use itertools::Itertools;
use polyflag_util::ti::TypedIndex;

use super::{GenSeq, GeneratorId, Group, GroupError, GroupResult};

/// Maximum number of rewrite steps applied while normalizing a single word.
pub const REWRITE_STEP_LIMIT: usize = 10_000;

/// Element of a [`RewriteGroup`]: a sequence of generators.
pub type Word = GenSeq;

/// Rule that replaces one occurrence of `pattern` with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RewriteRule {
    /// Subword to search for.
    pub pattern: Word,
    /// Subword to replace it with.
    pub replacement: Word,
}

/// Group whose elements are words in its generators, kept in normal form by a
/// string-rewriting system.
///
/// The rewriting system is assumed to be confluent and terminating. If it
/// isn't, normalization gives up after [`REWRITE_STEP_LIMIT`] steps.
///
/// [`Group::invert()`] reverses words, which is only valid when every
/// generator is an involution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteGroup {
    /// Single-character name of each generator.
    names: Vec<char>,
    /// Rewrite rules, in priority order.
    rules: Vec<RewriteRule>,
    /// Each generator as a normalized one-letter word.
    generators: Vec<Word>,
}

impl RewriteGroup {
    /// Constructs a rewrite group from generator names (one character each)
    /// and an ordered list of `(pattern, replacement)` rules.
    pub fn new(names: &str, rules: &[(&str, &str)]) -> GroupResult<Self> {
        let names = names.chars().collect_vec();
        if let Some(&dup) = names.iter().duplicates().next() {
            return Err(GroupError::DuplicateGeneratorName(dup));
        }
        let generator_ids: Vec<GeneratorId> = (0..names.len())
            .map(GeneratorId::try_from_index)
            .try_collect()?;

        let mut ret = Self {
            names,
            rules: vec![],
            generators: vec![],
        };
        for (i, &(pattern, replacement)) in rules.iter().enumerate() {
            let pattern = ret.parse_word(pattern)?;
            if pattern.is_empty() {
                return Err(GroupError::EmptyRewritePattern(i));
            }
            let replacement = ret.parse_word(replacement)?;
            ret.rules.push(RewriteRule {
                pattern,
                replacement,
            });
        }
        ret.generators = generator_ids
            .into_iter()
            .map(|g| ret.normalize(GenSeq::new([g])))
            .try_collect()?;
        Ok(ret)
    }

    /// Constructs the dihedral group of order `2n` generated by two
    /// reflections `a` and `b` whose product has order `n`. If `n` is zero,
    /// constructs the infinite dihedral group.
    ///
    /// The rule set is complete for shortlex order with `a < b`.
    pub fn dihedral(n: usize) -> GroupResult<Self> {
        let alternating = |first: char, second: char| -> String {
            [first, second].into_iter().cycle().take(n).collect()
        };
        let from = alternating('b', 'a');
        let to = alternating('a', 'b');
        let mut rules = vec![("aa", ""), ("bb", "")];
        if n > 0 {
            rules.push((from.as_str(), to.as_str()));
        }
        Self::new("ab", &rules)
    }

    /// Returns the name of each generator.
    pub fn names(&self) -> &[char] {
        &self.names
    }
    /// Returns the rewrite rules.
    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    /// Parses a string of generator names into a word, without normalizing
    /// it.
    pub fn parse_word(&self, s: &str) -> GroupResult<Word> {
        s.chars()
            .map(|c| {
                let i = self
                    .names
                    .iter()
                    .position(|&name| name == c)
                    .ok_or(GroupError::UnknownGeneratorName(c))?;
                Ok(GeneratorId(i as u8))
            })
            .collect()
    }
    /// Parses a string of generator names and normalizes it.
    pub fn element(&self, s: &str) -> GroupResult<Word> {
        self.normalize(self.parse_word(s)?)
    }
    /// Formats a word as a string of generator names.
    pub fn word_to_string(&self, word: &Word) -> String {
        word.iter()
            .map(|g| self.names.get(g.0 as usize).copied().unwrap_or('?'))
            .collect()
    }

    /// Applies rewrite rules until none match. Each step applies the first
    /// rule that matches anywhere in the word, at its leftmost match.
    pub fn normalize(&self, mut word: Word) -> GroupResult<Word> {
        let mut steps = 0;
        while let Some((rule, start)) = self.first_match(&word) {
            if steps == REWRITE_STEP_LIMIT {
                return Err(GroupError::NonConvergentRewrite {
                    word: self.word_to_string(&word),
                    steps,
                });
            }
            steps += 1;

            let end = start + rule.pattern.len();
            word = word.0[..start]
                .iter()
                .chain(&rule.replacement.0)
                .chain(&word.0[end..])
                .copied()
                .collect();
        }
        Ok(word)
    }

    fn first_match(&self, word: &Word) -> Option<(&RewriteRule, usize)> {
        self.rules.iter().find_map(|rule| {
            let pattern = &rule.pattern.0[..];
            let start = word.0.windows(pattern.len()).position(|w| w == pattern)?;
            Some((rule, start))
        })
    }
}

impl Group for RewriteGroup {
    type Element = Word;

    fn generators(&self) -> &[Word] {
        &self.generators
    }

    fn identity(&self) -> Word {
        Word::INIT
    }

    fn compose(&self, a: &Word, b: &Word) -> GroupResult<Word> {
        self.normalize(a.iter().chain(b.iter()).collect())
    }

    fn invert(&self, a: &Word) -> GroupResult<Word> {
        self.normalize(a.iter().rev().collect())
    }

    /// Shortlex order: shorter words first, then lexicographic by generator.
    fn compare(&self, a: &Word, b: &Word) -> Ordering {
        a.len().cmp(&b.len()).then_with(|| a.0.cmp(&b.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d4_presentation() -> RewriteGroup {
        RewriteGroup::new("ab", &[("aa", ""), ("bb", ""), ("abab", "baba")]).unwrap()
    }

    #[test]
    fn test_compose_normalizes() {
        let g = d4_presentation();
        let ab = g.parse_word("ab").unwrap();
        let ba = g.parse_word("ba").unwrap();
        let composed = g.compose(&ab, &ba).unwrap();
        assert_eq!(g.word_to_string(&composed), "");
        assert!(g.rules().iter().all(|r| {
            composed.0.windows(r.pattern.len()).all(|w| w != &r.pattern.0[..])
        }));
    }

    #[test]
    fn test_invert_reverses() {
        let g = d4_presentation();
        let ab = g.parse_word("ab").unwrap();
        assert_eq!(g.word_to_string(&g.invert(&ab).unwrap()), "ba");
    }

    #[test]
    fn test_dihedral_rules() {
        let g = RewriteGroup::dihedral(3).unwrap();
        assert_eq!(g.rules().len(), 3);
        assert_eq!(g.word_to_string(&g.element("bab").unwrap()), "aba");
        assert_eq!(g.word_to_string(&g.element("abab").unwrap()), "ba");
        assert_eq!(g.element("ababab").unwrap(), Word::INIT);

        let infinite = RewriteGroup::dihedral(0).unwrap();
        assert_eq!(infinite.rules().len(), 2);
        assert!(infinite.enumerate_elements(50).unwrap().truncated);
    }

    #[test]
    fn test_shortlex_order() {
        let g = RewriteGroup::dihedral(4).unwrap();
        let w = |s| g.element(s).unwrap();
        assert_eq!(g.compare(&w(""), &w("a")), Ordering::Less);
        assert_eq!(g.compare(&w("b"), &w("ab")), Ordering::Less);
        assert_eq!(g.compare(&w("ab"), &w("ba")), Ordering::Less);
        assert_eq!(g.compare(&w("ba"), &w("ba")), Ordering::Equal);
    }

    #[test]
    fn test_bad_presentations() {
        assert_eq!(
            RewriteGroup::new("ab", &[("ac", "")]),
            Err(GroupError::UnknownGeneratorName('c')),
        );
        assert_eq!(
            RewriteGroup::new("aba", &[]),
            Err(GroupError::DuplicateGeneratorName('a')),
        );
        assert_eq!(
            RewriteGroup::new("ab", &[("aa", ""), ("", "b")]),
            Err(GroupError::EmptyRewritePattern(1)),
        );
    }

    #[test]
    fn test_non_convergent_rewrite() {
        let g = RewriteGroup::new("ab", &[("a", "aa")]).unwrap_err();
        assert!(matches!(g, GroupError::NonConvergentRewrite { .. }));

        let g = RewriteGroup::new("ab", &[("ab", "ba"), ("ba", "ab")]).unwrap();
        let err = g.element("ab").unwrap_err();
        assert_eq!(
            err,
            GroupError::NonConvergentRewrite {
                word: "ab".to_string(),
                steps: REWRITE_STEP_LIMIT,
            },
        );
    }
}
