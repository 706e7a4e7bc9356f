//! Flags, flag classes, and the change operations that move between them.
//!
//! A flag is identified by its class (its position within one fundamental
//! domain) and the domain it lives in. Change operation `g` flips a flag
//! across mirror `g`, which may change its class and move it to a
//! neighboring domain.

use std::cmp::Ordering;
use std::fmt;

use polyflag_util::IndexOverflow;
use polyflag_util::ti::{TiVec, TypedIndex};

use crate::construct::{ConstructionError, ConstructionResult};
use crate::group::{GenSeq, GeneratorId, Group, GroupResult, PerGenerator};

polyflag_util::typed_index_struct! {
    /// ID of a flag class.
    pub struct FlagClassId(pub u16);
    /// ID of an enumerated domain, in enumeration order.
    pub struct DomainId(pub u32);
}

/// List containing a value per flag class.
pub type PerFlagClass<T> = TiVec<FlagClassId, T>;
/// List containing a value per domain.
pub type PerDomain<T> = TiVec<DomainId, T>;

/// Effect of a change operation on a flag of one class.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct ElementChange {
    /// Class of the resulting flag.
    pub new_class: FlagClassId,
    /// Generators to right-multiply the domain by, in order.
    pub generators: GenSeq,
}

impl ElementChange {
    /// Constructs an element change.
    pub fn new(new_class: u16, generators: impl IntoIterator<Item = u8>) -> Self {
        Self {
            new_class: FlagClassId(new_class),
            generators: generators.into_iter().map(GeneratorId).collect(),
        }
    }

    /// Right-multiplies `domain` by each generator in the sequence.
    pub fn apply<G: Group>(&self, group: &G, domain: &G::Element) -> GroupResult<G::Element> {
        let mut ret = domain.clone();
        for g in self.generators.iter() {
            ret = group.compose(&ret, group.generator(g)?)?;
        }
        Ok(ret)
    }
}

/// Error in a flag class table.
#[allow(missing_docs)]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FlagError {
    #[error("overflow ({0})")]
    Overflow(#[from] IndexOverflow),
    #[error("flag class table has no flag classes")]
    NoFlagClasses,
    #[error("expected {expected} change operations; got {actual}")]
    WrongRowCount { expected: usize, actual: usize },
    #[error("change operation {change} has {actual} entries but there are {expected} flag classes")]
    WrongEntryCount {
        change: GeneratorId,
        expected: usize,
        actual: usize,
    },
    #[error("change operation {change} maps class {class} to nonexistent class {new_class}")]
    ClassOutOfRange {
        change: GeneratorId,
        class: FlagClassId,
        new_class: FlagClassId,
    },
    #[error("change operation {change} on class {class} references nonexistent generator {generator}")]
    GeneratorOutOfRange {
        change: GeneratorId,
        class: FlagClassId,
        generator: GeneratorId,
    },
    #[error("change operation {change} maps class {class} to {image}, which maps back to {back}")]
    NotInvolution {
        change: GeneratorId,
        class: FlagClassId,
        image: FlagClassId,
        back: FlagClassId,
    },
}

/// Table of element changes, indexed by change operation and then by flag
/// class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagClasses {
    table: PerGenerator<PerFlagClass<ElementChange>>,
    class_count: usize,
}

impl FlagClasses {
    /// Constructs and validates a flag class table for a group with
    /// `generator_count` generators. There is one row per change operation
    /// and one entry per flag class in each row.
    pub fn new(table: Vec<Vec<ElementChange>>, generator_count: usize) -> Result<Self, FlagError> {
        let class_count = table.first().map_or(0, |row| row.len());
        if class_count == 0 {
            return Err(FlagError::NoFlagClasses);
        }
        FlagClassId::try_from_index(class_count - 1)?;

        let table: PerGenerator<PerFlagClass<ElementChange>> = table
            .into_iter()
            .map(PerFlagClass::try_from)
            .collect::<Result<Vec<_>, _>>()?
            .try_into()?;

        for (change, row) in &table {
            if row.len() != class_count {
                return Err(FlagError::WrongEntryCount {
                    change,
                    expected: class_count,
                    actual: row.len(),
                });
            }
            for (class, element_change) in row {
                if element_change.new_class.to_index() >= class_count {
                    return Err(FlagError::ClassOutOfRange {
                        change,
                        class,
                        new_class: element_change.new_class,
                    });
                }
            }
            for (class, element_change) in row {
                let image = element_change.new_class;
                let back = row[image].new_class;
                if back != class {
                    return Err(FlagError::NotInvolution {
                        change,
                        class,
                        image,
                        back,
                    });
                }
            }
        }

        let ret = Self { table, class_count };
        ret.check_generators(generator_count)?;
        Ok(ret)
    }

    /// Checks that every generator referenced by an element change is less
    /// than `generator_count`.
    pub fn check_generators(&self, generator_count: usize) -> Result<(), FlagError> {
        for (change, row) in &self.table {
            for (class, element_change) in row {
                if let Some(generator) = element_change
                    .generators
                    .iter()
                    .find(|g| g.to_index() >= generator_count)
                {
                    return Err(FlagError::GeneratorOutOfRange {
                        change,
                        class,
                        generator,
                    });
                }
            }
        }
        Ok(())
    }

    /// Returns the number of change operations, which is the number of
    /// dimensions of the polytope.
    pub fn change_count(&self) -> usize {
        self.table.len()
    }
    /// Returns the number of flag classes.
    pub fn class_count(&self) -> usize {
        self.class_count
    }
    /// Returns the element change for applying change operation `change` to a
    /// flag of class `class`.
    pub fn get(&self, change: GeneratorId, class: FlagClassId) -> &ElementChange {
        &self.table[change][class]
    }
}

/// Flag in an enumerated set of domains.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Flag {
    /// Flag class.
    pub class: FlagClassId,
    /// Domain containing the flag.
    pub domain: DomainId,
}
impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(class {}, domain {})", self.class, self.domain)
    }
}

/// Lookup from group elements to the IDs of enumerated domains, by binary
/// search over the domains sorted by [`Group::compare()`].
#[derive(Debug)]
pub struct DomainIndex<'a, G: Group> {
    group: &'a G,
    domains: &'a [G::Element],
    sorted: Vec<DomainId>,
}

impl<'a, G: Group> DomainIndex<'a, G> {
    /// Sorts a list of distinct domains.
    pub fn new(group: &'a G, domains: &'a [G::Element]) -> Result<Self, IndexOverflow> {
        let mut sorted: Vec<DomainId> = DomainId::iter(domains.len()).collect();
        if sorted.len() < domains.len() {
            return Err(IndexOverflow::new::<DomainId>());
        }
        sorted.sort_by(|&a, &b| group.compare(&domains[a.to_index()], &domains[b.to_index()]));
        debug_assert!(
            sorted.windows(2).all(|w| {
                let (a, b) = (&domains[w[0].to_index()], &domains[w[1].to_index()]);
                group.compare(a, b) == Ordering::Less && group.compare(b, a) == Ordering::Greater
            }),
            "group order is not a strict total order on the enumerated domains",
        );
        Ok(Self {
            group,
            domains,
            sorted,
        })
    }

    /// Returns the ID of the domain equal to `elem`, or `None` if it was not
    /// enumerated.
    pub fn get(&self, elem: &G::Element) -> Option<DomainId> {
        let i = self
            .sorted
            .binary_search_by(|&id| self.group.compare(&self.domains[id.to_index()], elem))
            .ok()?;
        Some(self.sorted[i])
    }

    /// Returns the position of each domain in sorted order.
    pub fn ranks(&self) -> PerDomain<u32> {
        let mut ranks = vec![0; self.domains.len()];
        for (rank, id) in self.sorted.iter().enumerate() {
            ranks[id.to_index()] = rank as u32;
        }
        ranks.into_iter().collect()
    }
}

/// Graph of all flags in a set of enumerated domains, with an edge for each
/// change operation.
///
/// Flags are numbered domain-major, class-minor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagGraph {
    class_count: usize,
    domain_count: usize,
    /// Position of each domain in the group's total order.
    domain_ranks: PerDomain<u32>,
    /// Image of each flag under each change operation, or `None` if the image
    /// lies outside the enumerated domains.
    moves: PerGenerator<Vec<Option<Flag>>>,
}

impl FlagGraph {
    /// Computes every change operation on every flag.
    ///
    /// Returns an error naming the flag and change operation if a group
    /// operation fails.
    pub fn new<G: Group>(
        group: &G,
        domains: &[G::Element],
        flag_classes: &FlagClasses,
    ) -> ConstructionResult<Self> {
        let index = DomainIndex::new(group, domains)?;
        let class_count = flag_classes.class_count();

        let mut moves = PerGenerator::new();
        for change in GeneratorId::iter(flag_classes.change_count()) {
            let mut row = Vec::with_capacity(domains.len() * class_count);
            for (domain_id, domain) in DomainId::iter(domains.len()).zip(domains) {
                for class in FlagClassId::iter(class_count) {
                    let element_change = flag_classes.get(change, class);
                    let new_domain = element_change.apply(group, domain).map_err(|source| {
                        ConstructionError::ChangeFailed {
                            change,
                            flag: Flag {
                                class,
                                domain: domain_id,
                            },
                            source,
                        }
                    })?;
                    row.push(index.get(&new_domain).map(|domain| Flag {
                        class: element_change.new_class,
                        domain,
                    }));
                }
            }
            moves.push(row)?;
        }

        Ok(Self {
            class_count,
            domain_count: domains.len(),
            domain_ranks: index.ranks(),
            moves,
        })
    }

    /// Returns the number of flag classes.
    pub fn class_count(&self) -> usize {
        self.class_count
    }
    /// Returns the number of domains.
    pub fn domain_count(&self) -> usize {
        self.domain_count
    }
    /// Returns the number of flags.
    pub fn flag_count(&self) -> usize {
        self.class_count * self.domain_count
    }
    /// Returns the number of change operations.
    pub fn change_count(&self) -> usize {
        self.moves.len()
    }

    /// Returns the position of a flag in enumeration order.
    pub fn index_of(&self, flag: Flag) -> usize {
        flag.domain.to_index() * self.class_count + flag.class.to_index()
    }
    /// Returns the flag at a position in enumeration order.
    pub fn flag_at(&self, index: usize) -> Flag {
        Flag {
            class: FlagClassId((index % self.class_count) as u16),
            domain: DomainId((index / self.class_count) as u32),
        }
    }
    /// Returns an iterator over all flags in enumeration order (domain-major,
    /// class-minor).
    pub fn flags(&self) -> impl '_ + Iterator<Item = Flag> {
        (0..self.flag_count()).map(|i| self.flag_at(i))
    }

    /// Applies change operation `change` to a flag. Returns `None` if the
    /// result lies outside the enumerated domains.
    pub fn move_flag(&self, flag: Flag, change: GeneratorId) -> Option<Flag> {
        self.moves[change][self.index_of(flag)]
    }

    /// Compares flags by class, then by domain in the group's order.
    ///
    /// Domain ranks are distinct, so this is a total order.
    pub fn compare_flags(&self, a: Flag, b: Flag) -> Ordering {
        a.class.cmp(&b.class).then_with(|| {
            self.domain_ranks[a.domain].cmp(&self.domain_ranks[b.domain])
        })
    }

    /// Returns a flag, change operation, and image for which applying the
    /// change operation twice does not return to the original flag. Flags
    /// whose images leave the enumerated domains are skipped.
    pub fn find_non_involution(&self) -> Option<(GeneratorId, Flag, Flag)> {
        self.moves.iter_keys().find_map(|change| {
            self.flags().find_map(|flag| {
                let image = self.move_flag(flag, change)?;
                let back = self.move_flag(image, change)?;
                (back != flag).then_some((change, flag, image))
            })
        })
    }

    /// Returns the flags that change operation `change` moves outside the
    /// enumerated domains.
    pub fn escaping_flags(&self, change: GeneratorId) -> impl '_ + Iterator<Item = Flag> {
        self.flags()
            .filter(move |&flag| self.move_flag(flag, change).is_none())
    }
}
