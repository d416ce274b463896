//! Per-kind counters of what the reader did with each entity record

use crate::entities::EntityKind;
use ahash::AHashMap;

/// Where an entity record was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseContext {
    /// Inside a BLOCK definition
    Block,
    ModelSpace,
    PaperSpace,
}

/// What happened to an entity record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseOutcome {
    /// Decoded and kept
    Read,
    /// Dropped: paper space while ignoring it, or outside any open block
    Ignored,
    /// Kind not in the supported set
    Unsupported,
}

/// Observational counters; nothing in parsing or flattening reads them back.
#[derive(Debug, Clone, Default)]
pub struct ParseStatistics {
    totals: AHashMap<(ParseContext, ParseOutcome), usize>,
    by_kind: AHashMap<(ParseContext, ParseOutcome, EntityKind), usize>,
}

impl ParseStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one entity record
    pub fn record(&mut self, kind: EntityKind, context: ParseContext, outcome: ParseOutcome) {
        *self.totals.entry((context, outcome)).or_insert(0) += 1;
        *self.by_kind.entry((context, outcome, kind)).or_insert(0) += 1;
    }

    /// Number of records with this context and outcome
    pub fn total(&self, context: ParseContext, outcome: ParseOutcome) -> usize {
        self.totals.get(&(context, outcome)).copied().unwrap_or(0)
    }

    /// Number of records of `kind` with this context and outcome
    pub fn count_for_kind(
        &self,
        kind: EntityKind,
        context: ParseContext,
        outcome: ParseOutcome,
    ) -> usize {
        self.by_kind
            .get(&(context, outcome, kind))
            .copied()
            .unwrap_or(0)
    }

    /// Number of records with this outcome in any context
    pub fn total_for_outcome(&self, outcome: ParseOutcome) -> usize {
        self.totals
            .iter()
            .filter(|((_, o), _)| *o == outcome)
            .map(|(_, count)| *count)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn clear(&mut self) {
        self.totals.clear();
        self.by_kind.clear();
    }
}
