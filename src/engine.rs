//! Depth-bounded exhaustive search over rearranged genomes.
//!
//! The engine owns the seen-fingerprint map and the emission sink, and
//! threads itself through the operators: every operator hands each derived
//! genome to [`SearchContext::step`] (or the fold-back variant), which
//! simplifies, fingerprints, deduplicates, emits, and recursively expands.
//! Each genome entering a step is consumed on exactly one path: emitted and
//! dropped when a not-worse derivation is already known, or emitted and
//! expanded otherwise.

use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::fingerprint::canonical_string;
use crate::genome::{EventKind, Genome};
use crate::operators;
use crate::record::{GenomeRecord, RecordSink};
use crate::simplify::simplify;

/// Process-wide search bounds, fixed at startup.
#[derive(Debug, Clone, Copy)]
pub struct SearchLimits {
    /// Maximum overall number of events per lineage.
    pub max_depth: u32,
    /// Maximum number of duplicative events per lineage.
    pub max_dup_depth: u32,
    /// Enumerate inverted duplications inside the expansion. Off by default:
    /// the operator is defined but excluded from the reference search.
    pub inverted_dups: bool,
}

impl SearchLimits {
    pub fn new(max_depth: u32, max_dup_depth: u32) -> Self {
        Self {
            max_depth,
            max_dup_depth,
            inverted_dups: false,
        }
    }

    /// Enable the inverted-duplication operator.
    pub fn with_inverted_dups(mut self, enabled: bool) -> Self {
        self.inverted_dups = enabled;
        self
    }
}

/// The search state threaded through the recursion: limits, the
/// fingerprint → best-known-derivation map, and the emission sink.
pub struct SearchContext<'a> {
    limits: SearchLimits,
    seen: FxHashMap<String, String>,
    sink: &'a mut dyn RecordSink,
    emitted: u64,
}

impl<'a> SearchContext<'a> {
    pub fn new(limits: SearchLimits, sink: &'a mut dyn RecordSink) -> Self {
        Self {
            limits,
            seen: FxHashMap::default(),
            sink,
            emitted: 0,
        }
    }

    /// Run the full enumeration from a root genome. The root itself is
    /// emitted and recorded before any expansion.
    pub fn run(&mut self, root: Genome) -> Result<()> {
        self.step(root)
    }

    /// Number of distinct fingerprints discovered so far.
    pub fn unique_genomes(&self) -> usize {
        self.seen.len()
    }

    /// Number of records emitted so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// General next-step handler: simplify, fingerprint, deduplicate, emit,
    /// and expand unless a not-worse derivation is already known.
    pub(crate) fn step(&mut self, mut genome: Genome) -> Result<()> {
        if self.admit(&mut genome)? {
            self.expand(genome)?;
        }
        Ok(())
    }

    /// Next-step handler for fold-back children: same dedup and emission,
    /// but expansion stays within the breakage-fusion-bridge operators.
    pub(crate) fn step_fold_back(&mut self, mut genome: Genome) -> Result<()> {
        if self.admit(&mut genome)? {
            self.expand_fold_back(&genome)?;
        }
        Ok(())
    }

    /// Shared dedup-and-emit logic. Returns whether the caller should expand
    /// the genome further.
    fn admit(&mut self, genome: &mut Genome) -> Result<bool> {
        simplify(genome);
        let fingerprint = canonical_string(genome);

        if let Some(previous) = self.seen.get(&fingerprint) {
            if overall_depth(previous) <= genome.depth()
                && dup_depth(previous) <= genome.dup_depth()
            {
                // The stored derivation is at least as short on both depth
                // measures; emit under its label and stop this lineage.
                let label = previous.clone();
                self.emit(genome, &label)?;
                return Ok(false);
            }
        }

        self.emit(genome, &fingerprint)?;
        self.seen.insert(fingerprint, detailed_history(genome));
        Ok(true)
    }

    fn emit(&mut self, genome: &Genome, label: &str) -> Result<()> {
        self.sink.record(&GenomeRecord::render(genome, label))?;
        self.emitted += 1;
        Ok(())
    }

    /// Apply every operator admissible under the depth budgets. The genome
    /// is consumed; enumeration order fixes the deterministic DFS pre-order
    /// of the output.
    fn expand(&mut self, genome: Genome) -> Result<()> {
        if genome.depth() < self.limits.max_depth {
            operators::deletions(self, &genome)?;
            operators::inversions(self, &genome)?;
            operators::telomere_breaks(self, &genome)?;
            operators::balanced_translocations(self, &genome)?;
            operators::unbalanced_translocations(self, &genome)?;
            if genome.chromosomes.len() > 1 {
                operators::chromosome_losses(self, &genome)?;
            }

            if genome.dup_depth() < self.limits.max_dup_depth {
                operators::tandem_dups(self, &genome)?;
                if self.limits.inverted_dups {
                    operators::inverted_dups(self, &genome)?;
                }
                operators::fold_backs(self, &genome)?;
                operators::chromosome_gains(self, &genome)?;
                if genome.wgd_depth() == 0 {
                    operators::genome_doublings(self, &genome)?;
                }
            }
        }
        Ok(())
    }

    /// After a fold-back, a lineage only continues with telomeric breaks and
    /// further fold-backs. A telomeric break re-enters the general search.
    fn expand_fold_back(&mut self, genome: &Genome) -> Result<()> {
        if genome.depth() < self.limits.max_depth {
            operators::telomere_breaks(self, genome)?;
            if genome.dup_depth() < self.limits.max_dup_depth {
                operators::fold_backs(self, genome)?;
            }
        }
        Ok(())
    }
}

/// Detailed-history string for the seen map: event tag plus application
/// index per step, `-`-joined; empty for the root.
pub(crate) fn detailed_history(genome: &Genome) -> String {
    let mut out = String::new();
    let mut digits = itoa::Buffer::new();
    for (i, event) in genome.history().iter().enumerate() {
        if i > 0 {
            out.push('-');
        }
        out.push_str(event.kind.tag());
        out.push_str(digits.format(event.index));
    }
    out
}

/// Overall event count recovered from a stored detailed history.
pub(crate) fn overall_depth(history: &str) -> u32 {
    if history.is_empty() {
        return 0;
    }
    history.split('-').count() as u32
}

/// Duplicative event count recovered from a stored detailed history.
pub(crate) fn dup_depth(history: &str) -> u32 {
    if history.is_empty() {
        return 0;
    }
    history
        .split('-')
        .filter(|token| {
            let tag = token.trim_end_matches(|c: char| c.is_ascii_digit());
            EventKind::from_tag(tag).is_some_and(EventKind::is_duplicative)
        })
        .count() as u32
}
