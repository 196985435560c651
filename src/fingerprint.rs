//! Canonical fingerprinting of somatic genomes.
//!
//! Two genome values describe the same somatic configuration when one can be
//! turned into the other by permuting chromosome order, reading chromosomes
//! from the opposite telomere, renaming reference chromosomes, or swapping
//! the parental-origin labelling of a reference chromosome's homologs. The
//! fingerprint collapses all of these: it is the lexicographically smallest
//! string of the form
//!
//! ```text
//! {seg,flip,rev;...}{...}[len,len,...]
//! ```
//!
//! where each `{...}` block is one somatic chromosome, each segment is
//! encoded as a dense canonical id plus a parental-flip bit and a reversal
//! bit, and the trailing `[..]` lists the per-reference-chromosome segment
//! counts in the order the references were first encountered.
//!
//! The search branches over which somatic chromosome to emit next and in
//! which orientation, and, on first contact with a reference chromosome,
//! over the direction in which its segments receive canonical ids. Branches
//! are pruned to the running lexicographic minimum after every completed
//! chromosome, which keeps the frontier small for realistic chromosome
//! counts.

use rustc_hash::FxHashMap;

use crate::genome::Genome;
use crate::segment::{Chromosome, Segment, SegmentId};

/// Canonical-id assignment for one segment identity within a branch.
#[derive(Debug, Clone, Copy)]
struct Assignment {
    seg_id: u32,
    /// Reference chromosome adopted in reversed orientation.
    reversed: bool,
    /// The homolog first seen for this reference chromosome was maternal, so
    /// the parental labels print flipped.
    maternal_flipped: bool,
}

/// One partial output under construction.
#[derive(Debug, Clone)]
struct Branch {
    out: String,
    used: Vec<bool>,
    assigned: FxHashMap<SegmentId, Assignment>,
    next_seg_id: u32,
    ref_lens: Vec<u32>,
}

impl Branch {
    fn new(n_somatic: usize) -> Self {
        Self {
            out: String::new(),
            used: vec![false; n_somatic],
            assigned: FxHashMap::default(),
            next_seg_id: 0,
            ref_lens: Vec::new(),
        }
    }

    /// Hand out canonical ids to every universe segment of one reference
    /// chromosome, walking the universe forward or backward, and record the
    /// reference's segment count.
    fn adopt_reference(&mut self, genome: &Genome, chrom: u32, maternal_first: bool, reversed: bool) {
        let ids: Vec<&SegmentId> = if reversed {
            genome
                .segments
                .iter()
                .rev()
                .filter(|id| id.chrom() == chrom)
                .collect()
        } else {
            genome
                .segments
                .iter()
                .filter(|id| id.chrom() == chrom)
                .collect()
        };
        for id in &ids {
            let assignment = Assignment {
                seg_id: self.next_seg_id,
                reversed,
                maternal_flipped: maternal_first,
            };
            self.next_seg_id += 1;
            self.assigned.insert((*id).clone(), assignment);
        }
        self.ref_lens.push(ids.len() as u32);
    }

    fn push_segment(&mut self, segment: &Segment) {
        let assignment = self.assigned[&segment.id];
        let mut digits = itoa::Buffer::new();
        self.out.push_str(digits.format(assignment.seg_id));
        self.out.push(',');
        self.out
            .push(if assignment.maternal_flipped != segment.maternal {
                '1'
            } else {
                '0'
            });
        self.out.push(',');
        // Reversal bit in the canonical frame: plus strand under an
        // unreversed adoption prints 0.
        self.out.push(if assignment.reversed != segment.forward {
            '0'
        } else {
            '1'
        });
    }
}

/// Emit one oriented somatic chromosome into `branch`, forking on first
/// contact with each reference chromosome, and push every completed branch
/// onto `done`.
fn emit_chromosome(branch: Branch, chromosome: &Chromosome, genome: &Genome, done: &mut Vec<Branch>) {
    let mut live = vec![branch];
    let last = chromosome.len() - 1;
    for (at, segment) in chromosome.iter().enumerate() {
        let mut next_live = Vec::with_capacity(live.len());
        for prefix in live {
            let mut forks = Vec::with_capacity(2);
            if prefix.assigned.contains_key(&segment.id) {
                forks.push(prefix);
            } else {
                // First contact with this reference chromosome: one fork
                // adopts its segments in universe order, the other in
                // reverse.
                for reversed in [false, true] {
                    let mut fork = prefix.clone();
                    fork.adopt_reference(genome, segment.id.chrom(), segment.maternal, reversed);
                    forks.push(fork);
                }
            }
            for mut fork in forks {
                fork.push_segment(segment);
                if at == last {
                    fork.out.push('}');
                    done.push(fork);
                } else {
                    fork.out.push(';');
                    next_live.push(fork);
                }
            }
        }
        live = next_live;
    }
}

/// Drop every branch whose string is not the lexicographic minimum.
fn prune(branches: &mut Vec<Branch>) {
    let min = branches
        .iter()
        .map(|branch| branch.out.clone())
        .min()
        .expect("fingerprint search lost all branches");
    branches.retain(|branch| branch.out == min);
}

/// The canonical, representation-invariant string for a simplified genome.
pub fn canonical_string(genome: &Genome) -> String {
    assert!(
        !genome.chromosomes.is_empty(),
        "cannot fingerprint a genome without chromosomes"
    );
    let n_somatic = genome.chromosomes.len();

    let mut frontier: Vec<Branch> = Vec::new();
    for (c, chromosome) in genome.chromosomes.iter().enumerate() {
        for oriented in [chromosome.clone(), chromosome.reversed()] {
            let mut branch = Branch::new(n_somatic);
            branch.used[c] = true;
            branch.out.push('{');
            emit_chromosome(branch, &oriented, genome, &mut frontier);
        }
    }
    prune(&mut frontier);

    for _ in 1..n_somatic {
        let survivors = std::mem::take(&mut frontier);
        for branch in &survivors {
            for (c, chromosome) in genome.chromosomes.iter().enumerate() {
                if branch.used[c] {
                    continue;
                }
                for oriented in [chromosome.clone(), chromosome.reversed()] {
                    let mut extended = branch.clone();
                    extended.used[c] = true;
                    extended.out.push('{');
                    emit_chromosome(extended, &oriented, genome, &mut frontier);
                }
            }
        }
        prune(&mut frontier);
    }

    // Reference chromosomes never encountered (fully lost) contribute no
    // length entry.
    let mut digits = itoa::Buffer::new();
    for branch in &mut frontier {
        branch.out.push('[');
        for (i, len) in branch.ref_lens.iter().enumerate() {
            if i > 0 {
                branch.out.push(',');
            }
            branch.out.push_str(digits.format(*len));
        }
        branch.out.push(']');
    }
    prune(&mut frontier);

    frontier.swap_remove(0).out
}
