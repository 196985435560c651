//! Segmental rearrangements: deletions, tandem duplications, inversions, and
//! inverted duplications.
//!
//! All four operators share the same breakpoint geometry: two breakpoints
//! `b1 <= b2` on one chromosome select a run of DNA, and the operator acts on
//! that run. Opening the cut splices the boundary segments and resolves three
//! cases:
//!
//! * `b1 == b2`: the segment is cut twice, into three pieces; the run is
//!   the middle piece.
//! * `b1 < b2` with equal segment identities: the two breakpoints sit in
//!   two copies of the same segment, and the intra-segment positions of the
//!   cuts can be ordered two ways; both mirrored realisations are
//!   enumerated. Which spliced piece starts or ends the run depends on the
//!   orientation each copy currently sits in.
//! * `b1 < b2` with distinct identities: each boundary segment is cut once,
//!   into two pieces.
//!
//! After the local surgery, the split is propagated to every other copy of
//! the affected identities and to the segment universe, so homologous loci
//! keep identical identities genome-wide.

use crate::engine::SearchContext;
use crate::error::Result;
use crate::genome::{EventKind, Genome};
use crate::segment::SegmentId;

#[derive(Debug, Clone, Copy)]
enum CutKind {
    /// Both breakpoints inside the same physical segment.
    Within,
    /// Breakpoints in two copies of one identity; `swapped` selects which
    /// intra-segment cut ordering this realisation uses.
    Mirrored { swapped: bool },
    /// Breakpoints in segments of distinct identity.
    Straddling,
}

/// One breakpoint-pair application site.
pub(crate) struct Cut {
    pub chr: usize,
    b1: usize,
    b2: usize,
    kind: CutKind,
    ids: Vec<SegmentId>,
}

impl Cut {
    fn pieces(&self) -> usize {
        match self.kind {
            CutKind::Within | CutKind::Mirrored { .. } => 3,
            CutKind::Straddling => 2,
        }
    }

    /// Deep-copy the parent and splice the boundary segments of this cut.
    /// Returns the new genome together with the inclusive run `[from, to]`
    /// selected between the breakpoints.
    pub(crate) fn open(&self, parent: &Genome) -> (Genome, usize, usize) {
        let mut genome = parent.clone();
        let chromosome = &mut genome.chromosomes[self.chr];
        let (from, to) = match self.kind {
            CutKind::Within => {
                chromosome.splice_one(self.b1, 3);
                (self.b1 + 1, self.b1 + 1)
            }
            CutKind::Mirrored { swapped } => {
                chromosome.splice_one(self.b1, 3);
                chromosome.splice_one(self.b2 + 2, 3);
                // The post-splice boundary orientations pick which of the
                // three pieces of each copy joins the run.
                let first_forward = chromosome.segment(self.b1).forward;
                let second_forward = chromosome.segment(self.b2 + 2).forward;
                let from = if first_forward != swapped {
                    self.b1 + 1
                } else {
                    self.b1 + 2
                };
                let to = 2 + self.b2 + usize::from(second_forward != swapped);
                (from, to)
            }
            CutKind::Straddling => {
                chromosome.splice_one(self.b1, 2);
                chromosome.splice_one(self.b2 + 1, 2);
                (self.b1 + 1, self.b2 + 1)
            }
        };
        (genome, from, to)
    }

    /// Propagate the boundary splits to all remaining copies of the cut
    /// identities and to the segment universe.
    pub(crate) fn close(&self, genome: &mut Genome) {
        for id in &self.ids {
            genome.splice_all(id, self.pieces());
        }
    }
}

/// Visit every breakpoint-pair application site of the genome, in the fixed
/// enumeration order that defines application indices: chromosomes left to
/// right, `b1` ascending, the within-segment site first, then each `b2 > b1`
/// (mirrored realisations back to back).
fn for_each_cut<F>(genome: &Genome, mut visit: F) -> Result<()>
where
    F: FnMut(&Cut) -> Result<()>,
{
    for chr in 0..genome.chromosomes.len() {
        let n_segs = genome.chromosomes[chr].len();
        for b1 in 0..n_segs {
            let first = genome.chromosomes[chr].segment(b1);
            visit(&Cut {
                chr,
                b1,
                b2: b1,
                kind: CutKind::Within,
                ids: vec![first.id.clone()],
            })?;

            for b2 in b1 + 1..n_segs {
                let second = genome.chromosomes[chr].segment(b2);
                if first.id == second.id {
                    for swapped in [false, true] {
                        visit(&Cut {
                            chr,
                            b1,
                            b2,
                            kind: CutKind::Mirrored { swapped },
                            ids: vec![first.id.clone()],
                        })?;
                    }
                } else {
                    visit(&Cut {
                        chr,
                        b1,
                        b2,
                        kind: CutKind::Straddling,
                        ids: vec![first.id.clone(), second.id.clone()],
                    })?;
                }
            }
        }
    }
    Ok(())
}

/// Enumerate every deletion: the run between the breakpoints is removed.
pub fn deletions(ctx: &mut SearchContext<'_>, genome: &Genome) -> Result<()> {
    let mut index = 0;
    for_each_cut(genome, |cut| {
        let (mut child, from, to) = cut.open(genome);
        child.push_event(EventKind::Deletion, index);
        index += 1;
        child.chromosomes[cut.chr].delete_range(from, to);
        cut.close(&mut child);
        ctx.step(child)
    })
}

/// Enumerate every tandem duplication: a copy of the run is inserted
/// immediately after the original.
pub fn tandem_dups(ctx: &mut SearchContext<'_>, genome: &Genome) -> Result<()> {
    let mut index = 0;
    for_each_cut(genome, |cut| {
        let (mut child, from, to) = cut.open(genome);
        child.push_event(EventKind::TandemDup, index);
        index += 1;
        let run = child.chromosomes[cut.chr].yank_range(from, to);
        child.chromosomes[cut.chr].insert_at(to + 1, &run);
        cut.close(&mut child);
        ctx.step(child)
    })
}

/// Enumerate every inversion: the run is reversed in place.
pub fn inversions(ctx: &mut SearchContext<'_>, genome: &Genome) -> Result<()> {
    let mut index = 0;
    for_each_cut(genome, |cut| {
        let (mut child, from, to) = cut.open(genome);
        child.push_event(EventKind::Inversion, index);
        index += 1;
        child.chromosomes[cut.chr].invert_range(from, to);
        cut.close(&mut child);
        ctx.step(child)
    })
}

/// Enumerate every inverted duplication. Each cut yields two placements of
/// the inverted copy: after the original run (head-to-head junction) and
/// before it (tail-to-tail junction).
pub fn inverted_dups(ctx: &mut SearchContext<'_>, genome: &Genome) -> Result<()> {
    let mut index = 0;
    for_each_cut(genome, |cut| {
        let (mut head_to_head, from, to) = cut.open(genome);
        head_to_head.push_event(EventKind::InvertedDup, index);
        index += 1;
        let mut run = head_to_head.chromosomes[cut.chr].yank_range(from, to);
        run.invert_range(0, run.len() - 1);
        head_to_head.chromosomes[cut.chr].insert_at(to + 1, &run);
        cut.close(&mut head_to_head);

        let (mut tail_to_tail, from, _) = cut.open(genome);
        tail_to_tail.push_event(EventKind::InvertedDup, index);
        index += 1;
        tail_to_tail.chromosomes[cut.chr].insert_at(from, &run);
        cut.close(&mut tail_to_tail);

        ctx.step(head_to_head)?;
        ctx.step(tail_to_tail)
    })
}
