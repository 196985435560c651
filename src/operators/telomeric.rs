//! Telomeric breaks and fold-back duplications: the breakage-fusion-bridge
//! operators.
//!
//! Both operators cut a chromosome once, splicing only the boundary segment
//! into two, and discard one arm. A plain telomeric break heals the stump
//! into a new telomere; a fold-back additionally fuses an inverted copy of
//! the retained arm onto the stump, the hallmark of a breakage-fusion-bridge
//! cycle. Fold-back children are dispatched through the engine's fold-back
//! handler, which keeps their lineages inside the BFB operator set.

use crate::engine::SearchContext;
use crate::error::Result;
use crate::genome::{EventKind, Genome};

/// Enumerate every telomeric break without fusion: for each breakpoint, one
/// child loses everything left of the break and one child loses everything
/// right of it.
pub fn telomere_breaks(ctx: &mut SearchContext<'_>, genome: &Genome) -> Result<()> {
    let mut index = 0;
    for chr in 0..genome.chromosomes.len() {
        for b in 0..genome.chromosomes[chr].len() {
            let id = genome.chromosomes[chr].segment(b).id.clone();

            // Lose the p-arm: a new left telomere forms right of the break.
            let mut child = genome.clone();
            child.push_event(EventKind::TelomereBreak, index);
            index += 1;
            child.chromosomes[chr].splice_one(b, 2);
            child.chromosomes[chr].delete_range(0, b);
            child.splice_all(&id, 2);
            ctx.step(child)?;

            // Lose the q-arm.
            let mut child = genome.clone();
            child.push_event(EventKind::TelomereBreak, index);
            index += 1;
            child.chromosomes[chr].splice_one(b, 2);
            let last = child.chromosomes[chr].len() - 1;
            child.chromosomes[chr].delete_range(b + 1, last);
            child.splice_all(&id, 2);
            ctx.step(child)?;
        }
    }
    Ok(())
}

/// Enumerate every fold-back duplication: the arm retained after a telomeric
/// break is doubled in inverted orientation across the break.
pub fn fold_backs(ctx: &mut SearchContext<'_>, genome: &Genome) -> Result<()> {
    let mut index = 0;
    for chr in 0..genome.chromosomes.len() {
        for b in 0..genome.chromosomes[chr].len() {
            let id = genome.chromosomes[chr].segment(b).id.clone();

            // Keep the q-arm; fold an inverted copy back at the new
            // p-telomere.
            let mut child = genome.clone();
            child.push_event(EventKind::FoldBack, index);
            index += 1;
            child.chromosomes[chr].splice_one(b, 2);
            child.chromosomes[chr].delete_range(0, b);
            let last = child.chromosomes[chr].len() - 1;
            let mut arm = child.chromosomes[chr].yank_range(0, last);
            arm.invert_range(0, arm.len() - 1);
            child.chromosomes[chr].insert_at(0, &arm);
            child.splice_all(&id, 2);
            ctx.step_fold_back(child)?;

            // Keep the p-arm; fold an inverted copy back at the new
            // q-telomere.
            let mut child = genome.clone();
            child.push_event(EventKind::FoldBack, index);
            index += 1;
            child.chromosomes[chr].splice_one(b, 2);
            let last = child.chromosomes[chr].len() - 1;
            child.chromosomes[chr].delete_range(b + 1, last);
            let last = child.chromosomes[chr].len() - 1;
            let mut arm = child.chromosomes[chr].yank_range(0, last);
            arm.invert_range(0, arm.len() - 1);
            let end = child.chromosomes[chr].len();
            child.chromosomes[chr].insert_at(end, &arm);
            child.splice_all(&id, 2);
            ctx.step_fold_back(child)?;
        }
    }
    Ok(())
}
