//! Whole-chromosome and whole-genome copy number changes.

use crate::engine::SearchContext;
use crate::error::Result;
use crate::genome::{EventKind, Genome};

/// Enumerate every whole-chromosome duplication: a copy of one chromosome is
/// appended to the genome.
pub fn chromosome_gains(ctx: &mut SearchContext<'_>, genome: &Genome) -> Result<()> {
    for at in 0..genome.chromosomes.len() {
        let mut child = genome.clone();
        child.push_event(EventKind::ChromosomeGain, at as u32);
        let copy = child.chromosomes[at].clone();
        child.chromosomes.push(copy);
        ctx.step(child)?;
    }
    Ok(())
}

/// Enumerate every whole-chromosome loss. The engine only calls this when
/// the genome has more than one chromosome.
pub fn chromosome_losses(ctx: &mut SearchContext<'_>, genome: &Genome) -> Result<()> {
    for at in 0..genome.chromosomes.len() {
        let mut child = genome.clone();
        child.push_event(EventKind::ChromosomeLoss, at as u32);
        child.lose_chromosome(at);
        ctx.step(child)?;
    }
    Ok(())
}

/// The whole-genome duplication: every chromosome is copied once. Allowed at
/// most once per lineage (the engine gates on `wgd_depth`).
pub fn genome_doublings(ctx: &mut SearchContext<'_>, genome: &Genome) -> Result<()> {
    let mut child = genome.clone();
    child.push_event(EventKind::GenomeDoubling, 0);
    let originals = child.chromosomes.len();
    child.chromosomes.extend_from_within(..originals);
    ctx.step(child)
}
