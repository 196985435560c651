//! Balanced and unbalanced translocations between chromosome pairs.
//!
//! A translocation breaks two chromosomes `c1 < c2` once each and rejoins
//! the four ends. Two rejoinings are possible: sub-case A swaps the q-arms
//! while retaining orientation (two +/− junctions), sub-case B fuses the
//! q-arm of `c1` with the inverted p-arm of `c2` and vice versa (a ++ and a
//! −− junction). When both breakpoints hit copies of the same segment
//! identity, the two intra-segment cut orderings give mirrored realisations
//! of each sub-case, four geometric children in total.
//!
//! The unbalanced variant performs the same exchanges but each child
//! additionally loses one of the two participating derivative chromosomes.

use crate::engine::SearchContext;
use crate::error::Result;
use crate::genome::{EventKind, Genome};

/// Build the exchanged genome for one breakpoint pair, one sub-case, and one
/// mirrored realisation. No history entry is recorded here.
fn exchange(
    parent: &Genome,
    c1: usize,
    b1: usize,
    c2: usize,
    b2: usize,
    shared_identity: bool,
    swapped: bool,
    inverted: bool,
) -> Genome {
    let mut genome = parent.clone();
    let pieces = if shared_identity { 3 } else { 2 };
    let ids = if shared_identity {
        vec![parent.chromosomes[c1].segment(b1).id.clone()]
    } else {
        vec![
            parent.chromosomes[c1].segment(b1).id.clone(),
            parent.chromosomes[c2].segment(b2).id.clone(),
        ]
    };

    {
        let (chr1, chr2) = genome.chromosome_pair_mut(c1, c2);
        chr1.splice_one(b1, pieces);
        chr2.splice_one(b2, pieces);

        // First segment of the q-arm leaving chr1.
        let cut1 = if shared_identity {
            if chr1.segment(b1).forward != swapped {
                b1 + 1
            } else {
                b1 + 2
            }
        } else {
            b1 + 1
        };

        if !inverted {
            // Sub-case A: swap q-arms, orientations retained.
            let cut2 = if shared_identity {
                if chr2.segment(b2).forward != swapped {
                    b2 + 2
                } else {
                    b2 + 1
                }
            } else {
                b2 + 1
            };
            let arm1 = chr1.yank_range(cut1, chr1.len() - 1);
            let arm2 = chr2.yank_range(cut2, chr2.len() - 1);
            let end = chr1.len();
            chr1.insert_at(end, &arm2);
            let end = chr2.len();
            chr2.insert_at(end, &arm1);
            chr1.delete_range(cut1, chr1.len() - 1 - arm2.len());
            chr2.delete_range(cut2, chr2.len() - 1 - arm1.len());
        } else {
            // Sub-case B: chr1 gains the inverted p-arm of chr2, chr2 gains
            // the inverted q-arm of chr1.
            let p_end2 = if shared_identity {
                if chr2.segment(b2).forward != swapped {
                    b2 + 1
                } else {
                    b2
                }
            } else {
                b2
            };
            let mut arm1 = chr1.yank_range(cut1, chr1.len() - 1);
            arm1.invert_range(0, arm1.len() - 1);
            let mut arm2 = chr2.yank_range(0, p_end2);
            arm2.invert_range(0, arm2.len() - 1);
            let end = chr1.len();
            chr1.insert_at(end, &arm2);
            chr2.insert_at(p_end2 + 1, &arm1);
            chr1.delete_range(cut1, chr1.len() - 1 - arm2.len());
            chr2.delete_range(0, p_end2);
        }
    }

    for id in &ids {
        genome.splice_all(id, pieces);
    }
    genome
}

/// Visit every (c1, b1, c2, b2, swapped, inverted) realisation in
/// enumeration order.
fn for_each_exchange<F>(genome: &Genome, mut visit: F) -> Result<()>
where
    F: FnMut(usize, usize, usize, usize, bool, bool) -> Result<()>,
{
    for c1 in 0..genome.chromosomes.len() {
        for c2 in c1 + 1..genome.chromosomes.len() {
            for b1 in 0..genome.chromosomes[c1].len() {
                for b2 in 0..genome.chromosomes[c2].len() {
                    let shared = genome.chromosomes[c1].segment(b1).id
                        == genome.chromosomes[c2].segment(b2).id;
                    if shared {
                        for swapped in [false, true] {
                            for inverted in [false, true] {
                                visit(c1, b1, c2, b2, swapped, inverted)?;
                            }
                        }
                    } else {
                        for inverted in [false, true] {
                            visit(c1, b1, c2, b2, false, inverted)?;
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

/// Enumerate every balanced translocation.
pub fn balanced_translocations(ctx: &mut SearchContext<'_>, genome: &Genome) -> Result<()> {
    let mut index = 0;
    for_each_exchange(genome, |c1, b1, c2, b2, swapped, inverted| {
        let shared =
            genome.chromosomes[c1].segment(b1).id == genome.chromosomes[c2].segment(b2).id;
        let mut child = exchange(genome, c1, b1, c2, b2, shared, swapped, inverted);
        child.push_event(EventKind::BalancedTransloc, index);
        index += 1;
        ctx.step(child)
    })
}

/// Enumerate every unbalanced translocation: each balanced exchange spawns
/// two children, one losing each participating derivative chromosome.
pub fn unbalanced_translocations(ctx: &mut SearchContext<'_>, genome: &Genome) -> Result<()> {
    let mut index = 0;
    for_each_exchange(genome, |c1, b1, c2, b2, swapped, inverted| {
        let shared =
            genome.chromosomes[c1].segment(b1).id == genome.chromosomes[c2].segment(b2).id;
        let exchanged = exchange(genome, c1, b1, c2, b2, shared, swapped, inverted);

        let mut lose_second = exchanged.clone();
        let mut lose_first = exchanged;
        lose_first.push_event(EventKind::UnbalancedTransloc, index);
        index += 1;
        lose_second.push_event(EventKind::UnbalancedTransloc, index);
        index += 1;
        lose_first.lose_chromosome(c1);
        lose_second.lose_chromosome(c2);
        ctx.step(lose_first)?;
        ctx.step(lose_second)
    })
}
