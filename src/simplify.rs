//! Collapsing of breakpoints that no rearrangement junction uses anymore.
//!
//! After an event, segments adjacent in the universe may everywhere in the
//! genome still meet only at their natural reference join. Such pairs carry
//! no information and are merged back, restoring a segmentation as coarse as
//! the surviving junctions allow. Fingerprints and copy-number profiles are
//! always taken from the simplified genome.

use rustc_hash::FxHashMap;

use crate::genome::Genome;
use crate::segment::SegmentId;

/// Merge universe-adjacent segment pairs whose only realised joins are the
/// natural reference continuation. Idempotent.
///
/// A pair `(s, s+1)` of universe neighbours sharing a root chromosome is
/// merged when no chromosome breaks the join between them: every realised
/// adjacency on the right side of `s` (in its plus representation) is the
/// immediate successor with matching parental origin, and symmetrically for
/// the left side of `s+1`. Chromosome telomeres count as broken joins on the
/// side pointing outward.
pub fn simplify(genome: &mut Genome) {
    let n = genome.segments.len();
    if n == 0 {
        return;
    }

    let index: FxHashMap<&SegmentId, usize> = genome
        .segments
        .iter()
        .enumerate()
        .map(|(at, id)| (id, at))
        .collect();

    let mut natural_next = vec![true; n];
    let mut natural_prev = vec![true; n];

    // Telomeres break the outward-pointing join of the terminal segments.
    for chromosome in &genome.chromosomes {
        let first = chromosome.segment(0);
        let at = index[&first.id];
        if first.forward {
            natural_prev[at] = false;
            if at > 0 {
                natural_next[at - 1] = false;
            }
        } else {
            natural_next[at] = false;
            if at + 1 < n {
                natural_prev[at + 1] = false;
            }
        }

        let last = chromosome.segment(chromosome.len() - 1);
        let at = index[&last.id];
        if last.forward {
            natural_next[at] = false;
            if at + 1 < n {
                natural_prev[at + 1] = false;
            }
        } else {
            natural_prev[at] = false;
            if at > 0 {
                natural_next[at - 1] = false;
            }
        }
    }

    // Every realised adjacency that is not the reference continuation breaks
    // the corresponding side of both participants and of their universe
    // neighbours on that side.
    for chromosome in &genome.chromosomes {
        for pair in chromosome.segments().windows(2) {
            let (left, right) = (&pair[0], &pair[1]);
            let i = index[&left.id];
            let j = index[&right.id];
            let natural = ((i + 1 == j && left.forward && right.forward)
                || (j + 1 == i && !left.forward && !right.forward))
                && left.maternal == right.maternal;
            if natural {
                continue;
            }

            if left.forward {
                natural_next[i] = false;
                if i + 1 < n {
                    natural_prev[i + 1] = false;
                }
            } else {
                natural_prev[i] = false;
                if i > 0 {
                    natural_next[i - 1] = false;
                }
            }
            if right.forward {
                natural_prev[j] = false;
                if j > 0 {
                    natural_next[j - 1] = false;
                }
            } else {
                natural_next[j] = false;
                if j + 1 < n {
                    natural_prev[j + 1] = false;
                }
            }
        }
    }

    // Absorb right-to-left; in each run of mergeable segments only the first
    // one survives and keeps its own identity.
    let mut absorbed = vec![false; n];
    for at in (0..n - 1).rev() {
        if natural_next[at]
            && natural_prev[at + 1]
            && genome.segments[at].chrom() == genome.segments[at + 1].chrom()
        {
            absorbed[at + 1] = true;
        }
    }
    if !absorbed.contains(&true) {
        return;
    }

    for chromosome in &mut genome.chromosomes {
        chromosome.retain(|segment| !absorbed[index[&segment.id]]);
        debug_assert!(!chromosome.is_empty(), "simplification emptied a chromosome");
    }
    let mut keep = absorbed.iter().map(|gone| !gone);
    genome.segments.retain(|_| keep.next().unwrap_or(true));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::Genome;
    use crate::segment::SegmentId;

    #[test]
    fn test_unused_breakpoint_collapses() {
        let mut genome = Genome::wild_type(1, false);
        genome.splice_all(&SegmentId::root(0), 2);
        assert_eq!(genome.segments.len(), 2);

        simplify(&mut genome);

        assert_eq!(genome.segments.len(), 1);
        assert_eq!(genome.chromosomes[0].len(), 1);
        assert_eq!(genome.chromosomes[0].segment(0).id, SegmentId::root(0).child(0));
    }

    #[test]
    fn test_collapse_cascades_across_a_run() {
        let mut genome = Genome::wild_type(1, false);
        genome.splice_all(&SegmentId::root(0), 3);

        simplify(&mut genome);

        assert_eq!(genome.segments.len(), 1);
        assert_eq!(genome.chromosomes[0].len(), 1);
    }

    #[test]
    fn test_deletion_scar_is_kept() {
        // 0.0 / 0.2 with 0.1 deleted: the junction keeps all three universe
        // entries alive.
        let mut genome = Genome::wild_type(1, false);
        genome.splice_all(&SegmentId::root(0), 3);
        genome.chromosomes[0].delete_range(1, 1);

        simplify(&mut genome);

        assert_eq!(genome.segments.len(), 3);
        assert_eq!(genome.chromosomes[0].len(), 2);
    }

    #[test]
    fn test_inversion_scar_is_kept() {
        let mut genome = Genome::wild_type(1, false);
        genome.splice_all(&SegmentId::root(0), 3);
        genome.chromosomes[0].invert_range(1, 1);

        simplify(&mut genome);

        assert_eq!(genome.segments.len(), 3);
        assert_eq!(genome.chromosomes[0].len(), 3);
    }

    #[test]
    fn test_homolog_breakpoint_blocks_collapse() {
        // Diploid: delete the middle child on the paternal homolog only. The
        // maternal homolog still carries all three children naturally joined,
        // but the paternal junction must keep the breakpoints of both.
        let mut genome = Genome::wild_type(1, true);
        genome.splice_all(&SegmentId::root(0), 3);
        genome.chromosomes[0].delete_range(1, 1);

        simplify(&mut genome);

        assert_eq!(genome.segments.len(), 3);
        assert_eq!(genome.chromosomes[0].len(), 2);
        assert_eq!(genome.chromosomes[1].len(), 3);
    }

    #[test]
    fn test_parental_origin_mismatch_is_unnatural() {
        // Swap the maternal tag of the second child on one homolog; the join
        // is positionally natural but crosses parental origin.
        let mut genome = Genome::wild_type(1, true);
        genome.splice_all(&SegmentId::root(0), 2);
        let rebuilt = {
            let chr = &genome.chromosomes[0];
            let mut segments = chr.segments().to_vec();
            segments[1].maternal = true;
            crate::segment::Chromosome::from_segments(segments)
        };
        genome.chromosomes[0] = rebuilt;

        simplify(&mut genome);

        assert_eq!(genome.segments.len(), 2);
    }

    #[test]
    fn test_simplify_is_idempotent() {
        let mut genome = Genome::wild_type(1, false);
        genome.splice_all(&SegmentId::root(0), 3);
        genome.chromosomes[0].invert_range(1, 1);
        genome.splice_all(&SegmentId::root(0).child(2), 2);

        simplify(&mut genome);
        let once = genome.clone();
        simplify(&mut genome);

        assert_eq!(genome, once);
    }

    #[test]
    fn test_wild_type_untouched() {
        let mut genome = Genome::wild_type(2, true);
        let original = genome.clone();

        simplify(&mut genome);

        assert_eq!(genome, original);
    }
}
