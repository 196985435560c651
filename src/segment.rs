//! Core segment and chromosome types for somatic genome representation.
//!
//! A chromosome is an ordered run of segments between two telomeres. Each
//! segment carries an identity (its subdivision path from a wild-type root
//! chromosome), a strand orientation, and a parental-origin tag. Breakpoint
//! events never edit DNA directly; they splice segments into child segments
//! and rearrange the resulting runs.

use std::fmt;

/// Identity of a segment: the subdivision path from a root chromosome.
///
/// Element 0 is the root chromosome id; every later element records which
/// child the segment became at one successive split. Two segments are the
/// same locus exactly when their paths are equal, independent of orientation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(Vec<u32>);

impl SegmentId {
    /// Identity of an intact wild-type chromosome.
    #[inline]
    pub fn root(chrom: u32) -> Self {
        Self(vec![chrom])
    }

    /// The root chromosome this segment descends from.
    #[inline]
    pub fn chrom(&self) -> u32 {
        self.0[0]
    }

    /// How many times the genome has been divided to produce this segment.
    /// An intact chromosome counts as divided once.
    #[inline]
    pub fn times_divided(&self) -> usize {
        self.0.len()
    }

    /// Identity of the `index`-th child after one further split.
    pub fn child(&self, index: u32) -> Self {
        let mut path = Vec::with_capacity(self.0.len() + 1);
        path.extend_from_slice(&self.0);
        path.push(index);
        Self(path)
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}

/// A contiguous piece of reference DNA sitting somewhere in the somatic
/// genome.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    /// Which locus this is.
    pub id: SegmentId,
    /// true = reference strand, false = reverse complement.
    pub forward: bool,
    /// Parental allele tag; haploid genomes use false uniformly.
    pub maternal: bool,
}

impl Segment {
    /// A full-length wild-type chromosome segment on the reference strand.
    #[inline]
    pub fn root(chrom: u32, maternal: bool) -> Self {
        Self {
            id: SegmentId::root(chrom),
            forward: true,
            maternal,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.id,
            if self.forward { '+' } else { '-' },
            if self.maternal { 'm' } else { 'p' }
        )
    }
}

/// Ordered sequence of segments, left telomere to right telomere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chromosome {
    segments: Vec<Segment>,
}

impl Chromosome {
    /// An intact wild-type chromosome: one root segment.
    pub fn wild_type(chrom: u32, maternal: bool) -> Self {
        Self {
            segments: vec![Segment::root(chrom, maternal)],
        }
    }

    /// Build a chromosome from an explicit segment run.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True when the chromosome carries no segments. A chromosome in a live
    /// genome is never empty; this state only occurs transiently inside
    /// operators.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segment at position `at`.
    #[inline]
    pub fn segment(&self, at: usize) -> &Segment {
        &self.segments[at]
    }

    /// The full segment run.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Iterate the segments left to right.
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Replace the segment at `at` with `pieces` contiguous children.
    ///
    /// The child stored at offset `i` extends the parent identity with `i`
    /// when the parent lies on the reference strand and `pieces - 1 - i`
    /// otherwise, so that inverted copies of the same parent receive
    /// mirror-symmetric child indices and homologous loci keep equal
    /// identities through orientation flips.
    pub fn splice_one(&mut self, at: usize, pieces: usize) {
        debug_assert!(pieces >= 1, "cannot splice a segment into zero pieces");
        let parent = self.segments[at].clone();
        self.segments.splice(
            at..=at,
            (0..pieces).map(|i| {
                let child = if parent.forward {
                    i as u32
                } else {
                    (pieces - 1 - i) as u32
                };
                Segment {
                    id: parent.id.child(child),
                    forward: parent.forward,
                    maternal: parent.maternal,
                }
            }),
        );
    }

    /// Remove the inclusive segment range `[from, to]`. A reversed range is
    /// a no-op.
    pub fn delete_range(&mut self, from: usize, to: usize) {
        if to < from {
            return;
        }
        self.segments.drain(from..=to);
    }

    /// Deep-copy the inclusive range `[from, to]` into a standalone
    /// chromosome; the source is unmodified.
    pub fn yank_range(&self, from: usize, to: usize) -> Chromosome {
        Chromosome {
            segments: self.segments[from..=to].to_vec(),
        }
    }

    /// Insert deep copies of `source`'s segments before position `before`.
    pub fn insert_at(&mut self, before: usize, source: &Chromosome) {
        self.segments
            .splice(before..before, source.segments.iter().cloned());
    }

    /// Reverse the inclusive range `[from, to]` and flip each segment's
    /// strand.
    pub fn invert_range(&mut self, from: usize, to: usize) {
        self.segments[from..=to].reverse();
        for segment in &mut self.segments[from..=to] {
            segment.forward = !segment.forward;
        }
    }

    /// The whole chromosome read from the opposite telomere.
    pub fn reversed(&self) -> Chromosome {
        let mut flipped = self.clone();
        if !flipped.is_empty() {
            let last = flipped.len() - 1;
            flipped.invert_range(0, last);
        }
        flipped
    }

    /// Drop every segment that fails the predicate.
    pub fn retain<F: FnMut(&Segment) -> bool>(&mut self, keep: F) {
        self.segments.retain(keep);
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(chr: &Chromosome) -> Vec<String> {
        chr.iter().map(|s| s.id.to_string()).collect()
    }

    #[test]
    fn test_splice_forward_child_indices() {
        let mut chr = Chromosome::wild_type(0, false);
        chr.splice_one(0, 3);

        assert_eq!(ids(&chr), vec!["0.0", "0.1", "0.2"]);
        assert!(chr.iter().all(|s| s.forward));
    }

    #[test]
    fn test_splice_reversed_child_indices() {
        let mut chr = Chromosome::wild_type(0, false);
        chr.invert_range(0, 0);
        chr.splice_one(0, 3);

        // An antisense parent hands out mirror-image child indices, so the
        // leftmost physical piece is the rightmost reference child.
        assert_eq!(ids(&chr), vec!["0.2", "0.1", "0.0"]);
        assert!(chr.iter().all(|s| !s.forward));
    }

    #[test]
    fn test_splice_preserves_neighbours() {
        let mut chr = Chromosome::wild_type(0, false);
        chr.splice_one(0, 2);
        chr.splice_one(1, 2);

        assert_eq!(ids(&chr), vec!["0.0", "0.1.0", "0.1.1"]);
    }

    #[test]
    fn test_invert_range_flips_order_and_strand() {
        let mut chr = Chromosome::wild_type(0, false);
        chr.splice_one(0, 3);
        chr.invert_range(1, 2);

        assert_eq!(ids(&chr), vec!["0.0", "0.2", "0.1"]);
        assert!(chr.segment(0).forward);
        assert!(!chr.segment(1).forward);
        assert!(!chr.segment(2).forward);
    }

    #[test]
    fn test_double_inversion_restores() {
        let mut chr = Chromosome::wild_type(0, false);
        chr.splice_one(0, 3);
        let original = chr.clone();
        chr.invert_range(0, 2);
        chr.invert_range(0, 2);

        assert_eq!(chr, original);
    }

    #[test]
    fn test_yank_is_a_deep_copy() {
        let mut chr = Chromosome::wild_type(0, false);
        chr.splice_one(0, 3);
        let yanked = chr.yank_range(1, 2);

        assert_eq!(yanked.len(), 2);
        assert_eq!(ids(&yanked), vec!["0.1", "0.2"]);
        // Source unchanged.
        assert_eq!(chr.len(), 3);
    }

    #[test]
    fn test_insert_at() {
        let mut chr = Chromosome::wild_type(0, false);
        chr.splice_one(0, 2);
        let run = chr.yank_range(1, 1);
        chr.insert_at(2, &run);

        assert_eq!(ids(&chr), vec!["0.0", "0.1", "0.1"]);
    }

    #[test]
    fn test_delete_range_reversed_is_noop() {
        let mut chr = Chromosome::wild_type(0, false);
        chr.splice_one(0, 2);
        chr.delete_range(1, 0);

        assert_eq!(chr.len(), 2);
    }

    #[test]
    fn test_reversed_round_trip() {
        let mut chr = Chromosome::wild_type(0, false);
        chr.splice_one(0, 3);
        chr.invert_range(1, 1);

        assert_eq!(chr.reversed().reversed(), chr);
    }
}
