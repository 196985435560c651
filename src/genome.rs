//! The somatic genome: chromosomes, the segment-identity universe, and the
//! event history that produced the current configuration.

use crate::segment::{Chromosome, SegmentId};

/// The kinds of rearrangement event the enumerator applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Deletion,
    TandemDup,
    InvertedDup,
    Inversion,
    TelomereBreak,
    FoldBack,
    BalancedTransloc,
    UnbalancedTransloc,
    ChromosomeGain,
    ChromosomeLoss,
    GenomeDoubling,
}

impl EventKind {
    /// Short tag used in emitted histories.
    pub fn tag(self) -> &'static str {
        match self {
            EventKind::Deletion => "del",
            EventKind::TandemDup => "td",
            EventKind::InvertedDup => "id",
            EventKind::Inversion => "inv",
            EventKind::TelomereBreak => "tb",
            EventKind::FoldBack => "fb",
            EventKind::BalancedTransloc => "bt",
            EventKind::UnbalancedTransloc => "ut",
            EventKind::ChromosomeGain => "wcg",
            EventKind::ChromosomeLoss => "wcl",
            EventKind::GenomeDoubling => "wgd",
        }
    }

    /// Parse a history tag back into its kind.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "del" => EventKind::Deletion,
            "td" => EventKind::TandemDup,
            "id" => EventKind::InvertedDup,
            "inv" => EventKind::Inversion,
            "tb" => EventKind::TelomereBreak,
            "fb" => EventKind::FoldBack,
            "bt" => EventKind::BalancedTransloc,
            "ut" => EventKind::UnbalancedTransloc,
            "wcg" => EventKind::ChromosomeGain,
            "wcl" => EventKind::ChromosomeLoss,
            "wgd" => EventKind::GenomeDoubling,
            _ => return None,
        })
    }

    /// Whether the event increases total genomic content.
    pub fn is_duplicative(self) -> bool {
        matches!(
            self,
            EventKind::TandemDup
                | EventKind::InvertedDup
                | EventKind::FoldBack
                | EventKind::ChromosomeGain
                | EventKind::GenomeDoubling
        )
    }
}

/// One applied rearrangement: its kind plus the application index that
/// disambiguates distinct applications within a single operator invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub index: u32,
}

/// A somatic genome configuration.
///
/// `segments` is the universe of distinct segment identities ever created on
/// this genome, in canonical insertion order from subdivisions; every
/// identity occurring in any chromosome has its entry there, and fully
/// deleted identities remain (they carry copy number zero). Genomes have
/// value semantics: operators deep-copy before mutating and never touch their
/// input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genome {
    pub chromosomes: Vec<Chromosome>,
    pub segments: Vec<SegmentId>,
    history: Vec<Event>,
    dup_depth: u32,
    wgd_depth: u32,
}

impl Genome {
    /// A wild-type genome of `n_chrs` reference chromosomes. Diploid genomes
    /// interleave the paternal and maternal homolog of each reference
    /// chromosome; the universe holds one identity per reference chromosome
    /// either way.
    pub fn wild_type(n_chrs: u32, diploid: bool) -> Self {
        let n = if diploid { 2 * n_chrs } else { n_chrs } as usize;
        let mut chromosomes = Vec::with_capacity(n);
        let mut segments = Vec::with_capacity(n_chrs as usize);
        for chrom in 0..n_chrs {
            chromosomes.push(Chromosome::wild_type(chrom, false));
            if diploid {
                chromosomes.push(Chromosome::wild_type(chrom, true));
            }
            segments.push(SegmentId::root(chrom));
        }
        Self {
            chromosomes,
            segments,
            history: Vec::new(),
            dup_depth: 0,
            wgd_depth: 0,
        }
    }

    /// Total number of events applied so far.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.history.len() as u32
    }

    /// Number of duplicative events applied so far.
    #[inline]
    pub fn dup_depth(&self) -> u32 {
        self.dup_depth
    }

    /// Number of whole-genome duplications applied so far.
    #[inline]
    pub fn wgd_depth(&self) -> u32 {
        self.wgd_depth
    }

    /// The event log, oldest first.
    #[inline]
    pub fn history(&self) -> &[Event] {
        &self.history
    }

    /// Append an event to the history, updating the depth counters.
    pub fn push_event(&mut self, kind: EventKind, index: u32) {
        if kind.is_duplicative() {
            self.dup_depth += 1;
        }
        if kind == EventKind::GenomeDoubling {
            self.wgd_depth += 1;
        }
        self.history.push(Event { kind, index });
    }

    /// Split every occurrence of `id`, in every chromosome and in the
    /// segment universe, into `pieces` children.
    ///
    /// Chromosome occurrences tag children by the orientation-aware rule of
    /// [`Chromosome::splice_one`]; the universe entry is replaced by children
    /// `0..pieces` in reference order. This keeps homologous loci represented
    /// by identical identities across all paralogs, which the operators rely
    /// on to recognise "same segment" relations across chromosomes.
    pub fn splice_all(&mut self, id: &SegmentId, pieces: usize) {
        for chromosome in &mut self.chromosomes {
            let mut at = 0;
            while at < chromosome.len() {
                if chromosome.segment(at).id == *id {
                    chromosome.splice_one(at, pieces);
                    at += pieces;
                } else {
                    at += 1;
                }
            }
        }

        let at = self
            .segments
            .iter()
            .position(|existing| existing == id)
            .expect("segment identity missing from the genome universe");
        let parent = self.segments[at].clone();
        self.segments
            .splice(at..=at, (0..pieces).map(|i| parent.child(i as u32)));
    }

    /// Remove chromosome `at` from the genome. The segment universe is left
    /// untouched; identities that only occurred there keep a zero copy
    /// number.
    pub fn lose_chromosome(&mut self, at: usize) {
        self.chromosomes.remove(at);
    }

    /// Mutable access to two distinct chromosomes at once. Requires
    /// `c1 < c2`.
    pub fn chromosome_pair_mut(
        &mut self,
        c1: usize,
        c2: usize,
    ) -> (&mut Chromosome, &mut Chromosome) {
        debug_assert!(c1 < c2, "chromosome pair must be ordered");
        let (left, right) = self.chromosomes.split_at_mut(c2);
        (&mut left[c1], &mut right[0])
    }
}
