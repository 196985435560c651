//! Per-genome output records and the emission callback surface.
//!
//! For every unique configuration the engine discovers it hands one
//! [`GenomeRecord`] to a [`RecordSink`]. The rendered line is
//!
//! ```text
//! <detailed_history> <history> <cn_profile> <junctions> <label>
//! ```
//!
//! where the label is the canonical fingerprint, or the detailed history of
//! an earlier not-worse derivation of the same fingerprint.

use std::fmt;
use std::io::{self, Write};

use rustc_hash::FxHashMap;

use crate::genome::Genome;
use crate::segment::SegmentId;

/// One emitted line, field by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenomeRecord {
    /// `-`-joined event tags with application indices (`td0-inv3`); empty
    /// for the wild-type root.
    pub detailed_history: String,
    /// `-`-joined event tags only.
    pub history: String,
    /// Per-universe-segment copy numbers, `paternal,maternal` each,
    /// `/`-separated within a reference chromosome and `;`-separated across.
    pub copy_number: String,
    /// Sorted, deduplicated non-reference adjacencies, `/`-separated.
    pub junctions: String,
    /// Canonical fingerprint, or the detailed history of the earlier
    /// derivation this configuration deduplicated against.
    pub label: String,
}

impl GenomeRecord {
    /// Assemble the record for a simplified genome.
    pub fn render(genome: &Genome, label: &str) -> Self {
        let mut detailed_history = String::new();
        let mut history = String::new();
        let mut digits = itoa::Buffer::new();
        for (i, event) in genome.history().iter().enumerate() {
            if i > 0 {
                detailed_history.push('-');
                history.push('-');
            }
            detailed_history.push_str(event.kind.tag());
            detailed_history.push_str(digits.format(event.index));
            history.push_str(event.kind.tag());
        }

        Self {
            detailed_history,
            history,
            copy_number: copy_number_profile(genome),
            junctions: junction_set(genome),
            label: label.to_string(),
        }
    }
}

impl fmt::Display for GenomeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.detailed_history.is_empty() {
            write!(f, "{} ", self.detailed_history)?;
        }
        if !self.history.is_empty() {
            write!(f, "{} ", self.history)?;
        }
        write!(f, "{} {} {}", self.copy_number, self.junctions, self.label)
    }
}

/// Copy numbers per universe segment, in universe order. Identities with no
/// surviving copy print `0,0`.
fn copy_number_profile(genome: &Genome) -> String {
    let index: FxHashMap<&SegmentId, usize> = genome
        .segments
        .iter()
        .enumerate()
        .map(|(at, id)| (id, at))
        .collect();
    let mut counts = vec![[0u32; 2]; genome.segments.len()];
    for chromosome in &genome.chromosomes {
        for segment in chromosome.iter() {
            counts[index[&segment.id]][segment.maternal as usize] += 1;
        }
    }

    let mut out = String::new();
    let mut digits = itoa::Buffer::new();
    for (at, count) in counts.iter().enumerate() {
        out.push_str(digits.format(count[0]));
        out.push(',');
        out.push_str(digits.format(count[1]));
        if at + 1 < counts.len() {
            out.push(
                if genome.segments[at].chrom() == genome.segments[at + 1].chrom() {
                    '/'
                } else {
                    ';'
                },
            );
        }
    }
    out
}

/// A non-reference adjacency between two segment ends.
///
/// `low`/`high` are universe indices; the stored orientation of the low end
/// is the strand of the segment leaving the junction, the high end's printed
/// sign is the complement of its strand. Ordering sorts by low index, then
/// minus-before-plus on the low end, then by the high end likewise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Junction {
    low: usize,
    low_forward: bool,
    high: usize,
    high_forward: bool,
}

impl Junction {
    fn new(low: usize, low_forward: bool, high: usize, high_forward: bool) -> Self {
        Self {
            low,
            low_forward,
            high,
            high_forward,
        }
    }

    /// Put the lower segment end first; flipping both strands reads the
    /// junction from the other side, so the adjacency stays the same.
    fn normalized(self) -> Self {
        if self.low > self.high || (self.low == self.high && self.low_forward) {
            Self::new(self.high, !self.high_forward, self.low, !self.low_forward)
        } else {
            self
        }
    }

    /// Reference-consistent adjacencies are not rearrangement junctions.
    fn is_reference(self) -> bool {
        (self.low + 1 == self.high && self.low_forward && self.high_forward)
            || (self.low == self.high + 1 && !self.low_forward && !self.high_forward)
    }
}

impl fmt::Display for Junction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{},{}{}",
            self.low,
            if self.low_forward { '+' } else { '-' },
            self.high,
            if self.high_forward { '-' } else { '+' }
        )
    }
}

/// Collect, normalize, sort, and deduplicate the realised non-reference
/// adjacencies of the genome.
fn junction_set(genome: &Genome) -> String {
    let index: FxHashMap<&SegmentId, usize> = genome
        .segments
        .iter()
        .enumerate()
        .map(|(at, id)| (id, at))
        .collect();

    let mut junctions = Vec::new();
    for chromosome in &genome.chromosomes {
        for pair in chromosome.segments().windows(2) {
            let junction = Junction::new(
                index[&pair[0].id],
                pair[0].forward,
                index[&pair[1].id],
                pair[1].forward,
            )
            .normalized();
            if !junction.is_reference() {
                junctions.push(junction);
            }
        }
    }
    junctions.sort();
    junctions.dedup();

    let mut out = String::new();
    for (i, junction) in junctions.iter().enumerate() {
        if i > 0 {
            out.push('/');
        }
        out.push_str(&junction.to_string());
    }
    out
}

/// Consumer of emitted records.
pub trait RecordSink {
    fn record(&mut self, record: &GenomeRecord) -> io::Result<()>;
}

/// Writes one line per record to any `Write` target.
pub struct LineSink<W: Write> {
    writer: W,
}

impl<W: Write> LineSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<W: Write> RecordSink for LineSink<W> {
    fn record(&mut self, record: &GenomeRecord) -> io::Result<()> {
        writeln!(self.writer, "{}", record)
    }
}

/// Collects records in memory; the sink of choice for tests and library
/// consumers that post-process the enumeration.
#[derive(Debug, Default)]
pub struct CollectSink {
    pub records: Vec<GenomeRecord>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordSink for CollectSink {
    fn record(&mut self, record: &GenomeRecord) -> io::Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}
