//! End-to-end enumeration scenarios.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use scar_genomics::{
    canonical_string, simplify, CollectSink, EventKind, Genome, GenomeRecord, SearchContext,
    SearchLimits, SegmentId,
};

fn enumerate(n_chrs: u32, diploid: bool, max_dup: u32, max_depth: u32) -> Vec<GenomeRecord> {
    let mut sink = CollectSink::new();
    let mut ctx = SearchContext::new(SearchLimits::new(max_depth, max_dup), &mut sink);
    ctx.run(Genome::wild_type(n_chrs, diploid)).unwrap();
    drop(ctx);
    sink.records
}

fn history_tags(record: &GenomeRecord) -> Vec<&str> {
    record
        .history
        .split('-')
        .filter(|tag| !tag.is_empty())
        .collect()
}

fn dup_events(record: &GenomeRecord) -> usize {
    history_tags(record)
        .iter()
        .filter(|tag| EventKind::from_tag(tag).is_some_and(EventKind::is_duplicative))
        .count()
}

#[test]
fn wild_type_alone_at_depth_zero() {
    let records = enumerate(1, false, 0, 0);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].detailed_history, "");
    assert_eq!(records[0].history, "");
    assert_eq!(records[0].copy_number, "1,0");
    assert_eq!(records[0].junctions, "");
    assert_eq!(records[0].label, "{0,0,0}[1]");
}

#[test]
fn depth_one_without_dup_budget_has_no_duplicative_events() {
    let records = enumerate(1, false, 0, 1);

    assert!(records.len() > 1);
    for record in &records {
        assert_eq!(dup_events(record), 0, "unexpected dup in {}", record.history);
        assert!(history_tags(record).len() <= 1);
    }
    // Deletions, inversions, and telomeric breaks are all present.
    for tag in ["del", "inv", "tb"] {
        assert!(
            records.iter().any(|r| r.history == tag),
            "missing {} records",
            tag
        );
    }
}

#[test]
fn dup_budget_enables_duplicative_operators() {
    let records = enumerate(1, false, 1, 1);

    for tag in ["td", "fb", "wcg", "wgd"] {
        assert!(
            records.iter().any(|r| r.history == tag),
            "missing {} records",
            tag
        );
    }

    // The whole-genome duplication doubles the single chromosome; its
    // configuration was already reached by the whole-chromosome gain, so it
    // deduplicates onto that derivation.
    let wgd = records.iter().find(|r| r.history == "wgd").unwrap();
    assert_eq!(wgd.copy_number, "2,0");
    assert_eq!(wgd.label, "wcg0");
    let wcg = records.iter().find(|r| r.history == "wcg").unwrap();
    assert_eq!(wcg.label, "{0,0,0}{0,0,0}[1]");
}

#[test]
fn wgd_from_haploid_doubles_every_chromosome() {
    let records = enumerate(2, false, 1, 1);
    let wgd = records.iter().find(|r| r.history == "wgd").unwrap();

    assert_eq!(wgd.copy_number, "2,0;2,0");
    assert_eq!(wgd.junctions, "");
}

#[test]
fn translocations_between_symmetric_chromosomes_deduplicate() {
    let records = enumerate(2, false, 0, 1);

    assert!(records.iter().any(|r| r.history == "bt"));
    assert!(records.iter().any(|r| r.history == "ut"));
    assert!(records.iter().any(|r| r.history == "wcl"));

    // Mirror-image applications collapse onto one stored derivation, so some
    // records are emitted under a previous detailed history rather than a
    // fingerprint.
    let dedup_hits = records.iter().filter(|r| !r.label.starts_with('{')).count();
    assert!(dedup_hits > 0);

    // Unbalanced translocations on two identical chromosomes: losing either
    // derivative gives mirror configurations, so ut1 rides on ut0.
    let ut: Vec<&GenomeRecord> = records.iter().filter(|r| r.history == "ut").collect();
    assert_eq!(ut[1].label, ut[0].detailed_history);
}

#[test]
fn fold_back_lineages_stay_within_bfb_operators() {
    let records = enumerate(1, false, 1, 2);

    assert!(records.iter().any(|r| history_tags(r).first() == Some(&"fb")));
    for record in &records {
        let tags = history_tags(record);
        for pair in tags.windows(2) {
            if pair[0] == "fb" {
                assert!(
                    pair[1] == "tb" || pair[1] == "fb",
                    "non-BFB event after fold-back in {}",
                    record.history
                );
            }
        }
    }
}

#[test]
fn diploid_records_carry_allele_resolved_profiles() {
    let records = enumerate(2, true, 0, 1);

    let root = &records[0];
    assert_eq!(root.copy_number, "1,1;1,1");
    assert_eq!(root.label, "{0,0,0}{0,1,0}{1,0,0}{1,1,0}[1,1]");

    // Losing one homolog leaves an allele-asymmetric profile.
    assert!(records
        .iter()
        .any(|r| r.history == "wcl" && (r.copy_number == "0,1;1,1" || r.copy_number == "1,0;1,1")));
}

#[test]
fn depth_budgets_bound_every_record() {
    let records = enumerate(1, false, 1, 2);

    for record in &records {
        assert!(history_tags(record).len() <= 2);
        assert!(dup_events(record) <= 1);
    }
}

#[test]
fn dedup_labels_point_at_not_worse_derivations() {
    let records = enumerate(1, false, 1, 2);

    for record in &records {
        if record.label.starts_with('{') || record.label.is_empty() {
            continue;
        }
        // The label is the detailed history of the stored derivation; it
        // must not be worse than this record's own on either depth measure.
        let stored_depth = record.label.split('-').count();
        let stored_dups = record
            .label
            .split('-')
            .filter(|token| {
                let tag = token.trim_end_matches(|c: char| c.is_ascii_digit());
                EventKind::from_tag(tag).is_some_and(EventKind::is_duplicative)
            })
            .count();
        assert!(stored_depth <= history_tags(record).len());
        assert!(stored_dups <= dup_events(record));
    }
}

#[test]
fn emissions_bound_unique_fingerprints() {
    let records = enumerate(1, false, 1, 2);

    let fingerprints: std::collections::HashSet<&str> = records
        .iter()
        .filter(|r| r.label.starts_with('{'))
        .map(|r| r.label.as_str())
        .collect();
    assert!(fingerprints.len() <= records.len());
    assert!(!fingerprints.is_empty());
}

#[test]
fn fingerprint_invariant_under_random_permutation_and_reversal() {
    // A rearranged three-chromosome genome with a duplicated chromosome and
    // an inversion scar; shuffling chromosome order and flipping reading
    // directions must never change the fingerprint.
    let mut genome = Genome::wild_type(3, false);
    genome.splice_all(&SegmentId::root(1), 3);
    genome.chromosomes[1].invert_range(1, 1);
    let copy = genome.chromosomes[2].clone();
    genome.chromosomes.push(copy);
    simplify(&mut genome);
    let fingerprint = canonical_string(&genome);

    let mut rng = SmallRng::seed_from_u64(0x5eed);
    for _ in 0..20 {
        for i in (1..genome.chromosomes.len()).rev() {
            let j = rng.gen_range(0..=i);
            genome.chromosomes.swap(i, j);
        }
        for chromosome in &mut genome.chromosomes {
            if rng.gen_bool(0.5) {
                *chromosome = chromosome.reversed();
            }
        }
        assert_eq!(canonical_string(&genome), fingerprint);
    }
}

#[test]
fn double_inversion_restores_the_wild_type_fingerprint() {
    let mut genome = Genome::wild_type(1, false);
    simplify(&mut genome);
    let original = canonical_string(&genome);

    genome.splice_all(&SegmentId::root(0), 3);
    genome.chromosomes[0].invert_range(1, 1);
    simplify(&mut genome);
    assert_ne!(canonical_string(&genome), original);

    genome.chromosomes[0].invert_range(1, 1);
    simplify(&mut genome);
    assert_eq!(canonical_string(&genome), original);
}

#[test]
fn simplification_is_idempotent_across_emitted_genomes() {
    // Drive a small search manually and re-simplify every child: the
    // profile must be unchanged by a second pass.
    let mut genome = Genome::wild_type(1, false);
    genome.splice_all(&SegmentId::root(0), 3);
    genome.chromosomes[0].delete_range(1, 1);
    simplify(&mut genome);
    let once = genome.clone();
    simplify(&mut genome);
    assert_eq!(genome, once);
}
