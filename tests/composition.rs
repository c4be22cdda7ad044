// Composition tests: the full pipeline over real files on disk.
//
// These tests exercise the data flow between modules:
//   files -> CorpusIndexer -> Signature -> Matcher -> Attribution
// using temporary directories for the known samples and the mystery text.

use std::fs;
use std::path::{Path, PathBuf};

use penmark::corpus::scan::{get_all_signatures, SkipReason};
use penmark::error::AttributionError;
use penmark::pipeline::attribution::{attribute, process_data, AttributionSettings};
use penmark::scoring::distance::WeightVector;
use penmark::signature::{make_signature, SignatureLayout};
use penmark::text::stopwords::StopwordSet;

const TERSE: &str = "He came. He saw. It rained. The dog ran. We left. She sat. They won.";
const ORNATE: &str = "Notwithstanding the considerable inconvenience, the distinguished \
    gentleman, whose extraordinary patience had been remarked upon by numerous acquaintances, \
    proceeded deliberately; nevertheless, his countenance betrayed unmistakable apprehension.";
const TERSE_MYSTERY: &str = "I ran. You sat. It was cold. The cat slept. We ate. He won.";

struct Fixture {
    _dir: tempfile::TempDir,
    known: PathBuf,
    root: PathBuf,
}

fn fixture(samples: &[(&str, &str)]) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_path_buf();
    let known = root.join("known");
    fs::create_dir(&known).unwrap();
    for (name, contents) in samples {
        fs::write(known.join(name), contents).unwrap();
    }
    Fixture {
        _dir: dir,
        known,
        root,
    }
}

fn write_raw(dir: &Path, name: &str, bytes: &[u8]) {
    fs::write(dir.join(name), bytes).unwrap();
}

fn write_mystery(root: &Path, text: &str) -> PathBuf {
    let path = root.join("mystery.txt");
    fs::write(&path, text).unwrap();
    path
}

// ============================================================
// Chain: files -> index -> match
// ============================================================

#[test]
fn terse_mystery_matches_terse_author() {
    let fx = fixture(&[("ornate.txt", ORNATE), ("terse.txt", TERSE)]);
    let mystery = write_mystery(&fx.root, TERSE_MYSTERY);
    assert_eq!(process_data(&mystery, &fx.known).unwrap(), "terse.txt");
}

#[test]
fn identical_text_scores_zero() {
    let fx = fixture(&[("ornate.txt", ORNATE), ("terse.txt", TERSE)]);
    let mystery = write_mystery(&fx.root, ORNATE);

    let attribution = attribute(&mystery, &fx.known, &AttributionSettings::default()).unwrap();
    assert_eq!(attribution.best_match.identifier, "ornate.txt");
    assert_eq!(attribution.best_match.score, 0.0);
    assert_eq!(attribution.mystery_signature, attribution.match_signature);
    assert_eq!(attribution.ranked.len(), 2);
}

#[test]
fn index_signature_equals_direct_signature() {
    let fx = fixture(&[("terse.txt", TERSE)]);
    let scan = get_all_signatures(&fx.known).unwrap();
    assert_eq!(
        scan.index.get("terse.txt").unwrap(),
        &make_signature(TERSE).unwrap()
    );
}

#[test]
fn skipped_files_do_not_abort_attribution() {
    let fx = fixture(&[("terse.txt", TERSE), ("blank.txt", "   \n\t  ")]);
    write_raw(&fx.known, "image.png", &[0x89, 0x50, 0x4e, 0x47, 0xff, 0xfe]);
    let mystery = write_mystery(&fx.root, TERSE_MYSTERY);

    let attribution = attribute(&mystery, &fx.known, &AttributionSettings::default()).unwrap();
    assert_eq!(attribution.best_match.identifier, "terse.txt");

    let mut skipped: Vec<(&str, SkipReason)> = attribution
        .skipped
        .iter()
        .map(|s| (s.identifier.as_str(), s.reason))
        .collect();
    skipped.sort_by_key(|(id, _)| *id);
    assert_eq!(
        skipped,
        vec![
            ("blank.txt", SkipReason::EmptyText),
            ("image.png", SkipReason::Undecodable)
        ]
    );
}

#[test]
fn extended_layout_with_custom_weights() {
    let fx = fixture(&[("ornate.txt", ORNATE), ("terse.txt", TERSE)]);
    let mystery = write_mystery(&fx.root, TERSE_MYSTERY);

    let mut settings = AttributionSettings::new(SignatureLayout::Extended)
        .with_weights(WeightVector::new(vec![11.0, 33.0, 50.0, 0.4, 4.0, 5.0, 5.0]).unwrap())
        .unwrap();
    settings.stopwords = Some(StopwordSet::from_words(["the", "a", "he", "it", "we"]));
    settings.parallel = true;

    let attribution = attribute(&mystery, &fx.known, &settings).unwrap();
    assert_eq!(attribution.best_match.identifier, "terse.txt");
    assert_eq!(attribution.mystery_signature.len(), 7);
}

// ============================================================
// Failures
// ============================================================

#[test]
fn empty_corpus_is_reported_with_directory() {
    let fx = fixture(&[]);
    write_raw(&fx.known, "binary.dat", &[0xff, 0xff]);
    let mystery = write_mystery(&fx.root, TERSE_MYSTERY);

    match process_data(&mystery, &fx.known).unwrap_err() {
        AttributionError::EmptyCorpus { dir } => assert_eq!(dir.as_deref(), Some(fx.known.as_path())),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_mystery_file() {
    let fx = fixture(&[("terse.txt", TERSE)]);
    let err = process_data(&fx.root.join("nowhere.txt"), &fx.known).unwrap_err();
    assert!(matches!(err, AttributionError::MissingFile { .. }));
    assert!(err.to_string().contains("nowhere.txt"));
}

#[test]
fn undecodable_mystery_file() {
    let fx = fixture(&[("terse.txt", TERSE)]);
    let mystery = fx.root.join("mystery.bin");
    fs::write(&mystery, [0xc3u8, 0x28, 0xa0]).unwrap();
    assert!(matches!(
        process_data(&mystery, &fx.known),
        Err(AttributionError::Undecodable { .. })
    ));
}

#[test]
fn empty_mystery_text_propagates() {
    let fx = fixture(&[("terse.txt", TERSE)]);
    let mystery = write_mystery(&fx.root, "?!...");
    assert!(matches!(
        process_data(&mystery, &fx.known),
        Err(AttributionError::EmptyInput { .. })
    ));
}

#[test]
fn missing_known_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mystery = write_mystery(dir.path(), TERSE_MYSTERY);
    assert!(matches!(
        process_data(&mystery, &dir.path().join("absent")),
        Err(AttributionError::CorpusDirectory { .. })
    ));
}

#[test]
fn wrong_weight_count_is_rejected_before_indexing() {
    let fx = fixture(&[("terse.txt", TERSE)]);
    let mystery = write_mystery(&fx.root, TERSE_MYSTERY);
    let mut settings = AttributionSettings::default();
    settings.weights = WeightVector::new(vec![1.0; 3]).unwrap();
    assert!(matches!(
        attribute(&mystery, &fx.known, &settings),
        Err(AttributionError::DimensionMismatch {
            argument: "weights",
            ..
        })
    ));
}
