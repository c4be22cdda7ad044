// Colored terminal output for attribution reports, signatures and the corpus.
//
// main.rs decides what to show; this module decides how it looks.

use colored::Colorize;

use crate::corpus::scan::{CorpusScan, SkippedFile};
use crate::pipeline::attribution::Attribution;
use crate::signature::{Signature, SignatureLayout};

const RULE_WIDTH: usize = 60;
const ID_WIDTH: usize = 36;

/// Full human-readable report for one attribution run.
///
/// Shows the best match, a side-by-side signature comparison, the closest
/// `top_n` candidates and any files skipped while indexing.
pub fn display_attribution(attribution: &Attribution, top_n: usize) {
    println!();
    println!("{}", "ANALYSIS COMPLETE".bold());
    println!("{}", "=".repeat(30));
    println!(
        "Best matching author sample: {}",
        attribution.best_match.identifier.bright_green().bold()
    );
    println!(
        "  Distance: {:.3}  ({} layout, {} samples compared)",
        attribution.best_match.score,
        attribution.layout,
        attribution.ranked.len()
    );

    println!();
    println!(
        "  {:<22} {:>10} {:>10} {:>8}",
        "Feature".dimmed(),
        "Mystery".dimmed(),
        "Match".dimmed(),
        "Weight".dimmed()
    );
    println!("  {}", "-".repeat(53).dimmed());
    let rows = attribution
        .layout
        .features()
        .iter()
        .zip(attribution.mystery_signature.values())
        .zip(attribution.match_signature.values())
        .zip(attribution.weights.values());
    for (((feature, mystery), known), weight) in rows {
        println!(
            "  {:<22} {:>10.3} {:>10.3} {:>8}",
            feature.name(),
            mystery,
            known,
            weight
        );
    }

    println!();
    println!(
        "{}",
        format!(
            "=== Closest samples ({} of {}) ===",
            top_n.min(attribution.ranked.len()),
            attribution.ranked.len()
        )
        .bold()
    );
    for (i, candidate) in attribution.ranked.iter().take(top_n).enumerate() {
        let id = super::truncate_chars(&candidate.identifier, ID_WIDTH);
        let line = format!("  {:>3}. {:<width$} {:>10.3}", i + 1, id, candidate.score, width = ID_WIDTH + 3);
        if i == 0 {
            println!("{}", line.bright_green());
        } else {
            println!("{line}");
        }
    }

    display_skipped(&attribution.skipped);

    println!();
    println!(
        "The mystery text has the most similar writing style to '{}'.",
        attribution.best_match.identifier
    );
    println!("{}", "=".repeat(RULE_WIDTH));
}

/// One text's signature, one feature per line.
pub fn display_signature(identifier: &str, signature: &Signature, layout: SignatureLayout) {
    println!(
        "\n{}",
        format!("=== Signature of {identifier} ({layout} layout) ===").bold()
    );
    for (feature, value) in layout.features().iter().zip(signature.values()) {
        println!("  {:<22} {:>10.3}", feature.name(), value);
    }
}

/// Every indexed signature plus the skip list.
pub fn display_corpus(scan: &CorpusScan, layout: SignatureLayout) {
    if scan.index.is_empty() {
        println!("No samples indexed. Check the known-authors directory.");
        display_skipped(&scan.skipped);
        return;
    }

    println!(
        "\n{}",
        format!("=== Corpus ({} samples, {layout} layout) ===", scan.index.len()).bold()
    );
    for (identifier, signature) in scan.index.iter() {
        println!(
            "  {:<width$} {}",
            super::truncate_chars(identifier, ID_WIDTH),
            signature.to_string().dimmed(),
            width = ID_WIDTH + 3
        );
    }
    display_skipped(&scan.skipped);
}

fn display_skipped(skipped: &[SkippedFile]) {
    if skipped.is_empty() {
        return;
    }
    println!();
    println!(
        "  {} {} file(s) skipped while indexing:",
        "!".yellow(),
        skipped.len()
    );
    for skip in skipped {
        println!("    {}: {}", skip.identifier, skip.detail.dimmed());
    }
}
