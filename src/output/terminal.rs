// Colored terminal output for documents, vocabularies, frequency matrices
// and PCA coordinates.
//
// Each author gets a stable color (by position in the sorted author list) so
// an author's documents and chunks are easy to pick out in long tables.

use colored::{Color, Colorize};

use super::truncate_chars;
use crate::analysis::matrix::FrequencyMatrix;
use crate::analysis::pca::PcaResult;
use crate::corpus::collection::Corpus;
use crate::corpus::vocabulary::Vocabulary;
use crate::text::sample::DocumentRecord;

const AUTHOR_COLORS: [Color; 6] = [
    Color::BrightCyan,
    Color::BrightYellow,
    Color::BrightMagenta,
    Color::BrightGreen,
    Color::BrightBlue,
    Color::BrightRed,
];

/// Widest matrix the terminal table will show before eliding columns.
const MAX_MATRIX_COLUMNS: usize = 12;

fn author_palette(records: &[DocumentRecord]) -> Vec<String> {
    let mut authors: Vec<String> = records.iter().map(|r| r.author.clone()).collect();
    authors.sort();
    authors.dedup();
    authors
}

fn colorize_author(author: &str, palette: &[String]) -> colored::ColoredString {
    match palette.iter().position(|a| a == author) {
        Some(i) => author.color(AUTHOR_COLORS[i % AUTHOR_COLORS.len()]),
        None => author.dimmed(),
    }
}

/// List every sample in corpus order.
pub fn display_documents(corpus: &Corpus) {
    if corpus.is_empty() {
        println!("No documents loaded.");
        return;
    }

    println!(
        "\n{}",
        format!(
            "=== Corpus ({} samples, {} authors) ===",
            corpus.len(),
            corpus.authors().len()
        )
        .bold()
    );
    println!();
    println!(
        "  {:<32} {:<20} {:<24} {:>8}",
        "Name".dimmed(),
        "Author".dimmed(),
        "Group".dimmed(),
        "Words".dimmed(),
    );
    println!("  {}", "-".repeat(87).dimmed());

    let palette = author_palette(&corpus.records());
    for sample in corpus {
        println!(
            "  {:<32} {:<20} {:<24} {:>8}",
            truncate_chars(sample.name(), 29),
            colorize_author(sample.author(), &palette),
            truncate_chars(sample.group(), 21),
            sample.total_words(),
        );
    }
    println!();
}

/// Print the vocabulary, several words per line.
pub fn display_vocabulary(vocabulary: &Vocabulary, mode_label: &str) {
    println!(
        "\n{}",
        format!("=== Vocabulary ({}, {} words) ===", mode_label, vocabulary.len()).bold()
    );
    for line in vocabulary.words().chunks(8) {
        println!("  {}", line.join(", "));
    }
    println!();
}

/// Print the frequency matrix. Wide vocabularies show only the first
/// columns; use JSON output for the full matrix.
pub fn display_matrix(matrix: &FrequencyMatrix) {
    let shown = matrix.cols().min(MAX_MATRIX_COLUMNS);
    println!(
        "\n{}",
        format!(
            "=== Relative Frequencies ({} documents × {} words) ===",
            matrix.rows(),
            matrix.cols()
        )
        .bold()
    );
    println!();

    let header: Vec<String> = matrix.vocabulary().words()[..shown]
        .iter()
        .map(|w| format!("{:>9}", truncate_chars(w, 6)))
        .collect();
    println!("  {:<28} {}", "Document".dimmed(), header.join(" ").dimmed());

    let palette = author_palette(matrix.records());
    for (i, record) in matrix.records().iter().enumerate() {
        let row = matrix.row(i);
        let cells: Vec<String> = row[..shown].iter().map(|v| format!("{v:>9.5}")).collect();
        println!(
            "  {:<28} {}",
            truncate_chars(&record.name, 25)
                .color(author_color(&record.author, &palette)),
            cells.join(" ")
        );
    }

    if shown < matrix.cols() {
        println!(
            "\n  {}",
            format!(
                "... {} more columns not shown (use --json for the full matrix)",
                matrix.cols() - shown
            )
            .dimmed()
        );
    }
    println!();
}

/// Print each document's coordinates on the principal axes.
pub fn display_pca(result: &PcaResult) {
    println!(
        "\n{}",
        format!(
            "=== Principal Components ({} documents, {} axes) ===",
            result.projections.len(),
            result.dimensions
        )
        .bold()
    );
    println!();

    let explained: Vec<String> = result
        .explained_variance
        .iter()
        .enumerate()
        .map(|(i, share)| format!("PC{} {:.1}%", i + 1, share * 100.0))
        .collect();
    println!("  Explained scatter: {}", explained.join("  "));
    println!();

    let header: Vec<String> = (1..=result.dimensions)
        .map(|i| format!("{:>10}", format!("PC{i}")))
        .collect();
    println!(
        "  {:<28} {:<20} {}",
        "Document".dimmed(),
        "Author".dimmed(),
        header.join(" ").dimmed()
    );
    println!("  {}", "-".repeat(50 + 11 * result.dimensions).dimmed());

    let records: Vec<DocumentRecord> =
        result.projections.iter().map(|p| p.record.clone()).collect();
    let palette = author_palette(&records);
    for projection in &result.projections {
        let coords: Vec<String> = projection
            .coordinates
            .iter()
            .map(|c| format!("{c:>10.5}"))
            .collect();
        println!(
            "  {:<28} {:<20} {}",
            truncate_chars(&projection.record.name, 25),
            colorize_author(&projection.record.author, &palette),
            coords.join(" ")
        );
    }
    println!();
}

fn author_color(author: &str, palette: &[String]) -> Color {
    palette
        .iter()
        .position(|a| a == author)
        .map(|i| AUTHOR_COLORS[i % AUTHOR_COLORS.len()])
        .unwrap_or(Color::White)
}
