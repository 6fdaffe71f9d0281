//! Output formatting for search results

use crate::aggregate::{SearchReport, Summary};
use crate::grid::{Grid, WordPosition};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// File format for [`export_grid`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Plain text; highlighted letters are followed by `*`
    Text,
    /// HTML page; highlighted letters are wrapped in a green span
    Html,
}

const HTML_MARK_START: &str = "<span style=\"color: green\">";
const HTML_MARK_END: &str = "</span>";

fn highlight_spec() -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(Color::Green)).set_bold(true);
    spec
}

fn stdout(color: bool) -> StandardStream {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

/// Write the grid with column and row indices, highlighted cells in color
pub fn write_grid<W: WriteColor>(out: &mut W, grid: &Grid) -> io::Result<()> {
    // Column numbers
    write!(out, "    ")?;
    for col in 0..grid.cols() {
        write!(out, "{:2} ", col)?;
    }
    writeln!(out)?;

    for row in 0..grid.rows() {
        write!(out, "{:2}  ", row)?;
        for col in 0..grid.cols() {
            let letter = grid.letter(row, col);
            if grid.is_highlighted(row, col) {
                out.set_color(&highlight_spec())?;
                write!(out, "{}", letter)?;
                out.reset()?;
                write!(out, "  ")?;
            } else {
                write!(out, "{}  ", letter)?;
            }
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Print the grid to stdout
pub fn print_grid(grid: &Grid, color: bool) -> io::Result<()> {
    let mut out = stdout(color);
    write_grid(&mut out, grid)
}

/// Render the grid as plain text
pub fn render_text(grid: &Grid) -> String {
    let mut text = String::from("    ");
    for col in 0..grid.cols() {
        text.push_str(&format!("{:2} ", col));
    }
    text.push('\n');

    for row in 0..grid.rows() {
        text.push_str(&format!("{:2}  ", row));
        for col in 0..grid.cols() {
            let mark = if grid.is_highlighted(row, col) { '*' } else { ' ' };
            text.push(grid.letter(row, col));
            text.push(mark);
            text.push(' ');
        }
        text.push('\n');
    }

    text
}

fn escape_html(c: char, out: &mut String) {
    match c {
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '&' => out.push_str("&amp;"),
        '"' => out.push_str("&quot;"),
        _ => out.push(c),
    }
}

/// Render the grid as a standalone HTML page
pub fn render_html(grid: &Grid) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Word Search Results</title>\n</head>\n<body>\n<pre>\n",
    );

    html.push_str("    ");
    for col in 0..grid.cols() {
        html.push_str(&format!("{:2} ", col));
    }
    html.push('\n');

    for row in 0..grid.rows() {
        html.push_str(&format!("{:2}  ", row));
        for col in 0..grid.cols() {
            let letter = grid.letter(row, col);
            if grid.is_highlighted(row, col) {
                html.push_str(HTML_MARK_START);
                escape_html(letter, &mut html);
                html.push_str(HTML_MARK_END);
            } else {
                escape_html(letter, &mut html);
            }
            html.push_str("  ");
        }
        html.push('\n');
    }

    html.push_str("</pre>\n</body>\n</html>\n");
    html
}

/// Write the highlighted grid to a file
pub fn export_grid(grid: &Grid, path: &Path, format: ExportFormat) -> io::Result<()> {
    let content = match format {
        ExportFormat::Text => render_text(grid),
        ExportFormat::Html => render_html(grid),
    };
    fs::write(path, content)
}

/// Print dimensions and word list before the results
pub fn print_puzzle_info(report: &SearchReport) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out)?;
    writeln!(out, "Puzzle Information:")?;
    writeln!(out, "------------------")?;
    writeln!(
        out,
        "Grid dimensions: {} columns x {} rows",
        report.grid.cols(),
        report.grid.rows()
    )?;
    writeln!(out, "Number of words to search: {}", report.words.len())?;
    writeln!(out, "Words to find: {}", report.words.join(", "))?;
    writeln!(out)?;
    Ok(())
}

/// Print each match as `word: (r,c) to (r,c)`
pub fn write_found_words<W: Write>(out: &mut W, positions: &[WordPosition]) -> io::Result<()> {
    writeln!(out, "Found Words:")?;
    for pos in positions {
        writeln!(out, "{}", pos)?;
    }
    Ok(())
}

/// Print the performance summary
pub fn write_summary<W: Write>(out: &mut W, summary: &Summary) -> io::Result<()> {
    writeln!(out, "Performance Metrics:")?;
    writeln!(out, "-------------------")?;
    writeln!(out, "Total words found: {}", summary.matches)?;
    writeln!(out, "Execution time: {:.4} seconds", summary.elapsed.as_secs_f64())?;
    match summary.throughput {
        Some(rate) => writeln!(out, "Processing speed: {:.2} words/second", rate)?,
        None => writeln!(out, "Processing speed: n/a")?,
    }
    writeln!(out, "Number of processes: {}", summary.workers)?;
    Ok(())
}

/// Print the full text report: grid, found words, words with no match and
/// the performance summary
pub fn print_report(report: &SearchReport, color: bool) -> io::Result<()> {
    print_puzzle_info(report)?;

    {
        let mut out = io::stdout().lock();
        writeln!(out, "Search Results:")?;
        writeln!(out, "--------------")?;
    }
    print_grid(&report.grid, color)?;

    let mut out = io::stdout().lock();
    writeln!(out)?;
    write_found_words(&mut out, &report.positions)?;

    let missing = report.missing_words();
    if !missing.is_empty() {
        writeln!(out, "Not found: {}", missing.join(", "))?;
    }

    writeln!(out)?;
    write_summary(&mut out, &report.summary)?;
    Ok(())
}

/// Serializable form of a report
#[derive(Serialize)]
struct JsonReport<'a> {
    rows: usize,
    cols: usize,
    words: &'a [String],
    matches: &'a [WordPosition],
    word_counts: Vec<(&'a str, usize)>,
    per_worker: &'a [usize],
    summary: &'a Summary,
}

/// Write the report as pretty-printed JSON
pub fn write_json_report<W: Write>(out: &mut W, report: &SearchReport) -> io::Result<()> {
    let json = JsonReport {
        rows: report.grid.rows(),
        cols: report.grid.cols(),
        words: &report.words,
        matches: &report.positions,
        word_counts: report.word_counts(),
        per_worker: &report.per_worker,
        summary: &report.summary,
    };
    serde_json::to_writer_pretty(&mut *out, &json).map_err(io::Error::other)?;
    writeln!(out)
}
