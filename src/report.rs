//! Report output: the fixed-width frequency table, or CSV

use crate::error::Result;
use crate::stats::{LeadRow, RankedReport};
use crate::tally::TRICK_BUCKETS;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Csv,
}

pub fn write_report<W: Write>(report: &RankedReport, format: ReportFormat, out: W) -> Result<()> {
    match format {
        ReportFormat::Text => write_text(report, out),
        ReportFormat::Csv => write_csv(report, out),
    }
}

/// Write the fixed-width table:
///
/// ```text
///                          Frequency of Tricks Taken
/// Ld   Avg  %Set    00 01 02 03 04 05 06 07 08 09 10 11 12 13
/// HK  4.50  50.00* [00 00 00 00 01 01 00 00 00 00 00 00 00 00 ]
/// ```
pub fn write_text<W: Write>(report: &RankedReport, mut out: W) -> Result<()> {
    let width = count_width(report.highest_count());

    writeln!(out, "{:>50}", "Frequency of Tricks Taken")?;
    write!(out, "Ld   Avg  %Set    ")?;
    for tricks in 0..TRICK_BUCKETS {
        write!(out, "{:0width$} ", tricks, width = width)?;
    }
    writeln!(out)?;

    for row in &report.rows {
        write!(
            out,
            "{}  {:4.2} {:6.2}{} [",
            row.card,
            row.average_tricks,
            row.set_percentage,
            if row.best_for_set { '*' } else { ' ' }
        )?;
        for n in &row.counts {
            write!(out, "{:0width$} ", n, width = width)?;
        }
        writeln!(out, "]")?;
    }
    out.flush()?;
    Ok(())
}

/// Digits needed for the largest count, at least two
fn count_width(highest: u32) -> usize {
    highest.to_string().len().max(2)
}

pub fn write_csv<W: Write>(report: &RankedReport, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    let mut header = vec![
        "lead".to_string(),
        "avg_tricks".to_string(),
        "set_pct".to_string(),
        "best".to_string(),
    ];
    header.extend((0..TRICK_BUCKETS).map(|t| format!("t{}", t)));
    writer.write_record(&header)?;

    for row in &report.rows {
        writer.write_record(csv_record(row))?;
    }
    writer.flush()?;
    Ok(())
}

fn csv_record(row: &LeadRow) -> Vec<String> {
    let mut record = vec![
        row.card.to_string(),
        format!("{:.2}", row.average_tricks),
        format!("{:.2}", row.set_percentage),
        row.best_for_set.to_string(),
    ];
    record.extend(row.counts.iter().map(|n| n.to_string()));
    record
}
