use anyhow::Result;
use athtracker_lib::{AthReport, PriceFormat};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Text,
    Table,
    Json,
    Csv,
    Markdown,
}

#[derive(Tabled, Serialize)]
struct AthRow {
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "All-time high")]
    #[serde(rename = "All-time high")]
    high: String,
}

fn build_ath_rows(report: &AthReport, price_format: PriceFormat) -> Vec<AthRow> {
    report
        .events
        .iter()
        .map(|e| AthRow {
            date: e.date.to_string(),
            high: price_format.render(e.high),
        })
        .collect()
}

fn summary_lines(report: &AthReport) -> [String; 2] {
    [
        format!(
            "All-time highs for {} from {} to {}",
            report.symbol, report.range_start, report.range_end
        ),
        format!("Total number of all-time highs: {}", report.total),
    ]
}

/// One line per event, then the range and the count.
pub fn render_text(report: &AthReport, price_format: PriceFormat) -> String {
    let mut out = String::new();
    for event in &report.events {
        out.push_str(&format!(
            "Date: {}, All-time high: {}\n",
            event.date,
            price_format.render(event.high)
        ));
    }
    for line in summary_lines(report) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn render_table(report: &AthReport, price_format: PriceFormat, markdown: bool) -> String {
    let mut table = Table::new(build_ath_rows(report, price_format));
    if markdown {
        table.with(Style::markdown());
    }
    let [range, total] = summary_lines(report);
    format!("{}\n\n{}\n{}\n", table, range, total)
}

pub fn print_report(report: &AthReport, price_format: PriceFormat, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(report, price_format)),
        OutputFormat::Table => print!("{}", render_table(report, price_format, false)),
        OutputFormat::Markdown => print!("{}", render_table(report, price_format, true)),
        OutputFormat::Csv => print_csv(report, price_format)?,
        OutputFormat::Json => print_json(report),
    }
    Ok(())
}

fn write_csv<W: std::io::Write>(writer: W, report: &AthReport, price_format: PriceFormat) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in build_ath_rows(report, price_format) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn print_csv(report: &AthReport, price_format: PriceFormat) -> Result<()> {
    write_csv(std::io::stdout(), report, price_format)
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
