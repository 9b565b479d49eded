use std::fmt::Write as _;

use mio_core::core_api::{
    CategoryReport, CategoryScan, ExtractReport, ItemOutcome, ItemStatus, ScanReport,
};
use mio_core::item::ItemRecord;
use mio_core::version::RegionScores;
use serde_json::{Map as JsonMap, Value as JsonValue};

const CODE_COL_WIDTH: usize = 20;
const NAME_COL_WIDTH: usize = 26;
const AUTHOR_COL_WIDTH: usize = 26;
const BRAND_COL_WIDTH: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRenderOptions {
    /// Also list every written/skipped item, not just failures.
    pub verbose: bool,
}

pub fn render_scan_json(report: &ScanReport) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert(
        "region".to_string(),
        JsonValue::String(report.region.as_str().to_string()),
    );
    out.insert("scores".to_string(), scores_to_json(report.scores));
    out.insert(
        "categories".to_string(),
        JsonValue::Array(report.categories.iter().map(scan_category_to_json).collect()),
    );
    JsonValue::Object(out)
}

pub fn render_extract_json(report: &ExtractReport) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert(
        "region".to_string(),
        JsonValue::String(report.region.as_str().to_string()),
    );
    out.insert("scores".to_string(), scores_to_json(report.scores));
    out.insert(
        "categories".to_string(),
        JsonValue::Array(
            report
                .categories
                .iter()
                .map(extract_category_to_json)
                .collect(),
        ),
    );

    let mut totals = JsonMap::new();
    totals.insert("written".to_string(), JsonValue::from(report.written()));
    totals.insert("skipped".to_string(), JsonValue::from(report.skipped()));
    totals.insert("failed".to_string(), JsonValue::from(report.failed()));
    out.insert("totals".to_string(), JsonValue::Object(totals));
    JsonValue::Object(out)
}

pub fn render_scan_text(report: &ScanReport, options: TextRenderOptions) -> String {
    let mut out = String::new();
    if options.verbose {
        write_region_line(&mut out, report.region.as_str(), report.scores);
    }
    for category in &report.categories {
        let _ = writeln!(out, "Found {} {}s", category.found(), category.category);
        for item in &category.items {
            write_item_row(&mut out, item);
        }
    }
    out
}

pub fn render_extract_text(report: &ExtractReport, options: TextRenderOptions) -> String {
    let mut out = String::new();
    if options.verbose {
        write_region_line(&mut out, report.region.as_str(), report.scores);
    }
    for category in &report.categories {
        let _ = writeln!(out, "Found {} {}s", category.found, category.category);
        for item in &category.items {
            write_outcome_row(&mut out, item, options);
        }
    }
    let _ = writeln!(
        out,
        "Wrote {} files ({} skipped, {} failed)",
        report.written(),
        report.skipped(),
        report.failed()
    );
    out
}

fn scores_to_json(scores: RegionScores) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert("primary".to_string(), JsonValue::from(scores.primary));
    out.insert("secondary".to_string(), JsonValue::from(scores.secondary));
    JsonValue::Object(out)
}

fn scan_category_to_json(category: &CategoryScan) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert(
        "category".to_string(),
        JsonValue::String(category.category.clone()),
    );
    out.insert("found".to_string(), JsonValue::from(category.found()));
    out.insert(
        "items".to_string(),
        JsonValue::Array(category.items.iter().map(item_to_json).collect()),
    );
    JsonValue::Object(out)
}

fn item_to_json(item: &ItemRecord) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert("slot".to_string(), JsonValue::from(item.slot));
    out.insert("code".to_string(), JsonValue::String(item.full_code()));
    out.insert("name".to_string(), JsonValue::String(item.name.clone()));
    out.insert("author".to_string(), JsonValue::String(item.author.clone()));
    out.insert("brand".to_string(), JsonValue::String(item.brand.clone()));
    out.insert(
        "payload_offset".to_string(),
        JsonValue::String(format!("{:#x}", item.payload_offset)),
    );
    JsonValue::Object(out)
}

fn extract_category_to_json(category: &CategoryReport) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert(
        "category".to_string(),
        JsonValue::String(category.category.clone()),
    );
    out.insert("found".to_string(), JsonValue::from(category.found));
    out.insert(
        "items".to_string(),
        JsonValue::Array(category.items.iter().map(outcome_to_json).collect()),
    );
    JsonValue::Object(out)
}

fn outcome_to_json(item: &ItemOutcome) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert("code".to_string(), JsonValue::String(item.full_code.clone()));
    out.insert(
        "path".to_string(),
        JsonValue::String(item.path.display().to_string()),
    );
    let status = match &item.status {
        ItemStatus::Written => "written",
        ItemStatus::SkippedExisting => "skipped",
        ItemStatus::Failed { message } => {
            out.insert("error".to_string(), JsonValue::String(message.clone()));
            "failed"
        }
    };
    out.insert("status".to_string(), JsonValue::String(status.to_string()));
    JsonValue::Object(out)
}

fn write_region_line(out: &mut String, region: &str, scores: RegionScores) {
    let _ = writeln!(
        out,
        "Using {region} save region (scores: primary {}, secondary {})",
        scores.primary, scores.secondary
    );
}

fn write_item_row(out: &mut String, item: &ItemRecord) {
    let _ = writeln!(
        out,
        "  {:<code_w$} {:<name_w$} {:<author_w$} {:<brand_w$} {:#09x}",
        fit_column(&item.full_code(), CODE_COL_WIDTH),
        fit_column(&item.name, NAME_COL_WIDTH),
        fit_column(&item.author, AUTHOR_COL_WIDTH),
        fit_column(&item.brand, BRAND_COL_WIDTH),
        item.payload_offset,
        code_w = CODE_COL_WIDTH,
        name_w = NAME_COL_WIDTH,
        author_w = AUTHOR_COL_WIDTH,
        brand_w = BRAND_COL_WIDTH,
    );
}

fn write_outcome_row(out: &mut String, item: &ItemOutcome, options: TextRenderOptions) {
    match &item.status {
        ItemStatus::Written if options.verbose => {
            let _ = writeln!(out, "  wrote {}", item.path.display());
        }
        ItemStatus::SkippedExisting if options.verbose => {
            let _ = writeln!(out, "  skipped {} (already exists)", item.path.display());
        }
        ItemStatus::Failed { message } => {
            let _ = writeln!(out, "  error: {} ({message})", item.full_code);
        }
        _ => {}
    }
}

fn fit_column(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 3 {
        return value.chars().take(width).collect();
    }

    let mut out = String::with_capacity(width);
    for ch in value.chars().take(width - 3) {
        out.push(ch);
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::fit_column;

    #[test]
    fn fit_column_truncates_with_ellipsis() {
        assert_eq!(fit_column("short", 10), "short");
        assert_eq!(fit_column("a very long name", 8), "a ver...");
        assert_eq!(fit_column("abcdef", 2), "ab");
    }
}
