use std::path::PathBuf;

use mio_core::core_api::{
    CategoryReport, CategoryScan, ExtractReport, ItemOutcome, ItemStatus, ScanReport,
};
use mio_core::item::ItemRecord;
use mio_core::layout::SaveRegion;
use mio_core::version::RegionScores;
use mio_render::{
    TextRenderOptions, render_extract_json, render_extract_text, render_scan_json,
    render_scan_text,
};

fn scores() -> RegionScores {
    RegionScores {
        primary: 12,
        secondary: 30,
    }
}

fn jump() -> ItemRecord {
    ItemRecord {
        slot: 1,
        brand: "Acme".to_string(),
        name: "Jump".to_string(),
        author: "Kat".to_string(),
        code: "AB01".to_string(),
        item_number_index: 0,
        revision: 0,
        payload_offset: 0x12_0000,
    }
}

fn scan_report() -> ScanReport {
    ScanReport {
        region: SaveRegion::Secondary,
        scores: scores(),
        categories: vec![
            CategoryScan {
                category: "microgame".to_string(),
                items: vec![jump()],
            },
            CategoryScan {
                category: "record".to_string(),
                items: Vec::new(),
            },
        ],
    }
}

fn extract_report() -> ExtractReport {
    ExtractReport {
        region: SaveRegion::Primary,
        scores: scores(),
        categories: vec![CategoryReport {
            category: "comic".to_string(),
            found: 3,
            items: vec![
                ItemOutcome {
                    full_code: "G-CM01-0001-000".to_string(),
                    path: PathBuf::from("out/comic/a.mio"),
                    status: ItemStatus::Written,
                },
                ItemOutcome {
                    full_code: "G-CM02-0002-000".to_string(),
                    path: PathBuf::from("out/comic/b.mio"),
                    status: ItemStatus::SkippedExisting,
                },
                ItemOutcome {
                    full_code: "G-CM03-0003-000".to_string(),
                    path: PathBuf::from("out/comic/c.mio"),
                    status: ItemStatus::Failed {
                        message: "permission denied".to_string(),
                    },
                },
            ],
        }],
    }
}

#[test]
fn scan_json_uses_canonical_key_order() {
    let value = render_scan_json(&scan_report());
    let keys: Vec<&str> = value
        .as_object()
        .expect("json should be an object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, ["region", "scores", "categories"]);

    let item = &value["categories"][0]["items"][0];
    let item_keys: Vec<&str> = item
        .as_object()
        .expect("item should be an object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        item_keys,
        ["slot", "code", "name", "author", "brand", "payload_offset"]
    );
    assert_eq!(value["region"], "secondary");
    assert_eq!(item["code"], "G-AB01-0001-000");
    assert_eq!(item["payload_offset"], "0x120000");
    assert_eq!(value["categories"][1]["found"], 0);
}

#[test]
fn scan_text_lists_found_counts_and_items() {
    let text = render_scan_text(&scan_report(), TextRenderOptions::default());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Found 1 microgames");
    assert!(lines[1].starts_with("  G-AB01-0001-000"));
    assert!(lines[1].contains("Jump"));
    assert!(lines[1].ends_with("0x0120000"));
    assert_eq!(lines[2], "Found 0 records");
}

#[test]
fn verbose_text_reports_region_choice() {
    let text = render_scan_text(&scan_report(), TextRenderOptions { verbose: true });
    assert_eq!(
        text.lines().next(),
        Some("Using secondary save region (scores: primary 12, secondary 30)")
    );
}

#[test]
fn extract_json_reports_status_and_totals() {
    let value = render_extract_json(&extract_report());
    let items = value["categories"][0]["items"]
        .as_array()
        .expect("items should be an array");
    assert_eq!(items[0]["status"], "written");
    assert_eq!(items[1]["status"], "skipped");
    assert_eq!(items[2]["status"], "failed");
    assert_eq!(items[2]["error"], "permission denied");
    assert_eq!(value["totals"]["written"], 1);
    assert_eq!(value["totals"]["skipped"], 1);
    assert_eq!(value["totals"]["failed"], 1);
}

#[test]
fn extract_text_always_shows_failures() {
    let quiet = render_extract_text(&extract_report(), TextRenderOptions::default());
    assert_eq!(
        quiet,
        "Found 3 comics\n  error: G-CM03-0003-000 (permission denied)\nWrote 1 files (1 skipped, 1 failed)\n"
    );

    let verbose = render_extract_text(&extract_report(), TextRenderOptions { verbose: true });
    assert!(verbose.contains("  wrote out/comic/a.mio\n"));
    assert!(verbose.contains("  skipped out/comic/b.mio (already exists)\n"));
}
