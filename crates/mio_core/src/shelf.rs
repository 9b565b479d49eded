use std::fmt::Write as _;
use std::io::{self, Read, Seek};
use std::num::NonZeroU8;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layout::{CategoryDescriptor, SHELF_STRIDE, SHELF_WINDOW_LEN, SaveRegion};
use crate::reader::SaveReader;

/// An occupied, 1-based slot in a category's catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShelfEntry(NonZeroU8);

impl ShelfEntry {
    pub fn new(slot: u8) -> Option<Self> {
        NonZeroU8::new(slot).map(Self)
    }

    pub fn slot(&self) -> u8 {
        self.0.get()
    }
}

/// Catalog-ordered list of occupied slots for one category.
pub type Shelf = Vec<ShelfEntry>;

/// Collect the non-zero bytes at even positions of a catalog window.
pub fn entries_from_window(window: &[u8]) -> Shelf {
    window
        .iter()
        .step_by(SHELF_STRIDE)
        .filter_map(|&b| ShelfEntry::new(b))
        .collect()
}

pub fn scan_shelf<R: Read + Seek>(
    r: &mut SaveReader<R>,
    region: SaveRegion,
    descriptor: &CategoryDescriptor,
) -> io::Result<Shelf> {
    let range = descriptor.catalog_range(region);
    let mut window = [0u8; SHELF_WINDOW_LEN];
    r.read_at(range.start, &mut window[..range.len])?;
    debug!(
        category = descriptor.name,
        "shelf bytes: {}",
        hex_row(&window)
    );
    Ok(entries_from_window(&window))
}

fn hex_row(window: &[u8]) -> String {
    let mut out = String::with_capacity(window.len() / SHELF_STRIDE * 3);
    for (i, b) in window.iter().step_by(SHELF_STRIDE).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{b:02X}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SHELF_MAX_ENTRIES;

    fn slots(shelf: &Shelf) -> Vec<u8> {
        shelf.iter().map(ShelfEntry::slot).collect()
    }

    #[test]
    fn skips_empty_slots_and_odd_bytes() {
        let mut window = [0u8; SHELF_WINDOW_LEN];
        window[0] = 0x01;
        window[1] = 0x77;
        window[6] = 0x02;
        window[9] = 0x55;
        assert_eq!(slots(&entries_from_window(&window)), [1, 2]);
    }

    #[test]
    fn keeps_catalog_order() {
        let mut window = [0u8; SHELF_WINDOW_LEN];
        window[0] = 9;
        window[2] = 3;
        window[4] = 200;
        assert_eq!(slots(&entries_from_window(&window)), [9, 3, 200]);
    }

    #[test]
    fn full_window_caps_at_ninety() {
        let window = [0xFFu8; SHELF_WINDOW_LEN];
        let shelf = entries_from_window(&window);
        assert_eq!(shelf.len(), SHELF_MAX_ENTRIES);
        assert_eq!(SHELF_MAX_ENTRIES, 90);
    }

    #[test]
    fn zero_is_not_an_entry() {
        assert!(ShelfEntry::new(0).is_none());
        assert_eq!(ShelfEntry::new(255).map(|e| e.slot()), Some(255));
    }

    #[test]
    fn hex_row_shows_even_positions() {
        assert_eq!(hex_row(&[0x01, 0xEE, 0x00, 0xEE, 0xAB]), "01 00 AB");
    }
}
