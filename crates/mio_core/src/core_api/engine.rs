use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use tracing::{debug, info};

use crate::item::{ItemRecord, decode_item};
use crate::layout::{CategoryDescriptor, SAVE_MAGIC, SaveRegion};
use crate::reader::SaveReader;
use crate::shelf::{Shelf, ShelfEntry, scan_shelf};
use crate::version::{RegionScores, locate_regions};

use super::error::{CoreError, CoreErrorCode};
use super::types::{CategoryScan, ScanReport};

#[derive(Debug, Default, Clone, Copy)]
pub struct Engine;

/// An opened save with its active region already chosen.
pub struct Session<R> {
    reader: SaveReader<R>,
    scores: RegionScores,
    region: SaveRegion,
}

impl Engine {
    pub fn new() -> Self {
        Self
    }

    pub fn open_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<Session<BufReader<File>>, CoreError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| CoreError::io(&format!("failed to open {}", path.display()), e))?;
        self.open(BufReader::new(file))
    }

    pub fn open_bytes<B: AsRef<[u8]>>(&self, bytes: B) -> Result<Session<Cursor<B>>, CoreError> {
        self.open(Cursor::new(bytes))
    }

    pub fn open<R: Read + Seek>(&self, reader: R) -> Result<Session<R>, CoreError> {
        let mut reader = SaveReader::new(reader);

        let magic = reader
            .read_array::<{ SAVE_MAGIC.len() }>(0)
            .map_err(|e| CoreError::io("failed to read save header", e))?;
        if magic != SAVE_MAGIC {
            return Err(CoreError::new(
                CoreErrorCode::FormatMismatch,
                "file does not appear to be a WarioWare D.I.Y. save",
            ));
        }

        let scores = locate_regions(&mut reader)
            .map_err(|e| CoreError::io("failed to read region headers", e))?;
        let region = scores.active();
        debug!(%region, "selected active save region");

        Ok(Session {
            reader,
            scores,
            region,
        })
    }
}

impl<R: Read + Seek> Session<R> {
    pub fn region(&self) -> SaveRegion {
        self.region
    }

    pub fn scores(&self) -> RegionScores {
        self.scores
    }

    pub fn shelf(&mut self, descriptor: &CategoryDescriptor) -> Result<Shelf, CoreError> {
        let shelf = scan_shelf(&mut self.reader, self.region, descriptor).map_err(|e| {
            CoreError::io(&format!("failed to read {} catalog", descriptor.name), e)
        })?;
        info!(category = descriptor.name, found = shelf.len(), "scanned shelf");
        Ok(shelf)
    }

    pub fn item(
        &mut self,
        entry: ShelfEntry,
        descriptor: &CategoryDescriptor,
    ) -> Result<ItemRecord, CoreError> {
        decode_item(&mut self.reader, entry, descriptor).map_err(|e| {
            CoreError::io(
                &format!("failed to read {} slot {}", descriptor.name, entry.slot()),
                e,
            )
        })
    }

    pub fn items(&mut self, descriptor: &CategoryDescriptor) -> Result<Vec<ItemRecord>, CoreError> {
        let shelf = self.shelf(descriptor)?;
        shelf
            .into_iter()
            .map(|entry| self.item(entry, descriptor))
            .collect()
    }

    /// Raw payload of an item: exactly `item_size` bytes, zero-filled past
    /// the end of a truncated save.
    pub fn payload(
        &mut self,
        item: &ItemRecord,
        descriptor: &CategoryDescriptor,
    ) -> Result<Vec<u8>, CoreError> {
        let range = item.payload_range(descriptor);
        self.reader.read_bytes(range.start, range.len).map_err(|e| {
            let context = format!(
                "failed to read {} payload at {:#x}",
                descriptor.name, range.start
            );
            CoreError::io(&context, e)
        })
    }

    pub fn scan(&mut self, descriptors: &[CategoryDescriptor]) -> Result<ScanReport, CoreError> {
        let mut categories = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            categories.push(CategoryScan {
                category: descriptor.name.to_string(),
                items: self.items(descriptor)?,
            });
        }
        Ok(ScanReport {
            region: self.region,
            scores: self.scores,
            categories,
        })
    }
}
