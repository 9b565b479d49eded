use std::io::{self, Read, Seek};

use serde::{Deserialize, Serialize};

use crate::layout::{
    ByteRange, CategoryDescriptor, FIELD_AUTHOR, FIELD_BRAND, FIELD_CODE, FIELD_ITEM_NUMBER,
    FIELD_NAME, FIELD_REVISION, FieldSpec,
};
use crate::reader::SaveReader;
use crate::shelf::ShelfEntry;

/// Metadata of one stored item, decoded from the head of its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub slot: u8,
    pub brand: String,
    pub name: String,
    pub author: String,
    pub code: String,
    pub item_number_index: u8,
    pub revision: u8,
    pub payload_offset: u32,
}

impl ItemRecord {
    /// `G-{code}-{number:04}-{revision:03}`, with the 0-based item number
    /// shown 1-based.
    pub fn full_code(&self) -> String {
        format_full_code(&self.code, self.item_number_index, self.revision)
    }

    /// Span copied verbatim into the item's output file.
    pub fn payload_range(&self, descriptor: &CategoryDescriptor) -> ByteRange {
        ByteRange {
            start: u64::from(self.payload_offset),
            len: descriptor.item_size as usize,
        }
    }
}

pub fn format_full_code(code: &str, item_number_index: u8, revision: u8) -> String {
    let number = u16::from(item_number_index) + 1;
    format!("G-{code}-{number:04}-{revision:03}")
}

pub fn decode_item<R: Read + Seek>(
    r: &mut SaveReader<R>,
    entry: ShelfEntry,
    descriptor: &CategoryDescriptor,
) -> io::Result<ItemRecord> {
    let payload_offset = descriptor.payload_offset(entry.slot());
    let base = u64::from(payload_offset);
    let at = |field: FieldSpec| base + u64::from(field.offset);

    let brand = r.read_text_field(at(FIELD_BRAND), FIELD_BRAND.width)?;
    let name = r.read_text_field(at(FIELD_NAME), FIELD_NAME.width)?;
    let author = r.read_text_field(at(FIELD_AUTHOR), FIELD_AUTHOR.width)?;
    let code = r
        .read_text_field(at(FIELD_CODE), FIELD_CODE.width)?
        .to_ascii_uppercase();
    let item_number_index = r.read_u8(at(FIELD_ITEM_NUMBER))?;
    let revision = r.read_u8(at(FIELD_REVISION))?;

    Ok(ItemRecord {
        slot: entry.slot(),
        brand,
        name,
        author,
        code,
        item_number_index,
        revision,
        payload_offset,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::layout::RECORD;

    fn put(data: &mut [u8], at: usize, bytes: &[u8]) {
        data[at..at + bytes.len()].copy_from_slice(bytes);
    }

    #[test]
    fn full_code_pads_number_and_revision() {
        assert_eq!(format_full_code("AB01", 0, 0), "G-AB01-0001-000");
        assert_eq!(format_full_code("AB01", 41, 3), "G-AB01-0042-003");
        assert_eq!(format_full_code("ZZZZ", 255, 255), "G-ZZZZ-0256-255");
    }

    #[test]
    fn decodes_fields_of_second_slot() {
        let base = (RECORD.data_start + RECORD.item_size) as usize;
        let mut data = vec![0u8; base + RECORD.item_size as usize];
        put(&mut data, base + 0x35, b"NINTENDO!");
        put(&mut data, base + 0x1C, b"Beat\0junk");
        put(&mut data, base + 0x48, b"Mona");
        put(&mut data, base + 0xCF, b"ab01");
        data[base + 0xD4] = 41;
        data[base + 0x0D] = 3;

        let mut r = SaveReader::new(Cursor::new(data));
        let entry = ShelfEntry::new(2).unwrap();
        let item = decode_item(&mut r, entry, &RECORD).unwrap();

        assert_eq!(item.payload_offset, 0x92_2000);
        assert_eq!(
            item.payload_range(&RECORD),
            ByteRange { start: 0x92_2000, len: 0x2000 }
        );
        assert_eq!(item.brand, "NINTENDO!");
        assert_eq!(item.name, "Beat");
        assert_eq!(item.author, "Mona");
        assert_eq!(item.code, "AB01");
        assert_eq!(item.full_code(), "G-AB01-0042-003");
    }

    #[test]
    fn code_uppercasing_keeps_non_ascii_as_is() {
        let base = RECORD.data_start as usize;
        let mut data = vec![0u8; base + 0x100];
        put(&mut data, base + 0xCF, "aß".as_bytes());
        put(&mut data, base + 0xD2, b"q");

        let mut r = SaveReader::new(Cursor::new(data));
        let entry = ShelfEntry::new(1).unwrap();
        let item = decode_item(&mut r, entry, &RECORD).unwrap();
        assert_eq!(item.code, "AßQ");
        assert_eq!(item.code.chars().count(), 3);
    }

    #[test]
    fn truncated_container_yields_builtin_fields() {
        let mut r = SaveReader::new(Cursor::new(vec![0u8; 16]));
        let entry = ShelfEntry::new(1).unwrap();
        let item = decode_item(&mut r, entry, &RECORD).unwrap();
        assert_eq!(item.brand, "builtin");
        assert_eq!(item.name, "builtin");
        assert_eq!(item.author, "builtin");
        assert_eq!(item.code, "BUILTIN");
        assert_eq!(item.full_code(), "G-BUILTIN-0001-000");
    }
}
