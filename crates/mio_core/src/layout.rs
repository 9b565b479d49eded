use std::fmt;

use serde::{Deserialize, Serialize};

/// First bytes of every WarioWare D.I.Y. save.
pub const SAVE_MAGIC: [u8; 15] = [
    0x0E, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x44, 0x53, 0x4D, 0x49, 0x4F, 0x5F, 0x53,
];

pub const PRIMARY_REGION_OFFSET: u64 = 0x0;
pub const SECONDARY_REGION_OFFSET: u64 = 0x3000;
pub const REGION_VERSION_OFFSET: u64 = 0x14;
pub const REGION_VERSION_LEN: usize = 4;

pub const SHELF_WINDOW_LEN: usize = 0xB4;
pub const SHELF_STRIDE: usize = 2;
pub const SHELF_MAX_ENTRIES: usize = SHELF_WINDOW_LEN / SHELF_STRIDE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub offset: u32,
    pub width: usize,
}

// Item record fields, relative to the item's payload offset.
pub const FIELD_BRAND: FieldSpec = FieldSpec { offset: 0x35, width: 9 };
pub const FIELD_NAME: FieldSpec = FieldSpec { offset: 0x1C, width: 0x18 };
pub const FIELD_AUTHOR: FieldSpec = FieldSpec { offset: 0x48, width: 0x18 };
pub const FIELD_CODE: FieldSpec = FieldSpec { offset: 0xCF, width: 4 };
pub const FIELD_ITEM_NUMBER: FieldSpec = FieldSpec { offset: 0xD4, width: 1 };
pub const FIELD_REVISION: FieldSpec = FieldSpec { offset: 0x0D, width: 1 };

/// Absolute span of the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub len: usize,
}

/// One of the two redundant copies of the save data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaveRegion {
    Primary,
    Secondary,
}

impl SaveRegion {
    pub fn base(&self) -> u64 {
        match *self {
            Self::Primary => PRIMARY_REGION_OFFSET,
            Self::Secondary => SECONDARY_REGION_OFFSET,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

impl fmt::Display for SaveRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#x})", self.as_str(), self.base())
    }
}

/// Layout constants for one kind of extractable item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDescriptor {
    /// Directory name used for extracted files.
    pub name: &'static str,
    /// Absolute offset of slot 1's payload.
    pub data_start: u32,
    /// Catalog table offset, relative to the active region.
    pub catalog_offset: u32,
    /// Payload size of one item, always non-zero.
    pub item_size: u32,
}

pub const MICROGAME: CategoryDescriptor = CategoryDescriptor {
    name: "microgame",
    data_start: 0x12_0000,
    catalog_offset: 0x6E0,
    item_size: 0x1_0000,
};

pub const RECORD: CategoryDescriptor = CategoryDescriptor {
    name: "record",
    data_start: 0x92_0000,
    catalog_offset: 0x796,
    item_size: 0x2000,
};

pub const COMIC: CategoryDescriptor = CategoryDescriptor {
    name: "comic",
    data_start: 0xA2_0000,
    catalog_offset: 0x84C,
    item_size: 0x3800,
};

pub const DESCRIPTORS: [CategoryDescriptor; 3] = [MICROGAME, RECORD, COMIC];

impl CategoryDescriptor {
    /// Absolute catalog window for the given region.
    pub fn catalog_range(&self, region: SaveRegion) -> ByteRange {
        ByteRange {
            start: region.base() + u64::from(self.catalog_offset),
            len: SHELF_WINDOW_LEN,
        }
    }

    /// `data_start + (slot - 1) * item_size`. Slot 0 marks an empty shelf
    /// position and is filtered out before reaching here; it saturates to
    /// slot 1 rather than wrapping.
    pub fn payload_offset(&self, slot: u8) -> u32 {
        let index = u32::from(slot.saturating_sub(1));
        self.data_start + index * self.item_size
    }
}
