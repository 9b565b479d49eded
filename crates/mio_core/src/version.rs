//! Picks which of the two save-region copies is the current one.
//!
//! The score is the plain sum of four bytes in the region header. It is not a
//! checksum and its real meaning in the format is unconfirmed; it only works
//! as a "most recently written copy" heuristic. Keep it exactly as is until
//! the real versioning field is understood.

use std::io::{self, Read, Seek};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layout::{REGION_VERSION_LEN, REGION_VERSION_OFFSET, SaveRegion};
use crate::reader::SaveReader;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionScores {
    pub primary: u32,
    pub secondary: u32,
}

impl RegionScores {
    /// Secondary wins only on a strictly higher score.
    pub fn active(&self) -> SaveRegion {
        if self.secondary > self.primary {
            SaveRegion::Secondary
        } else {
            SaveRegion::Primary
        }
    }
}

pub fn region_score<R: Read + Seek>(
    r: &mut SaveReader<R>,
    region_offset: u64,
) -> io::Result<u32> {
    let bytes = r.read_array::<REGION_VERSION_LEN>(region_offset + REGION_VERSION_OFFSET)?;
    Ok(bytes.iter().map(|&b| u32::from(b)).sum())
}

pub fn locate_regions<R: Read + Seek>(r: &mut SaveReader<R>) -> io::Result<RegionScores> {
    let scores = RegionScores {
        primary: region_score(r, SaveRegion::Primary.base())?,
        secondary: region_score(r, SaveRegion::Secondary.base())?,
    };
    debug!(
        primary = scores.primary,
        secondary = scores.secondary,
        "region version scores"
    );
    Ok(scores)
}
