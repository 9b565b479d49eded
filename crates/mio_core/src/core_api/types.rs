use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::item::ItemRecord;
use crate::layout::SaveRegion;
use crate::version::RegionScores;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScan {
    pub category: String,
    pub items: Vec<ItemRecord>,
}

impl CategoryScan {
    pub fn found(&self) -> usize {
        self.items.len()
    }
}

/// Everything decodable from a save without touching the filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub region: SaveRegion,
    pub scores: RegionScores,
    pub categories: Vec<CategoryScan>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ItemStatus {
    Written,
    SkippedExisting,
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemOutcome {
    pub full_code: String,
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: ItemStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub category: String,
    pub found: usize,
    pub items: Vec<ItemOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractReport {
    pub region: SaveRegion,
    pub scores: RegionScores,
    pub categories: Vec<CategoryReport>,
}

impl ExtractReport {
    pub fn count(&self, pred: impl Fn(&ItemStatus) -> bool) -> usize {
        self.categories
            .iter()
            .flat_map(|c| c.items.iter())
            .filter(|item| pred(&item.status))
            .count()
    }

    pub fn written(&self) -> usize {
        self.count(|s| matches!(s, ItemStatus::Written))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, ItemStatus::SkippedExisting))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, ItemStatus::Failed { .. }))
    }
}
