use std::fs;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::core_api::{
    CategoryReport, CoreError, CoreErrorCode, ExtractReport, ItemOutcome, ItemStatus, Session,
};
use crate::item::ItemRecord;
use crate::layout::CategoryDescriptor;
use crate::naming::{DEFAULT_TEMPLATE, OUTPUT_EXTENSION, format_file_stem};

pub const DEFAULT_OUTDIR: &str = "out";

/// Run configuration, fixed for the lifetime of an [`Extractor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub outdir: PathBuf,
    pub template: String,
    pub overwrite: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            outdir: PathBuf::from(DEFAULT_OUTDIR),
            template: DEFAULT_TEMPLATE.to_string(),
            overwrite: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Extractor {
    options: ExtractOptions,
}

impl Extractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    pub fn category_dir(&self, descriptor: &CategoryDescriptor) -> PathBuf {
        self.options.outdir.join(descriptor.name)
    }

    pub fn output_path(&self, descriptor: &CategoryDescriptor, item: &ItemRecord) -> PathBuf {
        let stem = format_file_stem(&self.options.template, item);
        debug!(category = descriptor.name, "{stem}");
        self.category_dir(descriptor)
            .join(format!("{stem}.{OUTPUT_EXTENSION}"))
    }

    /// Extract every occupied slot of every category.
    ///
    /// Read failures abort the run. Write failures only fail the item they
    /// belong to; files written before a failure are left in place.
    pub fn run<R: Read + Seek>(
        &self,
        session: &mut Session<R>,
        descriptors: &[CategoryDescriptor],
    ) -> Result<ExtractReport, CoreError> {
        let mut categories = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            categories.push(self.extract_category(session, descriptor)?);
        }
        Ok(ExtractReport {
            region: session.region(),
            scores: session.scores(),
            categories,
        })
    }

    fn extract_category<R: Read + Seek>(
        &self,
        session: &mut Session<R>,
        descriptor: &CategoryDescriptor,
    ) -> Result<CategoryReport, CoreError> {
        let shelf = session.shelf(descriptor)?;
        let mut items = Vec::with_capacity(shelf.len());

        for entry in &shelf {
            let item = session.item(*entry, descriptor)?;
            let path = self.output_path(descriptor, &item);
            let status = match self.write_item(session, descriptor, &item, &path)? {
                Ok(status) => status,
                Err(e) => {
                    warn!(path = %path.display(), "skipping item: {e}");
                    ItemStatus::Failed { message: e.message }
                }
            };
            items.push(ItemOutcome {
                full_code: item.full_code(),
                path,
                status,
            });
        }

        info!(
            category = descriptor.name,
            found = shelf.len(),
            "extracted category"
        );
        Ok(CategoryReport {
            category: descriptor.name.to_string(),
            found: shelf.len(),
            items,
        })
    }

    // Outer error: fatal read failure. Inner error: this item could not be
    // written.
    fn write_item<R: Read + Seek>(
        &self,
        session: &mut Session<R>,
        descriptor: &CategoryDescriptor,
        item: &ItemRecord,
        path: &Path,
    ) -> Result<Result<ItemStatus, CoreError>, CoreError> {
        let dir = self.category_dir(descriptor);
        if let Err(e) = fs::create_dir_all(&dir) {
            return Ok(Err(output_error(&dir, e)));
        }

        if !self.options.overwrite && path.exists() {
            debug!(path = %path.display(), "file already exists; skipping");
            return Ok(Ok(ItemStatus::SkippedExisting));
        }

        let payload = session.payload(item, descriptor)?;
        Ok(fs::write(path, payload)
            .map(|()| ItemStatus::Written)
            .map_err(|e| output_error(path, e)))
    }
}

fn output_error(path: &Path, err: std::io::Error) -> CoreError {
    CoreError::new(
        CoreErrorCode::OutputUnavailable,
        format!("failed to create {}: {err}", path.display()),
    )
}
