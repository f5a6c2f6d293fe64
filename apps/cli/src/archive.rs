//! Per-run output folder: `applications/<Company>_<YYYYMMDD_HHMMSS>/`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AppError;

pub const DEFAULT_OUTPUT_ROOT: &str = "applications";

pub const RESUME_FILE: &str = "resume.pdf";
pub const COVER_LETTER_FILE: &str = "cover_letter.pdf";
pub const CUSTOMIZED_DATA_FILE: &str = "customized_data.json";
pub const BASE_SNAPSHOT_FILE: &str = "base_data_snapshot.json";
pub const PARSED_JOB_FILE: &str = "parsed_job_description.json";
pub const PARSED_COMPANY_FILE: &str = "parsed_company_info.json";

const FALLBACK_NAME: &str = "Company";

/// Keeps alphanumerics, spaces, `-` and `_`, trims, then turns spaces into
/// underscores. Empty results fall back to `Company`.
pub fn sanitize_company_name(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    let safe = kept.trim().replace(' ', "_");
    if safe.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        safe
    }
}

pub fn folder_name(company: &str, timestamp: NaiveDateTime) -> String {
    format!(
        "{}_{}",
        sanitize_company_name(company),
        timestamp.format("%Y%m%d_%H%M%S")
    )
}

/// An archive folder that exists on disk.
#[derive(Debug)]
pub struct Archive {
    dir: PathBuf,
}

impl Archive {
    /// Creates `<root>/<folder_name>` and any missing parents. Reusing an
    /// existing folder is allowed; files inside are overwritten.
    pub fn create(root: &Path, company: &str, timestamp: NaiveDateTime) -> Result<Self, AppError> {
        let dir = root.join(folder_name(company, timestamp));
        fs::create_dir_all(&dir).map_err(|source| AppError::ArchiveWrite {
            path: dir.clone(),
            source,
        })?;
        info!("Created archive folder {}", dir.display());
        Ok(Archive { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write_bytes(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, AppError> {
        let path = self.dir.join(file_name);
        fs::write(&path, bytes).map_err(|source| AppError::ArchiveWrite {
            path: path.clone(),
            source,
        })?;
        debug!("Wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }

    /// Pretty-printed JSON with a trailing newline.
    pub fn write_json<T: Serialize + ?Sized>(
        &self,
        file_name: &str,
        value: &T,
    ) -> Result<PathBuf, AppError> {
        let mut json = serde_json::to_vec_pretty(value)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("serializing {file_name}: {e}")))?;
        json.push(b'\n');
        self.write_bytes(file_name, &json)
    }
}
