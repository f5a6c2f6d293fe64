//! Subcommand handlers. Each returns the text `main` prints on stdout.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chrono::Local;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::input::loader::load_data_snapshot;
use crate::models::{BaseData, CustomizedData};
use crate::pipeline::{self, RunOptions};
use crate::render::render_resume;
use crate::state::AppState;

pub async fn run(state: &AppState, options: RunOptions) -> Result<String, AppError> {
    let now = Local::now().naive_local();
    if let Some(ai) = &state.config.ai {
        debug!("AI endpoint {} (model {})", ai.api_url, ai.model);
    }
    let report = pipeline::run(&options, state.assistant(), now).await?;

    let mut summary = format!("Application package created in: {}\n", report.folder.display());
    for path in &report.files {
        if let Some(name) = path.file_name() {
            let _ = writeln!(summary, "  - {}", name.to_string_lossy());
        }
    }
    if !report.ai_used {
        summary.push_str("(generated without AI; content copied from base data)\n");
    }
    Ok(summary)
}

/// Writes the starter base-data template to `path`.
pub fn init(path: &Path, force: bool) -> Result<String, AppError> {
    if path.exists() && !force {
        return Err(AppError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }
    let mut json = serde_json::to_vec_pretty(&BaseData::starter())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("serializing starter data: {e}")))?;
    json.push(b'\n');
    write_output(path, &json)?;
    info!("Wrote starter base data to {}", path.display());
    Ok(format!(
        "Created {}. Fill in your details, then run `cv-creator run -j <job file>`.\n",
        path.display()
    ))
}

/// Re-renders a resume from an archived `customized_data.json`.
pub fn render(data_path: &Path, output: &Path) -> Result<String, AppError> {
    let data = CustomizedData::from_archived(load_data_snapshot(data_path)?);
    let pdf = render_resume(&data)?;
    write_output(output, &pdf)?;
    Ok(format!("Resume rendered: {}\n", output.display()))
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| AppError::ArchiveWrite {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, bytes).map_err(|source| AppError::ArchiveWrite {
        path: path.to_path_buf(),
        source,
    })
}
