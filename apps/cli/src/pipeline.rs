//! The linear run: load → parse → customize → render → archive.
//!
//! Nothing touches the output directory until every earlier stage has
//! succeeded, so a failed run leaves no archive folder behind.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{info, warn};

use crate::archive::{
    Archive, BASE_SNAPSHOT_FILE, COVER_LETTER_FILE, CUSTOMIZED_DATA_FILE, PARSED_COMPANY_FILE,
    PARSED_JOB_FILE, RESUME_FILE,
};
use crate::errors::AppError;
use crate::generation::{ContentAssistant, Customization};
use crate::input::heuristic::{parse_company_text, parse_job_text};
use crate::input::{ensure_exists, load_base_data, load_job_inputs, Source};
use crate::models::{BaseRecord, CompanyInfo, CustomizedData, JobInfo};
use crate::render::{render_cover_letter, render_resume, CoverLetter};

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub job_path: PathBuf,
    pub company_path: Option<PathBuf>,
    pub base_path: PathBuf,
    pub output_root: PathBuf,
    pub use_ai: bool,
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub folder: PathBuf,
    pub files: Vec<PathBuf>,
    pub ai_used: bool,
}

/// Executes one run. `assistant` is consulted only when `options.use_ai` is
/// set; `now` names the archive folder and dates the cover letter.
pub async fn run(
    options: &RunOptions,
    assistant: Option<&dyn ContentAssistant>,
    now: NaiveDateTime,
) -> Result<RunReport, AppError> {
    let mut required: Vec<&Path> = vec![&options.job_path];
    if let Some(company_path) = &options.company_path {
        required.push(company_path);
    }
    required.push(&options.base_path);
    ensure_exists(required)?;

    let base = load_base_data(&options.base_path)?;
    let sources = load_job_inputs(&options.job_path, options.company_path.as_deref())?;

    let assistant = match (options.use_ai, assistant) {
        (true, Some(assistant)) => Some(assistant),
        (true, None) => {
            warn!("--use-ai requested but no AI API key is configured; continuing without AI");
            None
        }
        (false, _) => None,
    };

    let job = resolve_job(sources.job, assistant).await?;
    let company = resolve_company(sources.company, assistant).await?;
    info!("Preparing application for '{}' at {}", job.title, company.name);

    let (customized, letter) = match assistant {
        Some(assistant) => {
            let Customization { data, cover_letter } =
                assistant.customize(&base, &job, &company).await?;
            let letter = CoverLetter::with_body(&data, &job, &company, now.date(), cover_letter);
            (data, letter)
        }
        None => {
            let letter = CoverLetter::from_template(&base, &job, &company, now.date())?;
            (CustomizedData::unchanged(&base), letter)
        }
    };

    let resume_pdf = render_resume(&customized)?;
    let letter_pdf = render_cover_letter(&letter)?;
    info!(
        "Rendered resume ({} bytes) and cover letter ({} bytes)",
        resume_pdf.len(),
        letter_pdf.len()
    );

    let archive = Archive::create(&options.output_root, &company.name, now)?;
    let files = write_archive(
        &archive,
        &resume_pdf,
        &letter_pdf,
        &customized,
        &base,
        &job,
        &company,
    )?;

    Ok(RunReport {
        folder: archive.dir().to_path_buf(),
        files,
        ai_used: assistant.is_some(),
    })
}

async fn resolve_job(
    source: Source<JobInfo>,
    assistant: Option<&dyn ContentAssistant>,
) -> Result<JobInfo, AppError> {
    match (source, assistant) {
        (Source::Structured(job), _) => Ok(job),
        (Source::Text(text), Some(assistant)) => {
            info!("Parsing plain-text job description with AI");
            assistant.parse_job(&text).await
        }
        (Source::Text(text), None) => {
            info!("Parsing plain-text job description heuristically");
            Ok(parse_job_text(&text))
        }
    }
}

async fn resolve_company(
    source: Source<CompanyInfo>,
    assistant: Option<&dyn ContentAssistant>,
) -> Result<CompanyInfo, AppError> {
    match (source, assistant) {
        (Source::Structured(company), _) => Ok(company),
        (Source::Text(text), Some(assistant)) => {
            info!("Parsing plain-text company information with AI");
            assistant.parse_company(&text).await
        }
        (Source::Text(text), None) => {
            info!("Parsing plain-text company information heuristically");
            Ok(parse_company_text(&text))
        }
    }
}

fn write_archive(
    archive: &Archive,
    resume_pdf: &[u8],
    letter_pdf: &[u8],
    customized: &CustomizedData,
    base: &BaseRecord,
    job: &JobInfo,
    company: &CompanyInfo,
) -> Result<Vec<PathBuf>, AppError> {
    Ok(vec![
        archive.write_bytes(RESUME_FILE, resume_pdf)?,
        archive.write_bytes(COVER_LETTER_FILE, letter_pdf)?,
        archive.write_json(CUSTOMIZED_DATA_FILE, customized)?,
        archive.write_json(BASE_SNAPSHOT_FILE, base)?,
        archive.write_json(PARSED_JOB_FILE, job)?,
        archive.write_json(PARSED_COMPANY_FILE, company)?,
    ])
}
