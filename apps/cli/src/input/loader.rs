//! Input Loader: reads job, company and base-data files and validates them
//! against the typed schemas before anything else in the pipeline runs.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::{BaseData, BaseRecord, CompanyInfo, JobInfo};

pub const DEFAULT_BASE_DATA_PATH: &str = "inputs/base_data.json";

/// A job or company document as found on disk: already structured, or free
/// text that still needs the Text Parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Source<T> {
    Structured(T),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct JobSources {
    pub job: Source<JobInfo>,
    pub company: Source<CompanyInfo>,
}

/// Fails with `MissingFile` for the first path that does not exist.
pub fn ensure_exists<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Result<(), AppError> {
    for path in paths {
        if !path.exists() {
            return Err(AppError::MissingFile {
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Loads the job/company inputs.
///
/// Without `company_path` the job file must be a merged JSON document with
/// `company` and `job` sections. With it, each file may be JSON or plain text.
pub fn load_job_inputs(job_path: &Path, company_path: Option<&Path>) -> Result<JobSources, AppError> {
    match company_path {
        None => {
            let value = match read_input(job_path)? {
                RawInput::Json(value) => value,
                RawInput::Text(_) => {
                    return Err(AppError::malformed(
                        job_path,
                        "merged job file must be JSON with 'company' and 'job' sections",
                    ))
                }
            };
            let Value::Object(mut sections) = value else {
                return Err(AppError::malformed(job_path, "expected a JSON object"));
            };
            let (Some(job), Some(company)) = (sections.remove("job"), sections.remove("company"))
            else {
                return Err(AppError::malformed(
                    job_path,
                    "merged job file must contain both 'company' and 'job' sections",
                ));
            };

            let job: JobInfo = from_section(job, job_path, "job", JobInfo::validate)?;
            let company: CompanyInfo =
                from_section(company, job_path, "company", CompanyInfo::validate)?;
            info!("Loaded merged job and company data from {}", job_path.display());

            Ok(JobSources {
                job: Source::Structured(job),
                company: Source::Structured(company),
            })
        }
        Some(company_path) => {
            let job = match read_input(job_path)? {
                RawInput::Json(value) => {
                    Source::Structured(from_section(value, job_path, "job", JobInfo::validate)?)
                }
                RawInput::Text(text) => Source::Text(text),
            };
            let company = match read_input(company_path)? {
                RawInput::Json(value) => Source::Structured(from_section(
                    value,
                    company_path,
                    "company",
                    CompanyInfo::validate,
                )?),
                RawInput::Text(text) => Source::Text(text),
            };
            info!(
                "Loaded separate job ({}) and company ({}) files",
                describe(&job),
                describe(&company)
            );
            Ok(JobSources { job, company })
        }
    }
}

/// Loads and validates the user's base career record, keeping the parsed
/// document alongside it for the archive.
pub fn load_base_data(path: &Path) -> Result<BaseRecord, AppError> {
    match read_input(path)? {
        RawInput::Json(document) => {
            let data = from_section(document.clone(), path, "base data", BaseData::validate)?;
            info!("Loaded base data from {}", path.display());
            Ok(BaseRecord { data, document })
        }
        RawInput::Text(_) => Err(AppError::malformed(path, "base data must be a JSON document")),
    }
}

/// Loads an archived `customized_data.json` (or any BaseData-shaped file).
pub fn load_data_snapshot(path: &Path) -> Result<BaseRecord, AppError> {
    ensure_exists([path])?;
    load_base_data(path)
}

enum RawInput {
    Json(Value),
    Text(String),
}

fn read_input(path: &Path) -> Result<RawInput, AppError> {
    ensure_exists([path])?;
    let content = std::fs::read_to_string(path)
        .map_err(|e| AppError::malformed(path, format!("could not read file: {e}")))?;

    if looks_like_json(path, &content) {
        let value = serde_json::from_str(&content)
            .map_err(|e| AppError::malformed(path, format!("invalid JSON: {e}")))?;
        debug!("Parsed {} as JSON", path.display());
        Ok(RawInput::Json(value))
    } else {
        if content.trim().is_empty() {
            return Err(AppError::malformed(path, "file is empty"));
        }
        debug!("Treating {} as plain text", path.display());
        Ok(RawInput::Text(content))
    }
}

fn looks_like_json(path: &Path, content: &str) -> bool {
    let has_json_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    has_json_extension || content.trim_start().starts_with('{')
}

fn from_section<T: DeserializeOwned>(
    value: Value,
    path: &Path,
    section: &str,
    validate: fn(&T) -> Result<(), String>,
) -> Result<T, AppError> {
    let parsed: T = serde_json::from_value(value)
        .map_err(|e| AppError::malformed(path, format!("{section}: {e}")))?;
    validate(&parsed).map_err(|reason| AppError::malformed(path, reason))?;
    Ok(parsed)
}

fn describe<T>(source: &Source<T>) -> &'static str {
    match source {
        Source::Structured(_) => "JSON",
        Source::Text(_) => "plain text",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    const MERGED: &str = r#"{
        "company": {"name": "Acme", "about": "Makes anvils.", "values": ["Quality"]},
        "job": {"title": "Platform Engineer", "requirements": ["Rust"]}
    }"#;

    #[test]
    fn test_merged_file_loads_both_sections() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "job.json", MERGED);
        let sources = load_job_inputs(&path, None).unwrap();

        match (sources.job, sources.company) {
            (Source::Structured(job), Source::Structured(company)) => {
                assert_eq!(job.title, "Platform Engineer");
                assert_eq!(company.name, "Acme");
            }
            other => panic!("expected structured inputs, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_job_file_is_missing_file_error() {
        let dir = TempDir::new().unwrap();
        let err = load_job_inputs(&dir.path().join("nope.json"), None).unwrap_err();
        assert!(matches!(err, AppError::MissingFile { .. }), "got {err:?}");
    }

    #[test]
    fn test_broken_json_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "job.json", r#"{"company": {"name": "Acme"},"#);
        let err = load_job_inputs(&path, None).unwrap_err();
        assert!(matches!(err, AppError::MalformedInput { .. }), "got {err:?}");
    }

    #[test]
    fn test_merged_without_company_section_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "job.json", r#"{"job": {"title": "Engineer"}}"#);
        let err = load_job_inputs(&path, None).unwrap_err();
        assert!(err.to_string().contains("'company'"), "got {err}");
    }

    #[test]
    fn test_merged_plain_text_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "job.txt", "Senior Engineer\nWe build things.");
        let err = load_job_inputs(&path, None).unwrap_err();
        assert!(matches!(err, AppError::MalformedInput { .. }));
    }

    #[test]
    fn test_schema_violation_names_the_field() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "job.json",
            r#"{"company": {"about": "no name"}, "job": {"title": "Engineer"}}"#,
        );
        let err = load_job_inputs(&path, None).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("company"), "got {msg}");
        assert!(msg.contains("name"), "got {msg}");
    }

    #[test]
    fn test_separate_files_mix_text_and_json() {
        let dir = TempDir::new().unwrap();
        let job = write(&dir, "job.txt", "Staff Engineer\nLead the storage team.");
        let company = write(&dir, "company.json", r#"{"name": "Globex"}"#);
        let sources = load_job_inputs(&job, Some(&company)).unwrap();

        assert!(matches!(sources.job, Source::Text(ref t) if t.starts_with("Staff Engineer")));
        assert!(matches!(sources.company, Source::Structured(ref c) if c.name == "Globex"));
    }

    #[test]
    fn test_text_starting_with_brace_must_be_json() {
        let dir = TempDir::new().unwrap();
        let job = write(&dir, "job.txt", "{ not really json");
        let company = write(&dir, "company.txt", "About Globex");
        let err = load_job_inputs(&job, Some(&company)).unwrap_err();
        assert!(matches!(err, AppError::MalformedInput { .. }));
    }

    #[test]
    fn test_ensure_exists_reports_first_missing_path() {
        let dir = TempDir::new().unwrap();
        let present = write(&dir, "a.json", "{}");
        let absent = dir.path().join("b.json");
        let err = ensure_exists([present.as_path(), absent.as_path()]).unwrap_err();
        match err {
            AppError::MissingFile { path } => assert_eq!(path, absent),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_base_data_requires_name() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "base.json", r#"{"personal_info": {"name": ""}}"#);
        let err = load_base_data(&path).unwrap_err();
        assert!(err.to_string().contains("personal_info.name"), "got {err}");
    }

    #[test]
    fn test_base_record_keeps_document_as_written() {
        let dir = TempDir::new().unwrap();
        let raw = r#"{
            "personal_info": {"name": "A", "title": null},
            "education": [{"degree": "BSc", "institution": "State U", "graduation_date": 2020}],
            "projects": [],
            "certifications": [],
            "skills": {"Tech": []}
        }"#;
        let path = write(&dir, "base.json", raw);

        let base = load_base_data(&path).unwrap();
        assert_eq!(base.document, serde_json::from_str::<Value>(raw).unwrap());
        assert_eq!(base.education[0].graduation_date.as_deref(), Some("2020"));
        assert!(base.personal_info.title.is_none());
    }
}
