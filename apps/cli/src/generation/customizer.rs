//! Content Customizer: tailors the resume and drafts the cover letter.
//!
//! Two independent LLM calls: a JSON rewrite of the summary and experience
//! bullets, then a plain-text cover letter body. Ordering and rewording are
//! left entirely to the model; this module only enforces the shape of the
//! answer and copies every other field from the base record.
//!
//! The "no invented experience" rule is prompt wording only. Rewritten bullets
//! are NOT checked against the base data.

use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompts::{
    COVER_LETTER_PROMPT_TEMPLATE, COVER_LETTER_SYSTEM, RESUME_REWRITE_PROMPT_TEMPLATE,
    RESUME_REWRITE_SYSTEM,
};
use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, JSON_ONLY_SYSTEM, VOICE_INSTRUCTION};
use crate::llm_client::{CallOptions, LlmClient};
use crate::models::{BaseData, BaseRecord, CompanyInfo, CustomizedData, JobInfo};
use crate::render::template::{fill_template, Fields};

/// Result of the customization stage for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Customization {
    pub data: CustomizedData,
    /// Cover letter body paragraphs, without greeting or sign-off.
    pub cover_letter: String,
}

/// The model's answer to the resume rewrite prompt.
#[derive(Debug, Clone, Deserialize)]
pub struct ResumeRewrite {
    pub summary: String,
    pub experience: Vec<ExperienceRewrite>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExperienceRewrite {
    #[serde(default)]
    pub responsibilities: Vec<String>,
}

/// Runs both customization calls. Any failure aborts the whole stage.
pub async fn customize_with_llm(
    llm: &LlmClient,
    base: &BaseRecord,
    job: &JobInfo,
    company: &CompanyInfo,
) -> Result<Customization, AppError> {
    let candidate_json = candidate_json(base)?;
    let job_text = job.as_prompt_text();
    let company_text = company.as_prompt_text();

    info!("Rewriting resume content for '{}' at {}", job.title, company.name);
    let prompt =
        build_resume_prompt(&candidate_json, base.experience.len(), &job_text, &company_text)?;
    let system = format!("{RESUME_REWRITE_SYSTEM} {JSON_ONLY_SYSTEM}");
    let rewrite: ResumeRewrite = llm
        .call_json(&prompt, &system, CallOptions::REWRITE)
        .await
        .map_err(|e| AppError::AiCustomization(format!("resume rewrite call failed: {e}")))?;
    let data = apply_rewrite(base, rewrite)?;

    info!("Drafting cover letter");
    let prompt = build_cover_letter_prompt(&candidate_json, &job_text, &company_text)?;
    let letter = llm
        .call_text(&prompt, COVER_LETTER_SYSTEM, CallOptions::REWRITE)
        .await
        .map_err(|e| AppError::AiCustomization(format!("cover letter call failed: {e}")))?;
    let cover_letter = tidy_letter_body(&letter);
    if cover_letter.is_empty() {
        return Err(AppError::AiCustomization(
            "cover letter call returned no body text".to_string(),
        ));
    }

    warn!("AI-rewritten content is not checked against the base data; review it before sending");

    Ok(Customization { data, cover_letter })
}

/// Merges the model's rewrite into a copy of `base`.
pub fn apply_rewrite(base: &BaseRecord, rewrite: ResumeRewrite) -> Result<CustomizedData, AppError> {
    let bullets = rewrite
        .experience
        .into_iter()
        .map(|entry| entry.responsibilities)
        .collect();
    CustomizedData::with_rewrites(base, rewrite.summary, bullets)
        .map_err(|reason| AppError::AiCustomization(format!("invalid resume rewrite: {reason}")))
}

fn candidate_json(base: &BaseData) -> Result<String, AppError> {
    serde_json::to_string_pretty(base)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize base data: {e}")))
}

fn build_resume_prompt(
    candidate_json: &str,
    experience_count: usize,
    job_text: &str,
    company_text: &str,
) -> Result<String, AppError> {
    let experience_count = experience_count.to_string();
    let fields = Fields::from([
        ("grounding_instruction", GROUNDING_INSTRUCTION),
        ("voice_instruction", VOICE_INSTRUCTION),
        ("experience_count", experience_count.as_str()),
        ("candidate_json", candidate_json),
        ("job_text", job_text),
        ("company_text", company_text),
    ]);
    fill_prompt(RESUME_REWRITE_PROMPT_TEMPLATE, &fields)
}

fn build_cover_letter_prompt(
    candidate_json: &str,
    job_text: &str,
    company_text: &str,
) -> Result<String, AppError> {
    let fields = Fields::from([
        ("grounding_instruction", GROUNDING_INSTRUCTION),
        ("voice_instruction", VOICE_INSTRUCTION),
        ("candidate_json", candidate_json),
        ("job_text", job_text),
        ("company_text", company_text),
    ]);
    fill_prompt(COVER_LETTER_PROMPT_TEMPLATE, &fields)
}

/// Single pass over the template: braces inside the candidate, job or company
/// text are never mistaken for placeholders.
fn fill_prompt(template: &str, fields: &Fields<'_>) -> Result<String, AppError> {
    let required: Vec<&str> = fields.keys().copied().collect();
    fill_template(template, fields, &required)
        .map_err(|e| AppError::AiCustomization(format!("could not build prompt: {e}")))
}

const SIGN_OFFS: &[&str] = &["sincerely", "best regards", "kind regards", "regards", "yours"];

/// Drops a greeting or sign-off the model added despite instructions.
fn tidy_letter_body(text: &str) -> String {
    let mut lines: Vec<&str> = text.trim().lines().collect();

    if lines
        .first()
        .is_some_and(|l| l.trim_start().to_lowercase().starts_with("dear "))
    {
        lines.remove(0);
    }
    if let Some(pos) = lines.iter().position(|l| {
        let lower = l.trim().to_lowercase();
        SIGN_OFFS.iter().any(|s| lower.starts_with(s)) && lower.len() < 30
    }) {
        lines.truncate(pos);
    }

    lines.join("\n").trim().to_string()
}
