use chrono::NaiveDate;

use crate::errors::AppError;
use crate::models::{BaseData, CompanyInfo, JobInfo};
use crate::render::pdf::{write_pdf, Block};
use crate::render::resume::header_blocks;
use crate::render::template::{fill_template, Fields};

/// Full letter below the letterhead. `{body}` is either the filled
/// [`DEFAULT_BODY_TEMPLATE`] or the model-written body.
pub const LETTER_TEMPLATE: &str = "{date}

Hiring Manager
{company_name}

Re: {job_title}

Dear Hiring Manager,

{body}

Sincerely,
{name}";

/// Body used when no AI customization ran.
pub const DEFAULT_BODY_TEMPLATE: &str = "I am writing to apply for the {job_title} position at {company_name}.

{summary}

As {latest_title} at {latest_employer}, my work has included the following: {highlight}

{company_paragraph}

Thank you for your time and consideration. I would welcome the opportunity to discuss how my background fits the needs of {company_name}.";

const LETTER_REQUIRED: &[&str] = &["date", "name", "company_name", "job_title", "body"];
const BODY_REQUIRED: &[&str] = &["company_name", "job_title"];

/// Everything the cover-letter PDF is rendered from.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverLetter {
    pub date: NaiveDate,
    pub name: String,
    pub title: Option<String>,
    pub contact: String,
    pub company_name: String,
    pub job_title: String,
    pub body: String,
}

impl CoverLetter {
    /// Letter whose body comes from [`DEFAULT_BODY_TEMPLATE`].
    pub fn from_template(
        data: &BaseData,
        job: &JobInfo,
        company: &CompanyInfo,
        date: NaiveDate,
    ) -> Result<Self, AppError> {
        let latest = data.experience.first();
        let highlight = latest
            .and_then(|e| e.responsibilities.iter().find(|r| !r.trim().is_empty()))
            .map(|r| sentence(r))
            .unwrap_or_default();
        let company_paragraph = company_paragraph(company);

        let fields = Fields::from([
            ("job_title", job.title.as_str()),
            ("company_name", company.name.as_str()),
            ("summary", data.summary.as_str()),
            ("latest_title", latest.map_or("", |e| e.title.as_str())),
            ("latest_employer", latest.map_or("", |e| e.company.as_str())),
            ("highlight", highlight.as_str()),
            ("company_paragraph", company_paragraph.as_str()),
        ]);
        let body = fill_template(DEFAULT_BODY_TEMPLATE, &fields, BODY_REQUIRED)?;
        Ok(Self::with_body(data, job, company, date, body))
    }

    /// Letter around a body written elsewhere, e.g. by the model.
    pub fn with_body(
        data: &BaseData,
        job: &JobInfo,
        company: &CompanyInfo,
        date: NaiveDate,
        body: String,
    ) -> Self {
        CoverLetter {
            date,
            name: data.personal_info.name.trim().to_string(),
            title: data.personal_info.title.clone(),
            contact: data.personal_info.contact_items().join(" | "),
            company_name: company.name.trim().to_string(),
            job_title: job.title.trim().to_string(),
            body,
        }
    }

    /// Letter text below the letterhead, with placeholders resolved.
    pub fn text(&self) -> Result<String, AppError> {
        let date = self.date.format("%B %-d, %Y").to_string();
        let fields = Fields::from([
            ("date", date.as_str()),
            ("name", self.name.as_str()),
            ("contact", self.contact.as_str()),
            ("company_name", self.company_name.as_str()),
            ("job_title", self.job_title.as_str()),
            ("body", self.body.as_str()),
        ]);
        let text = fill_template(LETTER_TEMPLATE, &fields, LETTER_REQUIRED)?;
        Ok(collapse_blank_lines(&text))
    }
}

/// Renders the cover-letter PDF: the resume letterhead followed by the letter.
pub fn render_cover_letter(letter: &CoverLetter) -> Result<Vec<u8>, AppError> {
    let mut blocks = header_blocks(&letter.name, letter.title.as_deref(), &letter.contact)?;
    blocks.push(Block::Gap(18.0));
    for paragraph in letter.text()?.split("\n\n") {
        blocks.push(Block::text(paragraph));
        blocks.push(Block::Gap(8.0));
    }
    write_pdf(&blocks)
}

fn company_paragraph(company: &CompanyInfo) -> String {
    let values: Vec<&str> = company
        .values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect();
    if !values.is_empty() {
        return format!(
            "{}'s commitment to {} resonates with how I like to work.",
            company.name.trim(),
            values.join(", ")
        );
    }
    let about = company.about.trim();
    if about.is_empty() {
        String::new()
    } else {
        format!("What draws me to {}: {}", company.name.trim(), sentence(about))
    }
}

fn sentence(text: &str) -> String {
    let text = text.trim();
    if text.ends_with(['.', '!', '?']) {
        text.to_string()
    } else {
        format!("{text}.")
    }
}

/// Dropped template lines can leave runs of blank lines; keep paragraph
/// breaks single.
fn collapse_blank_lines(text: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    for line in text.lines() {
        let blank = line.trim().is_empty();
        if blank && out.last().map_or(true, |prev| prev.trim().is_empty()) {
            continue;
        }
        out.push(line);
    }
    while out.last().is_some_and(|l| l.trim().is_empty()) {
        out.pop();
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> BaseData {
        serde_json::from_str(
            r#"{
                "personal_info": {"name": "Ada Lovelace", "email": "ada@example.com", "phone": "555-0100"},
                "summary": "Mathematician and first programmer.",
                "experience": [
                    {"title": "Analyst", "company": "Analytical Engine Co", "responsibilities": ["Wrote Note G"]}
                ]
            }"#,
        )
        .unwrap()
    }

    fn job() -> JobInfo {
        serde_json::from_str(r#"{"title": "Compiler Engineer"}"#).unwrap()
    }

    fn company() -> CompanyInfo {
        serde_json::from_str(r#"{"name": "Acme", "values": ["rigor", "curiosity"]}"#).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 2).unwrap()
    }

    #[test]
    fn test_template_letter_mentions_job_and_experience() {
        let letter = CoverLetter::from_template(&base(), &job(), &company(), date()).unwrap();
        let text = letter.text().unwrap();
        assert!(text.starts_with("February 2, 2026"), "got: {text}");
        assert!(text.contains("Compiler Engineer position at Acme"));
        assert!(text.contains("As Analyst at Analytical Engine Co"));
        assert!(text.contains("Wrote Note G."));
        assert!(text.contains("Acme's commitment to rigor, curiosity"));
        assert!(text.ends_with("Sincerely,\nAda Lovelace"));
    }

    #[test]
    fn test_no_experience_drops_that_paragraph() {
        let mut data = base();
        data.experience.clear();
        let letter = CoverLetter::from_template(&data, &job(), &company(), date()).unwrap();
        let text = letter.text().unwrap();
        assert!(!text.contains("As "), "got: {text}");
        assert!(!text.contains("\n\n\n"));
    }

    #[test]
    fn test_blank_job_title_is_render_error() {
        let mut j = job();
        j.title = String::new();
        let err = CoverLetter::from_template(&base(), &j, &company(), date()).unwrap_err();
        assert!(matches!(err, AppError::Render(_)));
    }

    #[test]
    fn test_blank_body_is_render_error() {
        let letter = CoverLetter::with_body(&base(), &job(), &company(), date(), "  ".to_string());
        assert!(matches!(letter.text(), Err(AppError::Render(_))));
    }

    #[test]
    fn test_model_body_is_wrapped_in_letterhead() {
        let letter = CoverLetter::with_body(
            &base(),
            &job(),
            &company(),
            date(),
            "First paragraph.\n\nSecond paragraph.".to_string(),
        );
        let text = letter.text().unwrap();
        assert!(text.contains("Dear Hiring Manager,\n\nFirst paragraph.\n\nSecond paragraph."));
        assert!(text.contains("Re: Compiler Engineer"));
    }

    #[test]
    fn test_render_cover_letter_is_deterministic() {
        let letter = CoverLetter::from_template(&base(), &job(), &company(), date()).unwrap();
        let first = render_cover_letter(&letter).unwrap();
        let second = render_cover_letter(&letter).unwrap();
        assert!(first.starts_with(b"%PDF"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_cover_letter_requires_name() {
        let mut letter = CoverLetter::from_template(&base(), &job(), &company(), date()).unwrap();
        letter.name = String::new();
        assert!(matches!(
            render_cover_letter(&letter),
            Err(AppError::Render(_))
        ));
    }
}
