//! Heuristic text parsing used when AI is disabled.
//!
//! Low fidelity on purpose: the first line becomes the title or name, the
//! whole blob becomes the description, and long lines are taken as
//! requirements. Users wanting better extraction supply JSON or `--use-ai`.

use crate::models::{CompanyInfo, JobInfo};

const MAX_TITLE_CHARS: usize = 100;
const MAX_REQUIREMENTS: usize = 10;
/// Lines shorter than this are headings or fragments, not requirements.
const MIN_REQUIREMENT_CHARS: usize = 20;

pub fn parse_job_text(text: &str) -> JobInfo {
    let title = first_line(text)
        .map(|line| truncate(line, MAX_TITLE_CHARS))
        .unwrap_or_else(|| "Position".to_string());

    let requirements = text
        .lines()
        .map(str::trim)
        .filter(|line| line.chars().count() > MIN_REQUIREMENT_CHARS)
        .take(MAX_REQUIREMENTS)
        .map(String::from)
        .collect();

    JobInfo {
        title,
        description: text.trim().to_string(),
        responsibilities: Vec::new(),
        requirements,
        desired_skills: Vec::new(),
        company_name: None,
    }
}

pub fn parse_company_text(text: &str) -> CompanyInfo {
    let name = first_line(text)
        .map(|line| {
            let line = line.strip_prefix("About ").unwrap_or(line);
            let line = line.strip_prefix("Company: ").unwrap_or(line);
            truncate(line.trim(), MAX_TITLE_CHARS)
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "Company".to_string());

    CompanyInfo {
        name,
        about: text.trim().to_string(),
        industry: None,
        size: None,
        location: None,
        website: None,
        values: Vec::new(),
        recent_news: Vec::new(),
    }
}

fn first_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|line| !line.is_empty())
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
