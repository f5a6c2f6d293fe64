use crate::errors::AppError;
use crate::models::base_data::{CertificationEntry, EducationEntry, ProjectEntry};
use crate::models::{BaseData, CustomizedData, ExperienceEntry};
use crate::render::pdf::{write_pdf, Align, Block, TextStyle};

const NAME_STYLE: TextStyle = TextStyle::bold(20.0);
const TITLE_STYLE: TextStyle = TextStyle::regular(12.0);
const CONTACT_STYLE: TextStyle = TextStyle::regular(9.0);
const ENTRY_SIZE: f32 = 11.0;

/// Renders the resume PDF for one customized record.
pub fn render_resume(data: &CustomizedData) -> Result<Vec<u8>, AppError> {
    write_pdf(&resume_blocks(data)?)
}

/// Header, then Summary, Experience, Education, Skills, Projects and
/// Certifications. Sections with nothing to show are left out entirely.
pub fn resume_blocks(data: &BaseData) -> Result<Vec<Block>, AppError> {
    let info = &data.personal_info;
    let mut blocks = header_blocks(
        &info.name,
        info.title.as_deref(),
        &info.contact_items().join(" | "),
    )?;

    if !data.summary.trim().is_empty() {
        blocks.push(Block::Heading("Summary".to_string()));
        blocks.push(Block::text(data.summary.trim()));
    }

    if !data.experience.is_empty() {
        blocks.push(Block::Heading("Experience".to_string()));
        for (i, entry) in data.experience.iter().enumerate() {
            if i > 0 {
                blocks.push(Block::Gap(6.0));
            }
            experience_blocks(entry, &mut blocks);
        }
    }

    if !data.education.is_empty() {
        blocks.push(Block::Heading("Education".to_string()));
        for (i, entry) in data.education.iter().enumerate() {
            if i > 0 {
                blocks.push(Block::Gap(6.0));
            }
            education_blocks(entry, &mut blocks);
        }
    }

    if !data.skills.is_empty() {
        blocks.push(Block::Heading("Skills".to_string()));
        for group in data.skills.groups() {
            blocks.push(Block::text(format!(
                "{}: {}",
                group.category,
                group.items.join(", ")
            )));
        }
    }

    if !data.projects.is_empty() {
        blocks.push(Block::Heading("Projects".to_string()));
        for (i, project) in data.projects.iter().enumerate() {
            if i > 0 {
                blocks.push(Block::Gap(6.0));
            }
            project_blocks(project, &mut blocks);
        }
    }

    if !data.certifications.is_empty() {
        blocks.push(Block::Heading("Certifications".to_string()));
        for cert in &data.certifications {
            blocks.push(Block::Bullet(certification_line(cert)));
        }
    }

    Ok(blocks)
}

/// Name, professional title and contact line. Shared with the cover letter.
pub(crate) fn header_blocks(
    name: &str,
    title: Option<&str>,
    contact: &str,
) -> Result<Vec<Block>, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Render(
            "personal_info.name is required to render a document".to_string(),
        ));
    }

    let mut blocks = vec![Block::styled(name, NAME_STYLE, Align::Center)];
    if let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) {
        blocks.push(Block::styled(title, TITLE_STYLE, Align::Center));
    }
    if !contact.trim().is_empty() {
        blocks.push(Block::styled(contact.trim(), CONTACT_STYLE, Align::Center));
    }
    Ok(blocks)
}

fn experience_blocks(entry: &ExperienceEntry, blocks: &mut Vec<Block>) {
    blocks.push(Block::Row {
        left: entry.title.trim().to_string(),
        right: entry.date_range(),
        size: ENTRY_SIZE,
    });
    let mut employer = entry.company.trim().to_string();
    if let Some(location) = non_blank(&entry.location) {
        employer.push_str(" | ");
        employer.push_str(location);
    }
    blocks.push(Block::text(employer));
    for bullet in &entry.responsibilities {
        if !bullet.trim().is_empty() {
            blocks.push(Block::Bullet(bullet.trim().to_string()));
        }
    }
}

fn education_blocks(entry: &EducationEntry, blocks: &mut Vec<Block>) {
    blocks.push(Block::Row {
        left: entry.degree.trim().to_string(),
        right: non_blank(&entry.graduation_date).unwrap_or_default().to_string(),
        size: ENTRY_SIZE,
    });
    let mut school = entry.institution.trim().to_string();
    if let Some(location) = non_blank(&entry.location) {
        school.push_str(" | ");
        school.push_str(location);
    }
    blocks.push(Block::text(school));

    let details: Vec<String> = [
        non_blank(&entry.gpa).map(|gpa| format!("GPA: {gpa}")),
        non_blank(&entry.honors).map(str::to_string),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !details.is_empty() {
        blocks.push(Block::text(details.join(" | ")));
    }
}

fn project_blocks(project: &ProjectEntry, blocks: &mut Vec<Block>) {
    blocks.push(Block::Row {
        left: project.name.trim().to_string(),
        right: non_blank(&project.link).unwrap_or_default().to_string(),
        size: ENTRY_SIZE,
    });
    if !project.description.trim().is_empty() {
        blocks.push(Block::text(project.description.trim()));
    }
    if !project.technologies.is_empty() {
        blocks.push(Block::text(format!(
            "Technologies: {}",
            project.technologies.join(", ")
        )));
    }
}

fn certification_line(cert: &CertificationEntry) -> String {
    let mut line = cert.name.trim().to_string();
    if let Some(issuer) = non_blank(&cert.issuer) {
        line.push_str(", ");
        line.push_str(issuer);
    }
    if let Some(date) = non_blank(&cert.date) {
        line.push_str(&format!(" ({date})"));
    }
    line
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
