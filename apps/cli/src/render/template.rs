//! `{placeholder}` text templates.

use std::collections::BTreeMap;

use crate::errors::AppError;

pub type Fields<'a> = BTreeMap<&'static str, &'a str>;

/// Substitutes `{name}` placeholders line by line.
///
/// * a placeholder with no entry in `fields` is an error;
/// * a `required` field that is blank is an error;
/// * a line referencing any other blank field is dropped.
///
/// Values are inserted verbatim and never rescanned, so braces inside user
/// or model text survive. A `{` not followed by `identifier}` is literal.
pub fn fill_template(
    template: &str,
    fields: &Fields<'_>,
    required: &[&str],
) -> Result<String, AppError> {
    for name in required {
        let blank = fields.get(*name).map_or(true, |v| v.trim().is_empty());
        if blank {
            return Err(AppError::Render(format!(
                "required field `{name}` is missing or empty"
            )));
        }
    }

    let mut out = Vec::new();
    'lines: for line in template.lines() {
        let mut filled = String::with_capacity(line.len());
        let mut rest = line;
        while let Some(start) = rest.find('{') {
            filled.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            match placeholder_name(after) {
                Some(name) => {
                    let value = fields.get(name).ok_or_else(|| {
                        AppError::Render(format!("template references unknown field `{name}`"))
                    })?;
                    if value.trim().is_empty() {
                        continue 'lines;
                    }
                    filled.push_str(value.trim());
                    rest = &after[name.len() + 1..];
                }
                None => {
                    filled.push('{');
                    rest = after;
                }
            }
        }
        filled.push_str(rest);
        out.push(filled);
    }
    Ok(out.join("\n"))
}

fn placeholder_name(after_brace: &str) -> Option<&str> {
    let end = after_brace.find('}')?;
    let name = &after_brace[..end];
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    valid.then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fills_known_fields() {
        let fields = Fields::from([("name", "Ada"), ("company_name", "Acme")]);
        let out = fill_template("Dear {company_name},\n{name}", &fields, &[]).unwrap();
        assert_eq!(out, "Dear Acme,\nAda");
    }

    #[test]
    fn test_unknown_placeholder_is_render_error() {
        let fields = Fields::from([("name", "Ada")]);
        let err = fill_template("Hi {nmae}", &fields, &[]).unwrap_err();
        assert!(matches!(err, AppError::Render(_)));
        assert!(err.to_string().contains("nmae"));
    }

    #[test]
    fn test_blank_required_field_is_render_error() {
        let fields = Fields::from([("job_title", "  ")]);
        let err = fill_template("{job_title}", &fields, &["job_title"]).unwrap_err();
        assert!(err.to_string().contains("job_title"), "got: {err}");
    }

    #[test]
    fn test_absent_required_field_is_render_error() {
        let fields = Fields::new();
        assert!(fill_template("static text", &fields, &["name"]).is_err());
    }

    #[test]
    fn test_line_with_blank_optional_field_is_dropped() {
        let fields = Fields::from([("name", "Ada"), ("contact", "")]);
        let out = fill_template("{name}\n{contact}\nend", &fields, &["name"]).unwrap();
        assert_eq!(out, "Ada\nend");
    }

    #[test]
    fn test_literal_braces_survive() {
        let fields = Fields::from([("body", "uses {curly} braces")]);
        let out = fill_template("fn main() { {body} }", &fields, &[]).unwrap();
        assert_eq!(out, "fn main() { uses {curly} braces }");
    }
}
