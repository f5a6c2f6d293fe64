use std::path::PathBuf;

use thiserror::Error;

/// Application-level error type.
///
/// Every variant is terminal for the current run: `main` prints the message
/// and exits non-zero. Nothing is retried.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing file: '{}' does not exist", path.display())]
    MissingFile { path: PathBuf },

    #[error("Malformed input in '{}': {reason}", path.display())]
    MalformedInput { path: PathBuf, reason: String },

    #[error("AI parsing failed: {0}")]
    AiParsing(String),

    #[error("AI customization failed: {0}")]
    AiCustomization(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Failed to write output file '{}': {source}", path.display())]
    ArchiveWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{}' already exists; pass --force to overwrite it", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        AppError::MalformedInput {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Short machine-readable code, used in the log line emitted by `main`.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingFile { .. } => "MISSING_FILE",
            AppError::MalformedInput { .. } => "MALFORMED_INPUT",
            AppError::AiParsing(_) => "AI_PARSING",
            AppError::AiCustomization(_) => "AI_CUSTOMIZATION",
            AppError::Render(_) => "RENDER",
            AppError::ArchiveWrite { .. } => "ARCHIVE_WRITE",
            AppError::AlreadyExists { .. } => "ALREADY_EXISTS",
            AppError::Config(_) => "CONFIG",
            AppError::Internal(_) => "INTERNAL",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_display_names_path() {
        let e = AppError::MissingFile {
            path: PathBuf::from("inputs/job.json"),
        };
        assert!(e.to_string().contains("inputs/job.json"));
        assert_eq!(e.code(), "MISSING_FILE");
    }

    #[test]
    fn test_malformed_helper_keeps_reason() {
        let e = AppError::malformed("job.json", "missing field `title`");
        let msg = e.to_string();
        assert!(msg.contains("job.json"), "got: {msg}");
        assert!(msg.contains("missing field `title`"), "got: {msg}");
        assert_eq!(e.code(), "MALFORMED_INPUT");
    }

    #[test]
    fn test_archive_write_display_includes_source() {
        let e = AppError::ArchiveWrite {
            path: PathBuf::from("applications/Acme_20260202_220153/resume.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        };
        let msg = e.to_string();
        assert!(msg.contains("resume.pdf"));
        assert!(msg.contains("read-only"));
    }
}
