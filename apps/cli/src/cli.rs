use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::archive::DEFAULT_OUTPUT_ROOT;
use crate::input::loader::DEFAULT_BASE_DATA_PATH;

#[derive(Parser, Debug)]
#[command(
    name = "cv-creator",
    version,
    about = "Generate a tailored resume and cover letter for a job application"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build resume.pdf and cover_letter.pdf for one job and archive the inputs.
    Run {
        /// Job file: merged JSON with `job` and `company`, or a job-only JSON/text file
        #[arg(short = 'j', long = "job")]
        job: PathBuf,
        /// Separate company file (JSON or plain text)
        #[arg(short = 'c', long = "company")]
        company: Option<PathBuf>,
        #[arg(short = 'b', long = "base", default_value = DEFAULT_BASE_DATA_PATH)]
        base: PathBuf,
        /// Parse text inputs and rewrite content with the AI API
        #[arg(long, default_value_t = false)]
        use_ai: bool,
        /// Directory the per-run archive folder is created in
        #[arg(short = 'o', long = "output", default_value = DEFAULT_OUTPUT_ROOT)]
        output: PathBuf,
    },
    /// Write a starter base-data file to fill in.
    Init {
        #[arg(short = 'b', long = "base", default_value = DEFAULT_BASE_DATA_PATH)]
        base: PathBuf,
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Re-render a resume from an archived customized_data.json.
    Render {
        #[arg(short = 'd', long = "data")]
        data: PathBuf,
        #[arg(short = 'o', long = "output")]
        output: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from(["cv-creator", "run", "-j", "job.json"]).unwrap();
        match cli.command {
            Commands::Run {
                job,
                company,
                base,
                use_ai,
                output,
            } => {
                assert_eq!(job, PathBuf::from("job.json"));
                assert!(company.is_none());
                assert_eq!(base, PathBuf::from(DEFAULT_BASE_DATA_PATH));
                assert!(!use_ai);
                assert_eq!(output, PathBuf::from(DEFAULT_OUTPUT_ROOT));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_run_requires_job() {
        assert!(Cli::try_parse_from(["cv-creator", "run"]).is_err());
    }

    #[test]
    fn test_run_accepts_separate_files_and_ai_flag() {
        let cli = Cli::try_parse_from([
            "cv-creator", "run", "-j", "job.txt", "-c", "company.txt", "--use-ai",
        ])
        .unwrap();
        let Commands::Run { company, use_ai, .. } = cli.command else {
            panic!("expected run");
        };
        assert_eq!(company, Some(PathBuf::from("company.txt")));
        assert!(use_ai);
    }
}
