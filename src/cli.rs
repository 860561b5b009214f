//! Command-line interface implementation for Kiln.
//! Provides argument parsing using clap.

use crate::manifest::GenerationRequest;
use clap::{error::ErrorKind, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// Command-line arguments structure for Kiln.
#[derive(Parser, Debug)]
#[command(author, version, about = "Kiln: server application skeleton generator", long_about = None)]
pub struct Args {
    /// Directory where the application skeleton will be created
    #[arg(value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Generate into a non-empty directory without asking
    #[arg(short, long)]
    pub force: bool,

    /// Add a .gitignore
    #[arg(long)]
    pub git: bool,

    /// Add a Dockerfile
    #[arg(long)]
    pub docker: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl From<&Args> for GenerationRequest {
    fn from(args: &Args) -> Self {
        GenerationRequest {
            destination: args.dir.clone(),
            force_overwrite: args.force,
            include_git_ignore: args.git,
            include_container_file: args.docker,
        }
    }
}

/// What to do after parsing the command line.
#[derive(Debug)]
pub enum Invocation {
    /// Generate with these arguments
    Run(Args),
    /// Help, version or a usage error was printed; exit with this status
    Exit(i32),
}

/// Parses command line arguments.
///
/// # Returns
/// * `Invocation::Run` with the parsed arguments
/// * `Invocation::Exit(0)` after printing help or the version
/// * `Invocation::Exit(1)` after printing a usage error, e.g. an unknown option
pub fn parse_args<I, T>(argv: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Args::try_parse_from(argv) {
        Ok(args) => Invocation::Run(args),
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            Invocation::Exit(code)
        }
    }
}
