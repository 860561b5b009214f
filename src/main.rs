//! Kiln's main application entry point.
//! Handles command-line argument parsing, runs the generation pipeline and
//! drains console output before exiting.

use std::io::{self, IsTerminal};

use kiln::{
    cli::{parse_args, Args, Invocation},
    error::{default_error_handler, Result},
    logger::init_logger,
    manifest::GenerationRequest,
    processor::{Processor, ShellFamily},
    prompt::{DialoguerPrompter, LinePrompter, Prompter},
    renderer::MiniJinjaRenderer,
    shutdown::Shutdown,
    writer::FileSystemWriter,
};

/// Main application entry point.
fn main() {
    let mut shutdown = Shutdown::new(|code| std::process::exit(code));
    shutdown.register(io::stdout());
    shutdown.register(io::stderr());

    let code = match parse_args(std::env::args_os()) {
        Invocation::Run(args) => {
            init_logger(args.verbose);
            match run(args) {
                Ok(()) => 0,
                Err(err) => default_error_handler(err),
            }
        }
        Invocation::Exit(code) => code,
    };

    shutdown.exit(code);
}

/// Main application logic execution.
fn run(args: Args) -> Result<()> {
    let request = GenerationRequest::from(&args);
    let renderer = MiniJinjaRenderer::new();

    let mut prompter: Box<dyn Prompter> = if io::stdin().is_terminal() {
        Box::new(DialoguerPrompter::new())
    } else {
        Box::new(LinePrompter::new(io::stdin().lock(), io::stdout()))
    };

    let writer = FileSystemWriter::new(io::stdout());
    let mut processor = Processor::new(&renderer, &mut *prompter, writer, ShellFamily::detect());
    processor.run(&request)
}
