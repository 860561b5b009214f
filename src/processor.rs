//! Core generation orchestration.
//! Sequences pre-flight inspection, the confirmation gate, manifest
//! construction and materialization, then prints the next steps.

use crate::error::{Error, Result};
use crate::manifest::{build_manifest, GenerationRequest, Manifest};
use crate::preflight::check_directory;
use crate::prompt::Prompter;
use crate::renderer::TemplateRenderer;
use crate::writer::FileSystemWriter;
use log::debug;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Question asked before generating into a populated directory.
pub const CONFIRM_QUESTION: &str = "destination is not empty, continue?";

/// Shell the operator is expected to run the next steps in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellFamily {
    Posix,
    /// Windows `cmd.exe`
    Cmd,
}

impl ShellFamily {
    /// POSIX-like shells on Windows set `_`, `cmd.exe` does not.
    pub fn detect() -> Self {
        if cfg!(windows) && std::env::var_os("_").is_none() {
            ShellFamily::Cmd
        } else {
            ShellFamily::Posix
        }
    }
}

/// Resolves a manifest path against the destination. `.` is the destination itself.
pub fn resolve_target_path<P: AsRef<Path>>(destination: &Path, relative: P) -> PathBuf {
    let relative = relative.as_ref();
    if relative == Path::new(".") {
        destination.to_path_buf()
    } else {
        destination.join(relative)
    }
}

/// Next-step instructions printed after a successful run.
pub fn instructions(destination: &Path, name: &str, shell: ShellFamily) -> String {
    let prompt = match shell {
        ShellFamily::Posix => "$",
        ShellFamily::Cmd => ">",
    };

    let mut text = String::from("\n");
    if destination != Path::new(".") {
        text.push_str(&format!(
            "   change directory:\n     {prompt} cd {}\n\n",
            destination.display()
        ));
    }
    text.push_str(&format!("   install dependencies:\n     {prompt} npm install\n\n"));
    match shell {
        ShellFamily::Posix => text.push_str(&format!(
            "   run the app:\n     {prompt} DEBUG={name}:* npm start\n\n"
        )),
        ShellFamily::Cmd => text.push_str(&format!(
            "   run the app:\n     {prompt} SET DEBUG={name}:* & npm start\n\n"
        )),
    }
    text
}

/// Drives one generation run.
pub struct Processor<'a, W: Write> {
    renderer: &'a dyn TemplateRenderer,
    prompter: &'a mut dyn Prompter,
    writer: FileSystemWriter<W>,
    shell: ShellFamily,
}

impl<'a, W: Write> Processor<'a, W> {
    pub fn new(
        renderer: &'a dyn TemplateRenderer,
        prompter: &'a mut dyn Prompter,
        writer: FileSystemWriter<W>,
        shell: ShellFamily,
    ) -> Self {
        Self {
            renderer,
            prompter,
            writer,
            shell,
        }
    }

    /// Returns the report stream, consuming the processor.
    pub fn into_output(self) -> W {
        self.writer.into_inner()
    }

    /// Generates the project described by `request`.
    ///
    /// # Flow
    /// 1. Inspects the destination directory
    /// 2. Asks for confirmation when it is populated and not forced
    /// 3. Builds the manifest
    /// 4. Writes every entry in manifest order
    /// 5. Prints the next-step instructions
    ///
    /// # Errors
    /// * `Error::AbortedByOperator` if the operator declines, nothing is written
    /// * `Error::PreflightReadError`, `Error::TemplateAssetError`,
    ///   `Error::MinijinjaError` or `Error::WriteError` on fatal failures
    pub fn run(&mut self, request: &GenerationRequest) -> Result<()> {
        let state = check_directory(&request.destination)?;

        if state.requires_confirmation() && !request.force_overwrite {
            if !self.prompter.confirm(CONFIRM_QUESTION)? {
                return Err(Error::AbortedByOperator);
            }
            debug!("Overwrite confirmed for '{}'", request.destination.display());
        }

        let manifest = build_manifest(request, self.renderer)?;
        self.materialize(&manifest, &request.destination)?;

        let text = instructions(&request.destination, &request.app_name(), self.shell);
        let out = self.writer.output();
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// Writes every manifest entry beneath `destination`, in order.
    pub fn materialize(&mut self, manifest: &Manifest, destination: &Path) -> Result<()> {
        debug!(
            "Materializing {} entries into '{}'",
            manifest.len(),
            destination.display()
        );

        for entry in &manifest.entries {
            let target = resolve_target_path(destination, &entry.path);
            match entry.rendered()? {
                None => self.writer.ensure_dir(&target, entry.mode)?,
                Some(content) => self.writer.write_file(&target, &content, entry.mode)?,
            }
        }
        Ok(())
    }
}
