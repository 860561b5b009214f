use kiln::error::{Error, Result};
use kiln::manifest::GenerationRequest;
use kiln::processor::{instructions, resolve_target_path, Processor, ShellFamily};
use kiln::prompt::Prompter;
use kiln::renderer::MiniJinjaRenderer;
use kiln::writer::FileSystemWriter;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Prompter double with a canned answer.
struct ScriptedPrompter {
    answer: bool,
    asked: usize,
}

impl ScriptedPrompter {
    fn new(answer: bool) -> Self {
        Self { answer, asked: 0 }
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, _question: &str) -> Result<bool> {
        self.asked += 1;
        Ok(self.answer)
    }
}

fn request(destination: &Path) -> GenerationRequest {
    GenerationRequest {
        destination: destination.to_path_buf(),
        force_overwrite: false,
        include_git_ignore: true,
        include_container_file: true,
    }
}

/// Runs the pipeline and returns the result, the prompt count and the report.
fn generate(request: &GenerationRequest, answer: bool) -> (Result<()>, usize, String) {
    let renderer = MiniJinjaRenderer::new();
    let mut prompter = ScriptedPrompter::new(answer);
    let mut processor = Processor::new(
        &renderer,
        &mut prompter,
        FileSystemWriter::new(Vec::new()),
        ShellFamily::Posix,
    );
    let result = processor.run(request);
    let output = String::from_utf8(processor.into_output()).unwrap();
    (result, prompter.asked, output)
}

#[test_log::test]
fn test_generate_into_missing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let destination = temp_dir.path().join("shop");

    let (result, asked, output) = generate(&request(&destination), false);

    assert!(result.is_ok());
    assert_eq!(asked, 0);
    let files = [
        "app.js",
        "routes/index.js",
        "bin/www",
        "config/index.js",
        "package.json",
        ".gitignore",
        "Dockerfile",
    ];
    for file in files {
        assert!(destination.join(file).is_file(), "{file}");
        assert!(output.contains(&format!("   create : {}\n", destination.join(file).display())));
    }
    assert!(output.contains("DEBUG=shop:* npm start"));
}

#[test_log::test]
fn test_generate_into_empty_directory() {
    let temp_dir = TempDir::new().unwrap();

    let (result, asked, _) = generate(&request(temp_dir.path()), false);

    assert!(result.is_ok());
    assert_eq!(asked, 0);
    assert!(temp_dir.path().join("package.json").is_file());
}

#[test_log::test]
fn test_declined_confirmation_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("notes.txt"), "keep me").unwrap();

    let (result, asked, output) = generate(&request(temp_dir.path()), false);

    assert!(matches!(result, Err(Error::AbortedByOperator)));
    assert_eq!(asked, 1);
    assert!(output.is_empty());
    let entries: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test_log::test]
fn test_confirmed_overwrite_matches_fresh_generation() {
    let fresh = TempDir::new().unwrap();
    let populated = TempDir::new().unwrap();
    let fresh_dir = fresh.path().join("shop");
    let populated_dir = populated.path().join("shop");

    fs::create_dir_all(populated_dir.join("routes")).unwrap();
    fs::write(populated_dir.join("app.js"), "stale").unwrap();
    fs::write(populated_dir.join("routes/index.js"), "stale").unwrap();

    let (result, asked, _) = generate(&request(&fresh_dir), false);
    assert!(result.is_ok());
    assert_eq!(asked, 0);

    let (result, asked, _) = generate(&request(&populated_dir), true);
    assert!(result.is_ok());
    assert_eq!(asked, 1);

    assert!(!dir_diff::is_different(&fresh_dir, &populated_dir).unwrap());
}

#[test]
fn test_force_skips_confirmation() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("notes.txt"), "keep me").unwrap();
    let request = GenerationRequest {
        force_overwrite: true,
        ..request(temp_dir.path())
    };

    let (result, asked, _) = generate(&request, false);

    assert!(result.is_ok());
    assert_eq!(asked, 0);
    assert!(temp_dir.path().join("notes.txt").is_file());
    assert!(temp_dir.path().join("bin/www").is_file());
}

#[test]
fn test_destination_is_a_file() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("taken");
    fs::write(&file, "").unwrap();

    let (result, asked, output) = generate(&request(&file), true);

    assert!(matches!(result, Err(Error::PreflightReadError { .. })));
    assert_eq!(asked, 0);
    assert!(output.is_empty());
}

#[test]
fn test_write_failure_aborts_before_instructions() {
    let temp_dir = TempDir::new().unwrap();
    let destination = temp_dir.path().join("shop");
    fs::create_dir_all(&destination).unwrap();
    // A file where the `bin` directory belongs.
    fs::write(destination.join("bin"), "").unwrap();

    let (result, _, output) = generate(&request(&destination), true);

    assert!(matches!(result, Err(Error::WriteError { .. })));
    assert!(!output.contains("install dependencies"));
}

#[cfg(unix)]
#[test]
fn test_launch_script_is_executable() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let (result, _, _) = generate(&request(temp_dir.path()), false);
    assert!(result.is_ok());

    let www = fs::metadata(temp_dir.path().join("bin/www")).unwrap().permissions().mode();
    let app = fs::metadata(temp_dir.path().join("app.js")).unwrap().permissions().mode();
    assert_eq!(www & 0o777, 0o755);
    assert_eq!(app & 0o777, 0o666);
}

#[cfg(unix)]
#[test]
fn test_confirmed_overwrite_restores_modes() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let destination = temp_dir.path().join("shop");
    fs::create_dir_all(destination.join("bin")).unwrap();
    let stale = destination.join("bin/www");
    fs::write(&stale, "stale").unwrap();
    fs::set_permissions(&stale, fs::Permissions::from_mode(0o644)).unwrap();

    let (result, asked, _) = generate(&request(&destination), true);
    assert!(result.is_ok());
    assert_eq!(asked, 1);

    let www = fs::metadata(&stale).unwrap().permissions().mode();
    assert_eq!(www & 0o777, 0o755);
}

#[test]
fn test_instructions() {
    let posix = instructions(Path::new("shop"), "shop", ShellFamily::Posix);
    assert_eq!(
        posix,
        concat!(
            "\n",
            "   change directory:\n     $ cd shop\n\n",
            "   install dependencies:\n     $ npm install\n\n",
            "   run the app:\n     $ DEBUG=shop:* npm start\n\n",
        )
    );

    let here = instructions(Path::new("."), "shop", ShellFamily::Posix);
    assert!(!here.contains("change directory"));

    let cmd = instructions(Path::new("shop"), "shop", ShellFamily::Cmd);
    assert!(cmd.contains("     > cd shop\n"));
    assert!(cmd.contains("     > SET DEBUG=shop:* & npm start\n"));
}

#[test]
fn test_resolve_target_path() {
    let destination = Path::new("out");
    assert_eq!(resolve_target_path(destination, "."), PathBuf::from("out"));
    assert_eq!(resolve_target_path(destination, "bin/www"), PathBuf::from("out/bin/www"));
}
