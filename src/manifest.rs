//! The Generation Manifest: every directory and file a run produces.

use crate::assets;
use crate::error::{Error, Result};
use crate::name::resolve_name;
use crate::renderer::{TemplateDescriptor, TemplateRenderer};
use crate::writer::{MODE_0666, MODE_0755};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};

/// Version written into every generated package descriptor.
pub const PACKAGE_VERSION: &str = "0.0.0";
/// Port the generated server listens on by default.
pub const DEFAULT_PORT: u16 = 3000;

const DEPENDENCIES: [(&str, &str); 5] = [
    ("express", "~4.21.2"),
    ("debug", "~2.6.9"),
    ("morgan", "~1.10.0"),
    ("cookie-parser", "~1.4.7"),
    ("http-errors", "~2.0.0"),
];

/// Everything one generation run needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Directory the project is generated into
    pub destination: PathBuf,
    /// Skip the confirmation gate for non-empty destinations
    pub force_overwrite: bool,
    /// Add a `.gitignore`
    pub include_git_ignore: bool,
    /// Add a `Dockerfile`
    pub include_container_file: bool,
}

impl GenerationRequest {
    /// Application name derived from the absolute form of the destination.
    ///
    /// `.` and `..` are resolved lexically first, so `..` names the parent
    /// directory.
    pub fn app_name(&self) -> String {
        let destination = std::path::absolute(&self.destination)
            .unwrap_or_else(|_| self.destination.clone());
        resolve_name(normalize(&destination))
    }
}

/// Drops `.` components and folds each `..` into its parent.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Contents of a manifest entry.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryContent {
    Directory,
    Text(String),
    Json(serde_json::Value),
}

/// One directory or file of the generated project.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestEntry {
    /// Path relative to the destination, `.` is the destination itself
    pub path: PathBuf,
    pub mode: u32,
    pub content: EntryContent,
}

impl ManifestEntry {
    fn directory<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            mode: MODE_0755,
            content: EntryContent::Directory,
        }
    }

    fn text<P: Into<PathBuf>>(path: P, content: String, mode: u32) -> Self {
        Self {
            path: path.into(),
            mode,
            content: EntryContent::Text(content),
        }
    }

    /// Bytes written for a file entry, `None` for directories.
    ///
    /// JSON is pretty-printed with two-space indentation and a trailing newline.
    pub fn rendered(&self) -> Result<Option<String>> {
        match &self.content {
            EntryContent::Directory => Ok(None),
            EntryContent::Text(text) => Ok(Some(text.clone())),
            EntryContent::Json(value) => Ok(Some(serde_json::to_string_pretty(value)? + "\n")),
        }
    }
}

/// Ordered list of entries; directories precede the files they contain.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn get<P: AsRef<Path>>(&self, path: P) -> Option<&ManifestEntry> {
        self.entries.iter().find(|entry| entry.path == path.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The generated `package.json`.
#[derive(Debug, Clone, Serialize)]
pub struct PackageDescriptor {
    pub name: String,
    pub version: String,
    pub private: bool,
    pub scripts: IndexMap<String, String>,
    pub dependencies: IndexMap<String, String>,
}

impl PackageDescriptor {
    /// Descriptor with the fixed dependency set.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self::with_dependencies(name, DEPENDENCIES)
    }

    /// Descriptor with custom dependencies, stored sorted by package name.
    pub fn with_dependencies<S, I, K, V>(name: S, dependencies: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut dependencies: IndexMap<String, String> = dependencies
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        dependencies.sort_keys();

        let mut scripts = IndexMap::new();
        scripts.insert("start".to_string(), "node ./bin/www".to_string());

        Self {
            name: name.into(),
            version: PACKAGE_VERSION.to_string(),
            private: true,
            scripts,
            dependencies,
        }
    }
}

fn static_asset(name: &str) -> Result<String> {
    assets::get(name)
        .map(str::to_owned)
        .ok_or_else(|| Error::TemplateAssetError {
            name: name.to_string(),
        })
}

/// Builds the manifest for `request`.
///
/// The result depends on the request alone, never on the state of the
/// destination directory.
///
/// # Errors
/// * `Error::TemplateAssetError` if a bundled asset is missing
/// * `Error::MinijinjaError` if a template fails to render
pub fn build_manifest(
    request: &GenerationRequest,
    renderer: &dyn TemplateRenderer,
) -> Result<Manifest> {
    let name = request.app_name();
    let package = PackageDescriptor::new(name.as_str());

    let context = serde_json::json!({ "name": name, "port": DEFAULT_PORT });
    let www = TemplateDescriptor::new(assets::LAUNCH_SCRIPT, "bin/www", context.clone());
    let config = TemplateDescriptor::new(assets::CONFIG_STUB, "config/index.js", context);
    let www_content = renderer.render(&www)?;
    let config_content = renderer.render(&config)?;

    let mut entries = vec![
        ManifestEntry::directory("."),
        ManifestEntry::directory("bin"),
        ManifestEntry::directory("config"),
        ManifestEntry::directory("routes"),
        ManifestEntry::text("app.js", static_asset(assets::APP_ENTRY)?, MODE_0666),
        ManifestEntry::text(
            "routes/index.js",
            static_asset(assets::ROUTES_INDEX)?,
            MODE_0666,
        ),
        ManifestEntry::text(www.target_path, www_content, MODE_0755),
        ManifestEntry::text(config.target_path, config_content, MODE_0666),
        ManifestEntry {
            path: PathBuf::from("package.json"),
            mode: MODE_0666,
            content: EntryContent::Json(serde_json::to_value(&package)?),
        },
    ];

    if request.include_git_ignore {
        let content = static_asset(assets::GIT_IGNORE)?;
        entries.push(ManifestEntry::text(".gitignore", content, MODE_0666));
    }
    if request.include_container_file {
        let content = static_asset(assets::CONTAINER_FILE)?;
        entries.push(ManifestEntry::text("Dockerfile", content, MODE_0666));
    }

    Ok(Manifest { entries })
}
