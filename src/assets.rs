//! Template and source files bundled into the binary.
//!
//! Names ending in `.j2` are MiniJinja templates, everything else is copied
//! into the generated project verbatim.

pub const APP_ENTRY: &str = "js/app.js";
pub const ROUTES_INDEX: &str = "js/routes/index.js";
pub const LAUNCH_SCRIPT: &str = "js/www.j2";
pub const CONFIG_STUB: &str = "js/config.js.j2";
pub const GIT_IGNORE: &str = "gitignore";
pub const CONTAINER_FILE: &str = "Dockerfile";

const ASSETS: &[(&str, &str)] = &[
    (APP_ENTRY, include_str!("../templates/js/app.js")),
    (ROUTES_INDEX, include_str!("../templates/js/routes/index.js")),
    (LAUNCH_SCRIPT, include_str!("../templates/js/www.j2")),
    (CONFIG_STUB, include_str!("../templates/js/config.js.j2")),
    (GIT_IGNORE, include_str!("../templates/gitignore")),
    (CONTAINER_FILE, include_str!("../templates/Dockerfile")),
];

/// Returns the body of a bundled asset.
pub fn get(name: &str) -> Option<&'static str> {
    ASSETS
        .iter()
        .find(|(asset, _)| *asset == name)
        .map(|(_, body)| *body)
}

/// Checks whether a filename refers to a MiniJinja template.
pub fn is_jinja_template(name: &str) -> bool {
    name.ends_with(".j2")
}
