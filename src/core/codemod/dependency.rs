use std::path::{Path, PathBuf};

/// Folder a package is installed to under `node_modules`.
///
/// Scoped names (`@formatjs/intl`) map to nested folders.
pub fn package_folder(project_root: &Path, package_name: &str) -> PathBuf {
    let modules = project_root.join("node_modules");
    match package_name.strip_prefix('@') {
        Some(scoped) => {
            let mut parts = scoped.splitn(2, '/');
            let scope = parts.next().unwrap_or_default();
            let name = parts.next().unwrap_or_default();
            modules.join(format!("@{}", scope)).join(name)
        }
        None => modules.join(package_name),
    }
}

/// Whether `import_source` resolves to an installed package.
///
/// Relative and absolute specifiers, and the common project aliases (`@/`,
/// `~/`, `#`), point into the project itself and are always considered
/// available. A deep import (`i18next/dist/esm`) checks its package folder.
pub fn is_package_installed(project_root: &Path, import_source: &str) -> bool {
    let source = import_source.trim();
    if source.is_empty() || is_project_path(source) {
        return true;
    }
    package_folder(project_root, &package_name(source)).is_dir()
}

/// Command that installs the package behind `import_source`, using the package
/// manager whose lockfile sits in `project_root` (npm when none is found).
pub fn install_command(project_root: &Path, import_source: &str) -> String {
    const LOCKFILES: [(&str, &str); 4] = [
        ("yarn.lock", "yarn add"),
        ("pnpm-lock.yaml", "pnpm add"),
        ("bun.lockb", "bun add"),
        ("package-lock.json", "npm install"),
    ];

    let command = LOCKFILES
        .iter()
        .find(|(lockfile, _)| project_root.join(lockfile).is_file())
        .map_or("npm install", |(_, command)| command);
    format!("{} {}", command, package_name(import_source.trim()))
}

fn is_project_path(source: &str) -> bool {
    source.starts_with(['.', '/', '#']) || source.starts_with("@/") || source.starts_with("~/")
}

fn package_name(import_source: &str) -> String {
    let segments: Vec<&str> = import_source.split('/').collect();
    let take = if import_source.starts_with('@') { 2 } else { 1 };
    segments[..take.min(segments.len())].join("/")
}
