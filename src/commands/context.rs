use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use serde_json::Value;

use crate::builtin::register_builtin_scanners;
use crate::cli::ColorChoice;
use crate::config::{Config, ConfigLoader, FileConfigLoader};
use crate::discovery::{DirectoryWalker, FileDiscovery, GlobFilter};
use crate::error::RuleScanError;
use crate::output::ColorMode;
use crate::registry::ScannerRegistry;
use crate::rule::RuleCatalog;

#[must_use]
pub(crate) const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

/// Load configuration, or the defaults when `no_config` is set.
///
/// # Errors
/// Returns an error if the configuration file cannot be loaded.
pub(crate) fn load_config(config_path: Option<&Path>, no_config: bool) -> crate::Result<Config> {
    if no_config {
        return Ok(Config::default());
    }

    let loader = FileConfigLoader::new();
    config_path.map_or_else(|| loader.load(), |path| loader.load_from_path(path))
}

/// Load the rule catalog named by the configuration.
///
/// # Errors
/// Returns an error if the directory is missing or a rule file is malformed.
pub(crate) fn load_catalog(config: &Config) -> crate::Result<RuleCatalog> {
    RuleCatalog::load(&config.rules.dir)
}

/// Build a registry holding the builtin scanners, namespaced per configuration.
#[must_use]
pub(crate) fn build_registry(config: &Config) -> ScannerRegistry {
    let mut registry =
        ScannerRegistry::new().with_shared_namespace(config.rules.shared_namespace.clone());
    if let Some(bot) = &config.rules.bot {
        registry = registry.with_bot(bot.clone());
    }
    register_builtin_scanners(&mut registry, config.builtin.max_block_lines);
    registry
}

/// Drop `.` components so `./src/a.py` and `src/a.py` compare equal.
#[must_use]
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Discover every file under `paths`, normalized, sorted and without duplicates.
///
/// # Errors
/// Returns an error if a path does not exist or an exclude pattern is invalid.
pub(crate) fn discover_files(paths: &[PathBuf], config: &Config) -> crate::Result<Vec<PathBuf>> {
    let filter = GlobFilter::new(config.scanner.extensions.clone(), &config.scanner.exclude)?;
    let walker = DirectoryWalker::with_gitignore(filter, config.scanner.gitignore);

    let mut files = Vec::new();
    for path in paths {
        files.extend(walker.discover(path)?.iter().map(|f| normalize_path(f)));
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Map each changed path onto the discovered file it names.
///
/// Paths are matched by canonical location, so `/abs/src/a.py` and `src/a.py`
/// identify the same file and the changed entry takes the discovered form.
/// Changed paths outside the discovered set are kept, normalized.
#[must_use]
pub(crate) fn resolve_changed_files(changed: &[PathBuf], files: &[PathBuf]) -> Vec<PathBuf> {
    let by_location: HashMap<PathBuf, &PathBuf> = files
        .iter()
        .filter_map(|file| dunce::canonicalize(file).ok().map(|key| (key, file)))
        .collect();

    let mut resolved: Vec<PathBuf> = changed
        .iter()
        .map(|path| {
            dunce::canonicalize(path)
                .ok()
                .and_then(|key| by_location.get(&key))
                .map_or_else(|| normalize_path(path), |&file| file.clone())
        })
        .collect();
    resolved.sort();
    resolved.dedup();
    resolved
}

/// Read the story graph document, if one was given.
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid JSON.
pub(crate) fn load_story_graph(path: Option<&Path>) -> crate::Result<Option<Value>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let content = fs::read_to_string(path).map_err(|source| RuleScanError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let value = serde_json::from_str(&content).map_err(|e| {
        RuleScanError::Config(format!("Invalid story graph {}: {e}", path.display()))
    })?;
    Ok(Some(value))
}

/// Write output to a file or stdout.
///
/// File writes ignore `quiet`; parent directories are created as needed.
pub(crate) fn write_output(
    output_path: Option<&Path>,
    content: &str,
    quiet: bool,
) -> crate::Result<()> {
    if let Some(path) = output_path {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
