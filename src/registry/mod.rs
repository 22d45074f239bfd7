//! Rule-to-scanner resolution.
//!
//! Scanners are registered explicitly under a dotted module namespace and a
//! class name. A rule's `scanner_path` (`module.path.ClassName`) is resolved
//! by trying an ordered list of candidate modules, most specific first:
//!
//! 1. the module named in the path,
//! 2. `scanners.<name>_scanner`,
//! 3. `<shared>.scanners.<name>_scanner`,
//! 4. `bots.<bot>.scanners.<name>_scanner` when a bot name is configured,
//!
//! where `<name>` is the class name without its `Scanner` suffix, in
//! snake case. Resolutions are cached by the literal path string.

mod naming;

pub use naming::scanner_short_name;

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use indexmap::IndexMap;

use crate::error::{Result, RuleScanError};
use crate::rule::Rule;
use crate::scanner::Scanner;

/// Default namespace of the shared scanner library.
pub const DEFAULT_SHARED_NAMESPACE: &str = "shared";

type Factory = Arc<dyn Fn() -> Box<dyn Scanner> + Send + Sync>;

/// A registered scanner implementation.
pub struct ScannerType {
    module: String,
    class_name: String,
    factory: Factory,
}

impl ScannerType {
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// `module.ClassName`
    #[must_use]
    pub fn qualified_path(&self) -> String {
        format!("{}.{}", self.module, self.class_name)
    }

    /// Construct a fresh scanner instance.
    #[must_use]
    pub fn instantiate(&self) -> Box<dyn Scanner> {
        (self.factory)()
    }
}

impl fmt::Debug for ScannerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScannerType")
            .field("module", &self.module)
            .field("class_name", &self.class_name)
            .finish_non_exhaustive()
    }
}

/// Registry of scanner implementations keyed by module and class name.
#[derive(Debug)]
pub struct ScannerRegistry {
    modules: IndexMap<String, IndexMap<String, Arc<ScannerType>>>,
    bot_name: Option<String>,
    shared_namespace: String,
    cache: Mutex<HashMap<String, Arc<ScannerType>>>,
    lookups: AtomicUsize,
}

impl Default for ScannerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ScannerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            modules: IndexMap::new(),
            bot_name: None,
            shared_namespace: DEFAULT_SHARED_NAMESPACE.to_string(),
            cache: Mutex::new(HashMap::new()),
            lookups: AtomicUsize::new(0),
        }
    }

    /// Enable the bot-scoped fallback namespace.
    #[must_use]
    pub fn with_bot(mut self, bot_name: impl Into<String>) -> Self {
        let bot_name = bot_name.into();
        self.bot_name = (!bot_name.trim().is_empty()).then_some(bot_name);
        self
    }

    #[must_use]
    pub fn with_shared_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.shared_namespace = namespace.into();
        self
    }

    #[must_use]
    pub fn bot_name(&self) -> Option<&str> {
        self.bot_name.as_deref()
    }

    /// Register `class_name` in `module`, replacing any earlier registration
    /// of the same pair.
    pub fn register<F, S>(&mut self, module: &str, class_name: &str, factory: F)
    where
        F: Fn() -> S + Send + Sync + 'static,
        S: Scanner + 'static,
    {
        let scanner_type = ScannerType {
            module: module.to_string(),
            class_name: class_name.to_string(),
            factory: Arc::new(move || Box::new(factory()) as Box<dyn Scanner>),
        };
        self.modules
            .entry(module.to_string())
            .or_default()
            .insert(class_name.to_string(), Arc::new(scanner_type));
        self.cache
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Register a `Default`-constructible scanner.
    pub fn register_default<S>(&mut self, module: &str, class_name: &str)
    where
        S: Scanner + Default + 'static,
    {
        self.register(module, class_name, S::default);
    }

    /// Every registered scanner, in registration order.
    pub fn scanner_types(&self) -> impl Iterator<Item = &Arc<ScannerType>> {
        self.modules.values().flat_map(IndexMap::values)
    }

    /// Resolve the scanner bound to `rule`.
    ///
    /// Returns `Ok(None)` when the rule declares no scanner.
    ///
    /// # Errors
    /// Returns `ScannerLoad` when no candidate module exposes the class.
    pub fn finds_scanner_by_rule(&self, rule: &Rule) -> Result<Option<Arc<ScannerType>>> {
        rule.scanner_binding().map(|path| self.resolve(path)).transpose()
    }

    /// Resolve a dotted scanner path, consulting the cache first.
    ///
    /// # Errors
    /// Returns `ScannerLoad` when no candidate module exposes the class.
    pub fn resolve(&self, scanner_path: &str) -> Result<Arc<ScannerType>> {
        if let Some(hit) = self.lock_cache().get(scanner_path) {
            return Ok(Arc::clone(hit));
        }

        let (_, class_name) = split_path(scanner_path);
        for module in self.candidate_modules(scanner_path) {
            if let Some(found) = self.lookup(&module, class_name) {
                tracing::debug!(path = scanner_path, module = %module, "resolved scanner");
                self.lock_cache()
                    .insert(scanner_path.to_string(), Arc::clone(&found));
                return Ok(found);
            }
        }

        tracing::debug!(path = scanner_path, "scanner not found");
        Err(RuleScanError::scanner_not_found(scanner_path))
    }

    /// Candidate modules for `scanner_path`, in priority order, without duplicates.
    #[must_use]
    pub fn candidate_modules(&self, scanner_path: &str) -> Vec<String> {
        let (module, class_name) = split_path(scanner_path);
        let leaf = format!("{}_scanner", scanner_short_name(class_name));

        let mut candidates: Vec<String> = Vec::with_capacity(4);
        let mut push = |candidate: String| {
            if !candidate.is_empty() && !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        };
        if let Some(module) = module {
            push(module.to_string());
        }
        push(format!("scanners.{leaf}"));
        push(format!("{}.scanners.{leaf}", self.shared_namespace));
        if let Some(bot) = &self.bot_name {
            push(format!("bots.{bot}.scanners.{leaf}"));
        }
        candidates
    }

    /// Number of module lookups performed so far; cache hits do not count.
    #[must_use]
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    /// Number of cached resolutions.
    #[must_use]
    pub fn cached_count(&self) -> usize {
        self.lock_cache().len()
    }

    fn lookup(&self, module: &str, class_name: &str) -> Option<Arc<ScannerType>> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.modules.get(module)?.get(class_name).cloned()
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<ScannerType>>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Split `a.b.ClassName` into `(Some("a.b"), "ClassName")`.
fn split_path(path: &str) -> (Option<&str>, &str) {
    match path.trim().rsplit_once('.') {
        Some((module, class_name)) => (Some(module), class_name),
        None => (None, path.trim()),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
