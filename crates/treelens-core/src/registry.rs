/// Analyser registry and resolver.
///
/// Maps symbolic identifiers to factories with one fixed signature,
/// `(forest, paths) -> analyser`. Resolution handles every requested
/// identifier on its own: an unknown name or a failing constructor costs
/// that identifier a diagnostic and nothing else.
use crate::analysis::{
    Analyser, FileCountAnalyser, FileInfoAnalyser, FileTypeCountAnalyser, LargestFilesAnalyser,
    SharedForest, SharedPaths, StaleFilesAnalyser,
};
use crate::diagnostics::{Diagnostic, Phase};
use crate::error::{panic_message, InitError};
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{debug, info};

/// The construction contract every analyser type satisfies.
pub type AnalyserFactory = fn(SharedForest, SharedPaths) -> Result<Box<dyn Analyser>, InitError>;

/// An instantiated analyser bound to the run's inputs.
pub struct AnalyserTask {
    /// Position of the identifier in the request, used to order results.
    pub index: usize,
    /// Canonical registry id the request resolved to.
    pub identifier: String,
    pub analyser: Box<dyn Analyser>,
}

impl std::fmt::Debug for AnalyserTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyserTask")
            .field("index", &self.index)
            .field("identifier", &self.identifier)
            .field("analyser", &self.analyser.name())
            .finish()
    }
}

/// Outcome of resolving a list of identifiers.
#[derive(Debug, Default)]
pub struct Resolution {
    /// Ready tasks, in request order.
    pub tasks: Vec<AnalyserTask>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Identifier -> factory table.
#[derive(Debug, Clone, Default)]
pub struct AnalyserRegistry {
    factories: HashMap<String, AnalyserFactory>,
    aliases: HashMap<String, String>,
}

impl AnalyserRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in analyser, each also reachable by
    /// its type name.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry
            .register("file-count", FileCountAnalyser::create)
            .alias("FileCountAnalyser", "file-count")
            .register("file-type-count", FileTypeCountAnalyser::create)
            .alias("FileTypeCountAnalyser", "file-type-count")
            .register("file-info", FileInfoAnalyser::create)
            .alias("FileInfoAnalyser", "file-info")
            .register("largest-files", LargestFilesAnalyser::create)
            .alias("LargestFilesAnalyser", "largest-files")
            .register("stale-files", StaleFilesAnalyser::create)
            .alias("StaleFilesAnalyser", "stale-files");
        registry
    }

    /// Register `factory` under `id`, replacing any previous entry.
    pub fn register(&mut self, id: &str, factory: AnalyserFactory) -> &mut Self {
        if self.factories.insert(id.to_string(), factory).is_some() {
            debug!("Replaced analyser factory {id}");
        }
        self
    }

    /// Make `alias` resolve to the registered `id`.
    pub fn alias(&mut self, alias: &str, id: &str) -> &mut Self {
        self.aliases.insert(alias.to_string(), id.to_string());
        self
    }

    /// Registered ids, sorted.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Whether `identifier` would resolve.
    pub fn contains(&self, identifier: &str) -> bool {
        self.lookup(identifier).is_some()
    }

    /// Find the canonical id and factory for a requested identifier.
    ///
    /// Tries the identifier as given, then as an alias, then the last
    /// segment of a qualified name (`graph.analysis.FileCountAnalyser`,
    /// `analysis::FileCountAnalyser`).
    pub fn lookup(&self, identifier: &str) -> Option<(&str, AnalyserFactory)> {
        let identifier = identifier.trim();
        self.lookup_exact(identifier).or_else(|| {
            let last = identifier.rsplit(['.', ':']).next()?;
            if last == identifier {
                None
            } else {
                self.lookup_exact(last)
            }
        })
    }

    fn lookup_exact(&self, name: &str) -> Option<(&str, AnalyserFactory)> {
        let id = self.aliases.get(name).map(String::as_str).unwrap_or(name);
        self.factories
            .get_key_value(id)
            .map(|(id, factory)| (id.as_str(), *factory))
    }

    /// Instantiate one analyser per requested identifier.
    ///
    /// Blank identifiers are ignored. Unknown identifiers, constructor
    /// errors and constructor panics each produce one diagnostic and are
    /// skipped; the remaining identifiers resolve regardless.
    pub fn resolve(
        &self,
        identifiers: &[String],
        forest: &SharedForest,
        paths: &SharedPaths,
    ) -> Resolution {
        let mut resolution = Resolution::default();

        for (index, requested) in identifiers.iter().enumerate() {
            let requested = requested.trim();
            if requested.is_empty() {
                continue;
            }

            let Some((id, factory)) = self.lookup(requested) else {
                resolution.diagnostics.push(Diagnostic::emit(
                    requested,
                    Phase::Resolve,
                    format!(
                        "no analyser registered under this name (known: {}); skipping",
                        self.identifiers().join(", ")
                    ),
                ));
                continue;
            };

            let built = catch_unwind(AssertUnwindSafe(|| factory(forest.clone(), paths.clone())))
                .unwrap_or_else(|payload| Err(InitError::Panicked(panic_message(payload.as_ref()))));

            match built {
                Ok(analyser) => {
                    info!("Preparing to run: {id} ({})", analyser.name());
                    resolution.tasks.push(AnalyserTask {
                        index,
                        identifier: id.to_string(),
                        analyser,
                    });
                }
                Err(err) => {
                    resolution.diagnostics.push(Diagnostic::emit(
                        requested,
                        Phase::Resolve,
                        format!("could not instantiate: {err}; skipping"),
                    ));
                }
            }
        }

        resolution
    }
}
