/// Traversal-time entry filtering.
///
/// Ignore patterns prune an entry and everything beneath it. Type filters
/// only ever drop files; directories are always kept so the walk can reach
/// matching files further down.
use crate::error::ConfigError;
use glob::Pattern;

/// Compiled ignore patterns and type filters.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    ignore: Vec<Pattern>,
    /// Lowercased, without a leading `.`.
    types: Vec<String>,
}

impl EntryFilter {
    /// Compile the ignore globs and normalise the type filters.
    pub fn compile(ignore: &[String], type_filters: &[String]) -> Result<Self, ConfigError> {
        let ignore = ignore
            .iter()
            .map(|raw| {
                Pattern::new(raw).map_err(|source| ConfigError::InvalidIgnorePattern {
                    pattern: raw.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let types = type_filters
            .iter()
            .map(|t| t.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        Ok(Self { ignore, types })
    }

    /// `true` when `name` matches any ignore pattern.
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore.iter().any(|p| p.matches(name))
    }

    /// `true` when a file of `file_type` may enter the tree.
    pub fn accepts_file_type(&self, file_type: &str) -> bool {
        self.types.is_empty() || self.types.iter().any(|t| t.eq_ignore_ascii_case(file_type))
    }

    /// `true` when neither ignores nor type filters are configured.
    pub fn is_passthrough(&self) -> bool {
        self.ignore.is_empty() && self.types.is_empty()
    }
}
