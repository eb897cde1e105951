use std::path::PathBuf;
use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::{Captures, Regex};

use crate::error::{DependenceError, DependenceResult};

const MAX_ALIAS_DEPTH: usize = 8;

fn env_placeholder() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)")
            .expect("invalid env placeholder regex")
    })
}

/// Expands `@alias` prefixes and `$VAR` placeholders in configured paths.
///
/// An alias matches when the path equals the alias or continues with a `/`. When
/// several aliases match (`@app` and `@app/web`), the longest one wins.
#[derive(Debug, Clone, Default)]
pub struct AliasResolver {
    aliases: IndexMap<String, String>,
}

impl AliasResolver {
    /// Build a resolver from the configured alias map. Keys missing the leading
    /// `@` are accepted and normalised.
    pub fn new(aliases: &IndexMap<String, String>) -> Self {
        let aliases = aliases
            .iter()
            .map(|(name, target)| {
                let name = if name.starts_with('@') {
                    name.trim_end_matches('/').to_string()
                } else {
                    format!("@{}", name.trim_end_matches('/'))
                };
                let target = if target.len() > 1 {
                    target.trim_end_matches('/').to_string()
                } else {
                    target.clone()
                };
                (name, target)
            })
            .collect();
        Self { aliases }
    }

    /// Resolve into a filesystem path.
    pub fn resolve_path(&self, value: &str) -> DependenceResult<PathBuf> {
        self.resolve(value).map(PathBuf::from)
    }

    /// Resolve environment placeholders, then aliases.
    pub fn resolve(&self, value: &str) -> DependenceResult<String> {
        let expanded = expand_env(value)?;
        self.resolve_alias(&expanded, value, 0)
    }

    fn resolve_alias(&self, value: &str, original: &str, depth: usize) -> DependenceResult<String> {
        if !value.starts_with('@') {
            return Ok(value.to_string());
        }
        if depth >= MAX_ALIAS_DEPTH {
            return Err(DependenceError::config(format!(
                "path alias nesting is too deep in '{original}'"
            )));
        }

        let matched = self
            .aliases
            .iter()
            .filter(|(name, _)| {
                value
                    .strip_prefix(name.as_str())
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
            })
            .max_by_key(|(name, _)| name.len());

        let Some((name, target)) = matched else {
            let alias = value.split('/').next().unwrap_or(value).to_string();
            return Err(DependenceError::UnknownAlias {
                alias,
                path: original.to_string(),
            });
        };

        let replaced = format!("{target}{}", &value[name.len()..]);
        self.resolve_alias(&replaced, original, depth + 1)
    }
}

fn expand_env(value: &str) -> DependenceResult<String> {
    if !value.contains('$') {
        return Ok(value.to_string());
    }

    let mut missing = None;
    let expanded = env_placeholder().replace_all(value, |caps: &Captures<'_>| {
        let name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or_default();
        match std::env::var(name) {
            Ok(resolved) => resolved,
            Err(_) => {
                missing.get_or_insert_with(|| name.to_string());
                String::new()
            }
        }
    });

    match missing {
        Some(name) => Err(DependenceError::UnsetVariable {
            name,
            path: value.to_string(),
        }),
        None => Ok(expanded.into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> AliasResolver {
        let mut aliases = IndexMap::new();
        aliases.insert("@app".to_string(), "/srv/app/".to_string());
        aliases.insert("webroot".to_string(), "@app/web".to_string());
        aliases.insert("@app/legacy".to_string(), "/opt/legacy".to_string());
        AliasResolver::new(&aliases)
    }

    #[test]
    fn leaves_plain_paths_untouched() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("/tmp/views").unwrap(), "/tmp/views");
        assert_eq!(
            resolver.resolve("yii\\web\\YiiAsset").unwrap(),
            "yii\\web\\YiiAsset"
        );
    }

    #[test]
    fn expands_nested_aliases() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("@app").unwrap(), "/srv/app");
        assert_eq!(resolver.resolve("@app/assets").unwrap(), "/srv/app/assets");
        assert_eq!(resolver.resolve("@webroot/css").unwrap(), "/srv/app/web/css");
    }

    #[test]
    fn prefers_the_longest_alias() {
        let resolver = resolver();
        assert_eq!(
            resolver.resolve("@app/legacy/views").unwrap(),
            "/opt/legacy/views"
        );
    }

    #[test]
    fn alias_must_end_at_a_segment_boundary() {
        let err = resolver().resolve("@application/views").unwrap_err();
        assert!(matches!(err, DependenceError::UnknownAlias { ref alias, .. } if alias == "@application"));
    }

    #[test]
    fn expands_environment_placeholders() {
        let path = std::env::var("PATH").unwrap_or_default();
        if path.is_empty() {
            return;
        }
        let resolver = AliasResolver::default();
        assert_eq!(resolver.resolve("${PATH}").unwrap(), path);
        assert_eq!(resolver.resolve("$PATH").unwrap(), path);
    }

    #[test]
    fn unset_variables_are_errors() {
        let err = AliasResolver::default()
            .resolve("$ASSET_DEPS_SURELY_UNSET_VARIABLE/web")
            .unwrap_err();
        assert!(matches!(err, DependenceError::UnsetVariable { .. }));
    }
}
