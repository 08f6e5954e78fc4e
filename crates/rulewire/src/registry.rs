//! Rule registry: which rules apply where.
//!
//! The generator only reads a registry through [`RuleRegistry`]. Two
//! implementations ship here: [`StaticRegistry`] for callers that classify
//! rules themselves, and [`RegistryFile`] for a YAML or JSON listing such as
//!
//! ```yaml
//! linters:
//!   ForStmtSyntax: [NoEmptyBody, UseWhereClauses]
//!   IfStmtSyntax: [NoParensAroundConditions]
//! formatters: [NoParensAroundConditions, OneVariableDeclarationPerLine]
//! ```
//!
//! Neither implementation promises an iteration order; the emitters sort.

use crate::syntax::Identifier;
use crate::{GenError, Result};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::path::Path;

/// Read-only source of rule classifications.
///
/// Both methods are side-effect free and return the same contents every
/// time they are called during one run.
pub trait RuleRegistry {
    /// Syntax node type name to the inspection rules that visit it.
    fn syntax_node_linters(&self) -> HashMap<Identifier, HashSet<Identifier>>;

    /// Rewrite rules applied to the whole tree.
    fn all_formatters(&self) -> HashSet<Identifier>;
}

/// In-memory registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticRegistry {
    linters: HashMap<Identifier, HashSet<Identifier>>,
    formatters: HashSet<Identifier>,
}

impl StaticRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an inspection rule for a node type.
    #[must_use]
    pub fn linter(mut self, node_type: Identifier, rule: Identifier) -> Self {
        self.linters.entry(node_type).or_default().insert(rule);
        self
    }

    /// Register a node type with no inspection rules yet.
    #[must_use]
    pub fn node_type(mut self, node_type: Identifier) -> Self {
        self.linters.entry(node_type).or_default();
        self
    }

    /// Register a rewrite rule.
    #[must_use]
    pub fn formatter(mut self, rule: Identifier) -> Self {
        self.formatters.insert(rule);
        self
    }

    /// Build from string names, validating each one.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::InvalidIdentifier`] for the first bad name.
    pub fn from_names<'a>(
        linters: impl IntoIterator<Item = (&'a str, Vec<&'a str>)>,
        formatters: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self> {
        let mut registry = Self::new();
        for (node_type, rules) in linters {
            let node_type = Identifier::new(node_type)?;
            registry = registry.node_type(node_type.clone());
            for rule in rules {
                registry = registry.linter(node_type.clone(), Identifier::new(rule)?);
            }
        }
        for rule in formatters {
            registry = registry.formatter(Identifier::new(rule)?);
        }
        Ok(registry)
    }
}

impl RuleRegistry for StaticRegistry {
    fn syntax_node_linters(&self) -> HashMap<Identifier, HashSet<Identifier>> {
        self.linters.clone()
    }

    fn all_formatters(&self) -> HashSet<Identifier> {
        self.formatters.clone()
    }
}

/// Registry listing read from disk.
///
/// Names are validated while deserializing. Repeated rule names in a list
/// collapse into one, and a node type listed more than once gets the union
/// of its rule lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryFile {
    /// Node type to inspection rules
    #[serde(default, deserialize_with = "deserialize_linters")]
    pub linters: HashMap<Identifier, HashSet<Identifier>>,
    /// Rewrite rules
    #[serde(default)]
    pub formatters: HashSet<Identifier>,
}

/// Read the `linters` mapping entry by entry so a repeated key merges into
/// the earlier one instead of replacing it.
fn deserialize_linters<'de, D>(
    deserializer: D,
) -> std::result::Result<HashMap<Identifier, HashSet<Identifier>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LintersVisitor;

    impl<'de> Visitor<'de> for LintersVisitor {
        type Value = HashMap<Identifier, HashSet<Identifier>>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map from node type to a list of rule names")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut linters: Self::Value = HashMap::new();
            while let Some((node_type, rules)) = map.next_entry::<Identifier, Vec<Identifier>>()? {
                linters.entry(node_type).or_default().extend(rules);
            }
            Ok(linters)
        }
    }

    deserializer.deserialize_map(LintersVisitor)
}

impl RegistryFile {
    /// Load from a `.yaml`/`.yml` or `.json` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, has another
    /// extension, or contains an invalid name.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let registry = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml(&text)?,
            Some("json") => Self::from_json(&text)?,
            other => {
                return Err(GenError::config(format!(
                    "unsupported registry extension {:?} for {}",
                    other.unwrap_or(""),
                    path.display()
                )))
            }
        };
        tracing::debug!(
            path = %path.display(),
            node_types = registry.linters.len(),
            formatters = registry.formatters.len(),
            "loaded rule registry"
        );
        Ok(registry)
    }

    /// Parse YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid registry listing.
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(text)?)
    }

    /// Parse JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid registry listing.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

impl RuleRegistry for RegistryFile {
    fn syntax_node_linters(&self) -> HashMap<Identifier, HashSet<Identifier>> {
        self.linters.clone()
    }

    fn all_formatters(&self) -> HashSet<Identifier> {
        self.formatters.clone()
    }
}

/// Sorted snapshot of a registry, used for hashing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrySnapshot {
    /// Node type to inspection rules, sorted
    pub linters: BTreeMap<Identifier, BTreeSet<Identifier>>,
    /// Rewrite rules, sorted
    pub formatters: BTreeSet<Identifier>,
}

impl RegistrySnapshot {
    /// Capture a registry's current contents.
    #[must_use]
    pub fn capture<R: RuleRegistry + ?Sized>(registry: &R) -> Self {
        Self {
            linters: registry
                .syntax_node_linters()
                .into_iter()
                .map(|(node_type, rules)| (node_type, rules.into_iter().collect()))
                .collect(),
            formatters: registry.all_formatters().into_iter().collect(),
        }
    }

    /// Canonical JSON, identical for logically equal registries.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn canonical_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Blake3 hash of the canonical JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn hash(&self) -> Result<String> {
        Ok(blake3::hash(self.canonical_json()?.as_bytes())
            .to_hex()
            .to_string())
    }
}
