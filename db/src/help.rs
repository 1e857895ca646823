//! Per-command help metadata and documentation lookup.
//!
//! The [`HelpIndex`] joins two static tables: a per-command parameter help
//! table and a documentation table-of-contents tree flattened into a
//! command → URL lookup. Both are read-only after load. Absence of either
//! file is recoverable; suggestion generation proceeds without descriptions
//! and links.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use cli_recovery_core::Link;

use crate::error::{DataError, Result};

const DOCS_BASE_URL: &str = "https://docs.microsoft.com/en-us";

const DEFAULT_HELP_TABLE: &str = include_str!("../data/help_table.json");
const DEFAULT_TOC: &str = include_str!("../data/toc.json");

/// Help metadata for one parameter of a command.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParameterHelp {
    /// All accepted spellings, long forms first (e.g. `["--resource-group", "-g"]`).
    #[serde(rename = "name", default)]
    pub aliases: Vec<String>,
    /// Whether the host requires this parameter.
    #[serde(default)]
    pub required: bool,
    /// One-line description from the help dump.
    #[serde(rename = "short-summary", default)]
    pub summary: Option<String>,
}

impl ParameterHelp {
    /// The canonical spelling: the first long-form alias, falling back to the
    /// first alias of any shape.
    pub fn canonical_name(&self) -> Option<&str> {
        self.aliases
            .iter()
            .find(|alias| alias.starts_with("--"))
            .or_else(|| self.aliases.first())
            .map(String::as_str)
    }

    /// Checks whether `flag` is one of this parameter's spellings.
    pub fn matches(&self, flag: &str) -> bool {
        self.aliases.iter().any(|alias| alias == flag)
    }
}

/// Help metadata for one command or command group.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HelpEntry {
    /// One-line description.
    #[serde(rename = "short-summary", default)]
    pub summary: Option<String>,
    /// Parameter metadata keyed by canonical parameter name.
    #[serde(default)]
    pub parameters: HashMap<String, ParameterHelp>,
}

#[derive(Debug, Deserialize)]
struct TocNode {
    #[serde(rename = "displayName", default)]
    display_name: Option<String>,
    #[serde(default)]
    href: Option<String>,
    #[serde(default)]
    items: Vec<TocNode>,
    #[serde(default)]
    children: Vec<TocNode>,
}

/// Read-only index over the help table and documentation table of contents.
///
/// Loaded lazily once per process and queried by command name.
///
/// # Examples
///
/// ```
/// use cli_recovery_db::HelpIndex;
///
/// let index = HelpIndex::load_default().unwrap();
/// assert!(index.contains("group create"));
/// assert!(index.is_command_group("storage account"));
///
/// let link = index.generate_link("storage account").unwrap();
/// assert!(link.url.ends_with("/cli/azure/storage/account"));
/// ```
#[derive(Debug)]
pub struct HelpIndex {
    entries: HashMap<String, HelpEntry>,
    docs: HashMap<String, String>,
    groups: HashSet<String>,
}

impl HelpIndex {
    /// Builds an index from already-parsed tables.
    pub fn new(entries: HashMap<String, HelpEntry>, toc_json: Option<&str>) -> Result<Self> {
        let docs = match toc_json {
            Some(raw) => {
                let root: TocNode = serde_json::from_str(raw)?;
                let mut docs = HashMap::new();
                flatten_toc(&root, &mut docs);
                docs
            }
            None => HashMap::new(),
        };
        let groups = derive_groups(&entries);

        Ok(Self {
            entries,
            docs,
            groups,
        })
    }

    /// Loads the index from JSON files on disk.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::NotFound`] when a file is missing, which callers
    /// treat as "proceed without help data", and [`DataError::Json`] on
    /// malformed content.
    pub fn load(help_table_path: &Path, toc_path: Option<&Path>) -> Result<Self> {
        let help_raw = read_required(help_table_path)?;
        let toc_raw = toc_path.map(read_required).transpose()?;

        let entries: HashMap<String, HelpEntry> = serde_json::from_str(&help_raw)?;
        Self::new(entries, toc_raw.as_deref())
    }

    /// Loads the embedded default tables.
    pub fn load_default() -> Result<Self> {
        let entries: HashMap<String, HelpEntry> = serde_json::from_str(DEFAULT_HELP_TABLE)?;
        Self::new(entries, Some(DEFAULT_TOC))
    }

    /// Returns `true` if the index has an entry for `command`.
    pub fn contains(&self, command: &str) -> bool {
        self.entries.contains_key(command)
    }

    /// Returns `true` if `prefix` is a proper command-group prefix of some
    /// known command.
    pub fn is_command_group(&self, prefix: &str) -> bool {
        self.groups.contains(prefix)
    }

    /// One-line description for a command or command group.
    pub fn get_description(&self, entity: &str) -> Option<&str> {
        self.entries.get(entity)?.summary.as_deref()
    }

    /// Parameter metadata table for a command, if known.
    pub fn parameter_table(&self, command: &str) -> Option<&HashMap<String, ParameterHelp>> {
        let table = &self.entries.get(command)?.parameters;
        if table.is_empty() { None } else { Some(table) }
    }

    /// Looks up a parameter's metadata on `command` by any of its spellings.
    pub fn parameter_by_alias(&self, command: &str, flag: &str) -> Option<&ParameterHelp> {
        self.parameter_table(command)?
            .values()
            .find(|info| info.matches(flag))
    }

    /// Expands `flag` to its canonical long-form spelling on `command`.
    ///
    /// Returns `None` for flags the command does not declare; callers retain
    /// those as typed.
    pub fn normalize_parameter(&self, command: &str, flag: &str) -> Option<String> {
        self.parameter_by_alias(command, flag)?
            .canonical_name()
            .map(str::to_string)
    }

    /// All alias spellings of required parameters on `command`.
    pub fn required_aliases(&self, command: &str) -> HashSet<String> {
        self.parameter_table(command)
            .map(|table| {
                table
                    .values()
                    .filter(|info| info.required)
                    .flat_map(|info| info.aliases.iter().cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Generates the documentation link for a command or command group.
    ///
    /// The table of contents keys display names with the host program prefix,
    /// so a bare keyword is retried with the prefix before giving up.
    pub fn generate_link(&self, keyword: &str) -> Option<Link> {
        let prefixed;
        let key = if self.docs.contains_key(keyword) {
            keyword
        } else {
            prefixed = format!("{} {keyword}", cli_recovery_core::HOST_PROGRAM);
            prefixed.as_str()
        };

        let href = self.docs.get(key)?;
        let path = href.strip_prefix("./").unwrap_or(href);
        let url = if path.starts_with('/') {
            format!("{DOCS_BASE_URL}{path}")
        } else {
            format!("{DOCS_BASE_URL}/{path}")
        };

        Some(Link::new(url, keyword))
    }

    /// Returns an iterator over the known command and command-group names.
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of help entries loaded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entries were loaded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn read_required(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(DataError::NotFound(path.to_path_buf()));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Flattens the TOC tree into a display-name → href lookup.
///
/// Entries pointing at extension docs (`/ext/` hrefs) are replaced when a
/// core doc page for the same display name is seen.
fn flatten_toc(node: &TocNode, table: &mut HashMap<String, String>) {
    let children = if node.items.is_empty() {
        &node.children
    } else {
        &node.items
    };

    for child in children {
        if let (Some(display_name), Some(href)) = (&child.display_name, &child.href) {
            if display_name.starts_with(&format!("{} ", cli_recovery_core::HOST_PROGRAM)) {
                let replace = match table.get(display_name) {
                    Some(existing) => existing.contains("/ext/"),
                    None => true,
                };
                if replace {
                    table.insert(display_name.clone(), href.clone());
                }
            }
        }
        flatten_toc(child, table);
    }
}

fn derive_groups(entries: &HashMap<String, HelpEntry>) -> HashSet<String> {
    let mut groups = HashSet::new();

    for command in entries.keys() {
        let tokens: Vec<&str> = command.split_whitespace().collect();
        for end in 1..tokens.len() {
            groups.insert(tokens[..end].join(" "));
        }
    }

    groups
}
