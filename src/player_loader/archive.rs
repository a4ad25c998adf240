use std::path::Path;

use anyhow::{bail, Context};
use tracing::instrument;

/// File extension of player archives.
pub const ARCHIVE_EXTENSION: &str = "par";

/// Extension of the entries naming a loadable unit.
const UNIT_EXTENSION: &str = ".unit";

/// A parsed player archive manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    pub name: String,
    pub entries: Vec<String>,
}

impl Archive {
    /// Symbols of the loadable units, in manifest order.
    pub fn unit_symbols(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().filter_map(|entry| unit_symbol(entry))
    }
}

/// Reads the whole archive, then releases the file before parsing.
#[instrument]
pub fn read_archive(path: &Path) -> anyhow::Result<Archive> {
    let text = std::fs::read_to_string(path).context("cannot read archive")?;
    parse_manifest(&text)
}

/// `classic/tit_for_tat.unit` names the unit `classic::tit_for_tat`. Entries that are not
/// units give `None`.
pub fn unit_symbol(entry: &str) -> Option<String> {
    let path = entry.strip_suffix(UNIT_EXTENSION)?;
    if path.is_empty() || path.split('/').any(str::is_empty) {
        return None;
    }
    Some(path.replace('/', "::"))
}

pub fn parse_manifest(text: &str) -> anyhow::Result<Archive> {
    let mut name = None;
    let mut entries = Vec::new();
    let mut in_entries = false;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim_end();

        if line.trim().is_empty() || line.trim().starts_with('#') {
            continue;
        }

        if in_entries && line.trim_start().starts_with('-') {
            let entry = line.trim_start()[1..].trim();
            if entry.is_empty() {
                bail!("Line {}: empty entry", i + 1);
            }
            entries.push(entry.to_string());
        } else if let Some(value) = line.strip_prefix("archive:") {
            if name.is_some() {
                bail!("Line {}: 'archive' given twice", i + 1);
            }
            let value = value.trim();
            if value.is_empty() {
                bail!("Line {}: 'archive' value missing", i + 1);
            }
            name = Some(value.to_string());
            in_entries = false;
        } else if line.starts_with("entries:") {
            if !line["entries:".len()..].trim().is_empty() {
                bail!("Line {}: entries must be listed on the next lines", i + 1);
            }
            in_entries = true;
        } else if in_entries {
            bail!("Line {}: Expected list item starting with '-'", i + 1);
        } else {
            bail!("Line {}: Expected 'archive:' or 'entries:' key", i + 1);
        }
    }

    let name = name.context("Missing 'archive' key")?;
    Ok(Archive { name, entries })
}
