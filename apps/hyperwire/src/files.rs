//! # Store Files
//!
//! Reading atom lists from disk into an `AtomSpace`.
//!
//! A store file is TOML with one `[[atoms]]` table per top-level atom.
//! Nodes are `{ type, name }`, links `{ type, outgoing = [...] }`; the
//! members of a link are added to the store along with it. Inline tables
//! must stay on one line.
//!
//! ```toml
//! [[atoms]]
//! type = "EvaluationLink"
//! outgoing = [
//!     { type = "PredicateNode", name = "likes" },
//!     { type = "ListLink", outgoing = [{ type = "ConceptNode", name = "alice" }, { type = "ConceptNode", name = "bob" }] },
//! ]
//! ```

use hyperwire_core::{Atom, AtomSpace, HyperwireError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum size of a store or config file (64 MB).
///
/// The whole file is parsed in memory.
const MAX_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Resolve `path` to an existing regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, HyperwireError> {
    let canonical = path.canonicalize().map_err(|e| {
        HyperwireError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(HyperwireError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }
    Ok(canonical)
}

fn validate_file_size(path: &Path) -> Result<(), HyperwireError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| HyperwireError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > MAX_FILE_SIZE {
        return Err(HyperwireError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_FILE_SIZE
        )));
    }
    Ok(())
}

/// Read a text file after path and size checks.
pub fn read_text(path: &Path) -> Result<String, HyperwireError> {
    let canonical = validate_file_path(path)?;
    validate_file_size(&canonical)?;
    std::fs::read_to_string(&canonical).map_err(|e| {
        HyperwireError::IoError(format!("Cannot read '{}': {}", path.display(), e))
    })
}

// =============================================================================
// STORE FILE
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct StoreFile {
    #[serde(default)]
    atoms: Vec<Atom>,
}

/// Parse store-file text into an `AtomSpace`.
pub fn parse_store(text: &str) -> Result<AtomSpace, HyperwireError> {
    let file: StoreFile =
        toml::from_str(text).map_err(|e| HyperwireError::Store(e.to_string()))?;
    Ok(file.atoms.into_iter().collect())
}

/// Load the store file at `path`.
pub fn load_store(path: &Path) -> Result<AtomSpace, HyperwireError> {
    let space = parse_store(&read_text(path)?)?;
    tracing::info!(path = %path.display(), atoms = space.len(), "store loaded");
    Ok(space)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use hyperwire_core::AtomStore;

    const SAMPLE: &str = r#"
[[atoms]]
type = "EvaluationLink"
outgoing = [
    { type = "PredicateNode", name = "likes" },
    { type = "ListLink", outgoing = [{ type = "ConceptNode", name = "alice" }, { type = "ConceptNode", name = "bob" }] },
]

[[atoms]]
type = "ConceptNode"
name = "carol"
"#;

    #[test]
    fn nested_links_are_loaded_with_members() {
        let space = parse_store(SAMPLE).expect("parse");
        // likes, alice, bob, carol, the list and the evaluation.
        assert_eq!(space.len(), 6);
        assert_eq!(space.link_count(), 2);

        let alice = Atom::node("ConceptNode", "alice");
        let lists = space.incoming(&alice).expect("incoming");
        assert_eq!(lists.len(), 1);
    }

    #[test]
    fn empty_file_is_an_empty_store() {
        let space = parse_store("").expect("parse");
        assert!(space.is_empty());
    }

    #[test]
    fn malformed_atom_is_a_store_error() {
        let result = parse_store("[[atoms]]\ntype = \"ConceptNode\"\n");
        assert!(matches!(result, Err(HyperwireError::Store(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load_store(Path::new("/nonexistent/hyperwire-store.toml"));
        assert!(matches!(result, Err(HyperwireError::IoError(_))));
    }
}
