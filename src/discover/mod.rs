//! Stage-aware discovery of configuration files.
//!
//! The configuration root is a two-level tree: root → stage directories →
//! files. Only the `defaults` directory and the directory named for the
//! active stage are entered; every other directory is pruned without reading
//! its contents. Entries are visited in lexical file-name order so that
//! duplicate-key tie-breaks between files of one stage are deterministic.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::ConfigError;
use crate::stage::StageName;

/// Paths contributing to each stage, in traversal order.
pub type FileList = BTreeMap<StageName, Vec<PathBuf>>;

/// Walks `config_path` and collects the YAML files belonging to `defaults`
/// and to `active_stage`. Symlinked directories and files are followed
/// transparently. Any walk error aborts the discovery; no partial list is
/// returned.
pub fn discover_files(
    config_path: &Path,
    active_stage: &StageName,
) -> Result<FileList, ConfigError> {
    let mut files = FileList::new();
    let mut current_stage: Option<StageName> = None;

    let mut walker = WalkDir::new(config_path)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry.map_err(|source| ConfigError::Walk { source })?;

        // The root itself is not a stage.
        if entry.depth() == 0 {
            continue;
        }

        if entry.file_type().is_dir() {
            if entry.depth() > 1 {
                // Stage directories hold plain files; deeper trees are pruned.
                walker.skip_current_dir();
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if name == StageName::DEFAULTS || name == active_stage.as_str() {
                current_stage = Some(StageName::new(name));
            } else {
                current_stage = None;
                walker.skip_current_dir();
            }
            continue;
        }

        if entry.depth() == 2 && is_yaml(entry.path()) {
            if let Some(stage) = &current_stage {
                files.entry(stage.clone()).or_default().push(entry.into_path());
            }
        }
    }

    Ok(files)
}

fn is_yaml(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("yaml" | "yml"))
}
