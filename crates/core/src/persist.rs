//! Atomic corpus persistence
//!
//! Output files are whole-file writes: content lands in a sibling
//! `.tmp` file first and is renamed onto the final path only after a
//! fully successful write. A failed run never leaves a half-written
//! output behind, which the balancing invariant downstream relies on.

use crate::corpus::Corpus;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Write one response per line, terminated by a newline, replacing
/// `path` atomically.
pub fn write_corpus(corpus: &Corpus, path: &Path) -> Result<()> {
    let tmp = tmp_path(path);

    let mut content = String::new();
    for response in &corpus.responses {
        content.push_str(response);
        content.push('\n');
    }

    if let Err(e) = fs::write(&tmp, &content) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }

    debug!("wrote {} {} responses to {:?}", corpus.len(), corpus.label, path);
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".tmp");
    PathBuf::from(os)
}
