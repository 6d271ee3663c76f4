use anyhow::{Context, Result};
use memmap2::Mmap;
use std::path::Path;

use crate::string_set::StringSet;

/// Map an opened store for reading. The map must be dropped before the
/// store is written back.
fn map_store(file: &std::fs::File, path: &Path) -> Result<Mmap> {
    // SAFETY: the map lives only inside `load`; this process rewrites the store
    // only after loading has returned, and no other writer is expected.
    unsafe {
        Mmap::map(file).with_context(|| format!("Failed to memory-map store: {}", path.display()))
    }
}

/// Seed `set` from a word store: one word per line, trimmed and lower-cased.
/// A missing store is treated as empty. Returns the number of newly added words.
pub fn load(path: &Path, set: &mut StringSet) -> Result<usize> {
    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::warn!("store {} not found, starting empty", path.display());
            return Ok(0);
        }
        Err(e) => {
            return Err(anyhow::Error::from(e))
                .with_context(|| format!("Failed to open store: {}", path.display()))
        }
    };

    let len = file
        .metadata()
        .with_context(|| format!("Failed to read metadata: {}", path.display()))?
        .len();
    if len == 0 {
        log::info!("loaded 0 words from {}", path.display());
        return Ok(0);
    }

    let raw = map_store(&file, path)?;
    let text = std::str::from_utf8(&raw)
        .with_context(|| format!("Store is not valid UTF-8: {}", path.display()))?;

    let before = set.len();
    set.extend(
        text.lines()
            .map(|line| line.trim().to_lowercase())
            .filter(|word| !word.is_empty()),
    );
    let added = set.len() - before;
    log::info!("loaded {} words from {}", added, path.display());
    Ok(added)
}

/// Render the full snapshot: every member, sorted, newline-terminated.
pub fn render(set: &StringSet) -> String {
    let mut words: Vec<&str> = set.iter().collect();
    words.sort_unstable();
    let mut out = String::with_capacity(words.iter().map(|w| w.len() + 1).sum());
    for w in words {
        out.push_str(w);
        out.push('\n');
    }
    out
}

/// Overwrite the store with the current snapshot of `set`.
pub async fn save(path: &Path, set: &StringSet) -> Result<()> {
    let snapshot = render(set);
    tokio::fs::write(path, snapshot.as_bytes())
        .await
        .with_context(|| format!("Failed to write store: {}", path.display()))?;
    log::debug!("wrote {} words to {}", set.len(), path.display());
    Ok(())
}
