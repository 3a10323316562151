//! Enumeration of configuration dumps in a directory.
//!
//! Each regular file named `<device><suffix>` (e.g. `R1.dump`) becomes one
//! corpus entry. Entries are sorted by device name so repeated runs fold links
//! in the same order.

use crate::Result;
use anyhow::Context;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry {
    pub device: String,
    pub text: String,
}

pub fn load_corpus(dir: &Path, suffix: &str) -> Result<Vec<CorpusEntry>> {
    let listing =
        fs::read_dir(dir).with_context(|| format!("read config dir {}", dir.display()))?;

    let mut out = Vec::new();
    for entry in listing {
        let entry = entry.with_context(|| format!("list config dir {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(device) = device_name(&entry.file_name().to_string_lossy(), suffix) else {
            log::debug!("skipping {}", path.display());
            continue;
        };

        let bytes = fs::read(&path).with_context(|| format!("read config file {}", path.display()))?;
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                log::warn!(
                    "{}: not valid UTF-8, replacing undecodable bytes",
                    path.display()
                );
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        out.push(CorpusEntry { device, text });
    }

    out.sort_by(|a, b| a.device.cmp(&b.device));
    Ok(out)
}

/// `R1.dump` with suffix `.dump` => Some("R1").
fn device_name(file_name: &str, suffix: &str) -> Option<String> {
    file_name
        .strip_suffix(suffix)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}
