use std::{fs, path::Path};

use anyhow::Context;
use encoding_rs::Encoding;
use skirmish::api::{parse_config, SessionConfig};
use skirmish::content::ContentFormat;

/// Read a text file, honouring a UTF-8/UTF-16 BOM when present.
pub fn read_text_auto(path: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

pub fn load_session_config(path: &Path) -> anyhow::Result<SessionConfig> {
    let text = read_text_auto(path)?;
    parse_config(&text, ContentFormat::from_path(path))
        .with_context(|| format!("failed to parse session config: {}", path.display()))
}
