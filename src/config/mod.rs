//! Configuration loading and validation

mod schema;

pub use schema::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load a scene from a YAML file
pub fn load_config(path: &Path) -> Result<SceneConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read scene file: {:?}", path))?;
    let config: SceneConfig = serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse scene file: {:?}", path))?;
    config.validate()?;
    log::info!(
        "loaded scene {:?}: {} emitter(s), {} cue(s), {} mixer group(s)",
        path,
        config.emitters.len(),
        config.cues.len(),
        config.mixer_groups.len()
    );
    Ok(config)
}
