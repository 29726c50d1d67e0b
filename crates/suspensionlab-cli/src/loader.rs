//! Setup and wire file access
//!
//! Human-written setup files are parsed by extension (`json`, `yaml`/`yml`,
//! `toml`) into a [`CaptureSetup`]. Wire files hold the binary encoding.

use std::fs;
use std::path::Path;

use suspensionlab_core::codec;
use suspensionlab_core::schema::CaptureSetup;
use tracing::debug;

use crate::error::{CliError, Result};

/// Read and parse a setup file
pub fn read_setup(path: &Path) -> Result<CaptureSetup> {
    let content = fs::read_to_string(path).map_err(|e| {
        CliError::file_error(format!(
            "Failed to read setup file '{}': {}",
            path.display(),
            e
        ))
    })?;
    let setup = parse_setup_file(path, &content)?;
    debug!(path = %path.display(), geometry = %setup.bike.geometry.kind(), "setup loaded");
    Ok(setup)
}

/// Parse setup file content based on the file extension
pub fn parse_setup_file(path: &Path, content: &str) -> Result<CaptureSetup> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "json" => serde_json::from_str(content)
            .map_err(|e| CliError::parse_error(format!("Invalid JSON: {}", e))),
        "yaml" | "yml" => serde_yaml::from_str(content)
            .map_err(|e| CliError::parse_error(format!("Invalid YAML: {}", e))),
        "toml" => {
            let toml_value: toml::Value = toml::from_str(content)
                .map_err(|e| CliError::parse_error(format!("Invalid TOML: {}", e)))?;
            // Go through JSON so every format shares one deserialization path
            let json_value = serde_json::to_value(&toml_value)?;
            serde_json::from_value(json_value)
                .map_err(|e| CliError::parse_error(format!("Invalid setup: {}", e)))
        }
        _ => Err(CliError::invalid_input(format!(
            "Unsupported file format: {}. Supported formats: json, yaml, yml, toml",
            extension
        ))),
    }
}

/// Read and decode a wire file
pub fn read_wire(path: &Path) -> Result<CaptureSetup> {
    let bytes = fs::read(path).map_err(|e| {
        CliError::file_error(format!(
            "Failed to read wire file '{}': {}",
            path.display(),
            e
        ))
    })?;
    let setup = codec::decode(&bytes)?;
    debug!(path = %path.display(), len = bytes.len(), "wire file decoded");
    Ok(setup)
}

/// Encode a setup and write it to `path`, returning the byte count
pub fn write_wire(path: &Path, setup: &CaptureSetup) -> Result<usize> {
    let bytes = codec::encode(setup);
    fs::write(path, &bytes).map_err(|e| {
        CliError::file_error(format!(
            "Failed to write wire file '{}': {}",
            path.display(),
            e
        ))
    })?;
    Ok(bytes.len())
}
