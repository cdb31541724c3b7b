use alloy_json_abi::JsonAbi;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use glob::glob;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct LoadedArtifact {
    pub path: Utf8PathBuf,
    /// `contractName` when the artifact carries one, otherwise the file stem.
    pub name: String,
    pub abi: Result<JsonAbi, ArtifactLoadError>,
}

#[derive(Debug, Error, Clone)]
pub enum ArtifactLoadError {
    #[error("io error: {message}")]
    Io { message: String },

    #[error("json parse error: {message}")]
    Json { message: String },

    #[error("artifact has no abi")]
    MissingAbi,
}

/// Load one artifact. Accepts a raw ABI array or an object with an `abi` field.
pub fn load_artifact(path: &Utf8Path) -> LoadedArtifact {
    let stem = path.file_stem().unwrap_or("unknown").to_string();

    let parsed = match fs::read_to_string(path) {
        Ok(s) => serde_json::from_str::<serde_json::Value>(&s).map_err(|e| {
            ArtifactLoadError::Json {
                message: e.to_string(),
            }
        }),
        Err(e) => Err(ArtifactLoadError::Io {
            message: e.to_string(),
        }),
    };

    let (name, abi) = match parsed {
        Ok(value) => {
            let name = value
                .get("contractName")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or(stem);
            (name, abi_from_value(value))
        }
        Err(e) => (stem, Err(e)),
    };

    LoadedArtifact {
        path: path.to_path_buf(),
        name,
        abi,
    }
}

/// Load every `*.json` artifact directly under `dir`, sorted by path.
///
/// Hardhat `*.dbg.json` sidecars are skipped.
pub fn load_artifacts(dir: &Utf8Path) -> anyhow::Result<Vec<LoadedArtifact>> {
    let pattern = dir.join("*.json");
    let pattern_str = pattern.as_str();

    debug!(pattern = %pattern_str, "scanning for abi artifacts");

    let mut out = Vec::new();
    for entry in glob(pattern_str).context("glob *.json artifacts")? {
        let path = entry
            .map_err(|e| anyhow::anyhow!("glob error: {e}"))?
            .to_string_lossy()
            .to_string();
        let path = Utf8PathBuf::from(path);

        if path.as_str().ends_with(".dbg.json") {
            debug!(path = %path, "skipping debug sidecar");
            continue;
        }

        out.push(load_artifact(&path));
    }

    out.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(out)
}

fn abi_from_value(value: serde_json::Value) -> Result<JsonAbi, ArtifactLoadError> {
    let abi_value = match value {
        serde_json::Value::Array(_) => value,
        serde_json::Value::Object(mut obj) => match obj.remove("abi") {
            Some(v) => v,
            None => return Err(ArtifactLoadError::MissingAbi),
        },
        _ => return Err(ArtifactLoadError::MissingAbi),
    };

    serde_json::from_value(abi_value).map_err(|e| ArtifactLoadError::Json {
        message: e.to_string(),
    })
}
