//! Port traits abstracting artifact I/O away from the pipeline.

use camino::Utf8Path;
use facetcut_abi::LoadedArtifact;

/// Source of compiled ABI artifacts.
pub trait ArtifactSource {
    fn load_artifact(&self, path: &Utf8Path) -> LoadedArtifact;
}

/// File-system write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}
