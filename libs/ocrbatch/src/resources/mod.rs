use anyhow::Result;
use rust_embed::RustEmbed;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Image assets bundled into the binary at compile time.
#[derive(RustEmbed)]
#[folder = "../../assets/"]
struct Assets;

/// A bundled or on-disk resource materialized to a readable filesystem path.
///
/// For bundled assets the backing temp directory is owned by this value and
/// removed on drop, so the path stays valid for exactly as long as the
/// resource is held.
#[derive(Debug)]
pub struct ResolvedResource {
    pub name: String,
    pub path: PathBuf,
    _temp_dir: Option<TempDir>,
}

/// Looks up a logical asset name (e.g. "OCR/photo_1.jpg") in the embedded
/// bundle and copies its bytes to a temp file.
///
/// An embedded asset has no direct filesystem path, so copy-to-temp is the
/// only resolution strategy that works here. A miss means the asset was not
/// packaged and the caller should abort before touching the OCR engine.
pub fn resolve(name: &str) -> Result<ResolvedResource> {
    let asset = Assets::get(name)
        .ok_or_else(|| anyhow::anyhow!("Resource '{}' not found in bundle", name))?;

    let file_name = Path::new(name)
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid resource name: {}", name))?;

    let temp_dir = tempfile::tempdir()
        .map_err(|e| anyhow::anyhow!("Failed to create temp dir for resource: {}", e))?;
    let path = temp_dir.path().join(file_name);
    std::fs::write(&path, asset.data.as_ref())
        .map_err(|e| anyhow::anyhow!("Failed to write resource to {}: {}", path.display(), e))?;

    Ok(ResolvedResource {
        name: name.to_string(),
        path,
        _temp_dir: Some(temp_dir),
    })
}

/// Resolves an image that already lives on disk, verifying it exists.
pub fn resolve_external(path: &Path) -> Result<ResolvedResource> {
    if !path.is_file() {
        return Err(anyhow::anyhow!("File not found: {}", path.display()));
    }
    Ok(ResolvedResource {
        name: path.to_string_lossy().to_string(),
        path: path.to_path_buf(),
        _temp_dir: None,
    })
}
