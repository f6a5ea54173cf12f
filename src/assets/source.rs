use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::compose::settings::AssetPaths;
use crate::foundation::error::{FormplateError, FormplateResult};
use crate::positions::registry::SafVariant;

/// Read-only store the template images are loaded from.
///
/// Reads are awaitable so a template can come from disk, an embedded bundle or the network; a
/// read either yields the complete file or fails with [`FormplateError::AssetLoad`].
#[async_trait::async_trait]
pub trait AssetSource: Send + Sync {
    /// Read the file at the relative `path`.
    async fn read(&self, path: &str) -> FormplateResult<Vec<u8>>;
}

#[async_trait::async_trait]
impl<S: AssetSource + ?Sized> AssetSource for Arc<S> {
    async fn read(&self, path: &str) -> FormplateResult<Vec<u8>> {
        (**self).read(path).await
    }
}

/// Assets stored under a root directory.
#[derive(Clone, Debug)]
pub struct FsAssetSource {
    root: PathBuf,
}

impl FsAssetSource {
    /// Serve files below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

#[async_trait::async_trait]
impl AssetSource for FsAssetSource {
    async fn read(&self, path: &str) -> FormplateResult<Vec<u8>> {
        let rel = normalize_rel_path(path)?;
        let full = self.root.join(&rel);
        tracing::debug!(path = %full.display(), "reading asset");
        tokio::fs::read(&full)
            .await
            .map_err(|e| FormplateError::asset_load(format!("read '{}': {e}", full.display())))
    }
}

/// Assets held in memory, keyed by normalized relative path.
#[derive(Clone, Debug, Default)]
pub struct MemoryAssetSource {
    files: HashMap<String, Arc<[u8]>>,
}

impl MemoryAssetSource {
    /// Empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `bytes` under `path`, replacing any previous file.
    pub fn insert(&mut self, path: &str, bytes: impl Into<Arc<[u8]>>) -> FormplateResult<()> {
        self.files.insert(normalize_rel_path(path)?, bytes.into());
        Ok(())
    }

    /// Builder form of [`Self::insert`].
    pub fn with(mut self, path: &str, bytes: impl Into<Arc<[u8]>>) -> FormplateResult<Self> {
        self.insert(path, bytes)?;
        Ok(self)
    }

    /// Number of stored files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no file is stored.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[async_trait::async_trait]
impl AssetSource for MemoryAssetSource {
    async fn read(&self, path: &str) -> FormplateResult<Vec<u8>> {
        let rel = normalize_rel_path(path)?;
        self.files
            .get(&rel)
            .map(|b| b.to_vec())
            .ok_or_else(|| FormplateError::asset_load(format!("asset '{rel}' not found")))
    }
}

/// Template images the compositor draws on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TemplateAsset {
    /// PIC base.
    Pic,
    /// Standard SAF base.
    SafStandard,
    /// Member SAF base.
    SafMember,
    /// Check mark stamped into checked boxes.
    CheckIcon,
}

impl TemplateAsset {
    /// SAF base for `variant`.
    pub fn saf(variant: SafVariant) -> Self {
        match variant {
            SafVariant::Standard => Self::SafStandard,
            SafVariant::Member => Self::SafMember,
        }
    }

    /// Configured path of this asset.
    pub fn path(self, paths: &AssetPaths) -> &str {
        match self {
            Self::Pic => &paths.pic,
            Self::SafStandard => &paths.saf_standard,
            Self::SafMember => &paths.saf_member,
            Self::CheckIcon => &paths.check_icon,
        }
    }
}

/// Normalize a relative asset path to `a/b/c` form.
///
/// Backslashes become slashes and `.` segments are dropped. Absolute paths, `..` segments and
/// paths without a file name are rejected.
pub(crate) fn normalize_rel_path(source: &str) -> FormplateResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(FormplateError::asset_load(format!(
            "asset path '{source}' must be relative"
        )));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(FormplateError::asset_load(format!(
                "asset path '{source}' must not contain '..'"
            )));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(FormplateError::asset_load(format!(
            "asset path '{source}' has no file name"
        )));
    }
    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
