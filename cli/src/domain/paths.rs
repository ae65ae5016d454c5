//! Naming rules for asset outputs.
//!
//! Content names are relative, `/`-separated paths under the asset
//! directory. Key material lives under [`TLS_DIR`].

use std::path::{Component, Path};

use crate::domain::error::AssetError;

/// Directory (relative to the asset directory) that holds key material.
pub const TLS_DIR: &str = "tls";

/// Normalize a caller-supplied key file name to its content name.
///
/// Only the final path component of `file_name` is kept, so the result is
/// always `tls/<name>`: `admin.key`, `./admin.key` and `keys/admin.key` all
/// map to `tls/admin.key`.
///
/// # Errors
///
/// Returns [`AssetError::InvalidOutputName`] if `file_name` has no normal
/// final component (empty, `.`, `..`, or a bare root).
pub fn asset_file_path(file_name: &str) -> Result<String, AssetError> {
    let base = Path::new(file_name.trim())
        .components()
        .next_back()
        .and_then(|c| match c {
            Component::Normal(name) => name.to_str(),
            _ => None,
        })
        .ok_or_else(|| AssetError::InvalidOutputName(file_name.to_string()))?;
    Ok(format!("{TLS_DIR}/{base}"))
}

/// `true` if `name` is a relative path that stays inside the directory it
/// is joined to.
#[must_use]
pub fn is_contained(name: &str) -> bool {
    let path = Path::new(name);
    !name.is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
