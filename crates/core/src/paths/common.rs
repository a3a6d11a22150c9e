//! Path components shared by every dataset layout.

/// MetaImage header extension.
///
/// A `.mhd` header is paired with a `.raw`/`.zraw` voxel file on disk; only
/// the header is ever referenced by name.
#[derive(Debug, Clone, Copy)]
pub struct MetaImageExt;

impl MetaImageExt {
    pub const EXT: &'static str = "mhd";
}

/// Builds a MetaImage header file name from a stem.
pub fn mhd_file_name(stem: &str) -> String {
    format!("{stem}.{}", MetaImageExt::EXT)
}
