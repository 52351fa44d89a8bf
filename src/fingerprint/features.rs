//! Feature extraction for directory fingerprints.
//!
//! Resources with missing metadata contribute no feature; scan data is often
//! partial and a missing checksum or path is not an error.

use crate::tree::node::Resource;

/// Checksums of every file descendant that has one, in the order given.
pub fn content_features<'a, I>(file_descendants: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Resource>,
{
    file_descendants
        .into_iter()
        .filter_map(|resource| resource.sha1.as_deref())
        .filter(|sha1| !sha1.is_empty())
        .map(str::to_string)
        .collect()
}

/// `<size bucket><path relative to directory>` for every child with a path.
///
/// `"package/readme.txt"` of 771 bytes under `"package"` becomes `"770readme.txt"`.
pub fn structure_features<'a, I>(directory: &Resource, children: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Resource>,
{
    children
        .into_iter()
        .filter(|child| !child.path.is_empty())
        .map(|child| {
            let relative = child
                .path
                .strip_prefix(directory.path.as_str())
                .unwrap_or(&child.path);
            let relative = relative.strip_prefix('/').unwrap_or(relative);
            format!("{}{}", size_bucket(child.size), relative)
        })
        .collect()
}

/// Size rounded down to a multiple of ten; unknown sizes count as zero.
pub fn size_bucket(size: Option<u64>) -> u64 {
    size.map(|s| s / 10 * 10).unwrap_or(0)
}
