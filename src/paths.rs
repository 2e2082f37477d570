//! Path separator normalization applied to input patterns.

/// Prefix of Windows extended-length paths, which must keep their backslashes.
const EXTENDED_LENGTH_PREFIX: &str = r"\\?\";

/// Converts native path separators to `/` so patterns match uniformly.
pub fn normalize(path: &str) -> String {
    if path.starts_with(EXTENDED_LENGTH_PREFIX) {
        return path.to_string();
    }
    path.replace('\\', "/")
}
