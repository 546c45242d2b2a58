use std::path::{Path, PathBuf};

/// Output file name for `input`: `suffix` goes before the extension.
///
/// `data/in.txt` -> `data/in-out.txt`, `in` -> `in-out`. Only the file name is
/// inspected, so dots in directory names are ignored. Returns `None` when the
/// path has no file name (e.g. `..`).
pub fn output_path_for(input: &Path, suffix: &str) -> Option<PathBuf> {
    let stem = input.file_stem()?;
    let mut name = stem.to_os_string();
    name.push(suffix);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    Some(input.with_file_name(name))
}
