use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ProviderError;

static ILLEGAL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*\x00-\x1f]"#).expect("valid regex"));

/// Replaces characters that are illegal in file names on common platforms,
/// including path separators, with `_`.
pub fn sanitize_filename(filename: &str) -> String {
    ILLEGAL_CHARS.replace_all(filename.trim(), "_").to_string()
}

/// Splits `name` into the part sent for translation and a suffix to re-attach.
/// Dotfiles and names without an extension are translated whole.
pub fn split_extension(name: &str) -> (&str, &str) {
    let path = Path::new(name);
    match (path.file_stem().and_then(|s| s.to_str()), path.extension()) {
        (Some(stem), Some(_)) if !stem.is_empty() => (stem, &name[stem.len()..]),
        _ => (name, ""),
    }
}

/// Checks that a translated name can be used as a sibling entry name.
pub fn validate_name(name: &str) -> Result<(), ProviderError> {
    if name.trim().is_empty() {
        return Err(ProviderError::EmptyTranslation);
    }
    if name == "." || name == ".." || name.contains('/') || name.contains('\\') {
        return Err(ProviderError::InvalidName(name.to_string()));
    }
    Ok(())
}
