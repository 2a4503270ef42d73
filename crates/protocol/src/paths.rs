/// Normalize a project-relative path to the POSIX form stored in snapshots:
/// backslashes become `/`, leading `./` and surrounding slashes are dropped.
pub fn normalize_relative_path(raw: &str) -> String {
    let mut value = raw.trim().replace('\\', "/");
    while let Some(rest) = value.strip_prefix("./") {
        value = rest.to_string();
    }
    let value = value.trim_matches('/');
    if value == "." {
        return String::new();
    }
    value.to_string()
}

/// True when `path` is `prefix` itself or lives underneath it.
pub fn path_prefix_matches(prefix: &str, path: &str) -> bool {
    if path == prefix {
        return true;
    }

    if !path.starts_with(prefix) {
        return false;
    }

    path.as_bytes().get(prefix.len()) == Some(&b'/')
}

/// Final segment of a normalized path.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Lowercased extension of the final segment, if any.
///
/// Dotfiles such as `.env` have no extension.
pub fn extension(path: &str) -> Option<String> {
    let name = file_name(path);
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
