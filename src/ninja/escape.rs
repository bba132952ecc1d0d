//! Ninja path escaping.
//!
//! Ninja treats a bare space as a list separator and a bare colon as the
//! end of a build statement's outputs, so both must be written as `$ ` and
//! `$:`. A lone `$` would start a variable reference and is doubled. A `$`
//! already followed by a space, a colon or another `$` is taken as an
//! existing escape and left alone, which makes [`escape`] idempotent.

/// Escape `path` into a single Ninja token.
pub fn escape(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 8);
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '$' => {
                out.push('$');
                if let Some(&(next @ (' ' | ':' | '$'))) = chars.peek() {
                    out.push(next);
                    chars.next();
                } else {
                    out.push('$');
                }
            }
            ' ' => out.push_str("$ "),
            ':' => out.push_str("$:"),
            _ => out.push(c),
        }
    }

    out
}

/// Object file path for a source: same directories, extension replaced by
/// `object_ext`, escaped.
pub fn source_to_object(path: &str, object_ext: &str) -> String {
    let file_start = path.rfind(['/', '\\']).map(|i| i + 1).unwrap_or(0);
    let stem_end = match path[file_start..].rfind('.') {
        // A leading dot names a hidden file, not an extension.
        Some(0) | None => path.len(),
        Some(i) => file_start + i,
    };
    escape(&format!("{}{}", &path[..stem_end], object_ext))
}

/// File name of a static library. Target names are path-safe already.
pub fn library_file_name(name: &str, lib_ext: &str) -> String {
    format!("{}{}", name, lib_ext)
}
