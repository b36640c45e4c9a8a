//! Display labels for keys

/// Turn a key into a display label.
///
/// Underscores become spaces and the first character is uppercased. Nothing
/// else changes, so `max_open_files` becomes `Max open files`.
pub fn label(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
