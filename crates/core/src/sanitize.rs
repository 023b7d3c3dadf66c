//! File-identifier sanitization.

/// Characters no file name may contain on any supported platform.
pub const INVALID_FILE_NAME_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Replacement for every invalid character.
pub const REPLACEMENT: char = '_';

/// Whether `c` may not appear in a file name.
pub fn is_invalid_file_name_char(c: char) -> bool {
    c <= '\u{1f}' || INVALID_FILE_NAME_CHARS.contains(&c)
}

/// Replace every character illegal in a file name with `_`.
///
/// Nothing else changes: dots, spaces and case are kept as they are.
///
/// ```
/// use nsplit_core::sanitize::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("Corax.Core/Inbound"), "Corax.Core_Inbound");
/// ```
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if is_invalid_file_name_char(c) {
                REPLACEMENT
            } else {
                c
            }
        })
        .collect()
}
