//! Extension to MIME type lookup

/// Extension appended to names that carry none
pub const DEFAULT_FILE_EXT: &str = ".txt";

/// Registered type for an extension such as `.json`.
///
/// The extension includes its leading dot and is matched case-insensitively.
pub fn type_by_extension(ext: &str) -> Option<&'static str> {
    let mime = match ext.to_ascii_lowercase().as_str() {
        // Text
        ".txt" | ".text" | ".log" => "text/plain; charset=utf-8",
        ".html" | ".htm" => "text/html; charset=utf-8",
        ".css" => "text/css; charset=utf-8",
        ".js" | ".mjs" => "text/javascript; charset=utf-8",
        ".csv" => "text/csv; charset=utf-8",
        ".md" => "text/markdown; charset=utf-8",
        ".xml" => "text/xml; charset=utf-8",

        // Data
        ".json" | ".map" => "application/json",
        ".yaml" | ".yml" => "application/yaml",
        ".toml" => "application/toml",
        ".wasm" => "application/wasm",
        ".pdf" => "application/pdf",

        // Images
        ".png" => "image/png",
        ".jpg" | ".jpeg" => "image/jpeg",
        ".gif" => "image/gif",
        ".svg" => "image/svg+xml",
        ".webp" => "image/webp",
        ".ico" => "image/x-icon",
        ".avif" => "image/avif",

        // Fonts
        ".woff" => "font/woff",
        ".woff2" => "font/woff2",
        ".ttf" => "font/ttf",
        ".otf" => "font/otf",

        // Archives
        ".zip" => "application/zip",
        ".gz" => "application/gzip",
        ".tar" => "application/x-tar",

        // Media
        ".mp3" => "audio/mpeg",
        ".wav" => "audio/wav",
        ".ogg" => "audio/ogg",
        ".mp4" => "video/mp4",
        ".webm" => "video/webm",

        _ => return None,
    };
    Some(mime)
}

/// Type registered for [`DEFAULT_FILE_EXT`]
pub fn default_type() -> &'static str {
    type_by_extension(DEFAULT_FILE_EXT).unwrap_or("text/plain; charset=utf-8")
}

/// MIME type for a file name.
///
/// Everything from the first `.` onward is the extension, so `plan.tar.gz`
/// looks up `.tar.gz`. A name with no `.` past its first character, or an
/// unregistered extension, gets the default type.
pub fn type_from_file_name(name: &str) -> &'static str {
    match name.find('.') {
        Some(i) if i > 0 => type_by_extension(&name[i..]).unwrap_or_else(default_type),
        _ => default_type(),
    }
}
