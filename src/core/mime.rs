use crate::core::models::{extension_of, AssetCategory};

pub const STYLESHEET: &str = "text/css";
pub const SCRIPT: &str = "text/javascript";

/// Content type for a response, `None` lets the transport pick its default
pub fn mime_for(category: AssetCategory, raw_path: &str) -> Option<&'static str> {
    match category {
        AssetCategory::Style => Some(STYLESHEET),
        AssetCategory::Script => Some(SCRIPT),
        _ => mime_from_extension(raw_path),
    }
}

/// Generic extension lookup, case-insensitive
pub fn mime_from_extension(path: &str) -> Option<&'static str> {
    let ext = extension_of(path)?.to_ascii_lowercase();

    let mime = match ext.as_str() {
        "css" => STYLESHEET,
        "js" => SCRIPT,
        "bmp" => "image/bmp",
        "gif" => "image/gif",
        "png" => "image/png",
        "jpg" | "jpeg" | "jpe" => "image/jpeg",
        "tiff" | "tif" => "image/tiff",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "swf" => "application/x-shockwave-flash",
        "mid" | "midi" => "audio/midi",
        "mp3" | "mpga" | "mp2" => "audio/mpeg",
        "ogg" => "audio/ogg",
        "wav" => "audio/x-wav",
        "aif" | "aiff" | "aifc" => "audio/x-aiff",
        "ram" | "rm" => "audio/x-pn-realaudio",
        "rpm" => "audio/x-pn-realaudio-plugin",
        "ra" => "audio/x-realaudio",
        "rv" => "video/vnd.rn-realvideo",
        "mpeg" | "mpg" | "mpe" => "video/mpeg",
        "qt" | "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "movie" => "video/x-sgi-movie",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        "eot" => "application/vnd.ms-fontobject",
        "json" | "map" => "application/json",
        "xml" => "application/xml",
        "pdf" => "application/pdf",
        "html" | "htm" => "text/html",
        "txt" => "text/plain",
        _ => return None,
    };

    Some(mime)
}
