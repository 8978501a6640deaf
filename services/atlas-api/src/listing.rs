//! Directory scanning and payload assembly.
//!
//! `/fileList` walks a directory tree and reports name/mime/path per file.
//! `/fileListAndData` reads one directory level and inlines content: JSON
//! documents are parsed so the client never double-parses, images are
//! base64-encoded, anything else ships as text.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use walkdir::WalkDir;

use atlas_common::{FileEntry, FilePayload};

/// Mime type by file extension. JSON and GeoJSON are forced to
/// `application/json` regardless of what a content sniffer would say —
/// the client switches on exactly that value.
pub fn mime_type_for(name: &str) -> &'static str {
    let extension = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("json") | Some("geojson") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("html") => "text/html",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Recursive listing of `root`, with paths reported relative to
/// `relative_prefix` (the directory the client asked for).
pub fn scan_directory(root: &Path, relative_prefix: &str) -> Result<Vec<FileEntry>> {
    if !root.is_dir() {
        bail!("Directory not found");
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.context("Failed to read directory")?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .replace('\\', "/");

        files.push(FileEntry {
            mime_type: mime_type_for(&name).to_string(),
            path: format!("{}/{}", relative_prefix.trim_end_matches('/'), relative),
            name,
        });
    }
    Ok(files)
}

/// Non-recursive listing with content inlined.
pub fn read_directory_payloads(root: &Path) -> Result<Vec<FilePayload>> {
    if !root.is_dir() {
        bail!("Directory not found");
    }

    let mut entries: Vec<_> = fs::read_dir(root)
        .context("Failed to read directory")?
        .collect::<std::io::Result<_>>()
        .context("Failed to read directory")?;
    entries.sort_by_key(|e| e.file_name());

    let mut files = Vec::new();
    for entry in entries {
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        let mime_type = mime_type_for(&name);
        let bytes = fs::read(entry.path())
            .with_context(|| format!("Failed to read '{}'", name))?;

        let data = if mime_type == "application/json" {
            serde_json::from_slice(&bytes)
                .with_context(|| format!("Invalid JSON in '{}'", name))?
        } else if mime_type.starts_with("image/") {
            serde_json::Value::String(BASE64.encode(&bytes))
        } else {
            serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
        };

        files.push(FilePayload {
            name,
            mime_type: mime_type.to_string(),
            data,
        });
    }
    Ok(files)
}

/// Body-only extraction of a project description document. Inputs without
/// a `<body>` element pass through unchanged — authors upload fragments as
/// often as full documents.
pub fn extract_body(html: &str) -> String {
    let lower = html.to_lowercase();
    let Some(open_tag) = lower.find("<body") else {
        return html.trim().to_string();
    };
    let Some(open_end) = lower[open_tag..].find('>') else {
        return html.trim().to_string();
    };
    let content_start = open_tag + open_end + 1;
    let content_end = lower[content_start..]
        .find("</body>")
        .map(|i| content_start + i)
        .unwrap_or(html.len());

    html[content_start..content_end].trim().to_string()
}

/// Reject directory parameters that escape the data root.
pub fn validate_relative_path(path: &str) -> Result<()> {
    if path.is_empty() {
        bail!("Invalid directory parameter");
    }
    if path.starts_with('/') || path.split('/').any(|part| part == "..") {
        bail!("Invalid directory parameter");
    }
    Ok(())
}
