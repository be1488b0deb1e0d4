// src/links/filter.rs
// =============================================================================
// Decides whether a discovered URL is worth crawling at all.
//
// A URL is undesirable when:
// - its scheme can never serve a web page (mailto:, javascript:, tel:, ...)
// - its path ends with a file extension that points at a non-HTML resource
//
// The extension test is a literal, case-sensitive suffix match on the path
// only. The query is never part of the path, so `/report.pdf?download=1` is
// still rejected. Only uppercase suffixes like `/report.PDF` get through.
// =============================================================================

use url::Url;

// Schemes that never lead to a crawlable HTML page
pub const UNDESIRED_SCHEMES: &[&str] = &["mailto", "javascript", "tel", "data", "ftp", "file"];

// Path suffixes of resources we never want to download
pub const UNDESIRED_EXTENSIONS: &[&str] = &[
    // Documents
    ".pdf", ".doc", ".docx", ".ppt", ".pptx", ".xls", ".xlsx", ".odt", ".rtf",
    // Archives
    ".zip", ".rar", ".7z", ".tar", ".gz", ".bz2", ".xz",
    // Images
    ".png", ".jpg", ".jpeg", ".gif", ".bmp", ".tiff", ".svg", ".ico",
    // Audio
    ".mp3", ".wav", ".flac", ".aac", ".ogg",
    // Video
    ".mp4", ".avi", ".mkv", ".mov", ".wmv", ".flv", ".webm",
    // Executables
    ".exe", ".msi", ".bat", ".sh", ".app", ".jar", ".com", ".cmd",
    // Fonts
    ".ttf", ".otf", ".woff", ".woff2", ".eot",
    // Data formats
    ".csv", ".json", ".xml", ".yaml", ".toml", ".ini", ".cfg",
    // Markup and text
    ".css", ".js", ".txt", ".md", ".log",
    // Backup and temporary files
    ".bak", ".swp", ".tmp", ".temp", ".old",
    // Databases and raw data
    ".dat", ".db", ".sqlite", ".sqlite3", ".dbf",
    // CAD and 3D models
    ".obj", ".stl", ".fbx", ".dxf", ".dwg", ".step", ".iges",
    // Game assets
    ".unitypackage", ".blend", ".gltf", ".glb", ".3ds",
    // Office files
    ".pps", ".pot", ".pub", ".vsd",
    // Configuration files
    ".config", ".conf", ".yml",
    // Vector graphics
    ".ai", ".eps", ".cdr",
    // Virtual machine images
    ".vmdk", ".ova", ".ovf", ".vmx", ".qcow2",
    // eBooks
    ".epub", ".mobi", ".azw", ".azw3", ".fb2",
    // GIS and map files
    ".shp", ".kml", ".kmz", ".gpx", ".geojson",
    // Project files
    ".project", ".workspace", ".sln", ".vcxproj",
];

// Returns true when `url` should not be crawled
//
// A string that does not parse as a URL is undesirable too: there is
// nothing we could fetch for it.
pub fn is_undesirable(url: &str) -> bool {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return true,
    };

    if UNDESIRED_SCHEMES.contains(&parsed.scheme()) {
        return true;
    }

    let path = parsed.path();
    UNDESIRED_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_undesired_scheme_is_rejected() {
        for scheme in UNDESIRED_SCHEMES {
            let url = format!("{}://example.com/page", scheme);
            assert!(is_undesirable(&url), "{} should be rejected", url);
        }
    }

    #[test]
    fn test_javascript_scheme() {
        assert!(is_undesirable("javascript://example.com/page"));
    }

    #[test]
    fn test_http_page_is_accepted() {
        assert!(!is_undesirable("http://example.com/page"));
        assert!(!is_undesirable("https://example.com/"));
    }

    #[test]
    fn test_every_undesired_extension_is_rejected() {
        for ext in UNDESIRED_EXTENSIONS {
            let url = format!("http://example.com/page{}", ext);
            assert!(is_undesirable(&url), "{} should be rejected", url);
        }
    }

    #[test]
    fn test_pdf_rejected_html_accepted() {
        assert!(is_undesirable("http://example.com/page.pdf"));
        assert!(!is_undesirable("http://example.com/page.html"));
    }

    #[test]
    fn test_extension_match_is_case_sensitive() {
        assert!(!is_undesirable("http://example.com/report.PDF"));
    }

    #[test]
    fn test_query_after_extension_is_still_rejected() {
        assert!(is_undesirable("http://example.com/report.pdf?download=1"));
        assert!(!is_undesirable("http://example.com/report?format=pdf"));
    }

    #[test]
    fn test_extension_in_host_is_ignored() {
        // ".com" is an executable suffix, but only the path is checked
        assert!(!is_undesirable("http://example.com"));
        assert!(is_undesirable("http://example.com/setup.com"));
    }

    #[test]
    fn test_fragment_is_not_part_of_path() {
        assert!(!is_undesirable("http://example.com/page#notes.pdf"));
    }

    #[test]
    fn test_unparseable_url_is_rejected() {
        assert!(is_undesirable("not a url"));
    }

    #[test]
    fn test_filter_is_deterministic() {
        let urls = [
            "http://example.com/a.zip",
            "http://example.com/a",
            "mailto:someone@example.com",
        ];
        for url in urls {
            assert_eq!(is_undesirable(url), is_undesirable(url));
        }
    }
}
