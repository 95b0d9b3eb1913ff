//! Derivation of online help mirror URLs from a page's `file_path`.

/// Joins `base_url` and `file_path`, normalizing path separators to forward
/// slashes so a Windows-style `file_path` (as found in vendor TOC files)
/// still produces a valid URL.
pub fn online_help_url(base_url: &str, file_path: &str) -> String {
    let normalized = file_path.replace('\\', "/");
    format!("{base_url}{normalized}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_base_and_path() {
        assert_eq!(
            online_help_url("https://help.example.com/#/en/4/", "hardware/x20di9371.html"),
            "https://help.example.com/#/en/4/hardware/x20di9371.html"
        );
    }

    #[test]
    fn normalizes_backslashes() {
        assert_eq!(
            online_help_url("https://help.example.com/#/en/4/", r"hardware\x20di9371.html"),
            "https://help.example.com/#/en/4/hardware/x20di9371.html"
        );
    }

    #[test]
    fn empty_file_path_yields_bare_base() {
        assert_eq!(online_help_url("https://help.example.com/#/en/4/", ""), "https://help.example.com/#/en/4/");
    }
}
