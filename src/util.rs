use std::path::Path;

/// Expands a leading `~` in a path to the user's home directory.
/// Also normalizes path separators for the current OS.
pub fn expand_tilde(path: &str) -> String {
    let result = if path.starts_with("~/") || path == "~" {
        if let Some(home) = dirs::home_dir() {
            let rest = path.strip_prefix("~/").unwrap_or("");
            home.join(rest).to_string_lossy().to_string()
        } else {
            path.to_string()
        }
    } else {
        path.to_string()
    };
    // Normalize separators for the current OS
    if cfg!(windows) {
        result.replace('/', "\\")
    } else {
        result
    }
}

/// Base name of a path as an owned string, if it has one.
pub fn file_name_of(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().to_string())
}

/// Case-insensitive extension check (`ext` without the dot).
pub fn has_extension(name: &str, ext: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// Case-insensitive "contains any of" over a lowercased haystack.
pub fn contains_any(haystack: &str, needles: &[String]) -> bool {
    let lower = haystack.to_lowercase();
    needles.iter().any(|n| lower.contains(&n.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_check_ignores_case() {
        assert!(has_extension("SPT.Server.EXE", "exe"));
        assert!(has_extension("launcher.exe", "exe"));
        assert!(!has_extension("launcher.exe.bak", "exe"));
        assert!(!has_extension("server", "exe"));
    }

    #[test]
    fn contains_any_is_case_insensitive() {
        let keywords = vec!["spt".to_string(), "tarkov".to_string()];
        assert!(contains_any("/home/me/Games/SPT-AKI", &keywords));
        assert!(contains_any("D:\\EscapeFromTarkov", &keywords));
        assert!(!contains_any("/opt/steam", &keywords));
    }

    #[test]
    fn paths_without_tilde_pass_through() {
        let input = if cfg!(windows) { "C:\\Games\\SPT" } else { "/games/spt" };
        assert_eq!(expand_tilde(input), input);
    }
}
