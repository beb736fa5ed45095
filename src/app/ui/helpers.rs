/// Syntax name for the code renderer, from a file path or its extension.
pub fn language_hint(path: &str, extension: &str) -> &'static str {
    let ext = if extension.is_empty() {
        std::path::Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase()
    } else {
        extension.trim_start_matches('.').to_lowercase()
    };

    match ext.as_str() {
        "py" => "py",
        "rs" => "rs",
        "js" | "mjs" | "cjs" => "js",
        "ts" => "ts",
        "tsx" => "tsx",
        "jsx" => "jsx",
        "go" => "go",
        "java" => "java",
        "kt" | "kts" => "kt",
        "c" | "h" => "c",
        "cpp" | "cc" | "cxx" | "hpp" | "hh" => "cpp",
        "cs" => "cs",
        "rb" => "rb",
        "php" => "php",
        "swift" => "swift",
        "sh" | "bash" => "sh",
        "json" => "json",
        "yml" | "yaml" => "yaml",
        "toml" => "toml",
        _ => "txt",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_field_wins_over_path() {
        assert_eq!(language_hint("/a/b.txt", ".py"), "py");
        assert_eq!(language_hint("/a/b.HPP", ""), "cpp");
        assert_eq!(language_hint("/a/Makefile", ""), "txt");
    }
}
