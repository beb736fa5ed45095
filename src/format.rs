use crate::model::StoredItem;

pub fn contains_case_insensitive(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub fn base_name(path: &str) -> &str {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(path)
}

pub fn format_bytes(n: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    if n < 1024 {
        return format!("{} B", n);
    }
    let mut v = n as f64;
    let mut unit = 0;
    while v >= 1024.0 && unit < UNITS.len() - 1 {
        v /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", v, UNITS[unit])
}

pub fn format_stored_item(item: &StoredItem) -> String {
    format!(
        "{}  ({} files, {})",
        item.name,
        item.files,
        format_bytes(item.size_bytes)
    )
}

pub fn line_label(line_start: Option<u64>) -> String {
    line_start
        .map(|n| format!("L{}", n))
        .unwrap_or_else(|| "-".to_string())
}

/// One-line `key: value, ...` rendering of a free-form finding map.
pub fn format_finding_map(m: &serde_json::Map<String, serde_json::Value>) -> String {
    let mut parts = Vec::with_capacity(m.len());
    for (k, v) in m {
        let val = match v {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => "-".to_string(),
            other => other.to_string(),
        };
        parts.push(format!("{}: {}", k, val));
    }
    parts.join(", ")
}
