// Derived views over an AnalysisResult: counts, tabs, chart series, findings.
use std::collections::{HashMap, HashSet};

use crate::model::{AnalysisResult, BasicCryptoAnalysis, GeminiReview};

/// The per-file records of a result, whichever shape the backend returned.
pub fn files(res: &AnalysisResult) -> Vec<&BasicCryptoAnalysis> {
    if !res.basic_analysis.is_empty() {
        res.basic_analysis.iter().collect()
    } else {
        res.detailed_reviews
            .iter()
            .map(|r| &r.original_analysis)
            .collect()
    }
}

pub fn file_paths(res: &AnalysisResult) -> Vec<String> {
    files(res).into_iter().map(|f| f.file_path.clone()).collect()
}

pub fn find_file<'a>(res: &'a AnalysisResult, path: &str) -> Option<&'a BasicCryptoAnalysis> {
    files(res).into_iter().find(|f| f.file_path == path)
}

pub fn find_review<'a>(res: &'a AnalysisResult, path: &str) -> Option<&'a GeminiReview> {
    res.detailed_reviews
        .iter()
        .find(|r| r.original_analysis.file_path == path)
}

pub fn file_finding_count(a: &BasicCryptoAnalysis) -> usize {
    a.crypto_imports.len()
        + a.crypto_functions.len()
        + a.crypto_patterns_found.len()
        + a.crypto_algorithms_detected.len()
}

pub fn file_counts(res: &AnalysisResult) -> HashMap<String, usize> {
    files(res)
        .into_iter()
        .map(|f| (f.file_path.clone(), file_finding_count(f)))
        .collect()
}

/// `/`-joined non-empty segments with a leading `/`, so `src/a.py`,
/// `//src/a.py` and `/src/a.py/` all name the same file.
pub fn canonical_path(path: &str) -> String {
    let mut out = String::new();
    for seg in path.split('/').filter(|s| !s.is_empty()) {
        out.push('/');
        out.push_str(seg);
    }
    out
}

/// Finding totals for every folder that contains at least one counted file.
///
/// Each file adds its count to all of its proper ancestors, so a folder only
/// collects files below its own separator boundary (`/s` never sees
/// `/src/a.py`). Keys are canonical folder paths.
pub fn folder_counts(counts: &HashMap<String, usize>) -> HashMap<String, usize> {
    let mut out: HashMap<String, usize> = HashMap::new();
    for (path, n) in counts {
        let canonical = canonical_path(path);
        for (end, _) in canonical.match_indices('/').skip(1) {
            *out.entry(canonical[..end].to_string()).or_default() += n;
        }
    }
    out
}

/// Looks up `folder` in a map built by [`folder_counts`].
pub fn folder_total(folder_counts: &HashMap<String, usize>, folder: &str) -> usize {
    folder_counts.get(&canonical_path(folder)).copied().unwrap_or(0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FindingsTab {
    Imports,
    Functions,
    Patterns,
    Algorithms,
    Snippets,
    Review,
}

impl FindingsTab {
    pub const ALL: [FindingsTab; 6] = [
        FindingsTab::Imports,
        FindingsTab::Functions,
        FindingsTab::Patterns,
        FindingsTab::Algorithms,
        FindingsTab::Snippets,
        FindingsTab::Review,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FindingsTab::Imports => "Imports",
            FindingsTab::Functions => "Functions",
            FindingsTab::Patterns => "Patterns",
            FindingsTab::Algorithms => "Algorithms",
            FindingsTab::Snippets => "Snippets",
            FindingsTab::Review => "AI review",
        }
    }
}

pub fn available_tabs(a: &BasicCryptoAnalysis, review: Option<&GeminiReview>) -> Vec<FindingsTab> {
    FindingsTab::ALL
        .into_iter()
        .filter(|t| match t {
            FindingsTab::Imports => !a.crypto_imports.is_empty(),
            FindingsTab::Functions => !a.crypto_functions.is_empty(),
            FindingsTab::Patterns => !a.crypto_patterns_found.is_empty(),
            FindingsTab::Algorithms => !a.crypto_algorithms_detected.is_empty(),
            FindingsTab::Snippets => !a.code_snippets.is_empty(),
            FindingsTab::Review => review.is_some(),
        })
        .collect()
}

/// Keeps `current` if it is still offered, else falls back to the first tab.
pub fn select_tab(current: Option<FindingsTab>, available: &[FindingsTab]) -> Option<FindingsTab> {
    match current {
        Some(t) if available.contains(&t) => Some(t),
        _ => available.first().copied(),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub functions: Vec<usize>,
    pub imports: Vec<usize>,
    pub patterns: Vec<usize>,
    pub total_functions: usize,
    pub total_imports: usize,
    pub total_patterns: usize,
}

impl ChartSeries {
    pub fn grand_total(&self) -> usize {
        self.total_functions + self.total_imports + self.total_patterns
    }
}

/// Grouped bar + proportion chart data. `None` when there is nothing to plot.
pub fn chart_series(res: Option<&AnalysisResult>) -> Option<ChartSeries> {
    let res = res?;
    let rows: Vec<&BasicCryptoAnalysis> = files(res)
        .into_iter()
        .filter(|f| f.has_crypto || file_finding_count(f) > 0)
        .collect();
    if rows.is_empty() {
        return None;
    }

    let labels: Vec<String> = rows
        .iter()
        .map(|f| {
            if f.file_name.is_empty() {
                crate::format::base_name(&f.file_path).to_string()
            } else {
                f.file_name.clone()
            }
        })
        .collect();
    let functions: Vec<usize> = rows.iter().map(|f| f.crypto_functions.len()).collect();
    let imports: Vec<usize> = rows.iter().map(|f| f.crypto_imports.len()).collect();
    let patterns: Vec<usize> = rows.iter().map(|f| f.crypto_patterns_found.len()).collect();

    Some(ChartSeries {
        total_functions: functions.iter().sum(),
        total_imports: imports.iter().sum(),
        total_patterns: patterns.iter().sum(),
        labels,
        functions,
        imports,
        patterns,
    })
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Findings {
    pub vulnerabilities: Vec<String>,
    pub recommendations: Vec<String>,
}

fn push_unique(out: &mut Vec<String>, seen: &mut HashSet<String>, items: &[String]) {
    for s in items {
        if s.trim().is_empty() {
            continue;
        }
        if seen.insert(s.clone()) {
            out.push(s.clone());
        }
    }
}

pub fn aggregate_findings(res: &AnalysisResult) -> Findings {
    let mut out = Findings::default();
    let mut seen_v = HashSet::new();
    let mut seen_r = HashSet::new();
    for r in &res.detailed_reviews {
        push_unique(&mut out.vulnerabilities, &mut seen_v, &r.crypto_summary.vulnerabilities);
        push_unique(&mut out.recommendations, &mut seen_r, &r.crypto_summary.recommendations);
    }
    out
}

/// `(algorithm, occurrences)` across detailed reviews, most used first.
pub fn algorithm_usage(res: &AnalysisResult) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in &res.detailed_reviews {
        for a in &r.crypto_summary.algorithms_used {
            let a = a.trim();
            if !a.is_empty() {
                *counts.entry(a).or_default() += 1;
            }
        }
    }
    let mut items: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    items.sort_by(|(a1, c1), (a2, c2)| c2.cmp(c1).then_with(|| a1.cmp(a2)));
    items
}

/// `(security level, files)` across detailed reviews, most common first.
pub fn security_levels(res: &AnalysisResult) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for r in &res.detailed_reviews {
        let lvl = r.crypto_summary.security_level.trim();
        let key = if lvl.is_empty() { "unknown" } else { lvl };
        *counts.entry(key.to_lowercase()).or_default() += 1;
    }
    let mut items: Vec<(String, usize)> = counts.into_iter().collect();
    items.sort_by(|(l1, c1), (l2, c2)| c2.cmp(c1).then_with(|| l1.cmp(l2)));
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CryptoItem, CryptoSummary};

    fn analysis(path: &str, imports: usize, functions: usize) -> BasicCryptoAnalysis {
        BasicCryptoAnalysis {
            file_path: path.to_string(),
            file_name: crate::format::base_name(path).to_string(),
            has_crypto: imports + functions > 0,
            crypto_imports: vec![CryptoItem::default(); imports],
            crypto_functions: vec![CryptoItem::default(); functions],
            ..Default::default()
        }
    }

    fn review(vulns: &[&str], recs: &[&str]) -> GeminiReview {
        GeminiReview {
            original_analysis: analysis("/r.py", 0, 0),
            gemini_analysis: String::new(),
            crypto_summary: CryptoSummary {
                vulnerabilities: vulns.iter().map(|s| s.to_string()).collect(),
                recommendations: recs.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn file_count_sums_all_finding_kinds() {
        let mut a = analysis("/x.py", 1, 2);
        a.crypto_patterns_found = vec![serde_json::Map::new()];
        a.crypto_algorithms_detected = vec![serde_json::Map::new(), serde_json::Map::new()];
        a.code_snippets = vec![Default::default()];
        assert_eq!(file_finding_count(&a), 6);
    }

    #[test]
    fn folder_count_respects_separator_boundary() {
        let counts: HashMap<String, usize> = [
            ("/src/a.py".to_string(), 2),
            ("/src/b.py".to_string(), 3),
            ("/lib/c.py".to_string(), 1),
        ]
        .into_iter()
        .collect();
        let folders = folder_counts(&counts);

        assert_eq!(folder_total(&folders, "/src"), 5);
        assert_eq!(folder_total(&folders, "/src/"), 5);
        assert_eq!(folder_total(&folders, "/lib"), 1);
        assert_eq!(folder_total(&folders, "/s"), 0);
    }

    #[test]
    fn folder_counts_accept_uncanonical_file_paths() {
        let counts: HashMap<String, usize> = [
            ("src/crypto/a.py".to_string(), 2),
            ("//src//b.py".to_string(), 3),
            ("top.py".to_string(), 7),
        ]
        .into_iter()
        .collect();
        let folders = folder_counts(&counts);

        assert_eq!(folder_total(&folders, "/src"), 5);
        assert_eq!(folder_total(&folders, "/src/crypto"), 2);
        assert_eq!(folders.len(), 2);
        assert_eq!(canonical_path("src/a.py/"), "/src/a.py");
    }

    #[test]
    fn findings_dedup_keeps_first_seen_order() {
        let res = AnalysisResult {
            detailed_reviews: vec![
                review(&["SQL injection", "Weak hash"], &["Use bcrypt", ""]),
                review(&["Weak hash", "  "], &["Use bcrypt", "Rotate keys"]),
            ],
            ..Default::default()
        };
        let f = aggregate_findings(&res);
        assert_eq!(f.vulnerabilities, vec!["SQL injection", "Weak hash"]);
        assert_eq!(f.recommendations, vec!["Use bcrypt", "Rotate keys"]);
    }

    #[test]
    fn empty_result_has_no_files_and_no_chart() {
        let res = AnalysisResult::default();
        assert!(files(&res).is_empty());
        assert!(chart_series(Some(&res)).is_none());
        assert!(chart_series(None).is_none());
        assert_eq!(res.total_files, 0);
        assert_eq!(res.crypto_files_found, 0);
    }

    #[test]
    fn files_fall_back_to_detailed_reviews() {
        let mut r = review(&[], &[]);
        r.original_analysis = analysis("/d/e.py", 1, 0);
        let res = AnalysisResult {
            detailed_reviews: vec![r],
            ..Default::default()
        };
        assert_eq!(file_paths(&res), vec!["/d/e.py"]);
        assert!(find_review(&res, "/d/e.py").is_some());
        assert!(find_file(&res, "/nope").is_none());
    }

    #[test]
    fn chart_series_skips_clean_files() {
        let res = AnalysisResult {
            basic_analysis: vec![
                analysis("/a.py", 1, 2),
                analysis("/clean.py", 0, 0),
                analysis("/b.py", 3, 0),
            ],
            ..Default::default()
        };
        let s = chart_series(Some(&res)).expect("series");
        assert_eq!(s.labels, vec!["a.py", "b.py"]);
        assert_eq!(s.imports, vec![1, 3]);
        assert_eq!(s.functions, vec![2, 0]);
        assert_eq!(s.total_imports, 4);
        assert_eq!(s.total_functions, 2);
        assert_eq!(s.grand_total(), 6);
    }

    #[test]
    fn tab_selection_falls_back_to_first_available() {
        let a = analysis("/a.py", 0, 1);
        let tabs = available_tabs(&a, None);
        assert_eq!(tabs, vec![FindingsTab::Functions]);
        assert_eq!(select_tab(Some(FindingsTab::Imports), &tabs), Some(FindingsTab::Functions));
        assert_eq!(select_tab(Some(FindingsTab::Functions), &tabs), Some(FindingsTab::Functions));
        assert_eq!(select_tab(None, &[]), None);

        let r = review(&[], &[]);
        assert!(available_tabs(&a, Some(&r)).contains(&FindingsTab::Review));
    }

    #[test]
    fn algorithm_usage_orders_by_count() {
        let mut r1 = review(&[], &[]);
        r1.crypto_summary.algorithms_used = vec!["SHA-256".into(), "MD5".into()];
        r1.crypto_summary.security_level = "Low".into();
        let mut r2 = review(&[], &[]);
        r2.crypto_summary.algorithms_used = vec!["MD5".into()];
        let res = AnalysisResult {
            detailed_reviews: vec![r1, r2],
            ..Default::default()
        };
        assert_eq!(
            algorithm_usage(&res),
            vec![("MD5".to_string(), 2), ("SHA-256".to_string(), 1)]
        );
        assert_eq!(
            security_levels(&res),
            vec![("low".to_string(), 1), ("unknown".to_string(), 1)]
        );
    }
}
