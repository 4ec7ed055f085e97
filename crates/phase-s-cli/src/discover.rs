//! Frame file discovery from a shell-style pattern.
//!
//! Only the final path component may contain wildcards (`*`, `?`, `[...]`);
//! parent directories are taken literally. Matches are regular files,
//! sorted lexicographically.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Resolve `pattern` to a sorted list of files. A missing directory simply
/// matches nothing.
pub fn resolve_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let path = Path::new(pattern);
    let Some(name_pattern) = path.file_name().and_then(|n| n.to_str()) else {
        return Ok(Vec::new());
    };

    if !has_wildcard(name_pattern) {
        return Ok(if path.is_file() {
            vec![path.to_path_buf()]
        } else {
            Vec::new()
        });
    }

    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    let dir = parent.unwrap_or(Path::new("."));
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.context("Error reading directory entry")?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        // Like shell globs, wildcards do not match a leading dot.
        if name.starts_with('.') && !name_pattern.starts_with('.') {
            continue;
        }
        if !wildcard_match(name_pattern, name) || !entry.path().is_file() {
            continue;
        }
        files.push(match parent {
            Some(p) => p.join(name),
            None => PathBuf::from(name),
        });
    }

    files.sort();
    Ok(files)
}

fn has_wildcard(s: &str) -> bool {
    s.contains(['*', '?', '['])
}

/// Match `name` against a pattern with `*`, `?` and `[...]` classes
/// (`[!...]` negates, `a-z` ranges).
pub fn wildcard_match(pattern: &str, name: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let n: Vec<char> = name.chars().collect();

    let (mut pi, mut ni) = (0usize, 0usize);
    // Position after the last `*` and the name index it was tried at.
    let mut backtrack: Option<(usize, usize)> = None;

    while ni < n.len() {
        let step = match p.get(pi) {
            Some('*') => {
                backtrack = Some((pi + 1, ni));
                pi += 1;
                continue;
            }
            Some('?') => Some(pi + 1),
            Some('[') => match_class(&p, pi, n[ni]),
            Some(&c) if c == n[ni] => Some(pi + 1),
            _ => None,
        };

        match step {
            Some(next) => {
                pi = next;
                ni += 1;
            }
            None => match backtrack {
                Some((star_pi, star_ni)) => {
                    pi = star_pi;
                    ni = star_ni + 1;
                    backtrack = Some((star_pi, star_ni + 1));
                }
                None => return false,
            },
        }
    }

    p[pi..].iter().all(|&c| c == '*')
}

/// Match `c` against the class starting at `p[start] == '['`. Returns the
/// index after the closing `]` on a match. An unterminated class is a
/// literal `[`.
fn match_class(p: &[char], start: usize, c: char) -> Option<usize> {
    let mut i = start + 1;
    let negate = matches!(p.get(i), Some('!') | Some('^'));
    if negate {
        i += 1;
    }

    let mut matched = false;
    let mut first = true;
    while i < p.len() && (first || p[i] != ']') {
        first = false;
        if i + 2 < p.len() && p[i + 1] == '-' && p[i + 2] != ']' {
            if p[i] <= c && c <= p[i + 2] {
                matched = true;
            }
            i += 3;
        } else {
            if p[i] == c {
                matched = true;
            }
            i += 1;
        }
    }

    if i >= p.len() {
        return (c == '[').then_some(start + 1);
    }
    (matched != negate).then_some(i + 1)
}
