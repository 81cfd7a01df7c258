//! go.mod parser for Go projects
//!
//! Handles:
//! - single-line `require path version` statements
//! - `require ( ... )` blocks
//! - `// indirect` comments
//! - `replace`, `exclude`, `retract`, `tool`, `godebug` and `ignore` blocks
//!   (skipped, they declare no requirements)

use crate::domain::Requirement;
use crate::error::ManifestError;
use crate::manifest::{ManifestFormat, ManifestParser};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Parser for go.mod files
pub struct GoModParser;

// Single require: require module/path v1.2.3
static SINGLE_REQUIRE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^require\s+(\S+)\s+(\S+)$").unwrap());

// Require block entry: module/path v1.2.3
static BLOCK_ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+)\s+(\S+)$").unwrap());

// Block opener: require ( / replace ( / ...
static BLOCK_START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(require|replace|exclude|retract|tool|godebug|ignore)\s*\($").unwrap()
});

// Indirect marker inside a trailing comment
static INDIRECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|;)\s*indirect\s*(;|$)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    None,
    Require { opened_at: usize },
    Skipped { opened_at: usize },
}

impl ManifestParser for GoModParser {
    fn parse(&self, content: &str) -> Result<Vec<Requirement>, ManifestError> {
        let origin = self.format().origin_name();
        let mut requirements = Vec::new();
        let mut seen = HashSet::new();
        let mut block = Block::None;

        for (idx, line) in content.lines().enumerate() {
            let line_no = idx + 1;
            let (code, comment) = split_comment(line);
            let code = code.trim();

            if code.is_empty() {
                continue;
            }

            if code == ")" {
                if block == Block::None {
                    return Err(ManifestError::parse(origin, line_no, "unexpected ')'"));
                }
                block = Block::None;
                continue;
            }

            if let Some(caps) = BLOCK_START_RE.captures(code) {
                if block != Block::None {
                    return Err(ManifestError::parse(origin, line_no, "nested block"));
                }
                block = if &caps[1] == "require" {
                    Block::Require { opened_at: line_no }
                } else {
                    Block::Skipped { opened_at: line_no }
                };
                continue;
            }

            let caps = match block {
                Block::Skipped { .. } => continue,
                Block::Require { .. } => BLOCK_ENTRY_RE.captures(code).ok_or_else(|| {
                    ManifestError::parse(origin, line_no, format!("malformed requirement '{}'", code))
                })?,
                Block::None => {
                    if !is_directive(code, "require") {
                        continue;
                    }
                    SINGLE_REQUIRE_RE.captures(code).ok_or_else(|| {
                        ManifestError::parse(origin, line_no, format!("malformed require '{}'", code))
                    })?
                }
            };

            let path = unquote(&caps[1]);
            let version = unquote(&caps[2]);
            if path.is_empty() {
                return Err(ManifestError::parse(origin, line_no, "empty module path"));
            }
            if !seen.insert(path.to_string()) {
                return Err(ManifestError::parse(
                    origin,
                    line_no,
                    format!("duplicate requirement '{}'", path),
                ));
            }

            let indirect = comment.is_some_and(|c| INDIRECT_RE.is_match(c.trim()));
            requirements.push(Requirement::new(path, version).with_indirect(indirect));
        }

        match block {
            Block::Require { opened_at } | Block::Skipped { opened_at } => Err(
                ManifestError::parse(origin, opened_at, "unterminated block"),
            ),
            Block::None => Ok(requirements),
        }
    }

    fn format(&self) -> ManifestFormat {
        ManifestFormat::GoMod
    }
}

/// Split a line into code and the text after `//`
fn split_comment(line: &str) -> (&str, Option<&str>) {
    match line.find("//") {
        Some(pos) => (&line[..pos], Some(&line[pos + 2..])),
        None => (line, None),
    }
}

/// Returns true if `code` starts with the given directive keyword
fn is_directive(code: &str, keyword: &str) -> bool {
    code.strip_prefix(keyword)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

/// go.mod allows module paths and versions to be written as quoted strings
fn unquote(token: &str) -> &str {
    token
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(token)
}
