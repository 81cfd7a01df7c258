//! Parser for the JSON stream printed by `go list -m -json all`
//!
//! The output is a sequence of concatenated JSON objects, one per module.
//! The main module and modules without a version (local replacements) are
//! not requirements and are skipped.

use crate::domain::Requirement;
use crate::error::ManifestError;
use crate::manifest::{ManifestFormat, ManifestParser};
use serde::Deserialize;
use std::collections::HashSet;

/// Parser for `go list -m -json` output
pub struct GoListParser;

/// One module object from `go list -m -json`
#[derive(Debug, Deserialize)]
struct GoListModule {
    #[serde(rename = "Path", default)]
    path: Option<String>,
    #[serde(rename = "Version", default)]
    version: Option<String>,
    #[serde(rename = "Main", default)]
    main: bool,
    #[serde(rename = "Indirect", default)]
    indirect: bool,
}

impl ManifestParser for GoListParser {
    fn parse(&self, content: &str) -> Result<Vec<Requirement>, ManifestError> {
        let origin = self.format().origin_name();
        let mut requirements = Vec::new();
        let mut seen = HashSet::new();

        let mut stream = serde_json::Deserializer::from_str(content).into_iter::<GoListModule>();
        loop {
            let start = stream.byte_offset();
            let module = match stream.next() {
                None => break,
                Some(Ok(module)) => module,
                Some(Err(e)) => {
                    return Err(ManifestError::parse(origin, e.line(), e.to_string()));
                }
            };
            let line = line_at(content, start);

            let path = match module.path.as_deref().map(str::trim) {
                Some(p) if !p.is_empty() => p.to_string(),
                _ => return Err(ManifestError::parse(origin, line, "module without Path")),
            };

            if module.main {
                continue;
            }
            let Some(version) = module.version else {
                continue;
            };

            if !seen.insert(path.clone()) {
                return Err(ManifestError::parse(
                    origin,
                    line,
                    format!("duplicate requirement '{}'", path),
                ));
            }

            requirements.push(Requirement::new(path, version).with_indirect(module.indirect));
        }

        Ok(requirements)
    }

    fn format(&self) -> ManifestFormat {
        ManifestFormat::GoListJson
    }
}

/// 1-based line of the first non-whitespace byte at or after `offset`
fn line_at(content: &str, offset: usize) -> usize {
    let offset = offset.min(content.len());
    let skipped = content[offset..]
        .find(|c: char| !c.is_whitespace())
        .map(|n| offset + n)
        .unwrap_or(offset);
    content[..skipped].matches('\n').count() + 1
}
