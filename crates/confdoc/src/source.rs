//! Source-text retrieval for computed defaults.
//!
//! A computed default is documented by showing the routine that produces it.
//! The text either ships inline in the registry export or is pulled out of the
//! file that defines the routine, the way a source inspector would: leading
//! decorators, the `def` line, and every following line that is blank or
//! indented deeper than the `def`.

use std::borrow::Cow;
use std::path::PathBuf;

use crate::setting::ComputedDefault;

/// Why a routine's source could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("no inline source or defining file recorded")]
    Missing,

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no definition of '{routine}' in {path}")]
    NotDefined { routine: String, path: PathBuf },
}

impl ComputedDefault {
    /// The routine's defining source text, indentation preserved.
    pub fn source_text(&self) -> Result<Cow<'_, str>, SourceError> {
        if let Some(source) = &self.source {
            return Ok(Cow::Borrowed(source.as_str()));
        }

        let path = self.file.as_ref().ok_or(SourceError::Missing)?;
        let contents = std::fs::read_to_string(path).map_err(|e| SourceError::Read {
            path: path.clone(),
            source: e,
        })?;

        extract_definition(&contents, &self.routine)
            .map(Cow::Owned)
            .ok_or_else(|| SourceError::NotDefined {
                routine: self.routine.clone(),
                path: path.clone(),
            })
    }
}

/// Extract the definition block of `routine` from `contents`.
///
/// The body runs while lines are indented deeper than the `def`. Blank lines,
/// comment-only lines and lines inside a triple-quoted string never end it;
/// trailing blanks and trailing shallow comments are left out.
///
/// Returns `None` when no `def routine(` / `async def routine(` line exists.
pub fn extract_definition(contents: &str, routine: &str) -> Option<String> {
    let lines: Vec<&str> = contents.lines().collect();
    let def_index = lines.iter().position(|line| defines(line, routine))?;
    let def_indent = indent_of(lines[def_index]);

    let mut start = def_index;
    while start > 0 {
        let previous = lines[start - 1];
        if previous.trim_start().starts_with('@') && indent_of(previous) == def_indent {
            start -= 1;
        } else {
            break;
        }
    }

    let mut open_string = string_state(lines[def_index], None);
    let mut last = def_index;
    for (index, line) in lines.iter().enumerate().skip(def_index + 1) {
        let trimmed = line.trim_start();
        if open_string.is_some() {
            last = index;
        } else if trimmed.is_empty() {
            continue;
        } else if trimmed.starts_with('#') {
            if indent_of(line) > def_indent {
                last = index;
            }
            continue;
        } else if indent_of(line) > def_indent {
            last = index;
        } else {
            break;
        }
        open_string = string_state(line, open_string);
    }

    let mut block = lines[start..=last].join("\n");
    block.push('\n');
    Some(block)
}

/// Track triple-quoted strings across a line: returns the delimiter still open
/// at the end of `line`, given the one open at its start.
fn string_state(line: &str, mut open: Option<&'static str>) -> Option<&'static str> {
    let mut rest = line;
    loop {
        match open {
            Some(delimiter) => match rest.find(delimiter) {
                Some(at) => {
                    rest = &rest[at + delimiter.len()..];
                    open = None;
                }
                None => return open,
            },
            None => {
                let next = ["\"\"\"", "'''"]
                    .into_iter()
                    .filter_map(|delimiter| rest.find(delimiter).map(|at| (at, delimiter)))
                    .min_by_key(|&(at, _)| at);
                match next {
                    Some((at, delimiter)) if !rest[..at].contains('#') => {
                        rest = &rest[at + delimiter.len()..];
                        open = Some(delimiter);
                    }
                    _ => return None,
                }
            }
        }
    }
}

/// Split like the source language's `splitlines`: `\n`, `\r\n`, `\r` and the
/// other line boundaries (`\x0b`, `\x0c`, `\x1c`-`\x1e`, `\x85`, U+2028,
/// U+2029). A trailing boundary does not produce an empty last line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((at, c)) = chars.next() {
        let is_boundary = matches!(
            c,
            '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
        );
        if !is_boundary {
            continue;
        }
        lines.push(&text[start..at]);
        start = at + c.len_utf8();
        if c == '\r' {
            if let Some(&(next_at, '\n')) = chars.peek() {
                chars.next();
                start = next_at + 1;
            }
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

fn defines(line: &str, routine: &str) -> bool {
    let trimmed = line.trim_start();
    let rest = trimmed
        .strip_prefix("async def ")
        .or_else(|| trimmed.strip_prefix("def "));
    match rest {
        Some(rest) => rest
            .trim_start()
            .strip_prefix(routine)
            .is_some_and(|after| after.trim_start().starts_with('(')),
        None => false,
    }
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG_SOURCE: &str = r#"class Setting:
    pass


class OnStarting(Setting):
    name = "on_starting"

    def on_starting(server):
        pass

    default = staticmethod(on_starting)


class WorkerExit(Setting):
    name = "worker_exit"

    @staticmethod
    def worker_exit(server, worker):
        if worker:

            server.log.info("exit")

    default = worker_exit


async def ready(app):
    return True
"#;

    #[test]
    fn test_extract_nested_definition() {
        let source = extract_definition(CONFIG_SOURCE, "on_starting").unwrap();
        assert_eq!(source, "    def on_starting(server):\n        pass\n");
    }

    #[test]
    fn test_extract_keeps_decorators_and_inner_blank_lines() {
        let source = extract_definition(CONFIG_SOURCE, "worker_exit").unwrap();
        assert_eq!(
            source,
            "    @staticmethod\n    def worker_exit(server, worker):\n        if worker:\n\n            server.log.info(\"exit\")\n"
        );
    }

    #[test]
    fn test_extract_async_definition_at_end_of_file() {
        let source = extract_definition(CONFIG_SOURCE, "ready").unwrap();
        assert_eq!(source, "async def ready(app):\n    return True\n");
    }

    #[test]
    fn test_extract_requires_exact_name() {
        assert!(extract_definition(CONFIG_SOURCE, "on_start").is_none());
        assert!(extract_definition(CONFIG_SOURCE, "missing").is_none());
    }

    #[test]
    fn test_extract_keeps_shallow_comments_and_docstrings_inside_body() {
        let contents = "def post_request(worker, req, environ, resp):\n    \"\"\"Log the request.\n\nRuns after the response is sent.\n\"\"\"\n# disabled:\n    # worker.log.debug(req)\n    pass\n\n# helpers\n\ndef other():\n    pass\n";
        let source = extract_definition(contents, "post_request").unwrap();
        assert_eq!(
            source,
            "def post_request(worker, req, environ, resp):\n    \"\"\"Log the request.\n\nRuns after the response is sent.\n\"\"\"\n# disabled:\n    # worker.log.debug(req)\n    pass\n"
        );
    }

    #[test]
    fn test_extract_single_line_definition() {
        let source = extract_definition("def f(): return 1\nx = f()\n", "f").unwrap();
        assert_eq!(source, "def f(): return 1\n");
    }

    #[test]
    fn test_split_lines_matches_line_boundaries() {
        assert_eq!(split_lines("a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines("a\x0cb\x0bc\u{2028}d"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines("a\n\nb\n"), vec!["a", "", "b"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_source_text_prefers_inline() {
        let computed = ComputedDefault::inline("f", "def f():\n    return 1\n");
        assert_eq!(computed.source_text().unwrap(), "def f():\n    return 1\n");
    }

    #[test]
    fn test_source_text_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.py");
        std::fs::write(&path, CONFIG_SOURCE).unwrap();

        let computed = ComputedDefault::in_file("ready", &path);
        assert_eq!(
            computed.source_text().unwrap(),
            "async def ready(app):\n    return True\n"
        );

        let computed = ComputedDefault::in_file("absent", &path);
        assert!(matches!(
            computed.source_text(),
            Err(SourceError::NotDefined { .. })
        ));
    }

    #[test]
    fn test_source_text_errors() {
        let computed = ComputedDefault {
            routine: "f".to_string(),
            source: None,
            file: None,
        };
        assert!(matches!(computed.source_text(), Err(SourceError::Missing)));

        let computed = ComputedDefault::in_file("f", "/nonexistent/config.py");
        assert!(matches!(
            computed.source_text(),
            Err(SourceError::Read { .. })
        ));
    }
}
