// Copyright contributors to the oslc project
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::ops::Range;
use std::path::Path;

/// A position in the source: the file name and the 1-based line number.
/// The driver supplies the current position; nodes copy it at construction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SourceLoc {
    file: String,
    line: u32,
}

impl SourceLoc {
    pub fn new<T: ToString>(file: T, line: u32) -> SourceLoc {
        SourceLoc {
            file: file.to_string(),
            line,
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn set_line(&mut self, line: u32) {
        self.line = line;
    }

    /// The final path component of `file`, used when one diagnostic
    /// refers to the location of another declaration.
    pub fn file_name(&self) -> &str {
        Path::new(&self.file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.file)
    }
}

impl fmt::Display for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// The four diagnostic sinks offered by the compiler driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Message,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Message => "message",
        };
        f.write_str(text)
    }
}

pub trait ErrorTrait {
    /// Return a message describing the error.
    fn message(&self) -> String;

    /// Return the source position associated with the error.
    fn location(&self) -> &SourceLoc;

    fn severity(&self) -> Severity;
}

/// Return the byte range of the 1-based `line` in `source`, not including the
/// line terminator. Lines past the end of `source` map to an empty range at EOF.
pub fn line_span(source: &str, line: u32) -> Range<usize> {
    let mut start = 0;
    for (lineno, text) in source.split_inclusive('\n').enumerate() {
        if lineno + 1 == line as usize {
            let end = start + text.trim_end_matches(['\n', '\r']).len();
            return start..end;
        }
        start += text.len();
    }
    source.len()..source.len()
}

#[test]
fn test_line_span() {
    let source = "float a;\nint b = 1;\r\n\nshader s() {}";
    assert_eq!(&source[line_span(source, 1)], "float a;");
    assert_eq!(&source[line_span(source, 2)], "int b = 1;");
    assert_eq!(line_span(source, 3), 21..21);
    assert_eq!(&source[line_span(source, 4)], "shader s() {}");
    assert_eq!(line_span(source, 9), source.len()..source.len());
}

#[test]
fn test_source_loc_file_name() {
    let loc = SourceLoc::new("shaders/lib/noise.osl", 12);
    assert_eq!(loc.file_name(), "noise.osl");
    assert_eq!(loc.to_string(), "shaders/lib/noise.osl:12");
}
