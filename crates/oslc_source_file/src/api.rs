// Copyright contributors to the oslc project
// SPDX-License-Identifier: Apache-2.0

use ariadne::Config;
use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use std::fs;
use std::ops::Range;

use crate::source_file::{line_span, ErrorTrait, Severity};

/// Print diagnostics whose text is taken from `source`. The file name stored in
/// each diagnostic's location is only used as a label; it need not exist.
pub fn inner_print_compiler_errors<T: ErrorTrait>(errors: &[T], source: &str) {
    for err in errors.iter() {
        let loc = err.location();
        let span = line_span(source, loc.line());
        report_error(err.severity(), &err.message(), &span, loc.file(), source);
    }
}

/// Print diagnostics, reading each referenced source file from disk. When a file
/// cannot be read the diagnostic is printed without a source excerpt.
pub fn print_compiler_errors<T: ErrorTrait>(errors: &[T]) {
    for err in errors.iter() {
        let loc = err.location();
        match fs::read_to_string(loc.file()) {
            Ok(source) => {
                let span = line_span(&source, loc.line());
                report_error(err.severity(), &err.message(), &span, loc.file(), &source);
            }
            Err(_) => eprintln!("{}: {}: {}", loc, err.severity(), err.message()),
        }
    }
}

pub fn report_error(
    severity: Severity,
    message: &str,
    span: &Range<usize>,
    file_path: &str,
    source: &str,
) {
    let mut colors = ColorGenerator::new();
    let a = colors.next();
    let kind = match severity {
        Severity::Error => ReportKind::Error,
        Severity::Warning => ReportKind::Warning,
        Severity::Info | Severity::Message => ReportKind::Advice,
    };
    let printed = Report::build(kind, (file_path, span.clone()))
        .with_message(message)
        .with_config(Config::default().with_compact(true))
        .with_label(
            Label::new((file_path, span.clone()))
                .with_message("Near this point")
                .with_color(a),
        )
        .finish()
        .eprint((file_path, Source::from(source)));
    // stderr is gone; nothing more useful to do with the diagnostic.
    let _ = printed;
}
