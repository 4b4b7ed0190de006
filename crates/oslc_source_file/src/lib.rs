// Copyright contributors to the oslc project
// SPDX-License-Identifier: Apache-2.0

//! Source positions and diagnostic reporting for the oslc front end. Every AST node is
//! stamped with a [`SourceLoc`] (file name and line) when it is built. Diagnostics
//! implement [`ErrorTrait`] and are rendered with the external crate `ariadne`.

mod api;
mod source_file;

pub use source_file::{line_span, ErrorTrait, Severity, SourceLoc};

pub use api::{inner_print_compiler_errors, print_compiler_errors, report_error};
