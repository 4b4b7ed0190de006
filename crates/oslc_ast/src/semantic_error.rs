// Copyright contributors to the oslc project
// SPDX-License-Identifier: Apache-2.0

// Diagnostics collected while the AST is built. Construction never aborts: every
// problem is recorded here with its source position and building continues, so a
// single pass reports as much as it can. The driver inspects `error_count`
// afterwards to decide whether to hand the tree to the code generator.

use oslc_source_file::{ErrorTrait, Severity, SourceLoc};
use std::fmt;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SemanticErrorKind {
    #[error("'{0}' was not declared in this scope")]
    UnresolvedSymbol(String),
    #[error("{what} '{name}' can't be used as a variable")]
    NotAVariable { name: String, what: &'static str },
    #[error("'{0}' is not a function")]
    NotAFunction(String),
    #[error("type '{typ}' does not have a member '{field}'")]
    NotAStruct { typ: String, field: String },
    #[error("struct type '{structname}' does not have a member '{field}'")]
    UnknownField { structname: String, field: String },
    #[error("indexing into non-array or non-component type")]
    InvalidIndexTarget,
    #[error("function '{0}' was not declared in this scope")]
    UnknownFunction(String),
    #[error("{0}")]
    Redeclaration(String),
    #[error("{0}")]
    Redefinition(String),
    #[error("shader parameter '{0}' requires a default initializer")]
    MissingDefault(String),
    #[error("shader output parameter '{0}' can't be unsized array")]
    InvalidOutputType(String),
    #[error("\"{0}\" : sorry, can't start with three underscores")]
    ReservedName(String),
    #[error("cannot write to non-output parameter \"{0}\"")]
    ReadonlyWrite(String),
    #[error("function parameter '{0}' may not have a default initializer.")]
    ParamDefaultInitializer(String),
    #[error("Nested structs with >1 levels of arrays are not allowed: {0}")]
    NestedStructArray(String),
    #[error("{0}")]
    InitializerMismatch(String),
    #[error("{0}")]
    ReturnTypeMismatch(String),
    #[error("No matching function call to '{name} ({args})'")]
    NoMatchingOverload { name: String, args: String },
    #[error("{0}")]
    Note(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SemanticError {
    error_kind: SemanticErrorKind,
    severity: Severity,
    loc: SourceLoc,
}

impl SemanticError {
    pub fn new(error_kind: SemanticErrorKind, severity: Severity, loc: SourceLoc) -> Self {
        Self {
            error_kind,
            severity,
            loc,
        }
    }

    pub fn kind(&self) -> &SemanticErrorKind {
        &self.error_kind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn loc(&self) -> &SourceLoc {
        &self.loc
    }

    pub fn message(&self) -> String {
        self.error_kind.to_string()
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl ErrorTrait for SemanticError {
    fn message(&self) -> String {
        self.message()
    }

    fn location(&self) -> &SourceLoc {
        &self.loc
    }

    fn severity(&self) -> Severity {
        self.severity
    }
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.loc, self.severity, self.error_kind)
    }
}

/// `SemanticErrorList` stores the diagnostics reported while building the AST of
/// one compilation unit, in the order they were detected.
#[derive(Clone, Debug, Default)]
pub struct SemanticErrorList {
    list: Vec<SemanticError>,
}

impl std::ops::Deref for SemanticErrorList {
    type Target = Vec<SemanticError>;

    fn deref(&self) -> &Self::Target {
        &self.list
    }
}

impl SemanticErrorList {
    pub fn new() -> SemanticErrorList {
        SemanticErrorList {
            list: Vec::<SemanticError>::new(),
        }
    }

    pub(crate) fn insert_error(&mut self, error: SemanticError) {
        self.list.push(error);
    }

    pub fn error_count(&self) -> usize {
        self.list.iter().filter(|e| e.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.list.iter().filter(|e| e.is_warning()).count()
    }

    pub fn any_semantic_errors(&self) -> bool {
        self.list.iter().any(|e| e.is_error())
    }

    /// Diagnostics whose kind satisfies `pred`.
    pub fn filter_kind<F>(&self, pred: F) -> Vec<&SemanticError>
    where
        F: Fn(&SemanticErrorKind) -> bool,
    {
        self.list.iter().filter(|e| pred(e.kind())).collect()
    }

    /// Print diagnostics, reading the source files named in their locations.
    pub fn print_errors(&self) {
        if !self.list.is_empty() {
            oslc_source_file::print_compiler_errors(&self.list);
        }
    }

    /// Print diagnostics for code that did not come from a file on disk.
    pub fn print_errors_no_file(&self, source: &str) {
        oslc_source_file::inner_print_compiler_errors(&self.list, source);
    }
}
