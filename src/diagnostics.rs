use crate::{
    language::errors::{SyntaxError, SyntaxErrors},
    runtime::RuntimeError,
};
use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic, Clone)]
#[error("{message}")]
#[diagnostic(code(syntax::error))]
pub struct SyntaxDiagnostic {
    #[source_code]
    src: NamedSource<String>,
    #[label("{label}")]
    span: SourceSpan,
    #[help]
    help: Option<String>,
    message: String,
    label: String,
}

impl SyntaxDiagnostic {
    pub fn from_error(src: NamedSource<String>, err: SyntaxError) -> Self {
        Self {
            src,
            span: err.to_source_span(),
            help: err.help.clone(),
            message: err.message,
            label: err.label,
        }
    }
}

pub fn syntax_reports(name: &str, source: &str, errors: &SyntaxErrors) -> Vec<Report> {
    errors
        .errors
        .iter()
        .map(|err| {
            let src = NamedSource::new(name, source.to_string());
            Report::new(SyntaxDiagnostic::from_error(src, err.clone()))
        })
        .collect()
}

pub fn emit_syntax_errors(name: &str, source: &str, errors: &SyntaxErrors) {
    for report in syntax_reports(name, source, errors) {
        eprintln!("{:?}", report);
    }
}

pub fn report_runtime_error(error: &RuntimeError) {
    eprintln!("{:?}", Report::new(error.clone()));
}

pub fn report_io_error(path: &Path, error: &std::io::Error) {
    eprintln!("Failed to access {}: {}", path.display(), error);
}
