use clap::Args;
use specgate_core::document::Document;
use specgate_core::types::DocumentType;
use specgate_core::{Result, SpecgateError};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Where a single document comes from. `--text` wins over `--file`, which
/// wins over the positional path; `-` or nothing reads piped stdin.
#[derive(Args, Debug, Default, Clone)]
pub struct InputArgs {
    /// Document file to read
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Inline document text
    #[arg(long, short = 't', value_name = "TEXT")]
    pub text: Option<String>,

    /// Document file to read (`-` for stdin)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,
}

impl InputArgs {
    pub fn load(&self, doc_type: DocumentType) -> Result<Document> {
        if let Some(text) = &self.text {
            return Document::from_text(doc_type, text.as_str(), "--text");
        }
        match self.file.as_ref().or(self.path.as_ref()) {
            Some(path) if path.as_os_str() != "-" => Document::from_file(doc_type, path),
            _ => read_stdin(doc_type),
        }
    }
}

fn read_stdin(doc_type: DocumentType) -> Result<Document> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(SpecgateError::EmptyInput(
            "no input given; pass --file, --text or pipe text on stdin".to_string(),
        ));
    }
    Document::from_reader(doc_type, stdin.lock(), "stdin")
}
