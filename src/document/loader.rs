use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Text,
    Pdf,
}

#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub path: PathBuf,
    pub format: DocumentFormat,
}

pub struct DocumentLoader;

impl DocumentLoader {
    /// Loads every supported file in `dir` into a Document. Files with an
    /// unrecognized extension are skipped; a missing directory or an
    /// unreadable supported file is surfaced as an error.
    pub fn load_dir(dir: &Path) -> Result<Vec<Document>> {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory {}", dir.display()))?;

        let mut documents = Vec::new();
        for entry in entries {
            let path = entry
                .with_context(|| format!("Failed to read entry in {}", dir.display()))?
                .path();
            if !path.is_file() {
                continue;
            }

            match Self::format_for(&path) {
                Some(format) => documents.push(Self::load_file(&path, format)?),
                None => log::debug!("Skipping unsupported file: {}", path.display()),
            }
        }

        Ok(documents)
    }

    pub fn load_file(path: &Path, format: DocumentFormat) -> Result<Document> {
        let text = match format {
            DocumentFormat::Text => fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            DocumentFormat::Pdf => pdf_extract::extract_text(path)
                .map_err(|e| anyhow!("Failed to extract text from {}: {}", path.display(), e))?,
        };

        Ok(Document {
            text,
            path: path.to_path_buf(),
            format,
        })
    }

    fn format_for(path: &Path) -> Option<DocumentFormat> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "txt" => Some(DocumentFormat::Text),
            "pdf" => Some(DocumentFormat::Pdf),
            _ => None,
        }
    }
}
