use chrono::{DateTime, Utc};
use serde::Serialize;

/// Document loaded from the document file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Document ID (text before the first `": "`)
    pub id: String,

    /// Document content (text after the first `": "`)
    pub content: String,
}

impl Document {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
        }
    }

    /// First `max_chars` characters of the content, followed by `...`
    pub fn preview(&self, max_chars: usize) -> String {
        preview_text(&self.content, max_chars)
    }
}

/// Search result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// Document ID
    pub doc_id: String,

    /// Cosine similarity (-1.0 to 1.0)
    pub score: f32,

    /// Full document content
    pub content: String,
}

impl SearchResult {
    pub fn new(doc_id: String, score: f32, content: String) -> Self {
        Self {
            doc_id,
            score,
            content,
        }
    }

    /// Content preview, see [`Document::preview`]
    pub fn preview(&self, max_chars: usize) -> String {
        preview_text(&self.content, max_chars)
    }
}

fn preview_text(content: &str, max_chars: usize) -> String {
    let mut preview: String = content.chars().take(max_chars).collect();
    preview.push_str("...");
    preview
}

/// Loaded corpus statistics
#[derive(Debug, Clone, Serialize)]
pub struct SearchStats {
    /// Number of documents in the store
    pub documents: usize,

    /// Embedding matrix shape (rows, dimension)
    pub embedding_shape: (usize, usize),

    /// Query encoder in use
    pub encoder: String,

    /// When the corpus was loaded
    pub loaded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_by_chars() {
        let doc = Document::new("doc1", "héllo wörld");
        assert_eq!(doc.preview(5), "héllo...");
    }

    #[test]
    fn test_preview_short_content_still_gets_ellipsis() {
        let result = SearchResult::new("doc1".into(), 0.5, "The cat sat.".into());
        assert_eq!(result.preview(500), "The cat sat....");
    }
}
