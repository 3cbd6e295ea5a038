use serde::{Deserialize, Serialize};

/// A country-tagged source document prior to embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextDocument {
    /// ISO alpha-2 code, stored uppercase.
    pub country: String,
    pub title: String,
    #[serde(default)]
    pub url: String,
    pub content: String,
}

impl ContextDocument {
    /// Content-addressed id. Re-ingesting the same document replaces it.
    pub fn id(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.country.to_ascii_uppercase().as_bytes());
        hasher.update(b"|");
        hasher.update(self.title.as_bytes());
        hasher.update(b"|");
        hasher.update(self.content.as_bytes());
        hasher.finalize().to_hex().to_string()
    }

    /// Text fed to the embedder.
    pub fn embedding_text(&self) -> String {
        format!("{}\n{}", self.title, self.content)
    }

    /// First `max_chars` characters of the content, on a char boundary.
    pub fn snippet(&self, max_chars: usize) -> String {
        match self.content.char_indices().nth(max_chars) {
            Some((idx, _)) => format!("{}...", self.content[..idx].trim_end()),
            None => self.content.clone(),
        }
    }
}
