#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub image_url: Option<String>,
    pub document_url: Option<String>,
    pub video_link: Option<String>,
}

/// Row values for an insert. The id is assigned by the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub image_url: String,
    pub document_url: String,
    pub video_link: String,
}

impl Product {
    /// Stored blob URLs that are worth a delete attempt.
    pub fn blob_urls(&self) -> Vec<&str> {
        [self.image_url.as_deref(), self.document_url.as_deref()]
            .into_iter()
            .flatten()
            .filter(|url| is_retrievable_url(url))
            .collect()
    }
}

pub fn is_retrievable_url(url: &str) -> bool {
    let url = url.trim();
    url.starts_with("http://") || url.starts_with("https://")
}
