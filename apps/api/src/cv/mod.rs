//! Candidate résumés: loading from disk and keyword ranking.

pub mod loader;
pub mod ranker;

/// One loaded résumé. `name` is the file stem shown to clients,
/// `content` the extracted plain text used for matching.
#[derive(Debug, Clone)]
pub struct Cv {
    pub name: String,
    pub filename: String,
    pub content: String,
}

/// Immutable collection of résumés in load order, shared across requests
/// behind an `Arc`. Populated once at startup.
#[derive(Debug, Default)]
pub struct CvStore {
    cvs: Vec<Cv>,
}

impl CvStore {
    pub fn new(cvs: Vec<Cv>) -> Self {
        Self { cvs }
    }

    pub fn all(&self) -> &[Cv] {
        &self.cvs
    }

    pub fn len(&self) -> usize {
        self.cvs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cvs.is_empty()
    }
}
