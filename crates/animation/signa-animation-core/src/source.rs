//! Clip sources: resource identifier → clips.
//!
//! The sequencer never calls a source itself; hosts fulfil its load requests
//! with whatever source they have (synchronously via
//! [`crate::Sequencer::fulfill_with`], or on their own schedule).

use std::fs;
use std::path::{Path, PathBuf};

use hashbrown::HashMap;

use crate::clip_document::parse_clip_document;
use crate::data::ClipData;
use crate::error::ClipLoadError;

pub trait ClipSource {
    /// Fetch every clip stored under `resource`.
    fn fetch(&mut self, resource: &str) -> Result<Vec<ClipData>, ClipLoadError>;
}

impl<S: ClipSource + ?Sized> ClipSource for &mut S {
    fn fetch(&mut self, resource: &str) -> Result<Vec<ClipData>, ClipLoadError> {
        (**self).fetch(resource)
    }
}

impl<S: ClipSource + ?Sized> ClipSource for Box<S> {
    fn fetch(&mut self, resource: &str) -> Result<Vec<ClipData>, ClipLoadError> {
        (**self).fetch(resource)
    }
}

/// Reads clip documents from files below a root directory.
#[derive(Clone, Debug)]
pub struct FsClipSource {
    root: PathBuf,
}

impl FsClipSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, resource: &str) -> PathBuf {
        // Web-style absolute identifiers ("/clips/a.json") are relative to the root too.
        self.root.join(resource.trim_start_matches('/'))
    }
}

impl ClipSource for FsClipSource {
    fn fetch(&mut self, resource: &str) -> Result<Vec<ClipData>, ClipLoadError> {
        let path = self.resolve(resource);
        let text = fs::read_to_string(&path).map_err(|e| ClipLoadError::Io {
            resource: resource.to_string(),
            reason: format!("{}: {e}", path.display()),
        })?;
        parse_clip_document(&text, resource)
    }
}

/// In-memory clip documents keyed by resource identifier. Records every fetch.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipSource {
    docs: HashMap<String, Result<Vec<ClipData>, ClipLoadError>>,
    fetches: Vec<String>,
}

impl MemoryClipSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, resource: impl Into<String>, clips: Vec<ClipData>) {
        self.docs.insert(resource.into(), Ok(clips));
    }

    /// Parse and store a JSON document. Parse failures are stored too and
    /// returned on fetch.
    pub fn insert_json(&mut self, resource: impl Into<String>, json: &str) {
        let resource = resource.into();
        let parsed = parse_clip_document(json, &resource);
        self.docs.insert(resource, parsed);
    }

    /// Make `resource` fail with `error` on fetch.
    pub fn insert_failure(&mut self, resource: impl Into<String>, error: ClipLoadError) {
        self.docs.insert(resource.into(), Err(error));
    }

    /// Resources fetched so far, in order.
    pub fn fetches(&self) -> &[String] {
        &self.fetches
    }

    pub fn fetch_count(&self, resource: &str) -> usize {
        self.fetches.iter().filter(|r| r.as_str() == resource).count()
    }
}

impl ClipSource for MemoryClipSource {
    fn fetch(&mut self, resource: &str) -> Result<Vec<ClipData>, ClipLoadError> {
        self.fetches.push(resource.to_string());
        match self.docs.get(resource) {
            Some(result) => result.clone(),
            None => Err(ClipLoadError::Io {
                resource: resource.to_string(),
                reason: "not found".into(),
            }),
        }
    }
}
