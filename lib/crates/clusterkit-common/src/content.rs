//! Output shape shared by every asset: an ordered list of named byte blobs.

use thiserror::Error;

/// A single named output of an asset, e.g. `tls/admin.key` or
/// `terraform.tfstate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    /// Relative file name, unique within its [`State`].
    pub name: String,
    pub data: Vec<u8>,
}

impl Content {
    #[must_use]
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// Errors raised while assembling a [`State`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContentError {
    #[error("duplicate content name '{0}'")]
    DuplicateName(String),
}

/// The resolved output of one asset generation.
///
/// A `State` is built once by the asset that produced it and then handed to
/// the caller by value. Content names are unique; insertion order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    contents: Vec<Content>,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from an ordered list of contents.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::DuplicateName`] if two contents share a name.
    pub fn from_contents(contents: Vec<Content>) -> Result<Self, ContentError> {
        let mut state = Self::new();
        for content in contents {
            state.push(content)?;
        }
        Ok(state)
    }

    /// Append a content entry.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::DuplicateName`] if the name is already present.
    pub fn push(&mut self, content: Content) -> Result<(), ContentError> {
        if self.get(&content.name).is_some() {
            return Err(ContentError::DuplicateName(content.name));
        }
        self.contents.push(content);
        Ok(())
    }

    #[must_use]
    pub fn contents(&self) -> &[Content] {
        &self.contents
    }

    /// The first content entry, which single-output assets use as their
    /// primary payload.
    #[must_use]
    pub fn first(&self) -> Option<&Content> {
        self.contents.first()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Content> {
        self.contents.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    #[must_use]
    pub fn into_contents(self) -> Vec<Content> {
        self.contents
    }
}

impl From<Content> for State {
    fn from(content: Content) -> Self {
        Self {
            contents: vec![content],
        }
    }
}
