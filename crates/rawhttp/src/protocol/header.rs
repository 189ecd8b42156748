//! Ordered, case-insensitive header multimap.
//!
//! `http::HeaderMap` lowercases names, but a raw message has to be written
//! back exactly as it was received, so names keep the casing they arrived
//! with. Lookups go through an index keyed by the lowercased name.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::protocol::BodyFraming;

/// Header fields of one message, in arrival order.
#[derive(Clone, Default)]
pub struct HeaderContainer {
    entries: Vec<(String, String)>,
    index: HashMap<String, Vec<usize>>,
}

impl HeaderContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity), index: HashMap::with_capacity(capacity) }
    }

    /// Appends a field. Existing values for the same name are kept.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let position = self.entries.len();
        self.index.entry(name.to_ascii_lowercase()).or_default().push(position);
        self.entries.push((name, value.into()));
    }

    /// All values for `name` in arrival order, empty when the header is absent.
    pub fn get(&self, name: &str) -> Vec<&str> {
        self.positions(name).iter().map(|&i| self.entries[i].1.as_str()).collect()
    }

    pub fn first(&self, name: &str) -> Option<&str> {
        self.positions(name).first().map(|&i| self.entries[i].1.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        !self.positions(name).is_empty()
    }

    /// Distinct names in first-occurrence order, spelled as first received.
    pub fn names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(i, (name, _))| self.positions(name).first() == Some(i))
            .map(|(_, (name, _))| name.as_str())
            .collect()
    }

    /// Snapshot of name to values, keyed by the first-received spelling.
    pub fn as_map(&self) -> BTreeMap<String, Vec<String>> {
        self.names()
            .into_iter()
            .map(|name| (name.to_owned(), self.get(name).into_iter().map(str::to_owned).collect()))
            .collect()
    }

    /// Iterates every field in stored order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of fields, counting repeated names once per value.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy with `name: value` placed before all other fields.
    pub fn with_first(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut headers = Self::with_capacity(self.len() + 1);
        headers.add(name, value);
        for (name, value) in self.iter() {
            headers.add(name, value);
        }
        headers
    }

    /// Copy with every value of `name` replaced by a single `value`, kept at
    /// the position of the first occurrence (or appended).
    pub fn with(&self, name: &str, value: impl Into<String>) -> Self {
        let mut value = Some(value.into());
        let mut headers = Self::with_capacity(self.len() + 1);
        for (existing, existing_value) in self.iter() {
            if !existing.eq_ignore_ascii_case(name) {
                headers.add(existing, existing_value);
            } else if let Some(value) = value.take() {
                headers.add(existing, value);
            }
        }
        if let Some(value) = value {
            headers.add(name, value);
        }
        headers
    }

    /// Copy without any field called `name`.
    pub fn without(&self, name: &str) -> Self {
        let mut headers = Self::with_capacity(self.len());
        for (existing, value) in self.iter().filter(|(existing, _)| !existing.eq_ignore_ascii_case(name)) {
            headers.add(existing, value);
        }
        headers
    }

    /// Copy whose `Content-Length` and `Transfer-Encoding` describe
    /// `framing`. Other fields are left alone.
    pub fn with_framing(&self, framing: Option<BodyFraming>) -> Self {
        match framing {
            Some(BodyFraming::ContentLength(length)) => {
                self.without("Transfer-Encoding").with("Content-Length", length.to_string())
            }
            Some(BodyFraming::Chunked) => self.without("Content-Length").with("Transfer-Encoding", "chunked"),
            Some(BodyFraming::UntilClose) | None => self.without("Content-Length").without("Transfer-Encoding"),
        }
    }

    fn positions(&self, name: &str) -> &[usize] {
        self.index.get(&name.to_ascii_lowercase()).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl PartialEq for HeaderContainer {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for HeaderContainer {}

impl fmt::Debug for HeaderContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for HeaderContainer {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.add(name, value);
        }
        headers
    }
}
