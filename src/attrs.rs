//! Key/value view over the packed attribute column of GFF and GTF records.
//!
//! GFF3 packs attributes as `key1=val1;key2=val2`, GTF as
//! `key1 "val1"; key2 "val2";`. Keys keep the order in which they were
//! written; inserting an existing key replaces its value in place.

use crate::format::FileType;
use std::fmt;

/// Packing convention of an attribute column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrStyle {
    /// `key=value;key=value`
    Gff,
    /// `key "value"; key "value";`
    Gtf,
}

impl AttrStyle {
    /// Attribute style used by a format, if it has an attribute column.
    pub fn for_file_type(file_type: FileType) -> Option<Self> {
        match file_type {
            FileType::Bed => None,
            FileType::Gff => Some(AttrStyle::Gff),
            FileType::Gtf => Some(AttrStyle::Gtf),
        }
    }
}

/// Ordered attribute map parsed from one packed column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attributes {
    style: AttrStyle,
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// Create an empty attribute map.
    pub fn new(style: AttrStyle) -> Self {
        Self {
            style,
            entries: Vec::new(),
        }
    }

    /// Parse a packed attribute column. `.` and the empty string mean no attributes.
    pub fn parse(text: &str, style: AttrStyle) -> Self {
        let mut attrs = Self::new(style);
        let text = text.trim();
        if text == "." {
            return attrs;
        }

        for item in text.split(';') {
            let item = item.trim();
            if item.is_empty() {
                continue;
            }
            let (key, value) = match style {
                AttrStyle::Gff => item.split_once('=').unwrap_or((item, "")),
                AttrStyle::Gtf => item
                    .split_once(char::is_whitespace)
                    .map(|(k, v)| (k, v.trim().trim_matches('"')))
                    .unwrap_or((item, "")),
            };
            attrs.insert(key.trim(), value);
        }
        attrs
    }

    pub fn style(&self) -> AttrStyle {
        self.style
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert or replace a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Remove a key, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return write!(f, ".");
        }
        for (i, (key, value)) in self.entries.iter().enumerate() {
            match self.style {
                AttrStyle::Gff => {
                    if i > 0 {
                        write!(f, ";")?;
                    }
                    write!(f, "{}={}", key, value)?;
                }
                AttrStyle::Gtf => {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{} \"{}\";", key, value)?;
                }
            }
        }
        Ok(())
    }
}
