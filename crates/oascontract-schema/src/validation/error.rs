//! Validation error types
//!
//! A validation run returns a list of [`ValidationError`]s. Each error has a
//! stable machine-readable [`ErrorKind`] and a human message. A `Field` error
//! also carries the path that locates it inside the value. Containers scope
//! errors from their children on the way up, which turns a `Plain` error into
//! a `Field` error or prepends to an existing path.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Machine-readable error category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    IncorrectTypeSupplied,
    LessThanMinimum,
    MoreThanMaximum,
    LessThanMinimumLength,
    MoreThanMaximumLength,
    LessThanMinimumItems,
    MoreThanMaximumItems,
    DuplicateItems,
    InvalidFormat,
    NotInEnum,
    IsRequiredField,
    KeyNotPartOfObject,
    NoMemberMatched,
    ExactlyOneMustMatch,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::IncorrectTypeSupplied => "incorrect_type_supplied",
            ErrorKind::LessThanMinimum => "less_than_minimum",
            ErrorKind::MoreThanMaximum => "more_than_maximum",
            ErrorKind::LessThanMinimumLength => "less_than_minimum_length",
            ErrorKind::MoreThanMaximumLength => "more_than_maximum_length",
            ErrorKind::LessThanMinimumItems => "less_than_minimum_items",
            ErrorKind::MoreThanMaximumItems => "more_than_maximum_items",
            ErrorKind::DuplicateItems => "duplicate_items",
            ErrorKind::InvalidFormat => "invalid_format",
            ErrorKind::NotInEnum => "not_in_enum",
            ErrorKind::IsRequiredField => "is_required_field",
            ErrorKind::KeyNotPartOfObject => "key_not_part_of_object",
            ErrorKind::NoMemberMatched => "no_member_matched",
            ErrorKind::ExactlyOneMustMatch => "exactly_one_must_match",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a field path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Render a path as `a.b[2].c`
pub fn format_path(path: &[PathSegment]) -> String {
    let mut rendered = String::new();
    for segment in path {
        match segment {
            PathSegment::Key(key) => {
                if !rendered.is_empty() {
                    rendered.push('.');
                }
                rendered.push_str(key);
            }
            PathSegment::Index(index) => {
                rendered.push_str(&format!("[{}]", index));
            }
        }
    }
    rendered
}

/// Per-member errors of a failed anyOf/oneOf, keyed by member name
pub type BranchErrors = IndexMap<String, Vec<ValidationError>>;

/// A data error found while checking a value
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValidationError {
    /// Error not (yet) tied to a location
    #[error("{message}")]
    Plain {
        kind: ErrorKind,
        message: String,
        #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
        branches: BranchErrors,
    },
    /// Error located by a field path
    #[error("{}: {message}", format_path(.path))]
    Field {
        path: Vec<PathSegment>,
        kind: ErrorKind,
        message: String,
        #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
        branches: BranchErrors,
    },
}

impl ValidationError {
    pub fn plain(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Plain {
            kind,
            message: message.into(),
            branches: BranchErrors::new(),
        }
    }

    pub fn field<P>(path: P, kind: ErrorKind, message: impl Into<String>) -> Self
    where
        P: IntoIterator,
        P::Item: Into<PathSegment>,
    {
        Self::Field {
            path: path.into_iter().map(Into::into).collect(),
            kind,
            message: message.into(),
            branches: BranchErrors::new(),
        }
    }

    /// Attach per-member errors
    pub fn with_branches(mut self, errors: BranchErrors) -> Self {
        match &mut self {
            Self::Plain { branches, .. } | Self::Field { branches, .. } => *branches = errors,
        }
        self
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Plain { kind, .. } | Self::Field { kind, .. } => *kind,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Plain { message, .. } | Self::Field { message, .. } => message,
        }
    }

    /// Field path; empty for plain errors
    pub fn path(&self) -> &[PathSegment] {
        match self {
            Self::Plain { .. } => &[],
            Self::Field { path, .. } => path,
        }
    }

    pub fn branches(&self) -> &BranchErrors {
        match self {
            Self::Plain { branches, .. } | Self::Field { branches, .. } => branches,
        }
    }

    pub fn is_field(&self) -> bool {
        matches!(self, Self::Field { .. })
    }

    /// Prepend `segment` to the path, promoting a plain error to a field error
    pub fn scoped(self, segment: impl Into<PathSegment>) -> Self {
        let segment = segment.into();
        match self {
            Self::Plain {
                kind,
                message,
                branches,
            } => Self::Field {
                path: vec![segment],
                kind,
                message,
                branches,
            },
            Self::Field {
                mut path,
                kind,
                message,
                branches,
            } => {
                path.insert(0, segment);
                Self::Field {
                    path,
                    kind,
                    message,
                    branches,
                }
            }
        }
    }
}

/// Several validation errors, e.g. from a batch run
#[derive(Debug, Clone, Default, PartialEq, Error, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s):", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "\n{}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn extend<I: IntoIterator<Item = ValidationError>>(&mut self, errors: I) {
        self.errors.extend(errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// Ok if no errors, Err otherwise
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}
