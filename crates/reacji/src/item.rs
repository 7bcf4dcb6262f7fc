//! References to reactable items.
//!
//! A reaction is always attached to exactly one of a message, a file, or a
//! file comment. [`ItemRef`] names one of those, and knows how to write
//! itself into (and read itself back out of) wire parameters.

use std::fmt;
use std::str::FromStr;

use reacji_common::Params;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::params::keys;

/// The three kinds of item a reaction can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A channel message
    Message,
    /// A file
    File,
    /// A comment on a file
    FileComment,
}

impl ItemKind {
    /// The `type` discriminator used on the wire
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::File => "file",
            Self::FileComment => "file_comment",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = RefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "message" => Ok(Self::Message),
            "file" => Ok(Self::File),
            "file_comment" => Ok(Self::FileComment),
            other => Err(RefError::UnknownKind(SmolStr::new(other))),
        }
    }
}

/// Errors building an [`ItemRef`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum RefError {
    /// An identifier was the empty string
    #[error("`{field}` must not be empty")]
    #[diagnostic(code(reacji::item_ref::empty))]
    Empty {
        /// Parameter name of the offending identifier
        field: &'static str,
    },

    /// No reference parameters were present
    #[error("parameters do not name a message, file, or file comment")]
    #[diagnostic(code(reacji::item_ref::missing))]
    Missing,

    /// Parameters for more than one kind of item were present
    #[error("parameters name more than one item: {0} and {1}")]
    #[diagnostic(code(reacji::item_ref::ambiguous))]
    Ambiguous(ItemKind, ItemKind),

    /// A message reference was only half present
    #[error("message reference requires both `channel` and `timestamp`, missing `{0}`")]
    #[diagnostic(code(reacji::item_ref::incomplete))]
    Incomplete(&'static str),

    /// Not one of `message`, `file`, `file_comment`
    #[error("unknown item kind `{0}`")]
    #[diagnostic(code(reacji::item_ref::unknown_kind))]
    UnknownKind(SmolStr),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Inner {
    Message { channel: SmolStr, timestamp: SmolStr },
    File(SmolStr),
    FileComment(SmolStr),
}

/// A reference to exactly one message, file, or file comment.
///
/// Identifiers are opaque; only emptiness is checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemRef(Inner);

/// Borrowed view of an [`ItemRef`] for matching on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// A message, identified by its channel and timestamp
    Message {
        /// Channel ID
        channel: &'a str,
        /// Message timestamp (`ts`)
        timestamp: &'a str,
    },
    /// A file ID
    File(&'a str),
    /// A file comment ID
    FileComment(&'a str),
}

fn non_empty(field: &'static str, value: impl Into<SmolStr>) -> Result<SmolStr, RefError> {
    let value = value.into();
    if value.is_empty() {
        Err(RefError::Empty { field })
    } else {
        Ok(value)
    }
}

impl ItemRef {
    /// Reference a message by channel and timestamp.
    pub fn message(
        channel: impl Into<SmolStr>,
        timestamp: impl Into<SmolStr>,
    ) -> Result<Self, RefError> {
        Ok(Self(Inner::Message {
            channel: non_empty(keys::CHANNEL, channel)?,
            timestamp: non_empty(keys::TIMESTAMP, timestamp)?,
        }))
    }

    /// Reference a file.
    pub fn file(file: impl Into<SmolStr>) -> Result<Self, RefError> {
        Ok(Self(Inner::File(non_empty(keys::FILE, file)?)))
    }

    /// Reference a file comment.
    pub fn file_comment(file_comment: impl Into<SmolStr>) -> Result<Self, RefError> {
        Ok(Self(Inner::FileComment(non_empty(
            keys::FILE_COMMENT,
            file_comment,
        )?)))
    }

    /// Which kind of item this refers to
    pub fn kind(&self) -> ItemKind {
        match &self.0 {
            Inner::Message { .. } => ItemKind::Message,
            Inner::File(_) => ItemKind::File,
            Inner::FileComment(_) => ItemKind::FileComment,
        }
    }

    /// Borrow the identifiers
    pub fn target(&self) -> Target<'_> {
        match &self.0 {
            Inner::Message { channel, timestamp } => Target::Message {
                channel: channel.as_str(),
                timestamp: timestamp.as_str(),
            },
            Inner::File(file) => Target::File(file.as_str()),
            Inner::FileComment(id) => Target::FileComment(id.as_str()),
        }
    }

    /// Add this reference's parameters to `params`.
    ///
    /// Only the keys for this kind are written: `channel` + `timestamp`,
    /// `file`, or `file_comment`.
    pub fn write_params(&self, params: &mut Params) {
        match &self.0 {
            Inner::Message { channel, timestamp } => {
                params.insert(SmolStr::new_static(keys::CHANNEL), channel.clone());
                params.insert(SmolStr::new_static(keys::TIMESTAMP), timestamp.clone());
            }
            Inner::File(file) => {
                params.insert(SmolStr::new_static(keys::FILE), file.clone());
            }
            Inner::FileComment(id) => {
                params.insert(SmolStr::new_static(keys::FILE_COMMENT), id.clone());
            }
        }
    }

    /// Recover a reference from encoded parameters.
    ///
    /// Other keys (`name`, `full`, ...) are ignored. Empty values count as absent.
    pub fn from_params(params: &Params) -> Result<Self, RefError> {
        let get = |key: &str| params.get(key).filter(|v| !v.is_empty()).cloned();

        let message = match (get(keys::CHANNEL), get(keys::TIMESTAMP)) {
            (Some(channel), Some(timestamp)) => Some(Inner::Message { channel, timestamp }),
            (Some(_), None) => return Err(RefError::Incomplete(keys::TIMESTAMP)),
            (None, Some(_)) => return Err(RefError::Incomplete(keys::CHANNEL)),
            (None, None) => None,
        };
        let candidates = [
            message,
            get(keys::FILE).map(Inner::File),
            get(keys::FILE_COMMENT).map(Inner::FileComment),
        ];

        let mut found = candidates.into_iter().flatten().map(ItemRef);
        match (found.next(), found.next()) {
            (Some(item), None) => Ok(item),
            (Some(a), Some(b)) => Err(RefError::Ambiguous(a.kind(), b.kind())),
            (None, _) => Err(RefError::Missing),
        }
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Inner::Message { channel, timestamp } => write!(f, "message:{channel}/{timestamp}"),
            Inner::File(file) => write!(f, "file:{file}"),
            Inner::FileComment(id) => write!(f, "file_comment:{id}"),
        }
    }
}
