//! Decoded reaction data handed back to callers.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::item::ItemKind;

/// One emoji reaction on an item.
///
/// `users` is in server order and may be shorter than `count` unless the
/// request asked for `full` results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    /// Emoji name, without colons
    pub name: SmolStr,
    /// Number of users who reacted
    #[serde(default)]
    pub count: u32,
    /// Users who reacted
    #[serde(default)]
    pub users: Vec<SmolStr>,
}

/// The parts of a message that `reactions.list` projects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSummary {
    /// Message text
    #[serde(default)]
    pub text: SmolStr,
    /// Message timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<SmolStr>,
    /// Author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<SmolStr>,
}

/// The parts of a file that `reactions.list` projects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
    /// File ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SmolStr>,
    /// File name
    #[serde(default)]
    pub name: SmolStr,
    /// Display title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<SmolStr>,
}

/// The parts of a file comment that `reactions.list` projects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentSummary {
    /// Comment ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SmolStr>,
    /// Comment text
    #[serde(default)]
    pub comment: SmolStr,
    /// Author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<SmolStr>,
}

/// What a [`ReactedItem`] is, with its summary when the response carried one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "summary", rename_all = "snake_case")]
pub enum ReactedTarget {
    /// A message
    Message(Option<MessageSummary>),
    /// A file
    File(Option<FileSummary>),
    /// A file comment
    FileComment(Option<CommentSummary>),
}

impl ReactedTarget {
    /// The kind of item
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Message(_) => ItemKind::Message,
            Self::File(_) => ItemKind::File,
            Self::FileComment(_) => ItemKind::FileComment,
        }
    }
}

/// An item together with the reactions attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactedItem {
    /// The item
    #[serde(flatten)]
    pub target: ReactedTarget,
    /// Reactions, in server order
    pub reactions: Vec<Reaction>,
}

impl ReactedItem {
    /// The kind of item
    pub fn kind(&self) -> ItemKind {
        self.target.kind()
    }

    /// Message summary, if this is a message and one was decoded
    pub fn message(&self) -> Option<&MessageSummary> {
        match &self.target {
            ReactedTarget::Message(summary) => summary.as_ref(),
            _ => None,
        }
    }

    /// File summary, if this is a file and one was decoded
    pub fn file(&self) -> Option<&FileSummary> {
        match &self.target {
            ReactedTarget::File(summary) => summary.as_ref(),
            _ => None,
        }
    }

    /// Comment summary, if this is a file comment and one was decoded
    pub fn comment(&self) -> Option<&CommentSummary> {
        match &self.target {
            ReactedTarget::FileComment(summary) => summary.as_ref(),
            _ => None,
        }
    }

    /// Drop the item and keep its reactions.
    pub fn into_reactions(self) -> Vec<Reaction> {
        self.reactions
    }
}

/// Pagination cursor reported by `reactions.list`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingInfo {
    /// Page size
    #[serde(default)]
    pub count: u32,
    /// Total number of items
    #[serde(default)]
    pub total: u32,
    /// Current page, 1-based
    #[serde(default)]
    pub page: u32,
    /// Number of pages
    #[serde(default)]
    pub pages: u32,
}

impl PagingInfo {
    /// Whether there are pages after this one
    pub fn has_more(&self) -> bool {
        self.page < self.pages
    }
}

/// One page of `reactions.list` results.
///
/// `paging` is `None` when the response had no `paging` object at all, which
/// is distinct from one that was present with every field zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReactionPage {
    /// Reacted items, in server order
    pub items: Vec<ReactedItem>,
    /// Pagination, if the server sent it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paging: Option<PagingInfo>,
}

impl ReactionPage {
    /// Split into items and paging.
    pub fn into_parts(self) -> (Vec<ReactedItem>, Option<PagingInfo>) {
        (self.items, self.paging)
    }
}
