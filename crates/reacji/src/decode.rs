//! # Decoding reaction responses
//!
//! `reactions.get` and `reactions.list` describe the same thing (an item and
//! its reactions) in two different shapes, and each gets its own entry point.
//!
//! `reactions.get` wraps a single item in a `message` field:
//!
//! ```text
//! { "ok": true, "message": { "type": "file_comment",
//!                            "file_comment": { "comment": { "reactions": [..] } } } }
//! ```
//!
//! `reactions.list` returns bare items plus a paging cursor:
//!
//! ```text
//! { "ok": true, "items": [ { "type": "file", "file": { "name": "toy", "reactions": [..] } } ],
//!   "paging": { "count": 100, "total": 4, "page": 1, "pages": 1 } }
//! ```
//!
//! In both, the `type` discriminator names a sibling object. Messages and files
//! carry their reactions directly; file comments nest them one level further
//! down, under `comment`. Unknown fields are ignored everywhere.

use reacji_common::ClientResult;
use reacji_common::error::MalformedResponse;
use serde::Deserialize;
use smol_str::SmolStr;

use crate::item::ItemKind;
use crate::model::{
    CommentSummary, FileSummary, MessageSummary, PagingInfo, ReactedItem, ReactedTarget,
    Reaction, ReactionPage,
};

#[derive(Deserialize)]
struct SingleBody {
    #[serde(default)]
    message: Option<RawItem>,
}

#[derive(Deserialize)]
struct ListBody {
    #[serde(default)]
    items: Option<Vec<RawItem>>,
    #[serde(default)]
    paging: Option<PagingInfo>,
}

#[derive(Deserialize)]
struct RawItem {
    #[serde(rename = "type", default)]
    kind: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<RawMessage>,
    #[serde(default)]
    file: Option<RawFile>,
    #[serde(default)]
    file_comment: Option<RawFileComment>,
}

#[derive(Deserialize)]
struct RawMessage {
    #[serde(flatten)]
    summary: MessageSummary,
    #[serde(default)]
    reactions: Option<Vec<Reaction>>,
}

#[derive(Deserialize)]
struct RawFile {
    #[serde(flatten)]
    summary: FileSummary,
    #[serde(default)]
    reactions: Option<Vec<Reaction>>,
}

#[derive(Deserialize)]
struct RawFileComment {
    #[serde(default)]
    comment: Option<RawComment>,
}

#[derive(Deserialize)]
struct RawComment {
    #[serde(flatten)]
    summary: CommentSummary,
    #[serde(default)]
    reactions: Option<Vec<Reaction>>,
}

/// Whether the decoded item should keep its summary.
#[derive(Clone, Copy)]
enum Summaries {
    Keep,
    Drop,
}

impl Summaries {
    fn apply<T>(self, summary: T) -> Option<T> {
        match self {
            Self::Keep => Some(summary),
            Self::Drop => None,
        }
    }
}

fn discriminate(kind: Option<serde_json::Value>) -> Result<ItemKind, MalformedResponse> {
    match kind.ok_or(MalformedResponse::MissingType)? {
        serde_json::Value::String(kind) => kind
            .parse()
            .map_err(|_| MalformedResponse::UnknownType(SmolStr::new(kind))),
        other => Err(MalformedResponse::UnknownType(SmolStr::new(other.to_string()))),
    }
}

fn decode_message(
    raw: Option<RawMessage>,
    summaries: Summaries,
) -> Result<ReactedItem, MalformedResponse> {
    let raw = raw.ok_or(MalformedResponse::MissingObject {
        kind: ItemKind::Message.as_str(),
        object: "message",
    })?;
    Ok(ReactedItem {
        target: ReactedTarget::Message(summaries.apply(raw.summary)),
        reactions: raw.reactions.unwrap_or_default(),
    })
}

fn decode_file(
    raw: Option<RawFile>,
    summaries: Summaries,
) -> Result<ReactedItem, MalformedResponse> {
    let raw = raw.ok_or(MalformedResponse::MissingObject {
        kind: ItemKind::File.as_str(),
        object: "file",
    })?;
    Ok(ReactedItem {
        target: ReactedTarget::File(summaries.apply(raw.summary)),
        reactions: raw.reactions.unwrap_or_default(),
    })
}

fn decode_file_comment(
    raw: Option<RawFileComment>,
    summaries: Summaries,
) -> Result<ReactedItem, MalformedResponse> {
    let comment = raw.and_then(|fc| fc.comment).ok_or(MalformedResponse::MissingObject {
        kind: ItemKind::FileComment.as_str(),
        object: "file_comment.comment",
    })?;
    Ok(ReactedItem {
        target: ReactedTarget::FileComment(summaries.apply(comment.summary)),
        reactions: comment.reactions.unwrap_or_default(),
    })
}

fn decode_item(raw: RawItem, summaries: Summaries) -> Result<ReactedItem, MalformedResponse> {
    match discriminate(raw.kind)? {
        ItemKind::Message => decode_message(raw.message, summaries),
        ItemKind::File => decode_file(raw.file, summaries),
        ItemKind::FileComment => decode_file_comment(raw.file_comment, summaries),
    }
}

/// Decode a `reactions.get` body.
///
/// The returned item has its kind set but no summary; the single-item shape
/// does not carry one at this depth.
pub fn decode_single(body: &[u8]) -> ClientResult<ReactedItem> {
    let body: SingleBody = serde_json::from_slice(body)?;
    let wrapper = body
        .message
        .ok_or(MalformedResponse::MissingField("message"))?;
    let item = decode_item(wrapper, Summaries::Drop).inspect_err(|_e| {
        #[cfg(feature = "tracing")]
        tracing::warn!(error = %_e, "malformed reactions.get response");
    })?;
    Ok(item)
}

/// Decode a `reactions.list` body.
///
/// Items keep array order. Any malformed item fails the whole page.
pub fn decode_list(body: &[u8]) -> ClientResult<ReactionPage> {
    let body: ListBody = serde_json::from_slice(body)?;
    let raw_items = body
        .items
        .ok_or(MalformedResponse::MissingField("items"))?;

    let items = raw_items
        .into_iter()
        .map(|raw| decode_item(raw, Summaries::Keep))
        .collect::<Result<Vec<_>, _>>()
        .inspect_err(|_e| {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_e, "malformed reactions.list response");
        })?;

    Ok(ReactionPage {
        items,
        paging: body.paging,
    })
}
