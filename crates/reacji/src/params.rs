//! Per-method parameter objects and their wire encoding.
//!
//! Optional arguments follow the Web API's "omit means default" convention:
//! a zero `count`/`page` or a false `full` is left out of the encoded
//! parameters entirely rather than sent as `0`/`false`.

use reacji_common::{ClientResult, Params};
use smol_str::{SmolStr, ToSmolStr};

use crate::decode;
use crate::item::ItemRef;
use crate::model::{ReactedItem, Reaction, ReactionPage};
use crate::request::ReactionRequest;

/// Wire parameter names.
pub mod keys {
    /// Reaction (emoji) name
    pub const NAME: &str = "name";
    /// Channel ID of a message reference
    pub const CHANNEL: &str = "channel";
    /// Timestamp of a message reference
    pub const TIMESTAMP: &str = "timestamp";
    /// File ID
    pub const FILE: &str = "file";
    /// File comment ID
    pub const FILE_COMMENT: &str = "file_comment";
    /// Ask for the complete reaction list
    pub const FULL: &str = "full";
    /// User whose reactions to list
    pub const USER: &str = "user";
    /// Page size
    pub const COUNT: &str = "count";
    /// Page number
    pub const PAGE: &str = "page";
}

/// Encode `item` on top of the operation-specific `extra` parameters.
pub fn encode(item: &ItemRef, mut extra: Params) -> Params {
    item.write_params(&mut extra);
    extra
}

fn insert_flag(params: &mut Params, key: &'static str, value: bool) {
    if value {
        params.insert(SmolStr::new_static(key), SmolStr::new_static("true"));
    }
}

fn insert_number(params: &mut Params, key: &'static str, value: u32) {
    if value != 0 {
        params.insert(SmolStr::new_static(key), value.to_smolstr());
    }
}

fn named(name: &SmolStr) -> Params {
    Params::from([(SmolStr::new_static(keys::NAME), name.clone())])
}

/// Arguments for `reactions.add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddReactionParams {
    /// Emoji name, without colons
    pub name: SmolStr,
    /// Item to react to
    pub item: ItemRef,
}

impl AddReactionParams {
    /// React to `item` with `name`.
    pub fn new(name: impl Into<SmolStr>, item: ItemRef) -> Self {
        Self {
            name: name.into(),
            item,
        }
    }
}

impl ReactionRequest for AddReactionParams {
    const ENDPOINT: &'static str = "reactions.add";
    type Output = ();

    fn to_params(&self) -> Params {
        encode(&self.item, named(&self.name))
    }

    fn decode_output(_body: &[u8]) -> ClientResult<()> {
        Ok(())
    }
}

/// Arguments for `reactions.remove`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveReactionParams {
    /// Emoji name, without colons
    pub name: SmolStr,
    /// Item to remove the reaction from
    pub item: ItemRef,
}

impl RemoveReactionParams {
    /// Remove reaction `name` from `item`.
    pub fn new(name: impl Into<SmolStr>, item: ItemRef) -> Self {
        Self {
            name: name.into(),
            item,
        }
    }
}

impl ReactionRequest for RemoveReactionParams {
    const ENDPOINT: &'static str = "reactions.remove";
    type Output = ();

    fn to_params(&self) -> Params {
        encode(&self.item, named(&self.name))
    }

    fn decode_output(_body: &[u8]) -> ClientResult<()> {
        Ok(())
    }
}

/// Arguments for `reactions.get`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetReactionParams {
    /// Item whose reactions to fetch
    pub item: ItemRef,
    /// Return the complete reaction list even when it is long
    pub full: bool,
}

impl GetReactionParams {
    /// Fetch the reactions on `item`.
    pub fn new(item: ItemRef) -> Self {
        Self { item, full: false }
    }

    /// Set `full`.
    pub fn full(mut self, full: bool) -> Self {
        self.full = full;
        self
    }
}

impl ReactionRequest for GetReactionParams {
    const ENDPOINT: &'static str = "reactions.get";
    type Output = Vec<Reaction>;

    fn to_params(&self) -> Params {
        let mut extra = Params::new();
        insert_flag(&mut extra, keys::FULL, self.full);
        encode(&self.item, extra)
    }

    fn decode_output(body: &[u8]) -> ClientResult<Vec<Reaction>> {
        decode::decode_single(body).map(ReactedItem::into_reactions)
    }
}

/// Arguments for `reactions.list`.
///
/// Lists the items a user has reacted to; there is no item reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListReactionParams {
    /// User to list reactions for. Empty means the calling user.
    pub user: SmolStr,
    /// Items per page, 0 for the server default
    pub count: u32,
    /// Page number, 0 for the first page
    pub page: u32,
    /// Return complete reaction lists
    pub full: bool,
}

impl ListReactionParams {
    /// List reactions made by `user`.
    pub fn new(user: impl Into<SmolStr>) -> Self {
        Self {
            user: user.into(),
            ..Default::default()
        }
    }

    /// Set the page size.
    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Set the page number.
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Set `full`.
    pub fn full(mut self, full: bool) -> Self {
        self.full = full;
        self
    }
}

impl ReactionRequest for ListReactionParams {
    const ENDPOINT: &'static str = "reactions.list";
    type Output = ReactionPage;

    fn to_params(&self) -> Params {
        let mut params = Params::new();
        if !self.user.is_empty() {
            params.insert(SmolStr::new_static(keys::USER), self.user.clone());
        }
        insert_number(&mut params, keys::COUNT, self.count);
        insert_number(&mut params, keys::PAGE, self.page);
        insert_flag(&mut params, keys::FULL, self.full);
        params
    }

    fn decode_output(body: &[u8]) -> ClientResult<ReactionPage> {
        decode::decode_list(body)
    }
}
