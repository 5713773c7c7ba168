//! Form bodies sent by the client. Field names are part of the wire
//! contract with the backend.

use serde::Serialize;
use serde_with::{serde_as, DisplayFromStr};

#[derive(Serialize, Debug)]
pub struct AddItemForm<'a> {
    pub item_name: &'a str,
}

#[derive(Serialize, Debug)]
pub struct RemoveItemForm<'a> {
    pub item_id: &'a str,
}

/// `checked` always goes out as the literal string `true` or `false`.
#[serde_as]
#[derive(Serialize, Debug)]
pub struct CheckItemForm<'a> {
    pub item_id: &'a str,
    #[serde_as(as = "DisplayFromStr")]
    pub checked: bool,
}
