use serde::{Deserialize, Serialize};

use super::item::GroceryItem;

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StoredList {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// The body of `GET /api/list`: one list with every item in it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GroceryList {
    pub id: String,
    pub name: String,
    pub items: Vec<GroceryItem>,
}
