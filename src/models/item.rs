use serde::{Deserialize, Serialize};

/// An item as persisted by the store.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StoredItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub list_id: String,
    pub name: String,
    #[serde(default)]
    pub details: String,
    pub checked: bool,
}

/// An item as returned by `/api/list`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GroceryItem {
    pub id: String,
    pub name: String,
    pub details: String,
    pub checked: bool,
}

impl From<&StoredItem> for GroceryItem {
    fn from(item: &StoredItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            details: item.details.clone(),
            checked: item.checked,
        }
    }
}
