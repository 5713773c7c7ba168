use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::item::{GroceryItem, StoredItem};
use crate::models::list::{GroceryList, StoredList};

/// File-backed store scoped to one named list.
pub struct Database {
    list: StoredList,
    list_collection: Arc<Mutex<Collection<StoredList>>>,
    item_collection: Arc<Mutex<Collection<StoredItem>>>,
}

impl Database {
    /// Opens the collections under `dir` and selects the list called
    /// `list_name`, creating it if the store has none by that name.
    pub fn open(dir: impl AsRef<Path>, list_name: &str) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let mut lists: Collection<StoredList> = Collection::open("list", dir)?;
        let items: Collection<StoredItem> = Collection::open("item", dir)?;

        let list = match lists.find_one(|model| model.name == list_name) {
            Some(list) => list.clone(),
            None => {
                let list = StoredList {
                    id: Uuid::new_v4().to_string(),
                    name: list_name.to_string(),
                };
                lists.append(list.clone())?;
                info!("created list {:?} ({})", list.name, list.id);
                list
            }
        };

        Ok(Self {
            list,
            list_collection: Arc::new(Mutex::new(lists)),
            item_collection: Arc::new(Mutex::new(items)),
        })
    }

    pub fn list_id(&self) -> &str {
        &self.list.id
    }

    /// Snapshot of the selected list and its items in insertion order.
    pub fn list(&self) -> GroceryList {
        let items = lock(&self.item_collection);
        GroceryList {
            id: self.list.id.clone(),
            name: self.list.name.clone(),
            items: items
                .find(|model| model.list_id == self.list.id)
                .into_iter()
                .map(GroceryItem::from)
                .collect(),
        }
    }

    pub fn add_item(&self, name: String) -> Result<StoredItem, StoreError> {
        let item = StoredItem {
            id: Uuid::new_v4().to_string(),
            list_id: self.list.id.clone(),
            name,
            details: String::new(),
            checked: false,
        };
        lock(&self.item_collection).append(item.clone())?;
        Ok(item)
    }

    /// Returns `None` when the list holds no item with this id.
    pub fn remove_item(&self, id: &str) -> Result<Option<StoredItem>, StoreError> {
        lock(&self.item_collection)
            .delete_one(|model| model.id == id && model.list_id == self.list.id)
    }

    /// Returns `None` when the list holds no item with this id.
    pub fn set_checked(&self, id: &str, checked: bool) -> Result<Option<StoredItem>, StoreError> {
        lock(&self.item_collection).patch_one(
            |model| model.id == id && model.list_id == self.list.id,
            |model| model.checked = checked,
        )
    }

    /// Names of every list in the store, including the selected one.
    pub fn list_names(&self) -> Vec<String> {
        lock(&self.list_collection)
            .get_all()
            .iter()
            .map(|model| model.name.clone())
            .collect()
    }
}

// A panic while holding the lock leaves the in-memory data as it was after
// the last completed save, so the guard is still usable.
fn lock<T>(collection: &Mutex<T>) -> MutexGuard<'_, T> {
    collection.lock().unwrap_or_else(PoisonError::into_inner)
}

fn read_data<T>(path: &Path) -> Result<T, StoreError>
where
    T: DeserializeOwned,
{
    let mut file = fs::File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(serde_json::from_str(&contents)?)
}

fn write_data<T>(path: &Path, data: &T) -> Result<(), StoreError>
where
    T: Serialize,
{
    let serialized_data = serde_json::to_string_pretty(data)?;
    let tmp_path = tmp_path(path);
    let written = fs::File::create(&tmp_path)
        .and_then(|mut file| {
            file.write_all(serialized_data.as_bytes())?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&tmp_path, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}

// Sibling of `path` that a save writes to before renaming it into place.
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[derive(Clone, Serialize, Deserialize)]
struct DataContainer<T> {
    count: usize,
    data: Vec<T>,
}

impl<T> Default for DataContainer<T> {
    fn default() -> Self {
        Self {
            count: 0,
            data: Vec::new(),
        }
    }
}

/// One JSON file holding every record of a type. Each mutation rewrites the
/// whole file before returning.
pub struct Collection<T> {
    path: PathBuf,
    data_container: DataContainer<T>,
}

impl<T> Collection<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    pub fn open(name: &str, directory: &Path) -> Result<Self, StoreError> {
        let path = directory.join(format!("{}.json", name));
        let data_container = match read_data(&path) {
            Ok(data_container) => data_container,
            Err(StoreError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                debug!("{} does not exist yet, starting empty", path.display());
                DataContainer::default()
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            path,
            data_container,
        })
    }

    // Writes `data` to disk and only then makes it the in-memory state, so a
    // failed save leaves the collection as it was.
    fn commit(&mut self, data: Vec<T>) -> Result<(), StoreError> {
        let data_container = DataContainer {
            count: data.len(),
            data,
        };
        write_data(&self.path, &data_container)?;
        self.data_container = data_container;
        Ok(())
    }

    pub fn find_one<F>(&self, predicate: F) -> Option<&T>
    where
        F: Fn(&T) -> bool,
    {
        self.data_container
            .data
            .iter()
            .find(|&data| predicate(data))
    }

    pub fn find<F>(&self, predicate: F) -> Vec<&T>
    where
        F: Fn(&T) -> bool,
    {
        self.data_container
            .data
            .iter()
            .filter(|&data| predicate(data))
            .collect()
    }

    pub fn get_all(&self) -> &[T] {
        &self.data_container.data
    }

    pub fn append(&mut self, data: T) -> Result<(), StoreError> {
        let mut next = self.data_container.data.clone();
        next.push(data);
        self.commit(next)
    }

    pub fn delete_one<F>(&mut self, predicate: F) -> Result<Option<T>, StoreError>
    where
        F: Fn(&T) -> bool,
    {
        let Some(index) = self
            .data_container
            .data
            .iter()
            .position(|data| predicate(data))
        else {
            return Ok(None);
        };
        let mut next = self.data_container.data.clone();
        let data = next.remove(index);
        self.commit(next)?;
        Ok(Some(data))
    }

    pub fn patch_one<F, G>(&mut self, predicate: F, update_fn: G) -> Result<Option<T>, StoreError>
    where
        F: Fn(&T) -> bool,
        G: FnOnce(&mut T),
    {
        let Some(index) = self
            .data_container
            .data
            .iter()
            .position(|data| predicate(data))
        else {
            return Ok(None);
        };
        let mut next = self.data_container.data.clone();
        update_fn(&mut next[index]);
        let patched = next[index].clone();
        self.commit(next)?;
        Ok(Some(patched))
    }
}
