use std::{cell::RefCell, collections::HashMap, rc::Rc};

use web_sys::{Storage, Window};

pub fn window() -> Result<Window, String> {
    web_sys::window().ok_or_else(|| "No window object".to_string())
}

pub fn session_storage() -> Result<Storage, String> {
    window()?
        .session_storage()
        .map_err(|_| "No sessionStorage".to_string())?
        .ok_or_else(|| "No sessionStorage".to_string())
}

/// Key/value storage scoped to a single browser tab.
pub trait TabStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove_item(&self, key: &str);
}

/// `window.sessionStorage`. Every call re-resolves the storage handle, so a
/// missing window degrades to "nothing stored".
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSessionStorage;

impl TabStorage for BrowserSessionStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        session_storage()
            .ok()
            .and_then(|storage| storage.get_item(key).ok().flatten())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        session_storage()?
            .set_item(key, value)
            .map_err(|_| format!("Failed to write {key} to sessionStorage"))
    }

    fn remove_item(&self, key: &str) {
        if let Ok(storage) = session_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// In-memory storage. Clones share the same map, which lets a test drop a
/// store and initialize a new one over the same contents to simulate a reload.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

impl TabStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.raw(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}
