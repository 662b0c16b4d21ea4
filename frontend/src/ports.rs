//! Seams between the wheel logic and the browser.
//!
//! The browser adapters live in [`crate::web`]; the in-memory versions here
//! back the tests and anything that runs outside a page.

use std::cell::RefCell;
use std::collections::HashMap;

pub trait StoragePort {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// The address bar: one query string plus the page origin.
pub trait LinkPort {
    fn query_param(&self, name: &str) -> Option<String>;
    /// Replaces the whole query string with `name=value`, without a new
    /// history entry.
    fn set_query_param(&self, name: &str, value: &str);
    fn clear_query(&self);
    fn origin(&self) -> String;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.set_item(key, value);
        storage
    }
}

impl StoragePort for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

#[derive(Debug)]
pub struct MemoryLink {
    origin: String,
    query: RefCell<Option<(String, String)>>,
}

impl MemoryLink {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            query: RefCell::new(None),
        }
    }

    pub fn with_query(origin: impl Into<String>, name: &str, value: &str) -> Self {
        let link = Self::new(origin);
        link.set_query_param(name, value);
        link
    }

    /// The query string as the address bar would show it.
    pub fn search(&self) -> String {
        match &*self.query.borrow() {
            Some((name, value)) => format!("?{}={}", name, value),
            None => String::new(),
        }
    }
}

impl LinkPort for MemoryLink {
    fn query_param(&self, name: &str) -> Option<String> {
        match &*self.query.borrow() {
            Some((key, value)) if key == name => Some(value.clone()),
            _ => None,
        }
    }

    fn set_query_param(&self, name: &str, value: &str) {
        *self.query.borrow_mut() = Some((name.to_string(), value.to_string()));
    }

    fn clear_query(&self) {
        *self.query.borrow_mut() = None;
    }

    fn origin(&self) -> String {
        self.origin.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::with_item("a", "1");
        assert_eq!(storage.get_item("a").as_deref(), Some("1"));
        storage.remove_item("a");
        assert_eq!(storage.get_item("a"), None);
    }

    #[test]
    fn test_memory_link_holds_one_query() {
        let link = MemoryLink::with_query("https://wheel.test", "wheels", "abc");
        assert_eq!(link.query_param("wheels").as_deref(), Some("abc"));
        assert_eq!(link.query_param("other"), None);
        assert_eq!(link.search(), "?wheels=abc");
        link.clear_query();
        assert_eq!(link.search(), "");
    }
}
