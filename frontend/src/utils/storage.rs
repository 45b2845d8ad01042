//! Persistent client storage. Browser `localStorage` on wasm; an in-memory
//! map on the host so the same call sites work in SSR tests.

#[cfg(target_arch = "wasm32")]
mod backend {
    use web_sys::{Storage, Window};

    fn window() -> Result<Window, String> {
        web_sys::window().ok_or_else(|| "No window object".to_string())
    }

    fn local_storage() -> Result<Storage, String> {
        window()?
            .local_storage()
            .map_err(|_| "No localStorage".to_string())?
            .ok_or_else(|| "No localStorage".to_string())
    }

    pub fn get_item(key: &str) -> Option<String> {
        local_storage().ok()?.get_item(key).ok().flatten()
    }

    pub fn set_item(key: &str, value: &str) -> Result<(), String> {
        local_storage()?
            .set_item(key, value)
            .map_err(|_| format!("Failed to persist {key}"))
    }

    pub fn remove_item(key: &str) {
        if let Ok(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use std::cell::RefCell;
    use std::collections::HashMap;

    thread_local! {
        static STORE: RefCell<HashMap<String, String>> = RefCell::new(HashMap::new());
    }

    pub fn get_item(key: &str) -> Option<String> {
        STORE.with(|store| store.borrow().get(key).cloned())
    }

    pub fn set_item(key: &str, value: &str) -> Result<(), String> {
        STORE.with(|store| {
            store.borrow_mut().insert(key.to_string(), value.to_string());
        });
        Ok(())
    }

    pub fn remove_item(key: &str) {
        STORE.with(|store| {
            store.borrow_mut().remove(key);
        });
    }
}

pub fn get_item(key: &str) -> Option<String> {
    backend::get_item(key)
}

pub fn set_item(key: &str, value: &str) -> Result<(), String> {
    backend::set_item(key, value)
}

pub fn remove_item(key: &str) {
    backend::remove_item(key)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove_round_trip() {
        set_item("storage-test", "value").unwrap();
        assert_eq!(get_item("storage-test").as_deref(), Some("value"));
        remove_item("storage-test");
        assert!(get_item("storage-test").is_none());
    }
}
