//! LocalStorage 封装模块
//!
//! `KeyValueStorage` 抽象浏览器存储，使存储层和容器在测试中
//! 可以使用 `MemoryStorage`。

use billed_shared::SessionUser;

use crate::config::{STORAGE_JWT_KEY, STORAGE_USER_KEY};

pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn delete(&self, key: &str) -> bool;
    fn clear(&self) -> bool;
}

/// 本地存储操作封装
///
/// 访问浏览器 LocalStorage API；任何失败都表现为 `None`/`false`。
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStorage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    fn delete(&self, key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }

    fn clear(&self) -> bool {
        Self::storage().and_then(|s| s.clear().ok()).is_some()
    }
}

/// 浏览器之外使用的内存存储
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: std::cell::RefCell<std::collections::HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.items.borrow_mut().remove(key);
        true
    }

    fn clear(&self) -> bool {
        self.items.borrow_mut().clear();
        true
    }
}

// =========================================================
// 会话记录 (Session records)
// =========================================================

/// 读取已登录用户；记录损坏时视为未登录
pub fn read_user(storage: &dyn KeyValueStorage) -> Option<SessionUser> {
    let raw = storage.get(STORAGE_USER_KEY)?;
    serde_json::from_str(&raw).ok()
}

pub fn write_user(storage: &dyn KeyValueStorage, user: &SessionUser) -> bool {
    match serde_json::to_string(user) {
        Ok(raw) => storage.set(STORAGE_USER_KEY, &raw),
        Err(_) => false,
    }
}

pub fn read_jwt(storage: &dyn KeyValueStorage) -> Option<String> {
    storage.get(STORAGE_JWT_KEY).filter(|t| !t.is_empty())
}

pub fn write_jwt(storage: &dyn KeyValueStorage, token: &str) -> bool {
    storage.set(STORAGE_JWT_KEY, token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use billed_shared::UserType;

    #[test]
    fn test_user_round_trip() {
        let storage = MemoryStorage::new();
        assert!(read_user(&storage).is_none());

        let user = SessionUser::connected(
            UserType::Employee,
            "employee@test.tld".to_string(),
            "employee".to_string(),
        );
        assert!(write_user(&storage, &user));
        assert_eq!(read_user(&storage), Some(user));
    }

    #[test]
    fn test_malformed_user_is_signed_out() {
        let storage = MemoryStorage::new();
        storage.set(STORAGE_USER_KEY, "{not json");
        assert!(read_user(&storage).is_none());
    }

    #[test]
    fn test_empty_jwt_is_ignored() {
        let storage = MemoryStorage::new();
        storage.set(STORAGE_JWT_KEY, "");
        assert!(read_jwt(&storage).is_none());
        write_jwt(&storage, "token");
        assert_eq!(read_jwt(&storage).as_deref(), Some("token"));
        storage.clear();
        assert!(read_jwt(&storage).is_none());
    }
}
