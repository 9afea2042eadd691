//! Bearer Token 的持久化
//!
//! 浏览器中保存在 LocalStorage，测试中保存在内存。

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

pub trait TokenStore: Clone {
    fn token(&self) -> Option<String>;
    fn set_token(&self, token: &str);
    fn clear_token(&self);

    fn has_token(&self) -> bool {
        self.token().is_some_and(|t| !t.is_empty())
    }
}

// =========================================================
// 实现层: LocalStorage
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct BrowserTokenStore {
    key: String,
}

impl BrowserTokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// 隐私模式或非浏览器环境下为 `None`
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl TokenStore for BrowserTokenStore {
    fn token(&self) -> Option<String> {
        Self::storage()?.get_item(&self.key).ok()?
    }

    fn set_token(&self, token: &str) {
        let stored = Self::storage().and_then(|s| s.set_item(&self.key, token).ok());
        if stored.is_none() {
            tracing::warn!(key = %self.key, "failed to persist token");
        }
    }

    fn clear_token(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(&self.key);
        }
    }
}

// =========================================================
// 测试工具: MemoryTokenStore
// =========================================================

#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore(Rc<RefCell<Option<String>>>);

#[cfg(test)]
impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self(Rc::new(RefCell::new(Some(token.to_string()))))
    }
}

#[cfg(test)]
impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.0.borrow().clone()
    }

    fn set_token(&self, token: &str) {
        *self.0.borrow_mut() = Some(token.to_string());
    }

    fn clear_token(&self) {
        *self.0.borrow_mut() = None;
    }
}
