//! 会话存储
//!
//! 组件不直接读写存储键，统一经由 `SessionStore`。

use crate::web::KeyValueStore;

const TOKEN_KEY: &str = "token";
const USERNAME_KEY: &str = "username";

/// 已登录会话
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub username: String,
}

#[derive(Debug, Clone, Default)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// 读取会话，没有 token 即视为未登录
    pub fn load(&self) -> Option<Session> {
        let token = self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty())?;
        let username = self.storage.get(USERNAME_KEY).unwrap_or_default();
        Some(Session { token, username })
    }

    pub fn token(&self) -> Option<String> {
        self.load().map(|session| session.token)
    }

    /// 写入会话，返回是否全部写入成功
    pub fn save(&self, session: &Session) -> bool {
        let saved = self.storage.set(TOKEN_KEY, &session.token)
            & self.storage.set(USERNAME_KEY, &session.username);
        if !saved {
            tracing::warn!(username = %session.username, "failed to persist session");
        }
        saved
    }

    /// 清空会话，返回是否全部删除成功
    pub fn clear(&self) -> bool {
        let cleared = self.storage.delete(TOKEN_KEY) & self.storage.delete(USERNAME_KEY);
        if !cleared {
            tracing::warn!("failed to clear session");
        }
        cleared
    }
}
