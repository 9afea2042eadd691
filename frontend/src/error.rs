//! 前端错误类型
//!
//! 所有错误都只作用于触发它的那一次用户操作，不会导致应用崩溃。

use thiserror::Error;

/// API 调用错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// 网络层失败（fetch 被拒绝、无法获取 window 等）
    #[error("network error: {0}")]
    Network(String),

    /// 后端返回非 2xx，`detail` 取自响应体
    #[error("HTTP {status}: {}", .detail.as_deref().unwrap_or("request failed"))]
    Http { status: u16, detail: Option<String> },

    /// 响应体无法解析
    #[error("invalid response: {0}")]
    Decode(String),

    /// 请求体无法构建
    #[error("invalid request: {0}")]
    Encode(String),

    /// 取得 Token 后桥接登录失败（Token 已被回滚）
    #[error("bridge login failed: {0}")]
    BridgeLogin(Box<ApiError>),

    /// 客户端表单校验失败
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn http(status: u16, detail: Option<String>) -> Self {
        Self::Http { status, detail }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// HTTP 状态码（仅 `Http` 错误有）
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::BridgeLogin(inner) => inner.status_code(),
            _ => None,
        }
    }

    /// 可直接展示给用户的消息
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Http { detail, .. } => detail.as_deref(),
            ApiError::BridgeLogin(inner) => inner.detail(),
            ApiError::Validation(message) => Some(message),
            _ => None,
        }
    }

    /// 有 `detail` 用 `detail`，否则用调用方给出的兜底文案
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_detail() {
        let err = ApiError::http(401, Some("Incorrect password.".into()));
        assert_eq!(err.user_message("Login failed"), "Incorrect password.");
        assert_eq!(err.status_code(), Some(401));
    }

    #[test]
    fn test_user_message_fallback() {
        assert_eq!(ApiError::network("offline").user_message("Failed"), "Failed");
        assert_eq!(ApiError::http(500, Some(" ".into())).user_message("Failed"), "Failed");
    }

    #[test]
    fn test_bridge_login_exposes_inner() {
        let err = ApiError::BridgeLogin(Box::new(ApiError::http(502, Some("down".into()))));
        assert_eq!(err.status_code(), Some(502));
        assert_eq!(err.detail(), Some("down"));
        assert_eq!(err.to_string(), "bridge login failed: HTTP 502: down");
    }
}
