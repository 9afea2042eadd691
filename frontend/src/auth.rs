//! 认证模块
//!
//! 会话对象在 `App` 中显式构造并通过 Context 注入。
//! 路由服务通过注入的阶段信号检查认证状态，与本模块解耦。

use crate::api::{AtelierApi, BrowserApi};
use crate::error::ApiResult;
use crate::request::HttpClient;
use crate::session::TokenStore;
use crate::web::route::AuthStatus;
use atelier_shared::UserProfile;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 会话阶段
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionPhase {
    /// 启动时正在用已保存的 Token 解析用户资料
    #[default]
    Loading,
    Authenticated(UserProfile),
    Anonymous,
}

impl SessionPhase {
    pub fn status(&self) -> AuthStatus {
        match self {
            SessionPhase::Loading => AuthStatus::Loading,
            SessionPhase::Authenticated(_) => AuthStatus::Authenticated,
            SessionPhase::Anonymous => AuthStatus::Anonymous,
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            SessionPhase::Authenticated(profile) => Some(profile),
            _ => None,
        }
    }
}

// =========================================================
// 会话逻辑（与 UI 无关，可测试）
// =========================================================

/// 用已保存的 Token 解析会话
///
/// 没有 Token 时不发请求；解析失败时清除 Token。
/// 结束后不会出现"有 Token 但匿名"的状态。
pub async fn resolve_session<C: HttpClient, S: TokenStore>(
    api: &AtelierApi<C, S>,
) -> SessionPhase {
    if !api.has_token() {
        return SessionPhase::Anonymous;
    }

    match api.profile().await {
        Ok(profile) => {
            tracing::info!(username = %profile.username, "session restored");
            SessionPhase::Authenticated(profile)
        }
        Err(e) => {
            tracing::warn!(status = ?e.status_code(), error = %e, "stored token rejected, signing out");
            api.logout();
            SessionPhase::Anonymous
        }
    }
}

/// 登录并取回用户资料
///
/// 任一步失败都会清除 Token。
pub async fn sign_in<C: HttpClient, S: TokenStore>(
    api: &AtelierApi<C, S>,
    username: &str,
    password: &str,
) -> ApiResult<UserProfile> {
    api.login(username, password).await?;
    match api.profile().await {
        Ok(profile) => Ok(profile),
        Err(e) => {
            api.logout();
            Err(e)
        }
    }
}

// =========================================================
// 会话上下文
// =========================================================

/// 会话上下文
#[derive(Clone, Copy)]
pub struct Session {
    phase: RwSignal<SessionPhase>,
    api: StoredValue<BrowserApi>,
}

impl Session {
    pub fn new(api: BrowserApi) -> Self {
        Self {
            phase: RwSignal::new(SessionPhase::Loading),
            api: StoredValue::new(api),
        }
    }

    /// 启动时恢复会话
    pub fn init(&self) {
        let session = *self;
        spawn_local(async move {
            let api = session.api();
            let phase = resolve_session(&api).await;
            session.phase.set(phase);
        });
    }

    pub async fn login(self, username: String, password: String) -> ApiResult<UserProfile> {
        let api = self.api();
        let result = sign_in(&api, &username, &password).await;
        match &result {
            Ok(profile) => self.phase.set(SessionPhase::Authenticated(profile.clone())),
            Err(_) => self.phase.set(SessionPhase::Anonymous),
        }
        result
    }

    /// 注销：清除 Token，导航由路由服务的阶段监听处理
    pub fn logout(&self) {
        self.api.with_value(|api| api.logout());
        self.phase.set(SessionPhase::Anonymous);
        tracing::info!("logged out");
    }

    pub fn set_profile(&self, profile: UserProfile) {
        self.phase.set(SessionPhase::Authenticated(profile));
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.phase.with(|p| p.profile().cloned())
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase.with(|p| matches!(p, SessionPhase::Authenticated(_)))
    }

    pub fn is_loading(&self) -> bool {
        self.phase.with(|p| matches!(p, SessionPhase::Loading))
    }

    pub fn phase_signal(&self) -> ReadSignal<SessionPhase> {
        self.phase.read_only()
    }

    /// 认证状态信号（用于路由服务注入）
    pub fn status_signal(&self) -> Signal<AuthStatus> {
        let phase = self.phase;
        Signal::derive(move || phase.with(SessionPhase::status))
    }

    pub fn api(&self) -> BrowserApi {
        self.api.get_value()
    }
}

/// 从 Context 获取会话
pub fn use_session() -> Session {
    use_context::<Session>().expect("Session should be provided")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::{profile_json, test_api};
    use crate::session::MemoryTokenStore;
    use atelier_shared::HttpMethod;
    use serde_json::json;

    #[tokio::test]
    async fn test_no_token_resolves_anonymous_without_request() {
        let (api, client) = test_api(MemoryTokenStore::default());

        let phase = resolve_session(&api).await;

        assert_eq!(phase, SessionPhase::Anonymous);
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn test_valid_token_resolves_profile() {
        let (api, client) = test_api(MemoryTokenStore::with_token("abc"));
        client.mock_response(HttpMethod::Get, "/api/v1/profile", 200, profile_json());

        let phase = resolve_session(&api).await;

        assert_eq!(phase.status(), AuthStatus::Authenticated);
        assert_eq!(phase.profile().unwrap().username, "jane");
    }

    #[tokio::test]
    async fn test_rejected_token_is_cleared() {
        let store = MemoryTokenStore::with_token("expired");
        let (api, client) = test_api(store.clone());
        client.mock_response(
            HttpMethod::Get,
            "/api/v1/profile",
            401,
            json!({"detail": "Could not validate credentials"}),
        );

        let phase = resolve_session(&api).await;

        assert_eq!(phase, SessionPhase::Anonymous);
        assert_eq!(store.token(), None);
    }

    #[tokio::test]
    async fn test_unreachable_backend_clears_token() {
        let store = MemoryTokenStore::with_token("abc");
        let (api, client) = test_api(store.clone());
        client.mock_network_error(HttpMethod::Get, "/api/v1/profile");

        assert_eq!(resolve_session(&api).await, SessionPhase::Anonymous);
        assert!(!store.has_token());
    }

    #[tokio::test]
    async fn test_sign_in_profile_failure_clears_token() {
        let store = MemoryTokenStore::default();
        let (api, client) = test_api(store.clone());
        client.mock_response(
            HttpMethod::Post,
            "/api/v1/token",
            200,
            json!({"access_token": "tok", "token_type": "bearer"}),
        );
        client.mock_response(HttpMethod::Get, "/d/user/login?token=tok", 200, json!({}));
        client.mock_response(HttpMethod::Get, "/api/v1/profile", 500, json!({}));

        assert!(sign_in(&api, "jane", "secret123").await.is_err());
        assert_eq!(store.token(), None);
    }

    #[tokio::test]
    async fn test_sign_in_returns_profile() {
        let store = MemoryTokenStore::default();
        let (api, client) = test_api(store.clone());
        client.mock_response(
            HttpMethod::Post,
            "/api/v1/token",
            200,
            json!({"access_token": "tok", "token_type": "bearer"}),
        );
        client.mock_response(HttpMethod::Get, "/d/user/login?token=tok", 200, json!({}));
        client.mock_response(HttpMethod::Get, "/api/v1/profile", 200, profile_json());

        let profile = sign_in(&api, "jane", "secret123").await.unwrap();
        assert_eq!(profile.display_name(), "Jane Doe");
        assert_eq!(store.token().as_deref(), Some("tok"));
    }
}
