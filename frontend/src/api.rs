//! 后端 API 门面
//!
//! 每个方法对应一个后端操作，除登录外都只发一次请求。
//! 主 API 的所有请求在持有 Token 时都会带上 `Authorization: Bearer`，
//! 公开接口也不例外；桥接后端不带。

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::request::{HttpClient, HttpRequest, HttpResponse, Part};
use crate::session::{BrowserTokenStore, TokenStore};
use crate::web::FetchHttpClient;
use atelier_shared::{
    BusinessAbout, CompletedOrderDetail, ContactMessage, Detail, Endpoint, Faq,
    HEADER_AUTHORIZATION, MeasurementsUpdate, OrderDetails, ProfileUpdate, RegisterForm,
    ServiceOffered, ShallowCompletedOrder, ShallowOrder, Surface, TokenResponse,
    UserFeedback, UserMeasurements, UserProfile,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// 浏览器中实际使用的 API 类型
pub type BrowserApi = AtelierApi<FetchHttpClient, BrowserTokenStore>;

#[derive(Clone)]
pub struct AtelierApi<C, S> {
    http: C,
    store: S,
    config: Arc<AppConfig>,
}

impl BrowserApi {
    pub fn browser(config: AppConfig) -> Self {
        let store = BrowserTokenStore::new(config.token_key.clone());
        Self::new(FetchHttpClient, store, config)
    }
}

impl<C: HttpClient, S: TokenStore> AtelierApi<C, S> {
    pub fn new(http: C, store: S, config: AppConfig) -> Self {
        Self {
            http,
            store,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn has_token(&self) -> bool {
        self.store.has_token()
    }

    // =========================================================
    // 内部工具
    // =========================================================

    fn url(&self, endpoint: Endpoint) -> String {
        let base = match endpoint.surface() {
            Surface::Api => &self.config.api_base,
            Surface::Bridge => &self.config.bridge_base,
        };
        format!("{}{}", base, endpoint.path())
    }

    fn url_with_query(&self, endpoint: Endpoint, query: &[(&str, &str)]) -> ApiResult<String> {
        let encoded =
            serde_urlencoded::to_string(query).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(format!("{}?{}", self.url(endpoint), encoded))
    }

    fn request(&self, endpoint: Endpoint) -> HttpRequest {
        HttpRequest::new(&self.url(endpoint), endpoint.method())
    }

    /// 主 API 请求附加 Bearer Token
    fn authorize(&self, req: HttpRequest, endpoint: Endpoint) -> HttpRequest {
        if endpoint.surface() != Surface::Api {
            return req;
        }
        match self.store.token().filter(|t| !t.is_empty()) {
            Some(token) => req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token)),
            None => req,
        }
    }

    async fn execute(&self, endpoint: Endpoint, req: HttpRequest) -> ApiResult<HttpResponse> {
        let req = self.authorize(req, endpoint);
        let response = self.http.send(req).await?;
        if !response.ok() {
            tracing::debug!(path = %endpoint.path(), status = response.status, "request rejected");
        }
        response.into_result()
    }

    async fn fetch<T: DeserializeOwned>(&self, endpoint: Endpoint) -> ApiResult<T> {
        self.execute(endpoint, self.request(endpoint)).await?.json()
    }

    // =========================================================
    // 首页内容
    // =========================================================

    pub async fn business_info(&self) -> ApiResult<BusinessAbout> {
        let about: BusinessAbout = self.fetch(Endpoint::About).await?;
        Ok(about.with_default_hours())
    }

    pub async fn services_offered(&self) -> ApiResult<Vec<ServiceOffered>> {
        self.fetch(Endpoint::ServicesOffered).await
    }

    pub async fn latest_work(&self) -> ApiResult<Vec<ShallowCompletedOrder>> {
        self.fetch(Endpoint::LatestWork).await
    }

    pub async fn latest_work_detail(&self, id: u64) -> ApiResult<CompletedOrderDetail> {
        self.fetch(Endpoint::LatestWorkDetail(id)).await
    }

    pub async fn feedbacks(&self) -> ApiResult<Vec<UserFeedback>> {
        self.fetch(Endpoint::Feedbacks).await
    }

    pub async fn faqs(&self) -> ApiResult<Vec<Faq>> {
        self.fetch(Endpoint::Faqs).await
    }

    /// 发送联系消息，返回后端的反馈文案
    pub async fn send_message(&self, message: &ContactMessage) -> ApiResult<String> {
        let endpoint = Endpoint::SendMessage;
        let req = self.request(endpoint).with_json(message)?;
        let body: Detail<String> = self.execute(endpoint, req).await?.json()?;
        Ok(body.detail)
    }

    // =========================================================
    // 认证
    // =========================================================

    async fn request_token(&self, username: &str, password: &str) -> ApiResult<TokenResponse> {
        let endpoint = Endpoint::Token;
        let req = self.request(endpoint).with_form(vec![
            ("username".to_string(), username.to_string()),
            ("password".to_string(), password.to_string()),
            ("grant_type".to_string(), "password".to_string()),
        ]);
        self.execute(endpoint, req).await?.json()
    }

    async fn bridge_login(&self, token: &str) -> ApiResult<()> {
        let endpoint = Endpoint::BridgeLogin;
        let url = self.url_with_query(endpoint, &[("token", token)])?;
        let req = HttpRequest::new(&url, endpoint.method());
        self.execute(endpoint, req).await?;
        Ok(())
    }

    /// 登录：取 Token → 保存 → 桥接登录
    ///
    /// 桥接登录失败时清除已保存的 Token，返回 `ApiError::BridgeLogin`。
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<TokenResponse> {
        let token = self.request_token(username, password).await?;
        if token.access_token.is_empty() {
            return Err(ApiError::decode("empty access token"));
        }
        self.store.set_token(&token.access_token);

        if let Err(e) = self.bridge_login(&token.access_token).await {
            self.store.clear_token();
            tracing::warn!(error = %e, "bridge login failed, token discarded");
            return Err(ApiError::BridgeLogin(Box::new(e)));
        }

        tracing::info!(username, "logged in");
        Ok(token)
    }

    /// 在桥接后端创建账号
    pub async fn register(&self, form: &RegisterForm) -> ApiResult<()> {
        let endpoint = Endpoint::BridgeRegister;
        let parts = form
            .fields()
            .into_iter()
            .map(|(name, value)| Part::text(name, value))
            .collect();
        let req = self.request(endpoint).with_parts(parts);
        self.execute(endpoint, req).await?;
        Ok(())
    }

    /// 用户名是否已存在
    pub async fn check_username(&self, username: &str) -> ApiResult<bool> {
        let endpoint = Endpoint::UserExists;
        let url = self.url_with_query(endpoint, &[("username", username)])?;
        let req = HttpRequest::new(&url, endpoint.method());
        let body: Detail<bool> = self.execute(endpoint, req).await?.json()?;
        Ok(body.detail)
    }

    pub fn logout(&self) {
        self.store.clear_token();
    }

    // =========================================================
    // 用户资料与尺寸
    // =========================================================

    pub async fn profile(&self) -> ApiResult<UserProfile> {
        self.fetch(Endpoint::Profile).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<UserProfile> {
        let endpoint = Endpoint::UpdateProfile;
        let req = self.request(endpoint).with_json(update)?;
        self.execute(endpoint, req).await?.json()
    }

    pub async fn measurements(&self) -> ApiResult<UserMeasurements> {
        self.fetch(Endpoint::Measurements).await
    }

    pub async fn update_measurements(
        &self,
        update: &MeasurementsUpdate,
    ) -> ApiResult<UserMeasurements> {
        let endpoint = Endpoint::UpdateMeasurements;
        let req = self.request(endpoint).with_json(update)?;
        self.execute(endpoint, req).await?.json()
    }

    // =========================================================
    // 订单
    // =========================================================

    pub async fn orders(&self) -> ApiResult<Vec<ShallowOrder>> {
        self.fetch(Endpoint::Orders).await
    }

    pub async fn order_details(&self, id: u64) -> ApiResult<OrderDetails> {
        self.fetch(Endpoint::OrderDetails(id)).await
    }

    pub async fn create_order(&self, parts: Vec<Part>) -> ApiResult<OrderDetails> {
        let endpoint = Endpoint::CreateOrder;
        let req = self.request(endpoint).with_parts(parts);
        self.execute(endpoint, req).await?.json()
    }

    pub async fn update_order(&self, id: u64, parts: Vec<Part>) -> ApiResult<OrderDetails> {
        let endpoint = Endpoint::UpdateOrder(id);
        let req = self.request(endpoint).with_parts(parts);
        self.execute(endpoint, req).await?.json()
    }

    /// 删除订单（仅 Pending 状态可删），成功响应体不解析
    pub async fn delete_order(&self, id: u64) -> ApiResult<()> {
        let endpoint = Endpoint::DeleteOrder(id);
        self.execute(endpoint, self.request(endpoint)).await?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::request::{HttpBody, MockHttpClient};
    use crate::session::MemoryTokenStore;
    use atelier_shared::HttpMethod;
    use serde_json::json;
    use std::rc::Rc;

    pub(crate) type TestApi = AtelierApi<Rc<MockHttpClient>, MemoryTokenStore>;

    pub(crate) fn test_api(store: MemoryTokenStore) -> (TestApi, Rc<MockHttpClient>) {
        let client = Rc::new(MockHttpClient::new());
        let api = AtelierApi::new(client.clone(), store, AppConfig::default());
        (api, client)
    }

    pub(crate) fn profile_json() -> serde_json::Value {
        json!({
            "first_name": "Jane",
            "last_name": "Doe",
            "phone_number": "+254700000000",
            "email": "jane@example.com",
            "location": "Nairobi",
            "username": "jane",
            "date_of_birth": "1990-01-01",
            "gender": "F",
            "profile": null,
            "is_staff": false,
            "date_joined": "2023-01-01T00:00:00"
        })
    }

    pub(crate) fn order_json(id: u64, details: &str, material: &str) -> serde_json::Value {
        json!({
            "id": id,
            "service_name": "Suit",
            "quantity": 1,
            "charges": null,
            "status": "Pending",
            "picture": null,
            "details": details,
            "material_type": material,
            "fabric_required": true,
            "reference_image": null,
            "colors": "Navy",
            "urgency": "High",
            "charges_paid": 0.0,
            "created_at": "2024-05-01T10:00:00",
            "updated_at": "2024-05-01T10:00:00"
        })
    }

    #[tokio::test]
    async fn test_bearer_attached_to_public_endpoint_when_token_exists() {
        let (api, client) = test_api(MemoryTokenStore::with_token("abc"));
        client.mock_response(HttpMethod::Get, "/api/v1/faqs", 200, json!([]));

        api.faqs().await.unwrap();

        let req = client.last_request().unwrap();
        assert_eq!(
            req.headers.get(HEADER_AUTHORIZATION).map(String::as_str),
            Some("Bearer abc")
        );
    }

    #[tokio::test]
    async fn test_no_bearer_without_token() {
        let (api, client) = test_api(MemoryTokenStore::default());
        client.mock_response(HttpMethod::Get, "/api/v1/faqs", 200, json!([]));

        api.faqs().await.unwrap();

        assert!(client.last_request().unwrap().headers.is_empty());
    }

    #[tokio::test]
    async fn test_login_saga_success() {
        let store = MemoryTokenStore::default();
        let (api, client) = test_api(store.clone());
        client.mock_response(
            HttpMethod::Post,
            "/api/v1/token",
            200,
            json!({"access_token": "tok", "token_type": "bearer"}),
        );
        client.mock_response(HttpMethod::Get, "/d/user/login?token=tok", 200, json!({}));

        let token = api.login("jane", "secret123").await.unwrap();

        assert_eq!(token.access_token, "tok");
        assert_eq!(store.token().as_deref(), Some("tok"));
        assert_eq!(
            client.request_keys(),
            vec!["POST /api/v1/token", "GET /d/user/login?token=tok"]
        );

        let requests = client.requests.borrow();
        match &requests[0].body {
            HttpBody::Form(fields) => {
                assert!(fields.contains(&("grant_type".to_string(), "password".to_string())));
                assert!(fields.contains(&("username".to_string(), "jane".to_string())));
            }
            other => panic!("unexpected body: {:?}", other),
        }
        // 桥接请求不带 Bearer
        assert!(!requests[1].headers.contains_key(HEADER_AUTHORIZATION));
    }

    #[tokio::test]
    async fn test_bridge_failure_leaves_no_token() {
        let store = MemoryTokenStore::default();
        let (api, client) = test_api(store.clone());
        client.mock_response(
            HttpMethod::Post,
            "/api/v1/token",
            200,
            json!({"access_token": "tok", "token_type": "bearer"}),
        );
        client.mock_network_error(HttpMethod::Get, "/d/user/login?token=tok");

        let err = api.login("jane", "secret123").await.unwrap_err();

        assert!(matches!(err, ApiError::BridgeLogin(_)));
        assert_eq!(store.token(), None);
        // 不会发出额外的回滚请求
        assert_eq!(client.request_count(), 2);
    }

    #[tokio::test]
    async fn test_login_rejected_credentials() {
        let store = MemoryTokenStore::default();
        let (api, client) = test_api(store.clone());
        client.mock_response(
            HttpMethod::Post,
            "/api/v1/token",
            401,
            json!({"detail": "Incorrect password."}),
        );

        let err = api.login("jane", "wrong").await.unwrap_err();

        assert_eq!(err.user_message("Login failed"), "Incorrect password.");
        assert_eq!(store.token(), None);
        assert_eq!(client.request_count(), 1);
    }

    #[tokio::test]
    async fn test_check_username_encodes_query() {
        let (api, client) = test_api(MemoryTokenStore::default());
        client.mock_response(
            HttpMethod::Get,
            "/api/v1/user/exists?username=jane+doe",
            200,
            json!({"detail": true}),
        );

        assert!(api.check_username("jane doe").await.unwrap());
    }

    #[tokio::test]
    async fn test_business_info_defaults_hours() {
        let (api, client) = test_api(MemoryTokenStore::default());
        client.mock_response(
            HttpMethod::Get,
            "/api/v1/about",
            200,
            json!({
                "name": "Atelier Tailors",
                "short_name": "Atelier",
                "details": "Bespoke tailoring",
                "slogan": "Made to measure",
                "address": "Nairobi",
                "founded_in": "2015"
            }),
        );

        let about = api.business_info().await.unwrap();
        assert_eq!(
            about.business_hours.as_deref(),
            Some(atelier_shared::DEFAULT_BUSINESS_HOURS)
        );
    }

    #[tokio::test]
    async fn test_register_sends_multipart_to_bridge() {
        let (api, client) = test_api(MemoryTokenStore::default());
        client.mock_response(HttpMethod::Post, "/d/user/create", 200, json!({}));

        let form = RegisterForm {
            username: "jane".into(),
            password: "tailor-made".into(),
            ..Default::default()
        };
        api.register(&form).await.unwrap();

        let req = client.last_request().unwrap();
        match req.body {
            HttpBody::Multipart(parts) => {
                assert_eq!(parts.len(), 9);
                assert!(parts.contains(&Part::text("username", "jane")));
            }
            other => panic!("unexpected body: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_profile_update_returns_new_profile() {
        let (api, client) = test_api(MemoryTokenStore::with_token("abc"));
        client.mock_response(HttpMethod::Patch, "/api/v1/profile", 200, profile_json());

        let update = ProfileUpdate {
            location: Some("Mombasa".into()),
            ..Default::default()
        };
        let profile = api.update_profile(&update).await.unwrap();
        assert_eq!(profile.username, "jane");

        match client.last_request().unwrap().body {
            HttpBody::Json(text) => assert_eq!(text, r#"{"location":"Mombasa"}"#),
            other => panic!("unexpected body: {:?}", other),
        }
    }
}
