//! 并发加载页面数据
//!
//! 每个接口独立成败：一个失败不影响其他结果的展示。

use crate::api::AtelierApi;
use crate::error::{ApiError, ApiResult};
use crate::request::HttpClient;
use crate::session::TokenStore;
use atelier_shared::{
    BusinessAbout, Faq, ServiceOffered, ShallowCompletedOrder, ShallowOrder, UserFeedback,
    UserMeasurements, UserProfile,
};

pub const LOAD_FAILED: &str = "Failed to load data";

/// 记录失败并转为 `Option`
fn keep<T>(
    section: &'static str,
    result: ApiResult<T>,
    failures: &mut Vec<(&'static str, ApiError)>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(section, error = %e, "section failed to load");
            failures.push((section, e));
            None
        }
    }
}

// =========================================================
// 首页
// =========================================================

#[derive(Debug, Clone, Default)]
pub struct HomeContent {
    pub about: Option<BusinessAbout>,
    pub services: Option<Vec<ServiceOffered>>,
    pub latest_work: Option<Vec<ShallowCompletedOrder>>,
    pub feedbacks: Option<Vec<UserFeedback>>,
    pub faqs: Option<Vec<Faq>>,
    pub failures: Vec<(&'static str, ApiError)>,
}

pub async fn load_home<C: HttpClient, S: TokenStore>(api: &AtelierApi<C, S>) -> HomeContent {
    let (about, services, latest_work, feedbacks, faqs) = futures::join!(
        api.business_info(),
        api.services_offered(),
        api.latest_work(),
        api.feedbacks(),
        api.faqs(),
    );

    let mut failures = Vec::new();
    HomeContent {
        about: keep("about", about, &mut failures),
        services: keep("services", services, &mut failures),
        latest_work: keep("latest_work", latest_work, &mut failures),
        feedbacks: keep("feedbacks", feedbacks, &mut failures),
        faqs: keep("faqs", faqs, &mut failures),
        failures,
    }
}

// =========================================================
// 控制面板
// =========================================================

#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub profile: Option<UserProfile>,
    pub measurements: Option<UserMeasurements>,
    pub orders: Option<Vec<ShallowOrder>>,
    pub services: Option<Vec<ServiceOffered>>,
    pub failures: Vec<(&'static str, ApiError)>,
}

impl DashboardData {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

pub async fn load_dashboard<C: HttpClient, S: TokenStore>(
    api: &AtelierApi<C, S>,
) -> DashboardData {
    let (profile, measurements, orders, services) = futures::join!(
        api.profile(),
        api.measurements(),
        api.orders(),
        api.services_offered(),
    );

    let mut failures = Vec::new();
    DashboardData {
        profile: keep("profile", profile, &mut failures),
        measurements: keep("measurements", measurements, &mut failures),
        orders: keep("orders", orders, &mut failures),
        services: keep("services", services, &mut failures),
        failures,
    }
}

// =========================================================
// 页脚
// =========================================================

#[derive(Debug, Clone, Default)]
pub struct FooterContent {
    pub about: Option<BusinessAbout>,
    pub services: Vec<ServiceOffered>,
}

/// 页脚数据失败只记录日志
pub async fn load_footer<C: HttpClient, S: TokenStore>(api: &AtelierApi<C, S>) -> FooterContent {
    let (about, services) = futures::join!(api.business_info(), api.services_offered());
    let mut failures = Vec::new();
    FooterContent {
        about: keep("footer_about", about, &mut failures),
        services: keep("footer_services", services, &mut failures).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::{order_json, profile_json, test_api};
    use crate::session::MemoryTokenStore;
    use atelier_shared::HttpMethod;
    use serde_json::json;

    fn mock_public_content(client: &crate::request::MockHttpClient) {
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
                "founded_in": "2015",
                "facebook": "https://facebook.com/atelier"
            }),
        );
        client.mock_response(
            HttpMethod::Get,
            "/api/v1/services-offered",
            200,
            json!([{
                "name": "Suit",
                "description": "Two-piece suit",
                "picture": "/media/suit.png",
                "starting_price": 8000.0,
                "ending_price": 15000.0
            }]),
        );
        client.mock_response(
            HttpMethod::Get,
            "/api/v1/latest-work",
            200,
            json!([{"id": 1, "picture": "/media/work1.png"}]),
        );
        client.mock_response(
            HttpMethod::Get,
            "/api/v1/feedbacks",
            200,
            json!([{
                "id": 1,
                "message": "Perfect fit",
                "rate": "Excellent",
                "created_at": "2024-01-01T00:00:00",
                "updated_at": "2024-01-01T00:00:00",
                "user": {"first_name": "Amina", "last_name": null, "role": "Customer", "profile": null}
            }]),
        );
    }

    #[tokio::test]
    async fn test_home_partial_render_when_one_fails() {
        let (api, client) = test_api(MemoryTokenStore::default());
        mock_public_content(&client);
        client.mock_network_error(HttpMethod::Get, "/api/v1/faqs");

        let content = load_home(&api).await;

        assert!(content.about.is_some());
        assert_eq!(content.services.as_ref().map(Vec::len), Some(1));
        assert_eq!(content.latest_work.as_ref().map(Vec::len), Some(1));
        assert_eq!(content.feedbacks.as_ref().map(Vec::len), Some(1));
        assert!(content.faqs.is_none());
        assert_eq!(content.failures.len(), 1);
        assert_eq!(content.failures[0].0, "faqs");
        assert_eq!(client.request_count(), 5);
    }

    #[tokio::test]
    async fn test_dashboard_profile_failure_keeps_orders() {
        let (api, client) = test_api(MemoryTokenStore::with_token("abc"));
        client.mock_response(HttpMethod::Get, "/api/v1/profile", 500, json!({}));
        client.mock_response(
            HttpMethod::Get,
            "/api/v1/measurements",
            200,
            json!({"chest": 96.0, "waist": 80.0}),
        );
        let mut shallow = order_json(4, "X", "Silk");
        shallow.as_object_mut().unwrap().retain(|k, _| {
            ["id", "service_name", "quantity", "charges", "status"].contains(&k.as_str())
        });
        client.mock_response(HttpMethod::Get, "/api/v1/orders", 200, json!([shallow]));
        client.mock_response(HttpMethod::Get, "/api/v1/services-offered", 200, json!([]));

        let data = load_dashboard(&api).await;

        assert!(data.profile.is_none());
        assert_eq!(data.orders.as_ref().map(Vec::len), Some(1));
        assert_eq!(data.measurements.as_ref().map(|m| m.hips), Some(0.0));
        assert!(data.has_failures());
    }

    #[tokio::test]
    async fn test_dashboard_complete_load() {
        let (api, client) = test_api(MemoryTokenStore::with_token("abc"));
        client.mock_response(HttpMethod::Get, "/api/v1/profile", 200, profile_json());
        client.mock_response(HttpMethod::Get, "/api/v1/measurements", 200, json!({}));
        client.mock_response(HttpMethod::Get, "/api/v1/orders", 200, json!([]));
        client.mock_response(HttpMethod::Get, "/api/v1/services-offered", 200, json!([]));

        let data = load_dashboard(&api).await;

        assert!(!data.has_failures());
        assert_eq!(data.profile.unwrap().username, "jane");
    }

    #[tokio::test]
    async fn test_footer_ignores_failures() {
        let (api, client) = test_api(MemoryTokenStore::default());
        client.mock_network_error(HttpMethod::Get, "/api/v1/about");
        client.mock_response(HttpMethod::Get, "/api/v1/services-offered", 200, json!([]));

        let footer = load_footer(&api).await;

        assert!(footer.about.is_none());
        assert!(footer.services.is_empty());
    }
}
