//! 接口协议定义
//!
//! 客户端调用的全部端点集中在 `Endpoint` 中，
//! 路径与方法在这里一次性定义，HTTP 层只负责拼接基础路径。

use serde::{Deserialize, Serialize};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// 请求落到哪一个后端
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// 主 JSON API (`/api/v1`)
    Api,
    /// 管理端桥接后端 (`/d`)
    Bridge,
}

// =========================================================
// Endpoint Definitions
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    About,
    ServicesOffered,
    LatestWork,
    LatestWorkDetail(u64),
    Feedbacks,
    Faqs,
    SendMessage,
    Token,
    UserExists,
    Profile,
    UpdateProfile,
    Measurements,
    UpdateMeasurements,
    Orders,
    OrderDetails(u64),
    CreateOrder,
    UpdateOrder(u64),
    DeleteOrder(u64),
    BridgeLogin,
    BridgeRegister,
}

impl Endpoint {
    pub fn method(&self) -> HttpMethod {
        match self {
            Endpoint::About
            | Endpoint::ServicesOffered
            | Endpoint::LatestWork
            | Endpoint::LatestWorkDetail(_)
            | Endpoint::Feedbacks
            | Endpoint::Faqs
            | Endpoint::UserExists
            | Endpoint::Profile
            | Endpoint::Measurements
            | Endpoint::Orders
            | Endpoint::OrderDetails(_)
            | Endpoint::BridgeLogin => HttpMethod::Get,
            Endpoint::SendMessage
            | Endpoint::Token
            | Endpoint::CreateOrder
            | Endpoint::BridgeRegister => HttpMethod::Post,
            Endpoint::UpdateProfile | Endpoint::UpdateMeasurements | Endpoint::UpdateOrder(_) => {
                HttpMethod::Patch
            }
            Endpoint::DeleteOrder(_) => HttpMethod::Delete,
        }
    }

    pub fn surface(&self) -> Surface {
        match self {
            Endpoint::BridgeLogin | Endpoint::BridgeRegister => Surface::Bridge,
            _ => Surface::Api,
        }
    }

    /// 相对于所属后端基础路径的路径（不含查询串）
    pub fn path(&self) -> String {
        match self {
            Endpoint::About => "/about".into(),
            Endpoint::ServicesOffered => "/services-offered".into(),
            Endpoint::LatestWork => "/latest-work".into(),
            Endpoint::LatestWorkDetail(id) => format!("/latest-work/{}", id),
            Endpoint::Feedbacks => "/feedbacks".into(),
            Endpoint::Faqs => "/faqs".into(),
            Endpoint::SendMessage => "/message".into(),
            Endpoint::Token => "/token".into(),
            Endpoint::UserExists => "/user/exists".into(),
            Endpoint::Profile | Endpoint::UpdateProfile => "/profile".into(),
            Endpoint::Measurements | Endpoint::UpdateMeasurements => "/measurements".into(),
            Endpoint::Orders => "/orders".into(),
            Endpoint::CreateOrder => "/order".into(),
            Endpoint::OrderDetails(id) | Endpoint::UpdateOrder(id) | Endpoint::DeleteOrder(id) => {
                format!("/order/{}", id)
            }
            Endpoint::BridgeLogin => "/user/login".into(),
            Endpoint::BridgeRegister => "/user/create".into(),
        }
    }
}

// =========================================================
// 通用响应体
// =========================================================

/// 后端通用反馈体 `{"detail": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detail<T> {
    pub detail: T,
}

/// 错误响应体 `{"detail": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<ErrorDetail>,
}

/// FastAPI 的 `detail` 可能是字符串，也可能是校验错误数组
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Validation(Vec<ValidationIssue>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    #[serde(default)]
    pub msg: String,
}

impl ErrorDetail {
    pub fn message(&self) -> String {
        match self {
            ErrorDetail::Message(msg) => msg.clone(),
            ErrorDetail::Validation(issues) => issues
                .iter()
                .map(|i| i.msg.as_str())
                .filter(|m| !m.is_empty())
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

/// OAuth2 password grant 响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_paths_share_id_route() {
        assert_eq!(Endpoint::OrderDetails(5).path(), "/order/5");
        assert_eq!(Endpoint::UpdateOrder(5).path(), "/order/5");
        assert_eq!(Endpoint::DeleteOrder(5).method(), HttpMethod::Delete);
        assert_eq!(Endpoint::CreateOrder.path(), "/order");
    }

    #[test]
    fn test_bridge_endpoints() {
        assert_eq!(Endpoint::BridgeLogin.surface(), Surface::Bridge);
        assert_eq!(Endpoint::BridgeRegister.method(), HttpMethod::Post);
        assert_eq!(Endpoint::Profile.surface(), Surface::Api);
    }

    #[test]
    fn test_error_detail_shapes() {
        let plain: ErrorBody = serde_json::from_str(r#"{"detail":"Incorrect password."}"#).unwrap();
        assert_eq!(plain.detail.unwrap().message(), "Incorrect password.");

        let validation: ErrorBody = serde_json::from_str(
            r#"{"detail":[{"loc":["body","quantity"],"msg":"must be positive","type":"x"}]}"#,
        )
        .unwrap();
        assert_eq!(validation.detail.unwrap().message(), "must be positive");

        let empty: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(empty.detail.is_none());
    }
}
