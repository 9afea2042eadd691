use crate::error::{ApiError, ApiResult};
use atelier_shared::{ErrorBody, HttpMethod};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::rc::Rc;

#[cfg(test)]
use std::cell::RefCell;

// =========================================================
// 请求体 (Request Bodies)
// =========================================================

/// 待上传的文件（已读入内存）
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// multipart 表单的一个字段
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text { name: String, value: String },
    File { name: String, file: UploadFile },
}

impl Part {
    pub fn text(name: &str, value: impl Into<String>) -> Self {
        Part::Text {
            name: name.to_string(),
            value: value.into(),
        }
    }

    pub fn file(name: &str, file: UploadFile) -> Self {
        Part::File {
            name: name.to_string(),
            file,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Part::Text { name, .. } | Part::File { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum HttpBody {
    #[default]
    Empty,
    Json(String),
    /// `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
    Multipart(Vec<Part>),
}

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: HttpBody,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: HttpBody::Empty,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_json<T: Serialize>(mut self, body: &T) -> ApiResult<Self> {
        let text = serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = HttpBody::Json(text);
        Ok(self)
    }

    pub fn with_form(mut self, fields: Vec<(String, String)>) -> Self {
        self.body = HttpBody::Form(fields);
        self
    }

    pub fn with_parts(mut self, parts: Vec<Part>) -> Self {
        self.body = HttpBody::Multipart(parts);
        self
    }

    /// 请求键：`METHOD url`
    pub fn key(&self) -> String {
        format!("{} {}", self.method.as_str(), self.url)
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::decode(e.to_string()))
    }

    /// 从错误响应体中提取 `detail`，解析不了就返回 None
    pub fn error_detail(&self) -> Option<String> {
        serde_json::from_str::<ErrorBody>(&self.body)
            .ok()
            .and_then(|b| b.detail)
            .map(|d| d.message())
            .filter(|m| !m.is_empty())
    }

    /// 非 2xx 转为 `ApiError::Http`
    pub fn into_result(self) -> ApiResult<Self> {
        if self.ok() {
            Ok(self)
        } else {
            let detail = self.error_detail();
            Err(ApiError::http(self.status, detail))
        }
    }
}

#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse>;
}

#[async_trait::async_trait(?Send)]
impl<C: HttpClient + ?Sized> HttpClient for Rc<C> {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        (**self).send(req).await
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
pub struct MockHttpClient {
    // ("METHOD url", (Status, Response Body))
    responses: RefCell<HashMap<String, (u16, String)>>,
    // 这些请求直接返回网络错误
    unreachable: RefCell<Vec<String>>,
    pub requests: RefCell<Vec<HttpRequest>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            unreachable: RefCell::new(Vec::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
        self.responses.borrow_mut().insert(
            format!("{} {}", method.as_str(), url),
            (status, body.to_string()),
        );
    }

    pub fn mock_network_error(&self, method: HttpMethod, url: &str) {
        self.unreachable
            .borrow_mut()
            .push(format!("{} {}", method.as_str(), url));
    }

    /// 已发出请求的键列表
    pub fn request_keys(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.key()).collect()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let key = req.key();
        self.requests.borrow_mut().push(req);

        if self.unreachable.borrow().contains(&key) {
            return Err(ApiError::network("connection refused"));
        }

        let responses = self.responses.borrow();
        if let Some((status, body)) = responses.get(&key) {
            Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            })
        } else {
            Ok(HttpResponse {
                status: 404,
                body: r#"{"detail":"Not Found"}"#.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_into_result_extracts_detail() {
        let err = response(401, r#"{"detail":"Incorrect password."}"#)
            .into_result()
            .unwrap_err();
        assert_eq!(err, ApiError::http(401, Some("Incorrect password.".into())));
    }

    #[test]
    fn test_into_result_without_body() {
        let err = response(500, "Internal Server Error").into_result().unwrap_err();
        assert_eq!(err, ApiError::http(500, None));
    }

    #[test]
    fn test_validation_detail_is_joined() {
        let resp = response(
            422,
            r#"{"detail":[{"msg":"field required"},{"msg":"value is not a valid integer"}]}"#,
        );
        assert_eq!(
            resp.error_detail().as_deref(),
            Some("field required; value is not a valid integer")
        );
    }

    #[tokio::test]
    async fn test_mock_records_requests() {
        let client = MockHttpClient::new();
        client.mock_response(HttpMethod::Get, "/api/v1/faqs", 200, serde_json::json!([]));
        client.mock_network_error(HttpMethod::Get, "/api/v1/about");

        let ok = client
            .send(HttpRequest::new("/api/v1/faqs", HttpMethod::Get))
            .await
            .unwrap();
        assert!(ok.ok());

        let err = client
            .send(HttpRequest::new("/api/v1/about", HttpMethod::Get))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert_eq!(
            client.request_keys(),
            vec!["GET /api/v1/faqs", "GET /api/v1/about"]
        );
    }

    #[test]
    fn test_multipart_field_names() {
        let image = UploadFile {
            file_name: "sketch.png".into(),
            content_type: "image/png".into(),
            bytes: vec![1, 2, 3],
        };
        let req = HttpRequest::new("/api/v1/order/create", HttpMethod::Post)
            .with_parts(vec![Part::text("details", "Slim fit"), Part::file("reference_image", image)]);

        assert_eq!(req.key(), "POST /api/v1/order/create");
        let HttpBody::Multipart(parts) = &req.body else {
            panic!("expected multipart body");
        };
        let names: Vec<&str> = parts.iter().map(Part::name).collect();
        assert_eq!(names, vec!["details", "reference_image"]);
    }
}
