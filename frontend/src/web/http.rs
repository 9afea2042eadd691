//! fetch 客户端
//!
//! 使用 `web_sys::fetch` 实现 `HttpClient`，请求体按类型设置 Content-Type：
//! JSON、urlencoded 表单由这里显式设置，multipart 交给浏览器生成 boundary。

use crate::error::{ApiError, ApiResult};
use crate::request::{HttpBody, HttpClient, HttpRequest, HttpResponse, Part};
use js_sys::{Array, Uint8Array};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Headers, Request, RequestInit, Response};

const CONTENT_TYPE: &str = "Content-Type";

fn js_err(context: &str, e: JsValue) -> ApiError {
    ApiError::network(format!("{}: {:?}", context, e))
}

fn encode_err(context: &str, e: JsValue) -> ApiError {
    ApiError::Encode(format!("{}: {:?}", context, e))
}

/// 浏览器 fetch 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

impl FetchHttpClient {
    fn build_form_data(parts: &[Part]) -> ApiResult<FormData> {
        let form = FormData::new().map_err(|e| encode_err("create FormData", e))?;
        for part in parts {
            let name = part.name();
            match part {
                Part::Text { value, .. } => form
                    .append_with_str(name, value)
                    .map_err(|e| encode_err("append field", e))?,
                Part::File { file, .. } => {
                    let chunks = Array::new();
                    chunks.push(&Uint8Array::from(file.bytes.as_slice()));
                    let options = BlobPropertyBag::new();
                    options.set_type(&file.content_type);
                    let blob = Blob::new_with_u8_array_sequence_and_options(&chunks, &options)
                        .map_err(|e| encode_err("create Blob", e))?;
                    form.append_with_blob_and_filename(name, &blob, &file.file_name)
                        .map_err(|e| encode_err("append file", e))?;
                }
            }
        }
        Ok(form)
    }

    async fn read_text(response: &Response) -> ApiResult<String> {
        let promise = response
            .text()
            .map_err(|e| ApiError::decode(format!("{:?}", e)))?;
        let text = JsFuture::from(promise)
            .await
            .map_err(|e| ApiError::decode(format!("{:?}", e)))?;
        text.as_string()
            .ok_or_else(|| ApiError::decode("response body is not text"))
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let headers = Headers::new().map_err(|e| encode_err("create Headers", e))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| encode_err("set header", e))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());

        match &req.body {
            HttpBody::Empty => {}
            HttpBody::Json(text) => {
                headers
                    .set(CONTENT_TYPE, "application/json")
                    .map_err(|e| encode_err("set header", e))?;
                opts.set_body(&JsValue::from_str(text));
            }
            HttpBody::Form(fields) => {
                let encoded = serde_urlencoded::to_string(fields)
                    .map_err(|e| ApiError::Encode(e.to_string()))?;
                headers
                    .set(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .map_err(|e| encode_err("set header", e))?;
                opts.set_body(&JsValue::from_str(&encoded));
            }
            HttpBody::Multipart(parts) => {
                let form = Self::build_form_data(parts)?;
                opts.set_body(&form.into());
            }
        }
        opts.set_headers(&headers.into());

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| encode_err("build request", e))?;

        let window = web_sys::window().ok_or_else(|| ApiError::network("window unavailable"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| js_err("fetch", e))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| ApiError::decode(format!("not a Response: {:?}", e)))?;

        let status = response.status();
        let body = Self::read_text(&response).await?;
        tracing::debug!(request = %req.key(), status, "fetch completed");

        Ok(HttpResponse { status, body })
    }
}
