//! 读取 `<input type="file">` 选中的文件

use crate::error::{ApiError, ApiResult};
use crate::request::UploadFile;
use js_sys::Uint8Array;
use wasm_bindgen_futures::JsFuture;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// 取出 input 中第一个文件
pub fn first_file(input: &web_sys::HtmlInputElement) -> Option<web_sys::File> {
    input.files()?.get(0)
}

/// 把浏览器 File 读入内存
pub async fn read_upload(file: &web_sys::File) -> ApiResult<UploadFile> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ApiError::Encode(format!("read file: {:?}", e)))?;
    let bytes = Uint8Array::new(&buffer).to_vec();

    let content_type = match file.type_() {
        t if t.is_empty() => FALLBACK_CONTENT_TYPE.to_string(),
        t => t,
    };

    Ok(UploadFile {
        file_name: file.name(),
        content_type,
        bytes,
    })
}
