//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 发送请求。`HttpTransport` 是 store 与浏览器之间的接缝，
//! 测试中由 `MockTransport` 替代。

use async_trait::async_trait;
use billed_shared::protocol::HttpMethod;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, FormData, Headers, Request, RequestInit, Response};

#[cfg(test)]
use std::cell::RefCell;

/// HTTP 错误类型
#[derive(Debug, Clone, PartialEq)]
pub enum HttpError {
    /// 请求构建失败
    RequestBuildFailed(String),
    /// 网络请求失败
    NetworkError(String),
    /// 响应解析失败
    ResponseParseFailed(String),
}

impl core::fmt::Display for HttpError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HttpError::RequestBuildFailed(msg) => write!(f, "request build failed: {}", msg),
            HttpError::NetworkError(msg) => write!(f, "network error: {}", msg),
            HttpError::ResponseParseFailed(msg) => write!(f, "response parse failed: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

// =========================================================
// 请求模型 (Request model)
// =========================================================

/// 用户所选文件的原始内容
#[derive(Debug, Clone)]
pub enum FileData {
    Browser(web_sys::File),
    Bytes(Vec<u8>),
}

#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub data: FileData,
}

#[derive(Debug, Clone)]
pub enum FormValue {
    Text(String),
    File(UploadFile),
}

#[derive(Debug, Clone)]
pub enum RequestBody {
    Json(String),
    Multipart(Vec<(String, FormValue)>),
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    pub fn new(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    /// 添加请求头
    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// 设置请求体
    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }
}

/// HTTP 响应封装
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 检查响应是否成功 (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError>;
}

// =========================================================
// 实现层: fetch
// =========================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

fn build_form(parts: &[(String, FormValue)]) -> Result<FormData, HttpError> {
    let form = FormData::new()
        .map_err(|e| HttpError::RequestBuildFailed(format!("FormData: {:?}", e)))?;

    for (name, value) in parts {
        let appended = match value {
            FormValue::Text(text) => form.append_with_str(name, text),
            FormValue::File(file) => match &file.data {
                FileData::Browser(handle) => {
                    form.append_with_blob_and_filename(name, handle, &file.name)
                }
                FileData::Bytes(bytes) => {
                    let array = js_sys::Uint8Array::from(bytes.as_slice());
                    let blob = Blob::new_with_u8_array_sequence(&js_sys::Array::of1(&array))
                        .map_err(|e| HttpError::RequestBuildFailed(format!("Blob: {:?}", e)))?;
                    form.append_with_blob_and_filename(name, &blob, &file.name)
                }
            },
        };
        appended.map_err(|e| HttpError::RequestBuildFailed(format!("field {}: {:?}", name, e)))?;
    }
    Ok(form)
}

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let headers = Headers::new()
            .map_err(|e| HttpError::RequestBuildFailed(format!("Headers: {:?}", e)))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| HttpError::RequestBuildFailed(format!("header {}: {:?}", key, e)))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        match &req.body {
            Some(RequestBody::Json(text)) => opts.set_body(&JsValue::from_str(text)),
            Some(RequestBody::Multipart(parts)) => opts.set_body(&build_form(parts)?.into()),
            None => {}
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| HttpError::RequestBuildFailed(format!("{:?}", e)))?;

        let window = web_sys::window()
            .ok_or_else(|| HttpError::NetworkError("window unavailable".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| HttpError::NetworkError(format!("{:?}", e)))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| HttpError::ResponseParseFailed(format!("not a Response: {:?}", e)))?;

        let promise = response
            .text()
            .map_err(|e| HttpError::ResponseParseFailed(format!("{:?}", e)))?;
        let text = JsFuture::from(promise)
            .await
            .map_err(|e| HttpError::ResponseParseFailed(format!("{:?}", e)))?;

        Ok(HttpResponse {
            status: response.status(),
            body: text.as_string().unwrap_or_default(),
        })
    }
}

// =========================================================
// 测试工具: MockTransport
// =========================================================

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// JSON 请求体（如有）
    pub json: Option<String>,
    /// 按顺序排列的 multipart 字段名
    pub form_fields: Vec<String>,
}

#[cfg(test)]
impl RecordedRequest {
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MockTransport {
    // ("METHOD url", (status, body) 队列)；最后一项会重复使用
    responses: RefCell<Vec<(String, Vec<(u16, String)>)>>,
    pub requests: RefCell<Vec<RecordedRequest>>,
    offline: std::cell::Cell<bool>,
}

#[cfg(test)]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn route(method: HttpMethod, url: &str) -> String {
        format!("{} {}", method.as_str(), url)
    }

    pub fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: &str) {
        let route = Self::route(method, url);
        let mut responses = self.responses.borrow_mut();
        match responses.iter_mut().find(|(r, _)| *r == route) {
            Some((_, queue)) => queue.push((status, body.to_string())),
            None => responses.push((route, vec![(status, body.to_string())])),
        }
    }

    pub fn mock_json(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
        self.mock_response(method, url, status, &body.to_string());
    }

    /// 所有请求都在网络层失败
    pub fn go_offline(&self) {
        self.offline.set(true);
    }

    pub fn requests_to(&self, method: HttpMethod, url: &str) -> Vec<RecordedRequest> {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let (json, form_fields) = match &req.body {
            Some(RequestBody::Json(text)) => (Some(text.clone()), Vec::new()),
            Some(RequestBody::Multipart(parts)) => {
                (None, parts.iter().map(|(name, _)| name.clone()).collect())
            }
            None => (None, Vec::new()),
        };
        self.requests.borrow_mut().push(RecordedRequest {
            method: req.method,
            url: req.url.clone(),
            headers: req.headers.clone(),
            json,
            form_fields,
        });

        if self.offline.get() {
            return Err(HttpError::NetworkError("Failed to fetch".to_string()));
        }

        let route = Self::route(req.method, &req.url);
        let mut responses = self.responses.borrow_mut();
        let reply = responses
            .iter_mut()
            .find(|(r, _)| *r == route)
            .map(|(_, queue)| {
                if queue.len() > 1 {
                    queue.remove(0)
                } else {
                    queue[0].clone()
                }
            });

        Ok(match reply {
            Some((status, body)) => HttpResponse { status, body },
            None => HttpResponse {
                status: 404,
                body: r#"{"message":"Not Found"}"#.to_string(),
            },
        })
    }
}
