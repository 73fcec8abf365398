//! REST 客户端
//!
//! `Api` 针对基础 URL 发出原始请求，`ApiEntity` 将其限定到单个集合
//! （`/bills`、`/users`），容器持有的是 `Store`。

use billed_shared::error::{ErrorBody, StoreError, StoreResult};
use billed_shared::protocol::{
    CONTENT_TYPE_JSON, ENTITY_BILLS, ENTITY_USERS, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE,
    HttpMethod, PATH_LOGIN, bearer, entity_path,
};
use billed_shared::{Bill, LoginRequest, LoginResponse};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::rc::Rc;

use crate::config::AppConfig;
use crate::web::http::{HttpRequest, HttpResponse, HttpTransport, RequestBody};
use crate::web::storage::{KeyValueStorage, read_jwt};

/// 单次请求的请求头开关
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderOptions {
    /// 由浏览器设置 `Content-Type`（multipart 上传）
    pub no_content_type: bool,
    /// 不带 bearer token（登录）
    pub no_authorization: bool,
}

impl HeaderOptions {
    pub fn multipart() -> Self {
        Self {
            no_content_type: true,
            ..Self::default()
        }
    }

    pub fn anonymous() -> Self {
        Self {
            no_authorization: true,
            ..Self::default()
        }
    }
}

/// JSON 内容类型加 bearer 认证，除非被关闭
pub fn build_headers(opts: HeaderOptions, jwt: Option<&str>) -> Vec<(String, String)> {
    let mut headers = Vec::new();
    if !opts.no_content_type {
        headers.push((HEADER_CONTENT_TYPE.to_string(), CONTENT_TYPE_JSON.to_string()));
    }
    if let (Some(token), false) = (jwt, opts.no_authorization) {
        headers.push((HEADER_AUTHORIZATION.to_string(), bearer(token)));
    }
    headers
}

pub fn json_body<T: Serialize>(value: &T) -> StoreResult<RequestBody> {
    serde_json::to_string(value)
        .map(RequestBody::Json)
        .map_err(|e| StoreError::encode(e.to_string()))
}

/// 解析 2xx 响应体，否则把后端的 `{message}` 转为错误
fn json_or_error<T: DeserializeOwned>(response: HttpResponse) -> StoreResult<T> {
    if !response.ok() {
        let message = serde_json::from_str::<ErrorBody>(&response.body)
            .map(|b| b.message)
            .unwrap_or_else(|_| format!("Request failed with status {}", response.status));
        return Err(StoreError::http(response.status, message));
    }

    let body = if response.body.trim().is_empty() {
        "null"
    } else {
        response.body.as_str()
    };
    serde_json::from_str(body).map_err(StoreError::from)
}

// =========================================================
// Api
// =========================================================

#[derive(Clone)]
pub struct Api {
    base_url: String,
    transport: Rc<dyn HttpTransport>,
}

impl Api {
    pub fn new(base_url: impl Into<String>, transport: Rc<dyn HttpTransport>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        headers: Vec<(String, String)>,
        body: Option<RequestBody>,
    ) -> StoreResult<T> {
        let mut req = HttpRequest::new(format!("{}{}", self.base_url, path), method).headers(headers);
        if let Some(body) = body {
            req = req.body(body);
        }

        let response = self
            .transport
            .send(req)
            .await
            .map_err(|e| StoreError::network(e.to_string()))?;
        json_or_error(response)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        headers: Vec<(String, String)>,
    ) -> StoreResult<T> {
        self.request(HttpMethod::Get, path, headers, None).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        data: RequestBody,
        headers: Vec<(String, String)>,
    ) -> StoreResult<T> {
        self.request(HttpMethod::Post, path, headers, Some(data)).await
    }

    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        data: RequestBody,
        headers: Vec<(String, String)>,
    ) -> StoreResult<T> {
        self.request(HttpMethod::Patch, path, headers, Some(data)).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        headers: Vec<(String, String)>,
    ) -> StoreResult<T> {
        self.request(HttpMethod::Delete, path, headers, None).await
    }
}

// =========================================================
// ApiEntity
// =========================================================

/// 限定到单个后端集合的请求
pub struct ApiEntity<'a> {
    key: &'static str,
    api: &'a Api,
    storage: &'a dyn KeyValueStorage,
}

impl ApiEntity<'_> {
    fn headers(&self, opts: HeaderOptions) -> Vec<(String, String)> {
        build_headers(opts, read_jwt(self.storage).as_deref())
    }

    pub async fn select<T: DeserializeOwned>(&self, selector: &str) -> StoreResult<T> {
        self.api
            .get(&entity_path(self.key, Some(selector)), self.headers(HeaderOptions::default()))
            .await
            .map_err(|e| e.in_op_with(format!("{}.select", self.key), selector))
    }

    pub async fn list<T: DeserializeOwned>(&self) -> StoreResult<Vec<T>> {
        self.api
            .get(&entity_path(self.key, None), self.headers(HeaderOptions::default()))
            .await
            .map_err(|e| e.in_op(format!("{}.list", self.key)))
    }

    pub async fn update<T: DeserializeOwned>(
        &self,
        selector: &str,
        data: RequestBody,
        opts: HeaderOptions,
    ) -> StoreResult<T> {
        self.api
            .patch(&entity_path(self.key, Some(selector)), data, self.headers(opts))
            .await
            .map_err(|e| e.in_op_with(format!("{}.update", self.key), selector))
    }

    pub async fn create<T: DeserializeOwned>(
        &self,
        data: RequestBody,
        opts: HeaderOptions,
    ) -> StoreResult<T> {
        self.api
            .post(&entity_path(self.key, None), data, self.headers(opts))
            .await
            .map_err(|e| e.in_op(format!("{}.create", self.key)))
    }

    pub async fn delete<T: DeserializeOwned>(&self, selector: &str) -> StoreResult<T> {
        self.api
            .delete(&entity_path(self.key, Some(selector)), self.headers(HeaderOptions::default()))
            .await
            .map_err(|e| e.in_op_with(format!("{}.delete", self.key), selector))
    }
}

// =========================================================
// Store
// =========================================================

/// 交给容器使用的 REST 客户端
#[derive(Clone)]
pub struct Store {
    api: Api,
    storage: Rc<dyn KeyValueStorage>,
}

impl Store {
    pub fn new(api: Api, storage: Rc<dyn KeyValueStorage>) -> Self {
        Self { api, storage }
    }

    pub fn from_config(
        config: &AppConfig,
        transport: Rc<dyn HttpTransport>,
        storage: Rc<dyn KeyValueStorage>,
    ) -> Self {
        Self::new(Api::new(config.api_url.clone(), transport), storage)
    }

    pub fn bills(&self) -> ApiEntity<'_> {
        ApiEntity {
            key: ENTITY_BILLS,
            api: &self.api,
            storage: self.storage.as_ref(),
        }
    }

    pub fn users(&self) -> ApiEntity<'_> {
        ApiEntity {
            key: ENTITY_USERS,
            api: &self.api,
            storage: self.storage.as_ref(),
        }
    }

    pub async fn bill(&self, id: &str) -> StoreResult<Bill> {
        self.bills().select(id).await
    }

    pub async fn user<T: DeserializeOwned>(&self, id: &str) -> StoreResult<T> {
        self.users().select(id).await
    }

    /// 不带 bearer 头提交登录凭据
    pub async fn login(&self, credentials: &LoginRequest) -> StoreResult<LoginResponse> {
        let headers = build_headers(HeaderOptions::anonymous(), None);
        self.api
            .post(PATH_LOGIN, json_body(credentials)?, headers)
            .await
            .map_err(|e| e.in_op_with("store.login", credentials.email.clone()))
    }
}
