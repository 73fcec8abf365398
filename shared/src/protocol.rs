use serde::{Deserialize, Serialize};

/// 存储层使用的 HTTP 方法
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

// =========================================================
// 端点定义 (Endpoint definitions)
// =========================================================

pub const ENTITY_BILLS: &str = "bills";
pub const ENTITY_USERS: &str = "users";
pub const PATH_LOGIN: &str = "/auth/login";

pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// `/{entity}` 或 `/{entity}/{selector}`
pub fn entity_path(entity: &str, selector: Option<&str>) -> String {
    match selector {
        Some(id) => format!("/{}/{}", entity, id),
        None => format!("/{}", entity),
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_paths() {
        assert_eq!(entity_path(ENTITY_BILLS, None), "/bills");
        assert_eq!(entity_path(ENTITY_BILLS, Some("abc")), "/bills/abc");
        assert_eq!(entity_path(ENTITY_USERS, Some("u1")), "/users/u1");
    }

    #[test]
    fn test_bearer() {
        assert_eq!(bearer("tok"), "Bearer tok");
    }
}
