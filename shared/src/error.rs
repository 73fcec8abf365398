use std::fmt;

use serde::{Deserialize, Serialize};

// =========================================================
// 错误类型枚举
// =========================================================

/// 存储调用的失败类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreErrorKind {
    /// fetch 本身失败（离线、CORS、URL 错误）
    Network,
    /// 后端返回非 2xx 状态
    Http(u16),
    /// 2xx 响应体无法解码为期望类型
    Decode,
    /// 请求体无法序列化
    Encode,
}

impl StoreErrorKind {
    /// 日志和错误视图中使用的类 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            StoreErrorKind::Http(code) => *code,
            StoreErrorKind::Encode => 400,
            StoreErrorKind::Decode => 502,
            StoreErrorKind::Network => 503,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StoreErrorKind::Network => "NETWORK_ERROR",
            StoreErrorKind::Http(_) => "HTTP_ERROR",
            StoreErrorKind::Decode => "JSON_PARSE_ERROR",
            StoreErrorKind::Encode => "JSON_ENCODE_ERROR",
        }
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 附加在错误上的一步操作轨迹
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSpan {
    /// 例如 "bills.list"、"store.login"
    pub operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 所有存储调用返回的错误
///
/// `message` 是展示给用户的内容；HTTP 失败时即后端返回的
/// `message` 字段原文。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub kind: StoreErrorKind,
    pub message: String,
    spans: Vec<ErrorSpan>,
}

impl StoreError {
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            spans: Vec::new(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Network, message)
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Http(status), message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Decode, message)
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Encode, message)
    }

    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for StoreError {}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::decode(e.to_string())
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// 后端在非 2xx 响应中返回的错误体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_trace() {
        let err = StoreError::http(404, "Erreur 404")
            .in_op("bills.list")
            .in_op_with("router.bills", "#employee/bills");
        assert_eq!(
            err.to_string(),
            "[HTTP_ERROR] Erreur 404 | trace: bills.list -> router.bills(#employee/bills)"
        );
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "Erreur 404");
        assert_eq!(err.spans().len(), 2);
    }

    #[test]
    fn test_display_without_trace() {
        let err = StoreError::network("offline");
        assert_eq!(err.to_string(), "[NETWORK_ERROR] offline");
        assert_eq!(err.status_code(), 503);
    }

    #[test]
    fn test_serde_error_maps_to_decode() {
        let parse: Result<ErrorBody, _> = serde_json::from_str("<html>");
        let err: StoreError = parse.unwrap_err().into();
        assert_eq!(err.kind, StoreErrorKind::Decode);
    }
}
