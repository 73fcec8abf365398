//! 运行时配置
//!
//! 配置在构建时通过 `option_env!` 写入，未设置时使用下列默认值。

/// 构建时未设置 `BILLED_API_URL` 时使用的后端地址
const DEFAULT_API_URL: &str = "http://localhost:5678";

/// 其账单永远不会出现在管理面板上的账户
const DEFAULT_TEST_USERS: &[&str] = &[
    "employee@test.tld",
    "admin@test.tld",
    "test@test.tld",
];

pub const STORAGE_USER_KEY: &str = "user";
pub const STORAGE_JWT_KEY: &str = "jwt";

/// 员工账单页中收据图片占弹窗宽度的比例
pub const EMPLOYEE_RECEIPT_RATIO: f64 = 0.5;
/// 管理面板中收据图片占弹窗宽度的比例
pub const ADMIN_RECEIPT_RATIO: f64 = 0.8;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    pub excluded_emails: Vec<String>,
}

impl AppConfig {
    /// 读取 `BILLED_API_URL` 与 `BILLED_TEST_USERS`（逗号分隔）
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("BILLED_API_URL"), option_env!("BILLED_TEST_USERS"))
    }

    fn from_values(api_url: Option<&str>, test_users: Option<&str>) -> Self {
        let api_url = api_url
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();

        let excluded_emails = match test_users {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
                .collect(),
            None => DEFAULT_TEST_USERS.iter().map(|v| v.to_string()).collect(),
        };

        Self {
            api_url,
            excluded_emails,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_url, "http://localhost:5678");
        assert!(config.excluded_emails.contains(&"employee@test.tld".to_string()));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_values(
            Some(" https://api.billed.test/ "),
            Some("a@test.tld, ,b@test.tld"),
        );
        assert_eq!(config.api_url, "https://api.billed.test");
        assert_eq!(config.excluded_emails, vec!["a@test.tld", "b@test.tld"]);
    }

    #[test]
    fn test_blank_url_falls_back() {
        let config = AppConfig::from_values(Some("   "), Some(""));
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.excluded_emails.is_empty());
    }
}
