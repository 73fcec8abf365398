use serde::{Deserialize, Deserializer, Serialize};

pub mod date;
pub mod error;
pub mod format;
pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_ACCEPTED: &str = "accepted";
pub const STATUS_REFUSED: &str = "refused";

/// 提交值缺失或为零时使用的百分比
pub const DEFAULT_PCT: i64 = 20;

/// 缺失或 `null` 的字段按默认值处理
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BillStatus {
    #[default]
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    /// 按管理面板分组顺序排列的所有状态
    pub const ALL: [BillStatus; 3] = [Self::Pending, Self::Accepted, Self::Refused];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::Accepted => STATUS_ACCEPTED,
            Self::Refused => STATUS_REFUSED,
        }
    }

    /// 将从 1 开始的分组序号映射为状态
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Self::Pending),
            2 => Some(Self::Accepted),
            3 => Some(Self::Refused),
            _ => None,
        }
    }

    pub fn index(&self) -> u8 {
        match self {
            Self::Pending => 1,
            Self::Accepted => 2,
            Self::Refused => 3,
        }
    }
}

/// 员工提交的费用记录
///
/// 上传收据会在表单提交前创建记录，
/// 因此除 id 外的字段都可能缺失或为 `null`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub expense_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vat: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pct: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub commentary: String,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: BillStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_admin: Option<String>,
}

impl Bill {
    /// 返回带有管理员审批结果的副本
    pub fn with_decision(&self, status: BillStatus, comment: impl Into<String>) -> Self {
        Self {
            status,
            comment_admin: Some(comment.into()),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    Employee,
    Admin,
}

/// 保存在 `user` 存储键下的会话记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(rename = "type")]
    pub user_type: UserType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl SessionUser {
    pub fn connected(user_type: UserType, email: String, password: String) -> Self {
        Self {
            user_type,
            email: Some(email),
            password: Some(password),
            status: Some("connected".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub jwt: String,
}

/// 登录需要先创建账户时 POST 到 `/users` 的请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl CreateUserRequest {
    pub fn new(user_type: UserType, email: &str, password: &str) -> Self {
        Self {
            user_type,
            name: email.split('@').next().unwrap_or_default().to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }
}

/// multipart 收据上传的响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub key: String,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bill_wire_format_uses_camel_case() {
        let json = serde_json::json!({
            "id": "47qAXb6fIm2zOKkLzMro",
            "email": "a@a",
            "type": "Hôtel et logement",
            "name": "encore",
            "amount": 400,
            "date": "2004-04-04",
            "vat": "80",
            "pct": 20,
            "commentary": "séminaire billed",
            "fileUrl": "https://example.test/receipt.jpg",
            "fileName": "preview-facture-free-201801-pdf-1.jpg",
            "status": "pending",
            "commentAdmin": "ok"
        });

        let bill: Bill = serde_json::from_value(json).unwrap();
        assert_eq!(bill.expense_type, "Hôtel et logement");
        assert_eq!(bill.amount, 400.0);
        assert_eq!(bill.status, BillStatus::Pending);
        assert_eq!(bill.comment_admin.as_deref(), Some("ok"));

        let back = serde_json::to_value(&bill).unwrap();
        assert_eq!(back["fileName"], "preview-facture-free-201801-pdf-1.jpg");
        assert_eq!(back["type"], "Hôtel et logement");
    }

    #[test]
    fn test_new_bill_omits_empty_id_and_admin_comment() {
        let bill = Bill {
            email: "e@e".to_string(),
            status: BillStatus::Pending,
            ..Default::default()
        };
        let value = serde_json::to_value(&bill).unwrap();
        assert!(value.get("id").is_none());
        assert!(value.get("commentAdmin").is_none());
    }

    #[test]
    fn test_with_decision_keeps_other_fields() {
        let bill = Bill {
            id: "b1".to_string(),
            name: "hotel".to_string(),
            ..Default::default()
        };
        let decided = bill.with_decision(BillStatus::Refused, "missing receipt");
        assert_eq!(decided.id, "b1");
        assert_eq!(decided.name, "hotel");
        assert_eq!(decided.status, BillStatus::Refused);
        assert_eq!(decided.comment_admin.as_deref(), Some("missing receipt"));
    }

    #[test]
    fn test_status_index_mapping() {
        assert_eq!(BillStatus::from_index(1), Some(BillStatus::Pending));
        assert_eq!(BillStatus::from_index(2), Some(BillStatus::Accepted));
        assert_eq!(BillStatus::from_index(3), Some(BillStatus::Refused));
        assert_eq!(BillStatus::from_index(4), None);
        for status in BillStatus::ALL {
            assert_eq!(BillStatus::from_index(status.index()), Some(status));
        }
    }

    #[test]
    fn test_bill_tolerates_null_and_missing_fields() {
        let json = serde_json::json!({
            "id": "upload-only",
            "email": "a@a",
            "type": null,
            "name": null,
            "amount": null,
            "date": null,
            "vat": null,
            "pct": null,
            "commentary": null,
            "fileUrl": "https://example.test/receipt.jpg",
            "fileName": "receipt.jpg",
            "status": null
        });

        let bill: Bill = serde_json::from_value(json).unwrap();
        assert_eq!(bill.id, "upload-only");
        assert_eq!(bill.amount, 0.0);
        assert_eq!(bill.pct, 0);
        assert!(bill.date.is_empty());
        assert!(bill.expense_type.is_empty());
        assert_eq!(bill.status, BillStatus::Pending);
        assert_eq!(bill.file_name.as_deref(), Some("receipt.jpg"));

        let sparse: Bill = serde_json::from_str(r#"{"id":"x","email":"a@a"}"#).unwrap();
        assert_eq!(sparse.status, BillStatus::Pending);
        assert!(sparse.file_url.is_none());
    }

    #[test]
    fn test_bill_keeps_negative_pct() {
        let bill: Bill = serde_json::from_str(r#"{"id":"x","pct":-5}"#).unwrap();
        assert_eq!(bill.pct, -5);
    }

    #[test]
    fn test_session_user_parses_minimal_record() {
        let user: SessionUser = serde_json::from_str(r#"{"type":"Admin"}"#).unwrap();
        assert_eq!(user.user_type, UserType::Admin);
        assert!(user.email.is_none());
    }
}
