//! 员工与管理员登录

use billed_shared::error::StoreResult;
use billed_shared::{CreateUserRequest, LoginRequest, SessionUser, UserType};
use std::rc::Rc;

use super::Navigator;
use crate::log::{log_error, log_info};
use crate::store::{HeaderOptions, Store, json_body};
use crate::web::route::AppRoute;
use crate::web::storage::{KeyValueStorage, write_jwt, write_user};

/// 两个登录表单之一的输入值
#[derive(Debug, Clone, PartialEq)]
pub struct LoginForm {
    pub user_type: UserType,
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn credentials(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

pub struct LoginContainer {
    navigator: Rc<dyn Navigator>,
    store: Option<Store>,
    storage: Rc<dyn KeyValueStorage>,
}

impl LoginContainer {
    pub fn new(
        navigator: Rc<dyn Navigator>,
        store: Option<Store>,
        storage: Rc<dyn KeyValueStorage>,
    ) -> Self {
        Self {
            navigator,
            store,
            storage,
        }
    }

    /// 保存会话并打开用户的落地页
    ///
    /// 未知账户会先被创建，然后重试一次登录；
    /// 仍然失败时返回错误且不导航。
    pub async fn handle_submit(&self, form: &LoginForm) -> StoreResult<SessionUser> {
        let user = SessionUser::connected(form.user_type, form.email.clone(), form.password.clone());
        write_user(self.storage.as_ref(), &user);

        if let Some(store) = &self.store {
            if let Err(e) = self.login(store, form).await {
                log_info!("login failed for {}, creating account: {}", form.email, e);
                self.create_user(store, form)
                    .await
                    .map_err(|e| e.in_op_with("login.create_user", form.email.clone()))?;
                self.login(store, form).await.inspect_err(|e| log_error!("{}", e))?;
            }
        }

        let landing = AppRoute::landing_for(form.user_type);
        self.navigator.navigate(landing);
        self.navigator.set_previous_location(landing);
        Ok(user)
    }

    async fn login(&self, store: &Store, form: &LoginForm) -> StoreResult<()> {
        let res = store.login(&form.credentials()).await?;
        write_jwt(self.storage.as_ref(), &res.jwt);
        Ok(())
    }

    async fn create_user(&self, store: &Store, form: &LoginForm) -> StoreResult<()> {
        let request = CreateUserRequest::new(form.user_type, &form.email, &form.password);
        let _: serde_json::Value = store
            .users()
            .create(json_body(&request)?, HeaderOptions::anonymous())
            .await?;
        log_info!("account {} created", form.email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{BASE, RecordingNavigator, StoreHarness, store_harness};
    use crate::web::storage::{read_jwt, read_user};
    use billed_shared::protocol::HttpMethod;
    use serde_json::json;

    fn login_url() -> String {
        format!("{}/auth/login", BASE)
    }

    fn users_url() -> String {
        format!("{}/users", BASE)
    }

    fn setup() -> (StoreHarness, Rc<RecordingNavigator>, LoginContainer) {
        let harness = store_harness();
        let navigator = RecordingNavigator::new();
        let container = LoginContainer::new(
            navigator.clone(),
            Some(harness.store.clone()),
            harness.storage.clone(),
        );
        (harness, navigator, container)
    }

    fn form(user_type: UserType) -> LoginForm {
        LoginForm {
            user_type,
            email: "johndoe@email.com".to_string(),
            password: "azerty".to_string(),
        }
    }

    #[tokio::test]
    async fn test_employee_login_lands_on_bills() {
        let (harness, navigator, container) = setup();
        harness
            .transport
            .mock_json(HttpMethod::Post, &login_url(), 200, json!({"jwt": "token-1"}));

        let user = container.handle_submit(&form(UserType::Employee)).await.unwrap();

        assert_eq!(user.status.as_deref(), Some("connected"));
        assert_eq!(read_user(harness.storage.as_ref()), Some(user));
        assert_eq!(read_jwt(harness.storage.as_ref()).as_deref(), Some("token-1"));
        assert_eq!(navigator.visited(), vec![AppRoute::Bills]);
        assert_eq!(navigator.previous.get(), Some(AppRoute::Bills));
        assert!(harness.transport.requests_to(HttpMethod::Post, &users_url()).is_empty());
    }

    #[tokio::test]
    async fn test_admin_login_lands_on_dashboard() {
        let (harness, navigator, container) = setup();
        harness
            .transport
            .mock_json(HttpMethod::Post, &login_url(), 200, json!({"jwt": "token-2"}));

        container.handle_submit(&form(UserType::Admin)).await.unwrap();

        assert_eq!(navigator.visited(), vec![AppRoute::Dashboard]);
        assert_eq!(navigator.previous.get(), Some(AppRoute::Dashboard));
    }

    #[tokio::test]
    async fn test_unknown_user_is_created_then_logged_in() {
        let (harness, navigator, container) = setup();
        harness.transport.mock_json(
            HttpMethod::Post,
            &login_url(),
            401,
            json!({"message": "User not found"}),
        );
        harness
            .transport
            .mock_json(HttpMethod::Post, &login_url(), 200, json!({"jwt": "token-3"}));
        harness
            .transport
            .mock_json(HttpMethod::Post, &users_url(), 201, json!({"id": "u1"}));

        container.handle_submit(&form(UserType::Employee)).await.unwrap();

        let created = harness.transport.requests_to(HttpMethod::Post, &users_url());
        assert_eq!(created.len(), 1);
        assert!(created[0].header("Authorization").is_none());
        let body: serde_json::Value = serde_json::from_str(created[0].json.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "johndoe");
        assert_eq!(body["type"], "Employee");

        assert_eq!(harness.transport.requests_to(HttpMethod::Post, &login_url()).len(), 2);
        assert_eq!(read_jwt(harness.storage.as_ref()).as_deref(), Some("token-3"));
        assert_eq!(navigator.visited(), vec![AppRoute::Bills]);
    }

    #[tokio::test]
    async fn test_failed_creation_does_not_navigate() {
        let (harness, navigator, container) = setup();
        harness.transport.go_offline();

        let err = container.handle_submit(&form(UserType::Employee)).await.unwrap_err();

        assert_eq!(err.spans().last().unwrap().operation, "login.create_user");
        assert!(navigator.visited().is_empty());
        assert!(read_jwt(harness.storage.as_ref()).is_none());
    }

    #[tokio::test]
    async fn test_login_without_store_still_navigates() {
        let harness = store_harness();
        let navigator = RecordingNavigator::new();
        let container = LoginContainer::new(navigator.clone(), None, harness.storage.clone());

        container.handle_submit(&form(UserType::Admin)).await.unwrap();

        assert!(read_user(harness.storage.as_ref()).is_some());
        assert_eq!(navigator.visited(), vec![AppRoute::Dashboard]);
    }
}
