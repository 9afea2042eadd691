//! 注册表单：字段校验与用户名可用性检查

use crate::api::AtelierApi;
use crate::error::{ApiError, ApiResult};
use crate::request::HttpClient;
use crate::session::TokenStore;
use atelier_shared::RegisterForm;

/// 触发用户名检查的最短长度
pub const MIN_USERNAME_CHECK_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 8;
pub const USERNAME_TAKEN: &str = "Please choose a different username";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UsernameAvailability {
    /// 未检查或检查失败
    #[default]
    Unknown,
    Available,
    Taken,
}

impl UsernameAvailability {
    /// 只有确认被占用才阻止提交
    pub fn blocks_submission(&self) -> bool {
        matches!(self, UsernameAvailability::Taken)
    }
}

pub fn should_check(username: &str) -> bool {
    username.chars().count() >= MIN_USERNAME_CHECK_LEN
}

/// 查询用户名是否可用；长度不足时返回 `None` 且不发请求
///
/// 请求失败一律视为 `Unknown`，不会误报为已占用。
pub async fn check_availability<C: HttpClient, S: TokenStore>(
    api: &AtelierApi<C, S>,
    username: &str,
) -> Option<UsernameAvailability> {
    if !should_check(username) {
        return None;
    }
    let availability = match api.check_username(username).await {
        Ok(true) => UsernameAvailability::Taken,
        Ok(false) => UsernameAvailability::Available,
        Err(e) => {
            tracing::warn!(username, error = %e, "username check failed");
            UsernameAvailability::Unknown
        }
    };
    Some(availability)
}

/// 提交前的本地密码校验，最终以服务端为准
pub fn validate_password(password: &str, username: &str) -> ApiResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::validation(format!(
            "Password must contain at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err(ApiError::validation("Password cannot be entirely numeric"));
    }
    let username = username.trim();
    if !username.is_empty() && password.trim().eq_ignore_ascii_case(username) {
        return Err(ApiError::validation("Password cannot be the same as the username"));
    }
    Ok(())
}

pub fn validate(form: &RegisterForm) -> ApiResult<()> {
    if let Some((name, _)) = form
        .fields()
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
    {
        return Err(ApiError::validation(format!(
            "{} is required",
            field_label(name)
        )));
    }
    validate_password(&form.password, &form.username)
}

fn field_label(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => spaced,
    }
}

/// 提交注册
pub async fn register<C: HttpClient, S: TokenStore>(
    api: &AtelierApi<C, S>,
    form: &RegisterForm,
    availability: UsernameAvailability,
) -> ApiResult<()> {
    if availability.blocks_submission() {
        return Err(ApiError::validation(USERNAME_TAKEN));
    }
    validate(form)?;
    api.register(form).await?;
    tracing::info!(username = %form.username, "account registered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::test_api;
    use crate::session::MemoryTokenStore;
    use atelier_shared::{Gender, HttpMethod};
    use serde_json::json;

    fn complete_form() -> RegisterForm {
        RegisterForm {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            date_of_birth: "1990-01-01".into(),
            gender: Gender::Female,
            username: "jane".into(),
            email: "jane@example.com".into(),
            phone_number: "+254700000000".into(),
            location: "Nairobi".into(),
            password: "tailor-made-2024".into(),
        }
    }

    #[tokio::test]
    async fn test_short_username_is_not_checked() {
        let (api, client) = test_api(MemoryTokenStore::default());

        assert_eq!(check_availability(&api, "ja").await, None);
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn test_existing_username_is_taken() {
        let (api, client) = test_api(MemoryTokenStore::default());
        client.mock_response(
            HttpMethod::Get,
            "/api/v1/user/exists?username=jane",
            200,
            json!({"detail": true}),
        );

        assert_eq!(
            check_availability(&api, "jane").await,
            Some(UsernameAvailability::Taken)
        );
    }

    #[tokio::test]
    async fn test_free_username_is_available() {
        let (api, client) = test_api(MemoryTokenStore::default());
        client.mock_response(
            HttpMethod::Get,
            "/api/v1/user/exists?username=newbie",
            200,
            json!({"detail": false}),
        );

        assert_eq!(
            check_availability(&api, "newbie").await,
            Some(UsernameAvailability::Available)
        );
    }

    #[tokio::test]
    async fn test_check_errors_never_yield_taken() {
        let (api, client) = test_api(MemoryTokenStore::default());
        client.mock_response(
            HttpMethod::Get,
            "/api/v1/user/exists?username=server",
            500,
            json!({"detail": "boom"}),
        );
        client.mock_network_error(HttpMethod::Get, "/api/v1/user/exists?username=offline");

        for name in ["server", "offline"] {
            let result = check_availability(&api, name).await;
            assert_eq!(result, Some(UsernameAvailability::Unknown));
            assert!(!result.unwrap().blocks_submission());
        }
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_password("short1", "jane").is_err());
        assert!(validate_password("1234567890", "jane").is_err());
        assert!(validate_password("Jane-the-tailor", "jane").is_ok());
        assert!(validate_password("needle-and-thread", "jane").is_ok());
    }

    #[test]
    fn test_password_equal_to_username_is_rejected() {
        assert!(validate_password("JaneDoe2024", "janedoe2024").is_err());
        assert!(validate_password("planning-2024", "ann").is_ok());
        assert!(validate_password("annabelle-1", "ann").is_ok());
    }

    #[test]
    fn test_blank_field_is_reported() {
        let mut form = complete_form();
        form.location = "  ".into();
        let err = validate(&form).unwrap_err();
        assert_eq!(err.detail(), Some("Location is required"));
    }

    #[tokio::test]
    async fn test_taken_username_blocks_submission() {
        let (api, client) = test_api(MemoryTokenStore::default());

        let err = register(&api, &complete_form(), UsernameAvailability::Taken)
            .await
            .unwrap_err();

        assert_eq!(err.detail(), Some(USERNAME_TAKEN));
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_availability_still_submits() {
        let (api, client) = test_api(MemoryTokenStore::default());
        client.mock_response(HttpMethod::Post, "/d/user/create", 200, json!({}));

        register(&api, &complete_form(), UsernameAvailability::Unknown)
            .await
            .unwrap();

        assert_eq!(client.request_keys(), vec!["POST /d/user/create"]);
    }
}
