//! 运行时配置
//!
//! 单页应用没有运行时环境变量，配置在构建时通过 `option_env!` 注入，
//! 未设置时使用下面的默认值。

use atelier_shared::STORAGE_TOKEN_KEY;

const DEFAULT_API_BASE: &str = "/api/v1";
const DEFAULT_BRIDGE_BASE: &str = "/d";
const DEFAULT_ADMIN_URL: &str = "/d/admin";
const DEFAULT_PASSWORD_RESET_URL: &str = "/d/user/password-reset/";

/// 前端配置
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// 主 JSON API 基础路径
    pub api_base: String,
    /// 桥接后端基础路径
    pub bridge_base: String,
    /// 保存 Token 的 LocalStorage 键
    pub token_key: String,
    /// 管理后台入口（整页跳转）
    pub admin_url: String,
    /// 找回密码页面（整页跳转）
    pub password_reset_url: String,
}

impl AppConfig {
    /// 读取构建时注入的配置
    pub fn from_build_env() -> Self {
        Self::with_overrides(
            option_env!("ATELIER_API_BASE"),
            option_env!("ATELIER_BRIDGE_BASE"),
            option_env!("ATELIER_TOKEN_KEY"),
            option_env!("ATELIER_ADMIN_URL"),
            option_env!("ATELIER_PASSWORD_RESET_URL"),
        )
    }

    fn with_overrides(
        api_base: Option<&str>,
        bridge_base: Option<&str>,
        token_key: Option<&str>,
        admin_url: Option<&str>,
        password_reset_url: Option<&str>,
    ) -> Self {
        Self {
            api_base: normalize_base(api_base.unwrap_or(DEFAULT_API_BASE)),
            bridge_base: normalize_base(bridge_base.unwrap_or(DEFAULT_BRIDGE_BASE)),
            token_key: token_key
                .filter(|k| !k.trim().is_empty())
                .unwrap_or(STORAGE_TOKEN_KEY)
                .to_string(),
            admin_url: admin_url.unwrap_or(DEFAULT_ADMIN_URL).to_string(),
            password_reset_url: password_reset_url
                .unwrap_or(DEFAULT_PASSWORD_RESET_URL)
                .to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::with_overrides(None, None, None, None, None)
    }
}

/// 去掉末尾的 `/`，路径拼接时统一由端点提供前导 `/`
fn normalize_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base, "/api/v1");
        assert_eq!(config.bridge_base, "/d");
        assert_eq!(config.token_key, "token");
        assert_eq!(config.admin_url, "/d/admin");
    }

    #[test]
    fn test_overrides_are_normalized() {
        let config = AppConfig::with_overrides(
            Some("https://api.example.com/api/v1/"),
            Some("https://admin.example.com/d//"),
            Some("  "),
            None,
            None,
        );
        assert_eq!(config.api_base, "https://api.example.com/api/v1");
        assert_eq!(config.bridge_base, "https://admin.example.com/d");
        assert_eq!(config.token_key, "token");
    }
}
