//! window 级别的操作：确认框、整页跳转、页内滚动

/// 整页跳转（离开单页应用，例如管理后台、找回密码）
pub fn redirect(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_href(url) {
            tracing::warn!(url, error = ?e, "redirect failed");
        }
    }
}

/// 平滑滚动到首页某个分区
///
/// 元素不存在时什么都不做。
pub fn scroll_to_section(id: &str) {
    let Some(element) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
    else {
        tracing::debug!(id, "section not found");
        return;
    };

    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// 当前页面路径带 hash 时，返回 hash 指向的分区 id
pub fn current_hash() -> Option<String> {
    let hash = web_sys::window()?.location().hash().ok()?;
    let id = hash.trim_start_matches('#');
    (!id.is_empty()).then(|| id.to_string())
}

/// 浏览器原生确认框
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserConfirm;

impl crate::orders::Confirm for BrowserConfirm {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

