//! 全局消息提示
//!
//! 每条提示显示 3 秒后自动消失；新提示会替换旧提示。

use leptos::prelude::*;
use std::time::Duration;

const TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

#[derive(Clone, Copy)]
pub struct Toaster {
    // (序号, 提示)，序号用于避免旧定时器清掉新提示
    current: RwSignal<Option<(u64, Notice)>>,
    counter: StoredValue<u64>,
}

impl Toaster {
    pub fn new() -> Self {
        Self {
            current: RwSignal::new(None),
            counter: StoredValue::new(0),
        }
    }

    pub fn show(&self, message: impl Into<String>, kind: NoticeKind) {
        self.counter.update_value(|c| *c += 1);
        let id = self.counter.get_value();
        self.current.set(Some((
            id,
            Notice {
                message: message.into(),
                kind,
            },
        )));

        let current = self.current;
        set_timeout(
            move || {
                if current.with_untracked(|n| n.as_ref().map(|(i, _)| *i)) == Some(id) {
                    current.set(None);
                }
            },
            TOAST_DURATION,
        );
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message, NoticeKind::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message, NoticeKind::Error);
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_toaster() -> Toaster {
    use_context::<Toaster>().expect("Toaster should be provided")
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let toaster = use_toaster();
    let notice = move || toaster.current.get().map(|(_, n)| n);

    view! {
        <Show when=move || notice().is_some()>
            <div class="toast toast-top toast-end z-50">
                <div class=move || match notice().map(|n| n.kind) {
                    Some(NoticeKind::Error) => "alert alert-error shadow-lg",
                    _ => "alert alert-success shadow-lg",
                }>
                    <span>{move || notice().map(|n| n.message).unwrap_or_default()}</span>
                </div>
            </div>
        </Show>
    }
}
