//! Atelier 前端应用
//!
//! 采用 Context-Driven 的架构：
//! - `api` / `request`: 后端调用与 HTTP 抽象
//! - `auth`: 会话状态，显式构造后注入 Context
//! - `orders` / `registration` / `content`: 与 UI 无关的业务流程
//! - `web::route` / `web::router`: 路由定义与路由服务
//! - `components`: UI 组件层

mod api;
mod auth;
mod config;
mod content;
mod error;
mod orders;
mod registration;
mod request;
mod session;
mod components {
    pub mod dashboard;
    pub mod home;
    mod icons;
    pub mod layout;
    pub mod login;
    mod modal;
    pub mod register;
    mod service_modal;
    pub mod toast;
    mod work_modal;
}

use crate::api::BrowserApi;
use crate::auth::Session;
use crate::components::dashboard::DashboardPage;
use crate::components::home::HomePage;
use crate::components::layout::Layout;
use crate::components::login::LoginPage;
use crate::components::register::RegisterPage;
use crate::components::toast::{ToastHost, Toaster};
use crate::config::AppConfig;

use leptos::prelude::*;

// 浏览器原生 API 的轻量级封装
pub(crate) mod web {
    pub mod file;
    mod http;
    pub mod route;
    pub mod router;
    pub mod window;

    pub use http::FetchHttpClient;
}

use web::route::AppRoute;
use web::router::{Link, Router, RouterOutlet};

/// 路由匹配函数
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-[60vh]">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                    <Link to=AppRoute::Home class="btn btn-primary mt-6">"Back to home"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建会话与消息上下文
    let config = AppConfig::from_build_env();
    let session = Session::new(BrowserApi::browser(config));
    provide_context(session);
    provide_context(Toaster::new());

    // 2. 用已保存的 Token 恢复会话
    session.init();

    view! {
        // 3. 路由器组件：注入认证状态信号实现守卫
        <Router auth_status=session.status_signal()>
            <Layout>
                <RouterOutlet matcher=route_matcher />
            </Layout>
            <ToastHost />
        </Router>
    }
}
