//! 页面框架：导航栏与页脚

use crate::auth::{SessionPhase, use_session};
use crate::components::icons::*;
use crate::content::{FooterContent, load_footer};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use crate::web::window::scroll_to_section;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 首页分区锚点 `(id, 标题)`
pub const HOME_SECTIONS: [(&str, &str); 5] = [
    ("services", "Services"),
    ("work", "Our Work"),
    ("testimonials", "Testimonials"),
    ("faq", "FAQ"),
    ("contact", "Contact"),
];

fn section_href(id: &str) -> String {
    format!("/#{}", id)
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let session = use_session();
    let footer = RwSignal::new(FooterContent::default());

    // 页脚数据失败只记日志
    spawn_local({
        let api = session.api();
        async move {
            footer.set(load_footer(&api).await);
        }
    });

    view! {
        <div class="min-h-screen flex flex-col bg-base-200 font-sans">
            <NavBar footer=footer />
            <main class="flex-1">{children()}</main>
            <Footer footer=footer />
        </div>
    }
}

#[component]
fn NavBar(footer: RwSignal<FooterContent>) -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let admin_url = session.api().config().admin_url.clone();
    let menu_open = RwSignal::new(false);

    let brand = move || {
        footer.with(|f| {
            f.about
                .as_ref()
                .map(|a| a.short_name.clone())
                .unwrap_or_else(|| "Atelier".to_string())
        })
    };

    let go_to_section = move |id: &'static str| {
        if router.current_route().get_untracked() != AppRoute::Home {
            router.go(AppRoute::Home);
        }
        // 等待首页渲染后再滚动
        request_animation_frame(move || scroll_to_section(id));
    };

    let section_links = move |close_menu: bool| {
        HOME_SECTIONS
            .into_iter()
            .map(|(id, title)| {
                view! {
                    <li>
                        <a href=section_href(id) on:click=move |ev| {
                            ev.prevent_default();
                            if close_menu {
                                menu_open.set(false);
                            }
                            go_to_section(id);
                        }>{title}</a>
                    </li>
                }
            })
            .collect_view()
    };

    let on_logout = move |_| {
        session.logout();
        router.go(AppRoute::Home);
    };

    view! {
        <div class="navbar bg-base-100 shadow sticky top-0 z-40 px-4">
            <div class="flex-none lg:hidden dropdown">
                <button
                    class="btn btn-ghost btn-square"
                    aria-label="Toggle sections menu"
                    on:click=move |_| menu_open.update(|o| *o = !*o)
                >
                    {move || if menu_open.get() {
                        view! { <X attr:class="h-6 w-6" /> }.into_any()
                    } else {
                        view! { <Menu attr:class="h-6 w-6" /> }.into_any()
                    }}
                </button>
                <Show when=move || menu_open.get()>
                    <ul class="menu menu-sm bg-base-100 rounded-box shadow mt-3 w-52 p-2 absolute z-50">
                        {section_links(true)}
                    </ul>
                </Show>
            </div>
            <div class="flex-1 gap-2">
                <Link to=AppRoute::Home class="btn btn-ghost text-xl gap-2">
                    <Scissors attr:class="h-6 w-6 text-primary" />
                    {brand}
                </Link>
            </div>
            <div class="flex-none gap-2">
                <ul class="menu menu-horizontal px-1 hidden lg:flex">
                    {section_links(false)}
                </ul>
                {move || match session.phase_signal().get() {
                    SessionPhase::Loading => {
                        view! { <span class="loading loading-spinner loading-sm"></span> }.into_any()
                    }
                    SessionPhase::Anonymous => {
                        view! {
                            <Link to=AppRoute::Login class="btn btn-ghost gap-2">
                                <LogIn attr:class="h-4 w-4" /> "Login"
                            </Link>
                            <Link to=AppRoute::Register class="btn btn-primary gap-2">
                                <UserPlus attr:class="h-4 w-4" /> "Register"
                            </Link>
                        }
                        .into_any()
                    }
                    SessionPhase::Authenticated(profile) => {
                        let admin_link = profile.is_staff.then(|| {
                            view! {
                                <a href=admin_url.clone() class="btn btn-ghost gap-2">
                                    <ShieldCheck attr:class="h-4 w-4" /> "Admin Panel"
                                </a>
                            }
                        });
                        view! {
                            {admin_link}
                            <Link to=AppRoute::Dashboard class="btn btn-ghost gap-2">
                                <LayoutDashboard attr:class="h-4 w-4" /> "Dashboard"
                            </Link>
                            <button on:click=on_logout class="btn btn-outline btn-error gap-2">
                                <LogOut attr:class="h-4 w-4" /> "Logout"
                            </button>
                        }
                        .into_any()
                    }
                }}
            </div>
        </div>
    }
}

#[component]
fn Footer(footer: RwSignal<FooterContent>) -> impl IntoView {
    view! {
        <footer class="footer p-10 bg-neutral text-neutral-content">
            {move || {
                footer
                    .get()
                    .about
                    .map(|about| {
                        let hours = about.business_hours.clone().unwrap_or_default();
                        view! {
                            <aside>
                                <Scissors attr:class="h-10 w-10" />
                                <p class="font-bold text-lg">{about.name.clone()}</p>
                                <p>{about.slogan.clone()}</p>
                                <p class="whitespace-pre-line text-sm opacity-80">{hours}</p>
                            </aside>
                            <nav>
                                <h6 class="footer-title">"Contact"</h6>
                                <span class="flex items-center gap-2">
                                    <MapPin attr:class="h-4 w-4" /> {about.address.clone()}
                                </span>
                                {about.phone_number.clone().map(|phone| view! {
                                    <a class="link link-hover flex items-center gap-2" href=format!("tel:{}", phone)>
                                        <Phone attr:class="h-4 w-4" /> {phone.clone()}
                                    </a>
                                })}
                                {about.email.clone().map(|email| view! {
                                    <a class="link link-hover flex items-center gap-2" href=format!("mailto:{}", email)>
                                        <Mail attr:class="h-4 w-4" /> {email.clone()}
                                    </a>
                                })}
                            </nav>
                            <nav>
                                <h6 class="footer-title">"Social"</h6>
                                {about
                                    .social_links()
                                    .into_iter()
                                    .map(|(name, url)| view! {
                                        <a class="link link-hover" href=url target="_blank" rel="noopener">{name}</a>
                                    })
                                    .collect_view()}
                            </nav>
                        }
                    })
            }}
            <nav>
                <h6 class="footer-title">"Services"</h6>
                {move || {
                    footer
                        .get()
                        .services
                        .into_iter()
                        .map(|s| view! { <span>{s.name}</span> })
                        .collect_view()
                }}
            </nav>
        </footer>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_section_link_has_an_anchor() {
        let home = include_str!("home.rs");
        for (id, _) in HOME_SECTIONS {
            assert!(home.contains(&format!("id=\"{}\"", id)), "missing section {}", id);
            assert_eq!(section_href(id), format!("/#{}", id));
        }
    }
}
