use crate::auth::use_session;
use crate::components::icons::Scissors;
use crate::components::toast::use_toaster;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use crate::web::window::redirect;
use leptos::prelude::*;
use leptos::task::spawn_local;

const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let toaster = use_toaster();
    let router = use_router();
    let reset_url = session.api().config().password_reset_url.clone();
    let reset_href = reset_url.clone();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let (user, pass) = (username.get(), password.get());
        if user.trim().is_empty() || pass.is_empty() {
            toaster.error("Please fill in all fields");
            return;
        }

        set_is_submitting.set(true);
        spawn_local(async move {
            match session.login(user.trim().to_string(), pass).await {
                Ok(_) => {
                    toaster.success("Welcome back!");
                    router.go(AppRoute::Dashboard);
                }
                Err(e) => toaster.error(e.user_message(LOGIN_FAILED)),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-[80vh]">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <Scissors attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Welcome Back"</h1>
                        <p class="text-base-content/70">"Sign in to manage your orders"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <div class="form-control">
                            <label class="label" for="username">
                                <span class="label-text">"Username"</span>
                            </label>
                            <input
                                id="username"
                                type="text"
                                autocomplete="username"
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                prop:value=username
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                autocomplete="current-password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                            <label class="label">
                                <a
                                    href=reset_href
                                    class="label-text-alt link link-hover"
                                    on:click=move |ev| {
                                        ev.prevent_default();
                                        redirect(&reset_url);
                                    }
                                >
                                    "Forgot password?"
                                </a>
                            </label>
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Login".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm mt-2">
                            "Don't have an account? "
                            <Link to=AppRoute::Register class="link link-primary">"Register"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
