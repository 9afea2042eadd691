//! 注册页面
//!
//! 用户名输入满 3 个字符后每次变化都查询一次可用性，
//! 只有确认被占用时才阻止提交。

use crate::auth::use_session;
use crate::components::icons::{CircleCheck, CircleX, UserPlus};
use crate::components::toast::use_toaster;
use crate::registration::{UsernameAvailability, check_availability, register};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use atelier_shared::{Gender, RegisterForm};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 注册表单状态
#[derive(Clone, Copy)]
struct RegisterFormState {
    first_name: RwSignal<String>,
    last_name: RwSignal<String>,
    date_of_birth: RwSignal<String>,
    gender: RwSignal<Gender>,
    username: RwSignal<String>,
    email: RwSignal<String>,
    phone_number: RwSignal<String>,
    location: RwSignal<String>,
    password: RwSignal<String>,
}

impl RegisterFormState {
    fn new() -> Self {
        Self {
            first_name: RwSignal::new(String::new()),
            last_name: RwSignal::new(String::new()),
            date_of_birth: RwSignal::new(String::new()),
            gender: RwSignal::new(Gender::default()),
            username: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            phone_number: RwSignal::new(String::new()),
            location: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
        }
    }

    fn to_form(&self) -> RegisterForm {
        RegisterForm {
            first_name: self.first_name.get().trim().to_string(),
            last_name: self.last_name.get().trim().to_string(),
            date_of_birth: self.date_of_birth.get(),
            gender: self.gender.get(),
            username: self.username.get().trim().to_string(),
            email: self.email.get().trim().to_string(),
            phone_number: self.phone_number.get().trim().to_string(),
            location: self.location.get().trim().to_string(),
            password: self.password.get(),
        }
    }
}

#[component]
fn TextField(
    id: &'static str,
    label: &'static str,
    value: RwSignal<String>,
    #[prop(default = "text")] input_type: &'static str,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label for=id class="label">
                <span class="label-text">{label}</span>
            </label>
            <input
                id=id
                type=input_type
                required
                on:input=move |ev| value.set(event_target_value(&ev))
                prop:value=move || value.get()
                class="input input-bordered w-full"
            />
        </div>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = use_session();
    let toaster = use_toaster();
    let router = use_router();

    let state = RegisterFormState::new();
    let availability = RwSignal::new(UsernameAvailability::Unknown);
    let checking = RwSignal::new(false);
    let submitting = RwSignal::new(false);

    let on_username_input = move |ev: leptos::ev::Event| {
        let name = event_target_value(&ev);
        state.username.set(name.clone());
        availability.set(UsernameAvailability::Unknown);

        let api = session.api();
        checking.set(true);
        spawn_local(async move {
            let result = check_availability(&api, name.trim()).await;
            // 输入已变化时丢弃过期结果
            if state.username.get_untracked() == name {
                availability.set(result.unwrap_or_default());
                checking.set(false);
            }
        });
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = state.to_form();
        let current = availability.get();
        submitting.set(true);
        spawn_local(async move {
            match register(&session.api(), &form, current).await {
                Ok(()) => {
                    toaster.success("Registration successful! Please login.");
                    router.go(AppRoute::Login);
                }
                Err(e) => toaster.error(e.user_message("Registration failed")),
            }
            submitting.set(false);
        });
    };

    let availability_hint = move || {
        if checking.get() {
            return view! { <span class="loading loading-spinner loading-xs"></span> }.into_any();
        }
        match availability.get() {
            UsernameAvailability::Available => view! {
                <span class="label-text-alt text-success flex items-center gap-1">
                    <CircleCheck attr:class="h-4 w-4" /> "Username is available"
                </span>
            }
            .into_any(),
            UsernameAvailability::Taken => view! {
                <span class="label-text-alt text-error flex items-center gap-1">
                    <CircleX attr:class="h-4 w-4" /> "Username is already taken"
                </span>
            }
            .into_any(),
            UsernameAvailability::Unknown => ().into_any(),
        }
    };

    view! {
        <div class="flex justify-center py-10 px-4">
            <div class="card w-full max-w-2xl shadow-2xl bg-base-100">
                <form class="card-body" on:submit=on_submit>
                    <h1 class="card-title text-2xl gap-2">
                        <UserPlus attr:class="h-6 w-6 text-primary" /> "Create an Account"
                    </h1>

                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <TextField id="first_name" label="First name" value=state.first_name />
                        <TextField id="last_name" label="Last name" value=state.last_name />
                        <TextField id="date_of_birth" label="Date of birth" value=state.date_of_birth input_type="date" />
                        <div class="form-control">
                            <label for="gender" class="label">
                                <span class="label-text">"Gender"</span>
                            </label>
                            <select
                                id="gender"
                                class="select select-bordered w-full"
                                on:change=move |ev| {
                                    if let Some(g) = Gender::from_code(&event_target_value(&ev)) {
                                        state.gender.set(g);
                                    }
                                }
                            >
                                {Gender::ALL
                                    .into_iter()
                                    .map(|g| view! {
                                        <option value=g.code() selected=move || state.gender.get() == g>
                                            {g.label()}
                                        </option>
                                    })
                                    .collect_view()}
                            </select>
                        </div>
                        <div class="form-control">
                            <label for="username" class="label">
                                <span class="label-text">"Username"</span>
                                {availability_hint}
                            </label>
                            <input
                                id="username"
                                type="text"
                                required
                                autocomplete="username"
                                on:input=on_username_input
                                prop:value=move || state.username.get()
                                class=move || {
                                    if availability.get() == UsernameAvailability::Taken {
                                        "input input-bordered input-error w-full"
                                    } else {
                                        "input input-bordered w-full"
                                    }
                                }
                            />
                        </div>
                        <TextField id="email" label="Email" value=state.email input_type="email" />
                        <TextField id="phone_number" label="Phone number" value=state.phone_number input_type="tel" />
                        <TextField id="location" label="Location" value=state.location />
                    </div>
                    <TextField id="password" label="Password" value=state.password input_type="password" />
                    <p class="text-xs text-base-content/60">
                        "At least 8 characters, not entirely numeric and different from your username."
                    </p>

                    <div class="form-control mt-6">
                        <button
                            class="btn btn-primary"
                            disabled=move || submitting.get() || availability.get().blocks_submission()
                        >
                            {move || if submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Creating account..." }.into_any()
                            } else {
                                "Register".into_any()
                            }}
                        </button>
                    </div>
                    <p class="text-center text-sm mt-2">
                        "Already have an account? "
                        <Link to=AppRoute::Login class="link link-primary">"Login"</Link>
                    </p>
                </form>
            </div>
        </div>
    }
}
