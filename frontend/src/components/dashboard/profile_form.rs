use crate::auth::use_session;
use crate::components::toast::use_toaster;
use atelier_shared::{ProfileUpdate, UserProfile};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 可编辑的资料字段 `(键, 标题, 输入类型)`
const EDITABLE_FIELDS: [(&str, &str, &str); 5] = [
    ("first_name", "First name", "text"),
    ("last_name", "Last name", "text"),
    ("email", "Email", "email"),
    ("phone_number", "Phone number", "tel"),
    ("location", "Location", "text"),
];

#[derive(Clone, Copy)]
struct ProfileFormState {
    first_name: RwSignal<String>,
    last_name: RwSignal<String>,
    email: RwSignal<String>,
    phone_number: RwSignal<String>,
    location: RwSignal<String>,
}

impl ProfileFormState {
    fn new() -> Self {
        Self {
            first_name: RwSignal::new(String::new()),
            last_name: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            phone_number: RwSignal::new(String::new()),
            location: RwSignal::new(String::new()),
        }
    }

    fn field(&self, key: &str) -> RwSignal<String> {
        match key {
            "first_name" => self.first_name,
            "last_name" => self.last_name,
            "email" => self.email,
            "phone_number" => self.phone_number,
            _ => self.location,
        }
    }

    fn load(&self, profile: &UserProfile) {
        let update = profile.to_update();
        self.first_name.set(update.first_name.unwrap_or_default());
        self.last_name.set(update.last_name.unwrap_or_default());
        self.email.set(update.email.unwrap_or_default());
        self.phone_number.set(update.phone_number.unwrap_or_default());
        self.location.set(update.location.unwrap_or_default());
    }

    fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            first_name: Some(self.first_name.get_untracked()),
            last_name: Some(self.last_name.get_untracked()),
            phone_number: Some(self.phone_number.get_untracked()),
            email: Some(self.email.get_untracked()),
            location: Some(self.location.get_untracked()),
        }
    }
}

#[component]
pub fn ProfileForm() -> impl IntoView {
    let session = use_session();
    let toaster = use_toaster();
    let state = ProfileFormState::new();
    let saving = RwSignal::new(false);

    // 会话资料变化时回填表单
    Effect::new(move |_| {
        if let Some(profile) = session.phase_signal().with(|p| p.profile().cloned()) {
            state.load(&profile);
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let update = state.to_update();
        saving.set(true);
        spawn_local(async move {
            match session.api().update_profile(&update).await {
                Ok(profile) => {
                    session.set_profile(profile);
                    toaster.success("Profile updated successfully");
                }
                Err(e) => toaster.error(e.user_message("Failed to update profile")),
            }
            saving.set(false);
        });
    };

    let readonly = move || {
        session.profile().map(|p| {
            view! {
                <div class="grid grid-cols-1 md:grid-cols-3 gap-4 text-sm">
                    <div>
                        <span class="text-base-content/60">"Username"</span>
                        <p class="font-mono">{p.username.clone()}</p>
                    </div>
                    <div>
                        <span class="text-base-content/60">"Date of birth"</span>
                        <p>{p.date_of_birth.format("%b %-d, %Y").to_string()}</p>
                    </div>
                    <div>
                        <span class="text-base-content/60">"Member since"</span>
                        <p>{p.date_joined.display_date()}</p>
                    </div>
                </div>
            }
        })
    };

    view! {
        <form class="space-y-4" on:submit=on_submit>
            {readonly}
            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                {EDITABLE_FIELDS
                    .into_iter()
                    .map(|(key, label, input_type)| {
                        let value = state.field(key);
                        view! {
                            <div class="form-control">
                                <label for=key class="label">
                                    <span class="label-text">{label}</span>
                                </label>
                                <input
                                    id=key
                                    type=input_type
                                    class="input input-bordered w-full"
                                    on:input=move |ev| value.set(event_target_value(&ev))
                                    prop:value=move || value.get()
                                />
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
            <div class="flex justify-end">
                <button class="btn btn-primary" disabled=move || saving.get()>
                    {move || if saving.get() {
                        view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                    } else {
                        "Update Profile".into_any()
                    }}
                </button>
            </div>
        </form>
    }
}
