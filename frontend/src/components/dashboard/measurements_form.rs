use crate::auth::use_session;
use crate::components::toast::use_toaster;
use atelier_shared::{MeasurementField, UserMeasurements};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn MeasurementsForm(measurements: RwSignal<UserMeasurements>) -> impl IntoView {
    let session = use_session();
    let toaster = use_toaster();
    let saving = RwSignal::new(false);
    let gender = move || session.profile().map(|p| p.gender);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let update = measurements.get_untracked().to_update();
        saving.set(true);
        spawn_local(async move {
            match session.api().update_measurements(&update).await {
                Ok(saved) => {
                    measurements.set(saved);
                    toaster.success("Measurements updated successfully");
                }
                Err(e) => toaster.error(e.user_message("Failed to update measurements")),
            }
            saving.set(false);
        });
    };

    view! {
        <form class="space-y-4" on:submit=on_submit>
            <div class="grid grid-cols-2 md:grid-cols-3 gap-4">
                {move || {
                    MeasurementField::ALL
                        .into_iter()
                        .filter(|f| f.visible_for(gender()))
                        .map(|field| view! {
                            <div class="form-control">
                                <label for=field.key() class="label">
                                    <span class="label-text">{field.label()}</span>
                                </label>
                                <label class="input input-bordered flex items-center gap-2">
                                    <input
                                        id=field.key()
                                        type="number"
                                        min="0"
                                        step="0.1"
                                        class="grow"
                                        prop:value=move || measurements.with(|m| field.get(m))
                                        on:input=move |ev| {
                                            if let Ok(value) = event_target_value(&ev).parse::<f64>() {
                                                measurements.update(|m| field.set(m, value));
                                            }
                                        }
                                    />
                                    <span class="text-base-content/50 text-sm">"cm"</span>
                                </label>
                            </div>
                        })
                        .collect_view()
                }}
            </div>
            <p class="text-xs text-base-content/60">
                {move || measurements.with(|m| {
                    m.date_updated
                        .as_ref()
                        .map(|t| format!("Last updated {}", t.display_date()))
                        .unwrap_or_default()
                })}
            </p>
            <div class="flex justify-end">
                <button class="btn btn-primary" disabled=move || saving.get()>
                    {move || if saving.get() {
                        view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                    } else {
                        "Update Measurements".into_any()
                    }}
                </button>
            </div>
        </form>
    }
}
