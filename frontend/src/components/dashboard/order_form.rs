//! 订单表单（新建与编辑共用）
//!
//! `OrderFormState` 把零散的 signal 整合在一起，负责与 `OrderDraft` 互相转换。

use crate::auth::use_session;
use crate::components::modal::Modal;
use crate::components::toast::use_toaster;
use crate::orders::{OrderChange, OrderDraft, UploadTicket, create_order, submit_edit};
use crate::request::UploadFile;
use crate::web::file::{first_file, read_upload};
use atelier_shared::{MaterialType, ServiceOffered, Urgency};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 表单状态结构体
#[derive(Clone, Copy)]
pub struct OrderFormState {
    pub service_name: RwSignal<String>,
    pub details: RwSignal<String>,
    pub material_type: RwSignal<Option<MaterialType>>,
    pub fabric_required: RwSignal<bool>,
    pub quantity: RwSignal<u32>,
    pub urgency: RwSignal<Urgency>,
    pub colors: RwSignal<String>,
    pub reference_image: RwSignal<Option<UploadFile>>,
    pub upload: RwSignal<UploadTicket>,
    /// 正在编辑的订单，`None` 表示新建
    pub editing: RwSignal<Option<u64>>,
}

impl OrderFormState {
    pub fn new() -> Self {
        let draft = OrderDraft::default();
        Self {
            service_name: RwSignal::new(draft.service_name),
            details: RwSignal::new(draft.details),
            material_type: RwSignal::new(draft.material_type),
            fabric_required: RwSignal::new(draft.fabric_required),
            quantity: RwSignal::new(draft.quantity),
            urgency: RwSignal::new(draft.urgency),
            colors: RwSignal::new(draft.colors),
            reference_image: RwSignal::new(draft.reference_image),
            upload: RwSignal::new(UploadTicket::default()),
            editing: RwSignal::new(None),
        }
    }

    /// 把草稿写入表单
    pub fn load(&self, draft: OrderDraft) {
        self.service_name.set(draft.service_name);
        self.details.set(draft.details);
        self.material_type.set(draft.material_type);
        self.fabric_required.set(draft.fabric_required);
        self.quantity.set(draft.quantity);
        self.urgency.set(draft.urgency);
        self.colors.set(draft.colors);
        self.reference_image.set(draft.reference_image);
        self.upload.update(UploadTicket::cancel);
    }

    pub fn reset(&self) {
        self.load(OrderDraft::default());
        self.editing.set(None);
    }

    pub fn to_draft(&self) -> OrderDraft {
        OrderDraft {
            service_name: self.service_name.get_untracked(),
            details: self.details.get_untracked(),
            material_type: self.material_type.get_untracked(),
            fabric_required: self.fabric_required.get_untracked(),
            quantity: self.quantity.get_untracked(),
            urgency: self.urgency.get_untracked(),
            colors: self.colors.get_untracked(),
            reference_image: self.reference_image.get_untracked(),
        }
    }
}

impl Default for OrderFormState {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn OrderForm(
    state: OrderFormState,
    open: RwSignal<bool>,
    services: Signal<Vec<ServiceOffered>>,
    #[prop(into)] on_change: Callback<OrderChange>,
) -> impl IntoView {
    let session = use_session();
    let toaster = use_toaster();
    let submitting = RwSignal::new(false);
    let file_ref = NodeRef::<leptos::html::Input>::new();

    let clear_file_input = move || {
        if let Some(input) = file_ref.get_untracked() {
            input.set_value("");
        }
    };

    // 打开表单时文件框与表单状态保持一致
    Effect::new(move |_| {
        if open.get() {
            clear_file_input();
        }
    });

    let on_file_change = move |ev: leptos::ev::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        state.reference_image.set(None);
        let Some(file) = first_file(&input) else {
            state.upload.update(UploadTicket::cancel);
            return;
        };
        let mut ticket = 0;
        state.upload.update(|u| ticket = u.begin());
        spawn_local(async move {
            let result = read_upload(&file).await;
            let mut fresh = false;
            state.upload.update(|u| fresh = u.finish(ticket));
            if !fresh {
                return;
            }
            match result {
                Ok(upload) => state.reference_image.set(Some(upload)),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read reference image");
                    toaster.error("Could not read the selected image");
                }
            }
        });
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if state.upload.get_untracked().is_pending() {
            toaster.error("Please wait for the image to finish loading");
            return;
        }
        let draft = state.to_draft();
        let editing = state.editing.get_untracked();
        submitting.set(true);

        spawn_local(async move {
            let api = session.api();
            let (result, success, failure) = match editing {
                Some(id) => (
                    submit_edit(&api, id, &draft).await,
                    "Order updated successfully",
                    "Failed to update order",
                ),
                None => (
                    create_order(&api, &draft).await,
                    "Order created successfully",
                    "Failed to create order",
                ),
            };
            match result {
                Ok(change) => {
                    on_change.run(change);
                    toaster.success(success);
                    state.reset();
                    clear_file_input();
                    open.set(false);
                }
                Err(e) => toaster.error(e.user_message(failure)),
            }
            submitting.set(false);
        });
    };

    view! {
        <Modal open=open class="max-w-2xl">
            <h3 class="font-bold text-lg">
                {move || if state.editing.get().is_some() { "Edit Order" } else { "Place New Order" }}
            </h3>
            <form on:submit=on_submit class="space-y-4 mt-4">
                <div class="form-control">
                    <label for="service_name" class="label">
                        <span class="label-text">"Service"</span>
                    </label>
                    <select
                        id="service_name"
                        required
                        class="select select-bordered w-full"
                        on:change=move |ev| state.service_name.set(event_target_value(&ev))
                    >
                        <option value="" disabled selected=move || state.service_name.get().is_empty()>
                            "Select a service"
                        </option>
                        <For
                            each=move || services.get()
                            key=|s| s.name.clone()
                            children=move |s| {
                                let name = s.name.clone();
                                let selected_name = s.name.clone();
                                view! {
                                    <option value=name selected=move || state.service_name.get() == selected_name>
                                        {s.name}
                                    </option>
                                }
                            }
                        />
                    </select>
                </div>

                <div class="form-control">
                    <label for="details" class="label">
                        <span class="label-text">"Details"</span>
                    </label>
                    <textarea
                        id="details"
                        required
                        class="textarea textarea-bordered w-full h-24"
                        placeholder="Describe the design, fit and any special requests"
                        on:input=move |ev| state.details.set(event_target_value(&ev))
                        prop:value=move || state.details.get()
                    ></textarea>
                </div>

                <div class="grid grid-cols-2 gap-4">
                    <div class="form-control">
                        <label for="material_type" class="label">
                            <span class="label-text">"Material"</span>
                        </label>
                        <select
                            id="material_type"
                            required
                            class="select select-bordered w-full"
                            on:change=move |ev| state.material_type.set(MaterialType::parse(&event_target_value(&ev)))
                        >
                            <option value="" disabled selected=move || state.material_type.get().is_none()>
                                "Select material"
                            </option>
                            {MaterialType::ALL
                                .into_iter()
                                .map(|m| view! {
                                    <option value=m.as_str() selected=move || state.material_type.get() == Some(m)>
                                        {m.as_str()}
                                    </option>
                                })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="form-control">
                        <label for="urgency" class="label">
                            <span class="label-text">"Urgency"</span>
                        </label>
                        <select
                            id="urgency"
                            class="select select-bordered w-full"
                            on:change=move |ev| {
                                if let Some(u) = Urgency::parse(&event_target_value(&ev)) {
                                    state.urgency.set(u);
                                }
                            }
                        >
                            {Urgency::ALL
                                .into_iter()
                                .map(|u| view! {
                                    <option value=u.as_str() selected=move || state.urgency.get() == u>
                                        {u.as_str()}
                                    </option>
                                })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="form-control">
                        <label for="quantity" class="label">
                            <span class="label-text">"Quantity"</span>
                        </label>
                        <input
                            id="quantity"
                            type="number"
                            min="1"
                            required
                            class="input input-bordered w-full"
                            prop:value=move || state.quantity.get()
                            on:input=move |ev| {
                                if let Ok(val) = event_target_value(&ev).parse::<u32>() {
                                    state.quantity.set(val.max(1));
                                }
                            }
                        />
                    </div>
                    <div class="form-control">
                        <label for="colors" class="label">
                            <span class="label-text">"Colors (optional)"</span>
                        </label>
                        <input
                            id="colors"
                            type="text"
                            class="input input-bordered w-full"
                            on:input=move |ev| state.colors.set(event_target_value(&ev))
                            prop:value=move || state.colors.get()
                        />
                    </div>
                </div>

                <div class="form-control">
                    <label class="label cursor-pointer justify-start gap-4">
                        <input
                            type="checkbox"
                            class="toggle toggle-primary"
                            prop:checked=move || state.fabric_required.get()
                            on:change=move |ev| state.fabric_required.set(event_target_checked(&ev))
                        />
                        <span class="label-text">"I need you to provide the fabric"</span>
                    </label>
                </div>

                <div class="form-control">
                    <label for="reference_image" class="label">
                        <span class="label-text">"Reference image (optional)"</span>
                    </label>
                    <input
                        id="reference_image"
                        type="file"
                        accept="image/*"
                        class="file-input file-input-bordered w-full"
                        node_ref=file_ref
                        on:change=on_file_change
                    />
                </div>

                <div class="modal-action">
                    <button type="button" class="btn" on:click=move |_| open.set(false)>"Cancel"</button>
                    <button
                        type="submit"
                        class="btn btn-primary"
                        disabled=move || submitting.get() || state.upload.get().is_pending()
                    >
                        {move || if submitting.get() {
                            view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                        } else if state.upload.get().is_pending() {
                            view! { <span class="loading loading-spinner"></span> "Reading image..." }.into_any()
                        } else {
                            "Save Order".into_any()
                        }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
