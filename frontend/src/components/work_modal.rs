use crate::components::modal::Modal;
use atelier_shared::{CompletedOrderDetail, format_ksh};
use leptos::prelude::*;

/// 已完成作品详情
#[component]
pub fn WorkModal(open: RwSignal<bool>, work: RwSignal<Option<CompletedOrderDetail>>) -> impl IntoView {
    view! {
        <Modal open=open class="max-w-3xl">
            {move || {
                work.get().map(|w| {
                    let picture = w.picture.clone().or_else(|| w.reference_image.clone());
                    view! {
                        {picture.map(|src| view! {
                            <figure class="-mx-6 -mt-6 mb-4">
                                <img src=src alt=w.service_name.clone() class="w-full max-h-96 object-cover" />
                            </figure>
                        })}
                        <h3 class="font-bold text-2xl">{w.service_name.clone()}</h3>
                        <p class="py-4 whitespace-pre-line">{w.details.clone()}</p>
                        <div class="grid grid-cols-2 gap-2 text-sm">
                            <span class="text-base-content/60">"Material"</span>
                            <span>{w.material_type.clone()}</span>
                            <span class="text-base-content/60">"Fabric provided"</span>
                            <span>{if w.fabric_required { "Yes" } else { "No" }}</span>
                            <span class="text-base-content/60">"Charges"</span>
                            <span>{format_ksh(w.charges)}</span>
                            <span class="text-base-content/60">"Completed"</span>
                            <span>{w.created_at.display_date()}</span>
                        </div>
                    }
                })
            }}
        </Modal>
    }
}
