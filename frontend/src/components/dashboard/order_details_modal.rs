use super::order_table::status_badge_class;
use crate::components::modal::Modal;
use atelier_shared::{OrderDetails, format_ksh};
use leptos::prelude::*;

#[component]
pub fn OrderDetailsModal(open: RwSignal<bool>, order: RwSignal<Option<OrderDetails>>) -> impl IntoView {
    view! {
        <Modal open=open class="max-w-2xl">
            {move || {
                order.get().map(|o| {
                    let charges = o.charges.map(format_ksh).unwrap_or_else(|| "Pending quote".into());
                    let balance = o.balance().map(format_ksh).unwrap_or_else(|| "-".into());
                    let image = o.picture.clone().or_else(|| o.reference_image.clone());
                    view! {
                        <h3 class="font-bold text-lg flex items-center gap-3">
                            {format!("Order #{}", o.id)}
                            <span class=status_badge_class(o.status)>{o.status.label()}</span>
                        </h3>
                        {image.map(|src| view! {
                            <img src=src alt="Order reference" class="rounded-box max-h-64 w-full object-cover my-4" />
                        })}
                        <p class="py-2 whitespace-pre-line">{o.details.clone()}</p>
                        <div class="grid grid-cols-2 gap-2 text-sm">
                            <span class="text-base-content/60">"Service"</span>
                            <span>{o.service_name.clone()}</span>
                            <span class="text-base-content/60">"Material"</span>
                            <span>{o.material_type.as_str()}</span>
                            <span class="text-base-content/60">"Fabric provided by us"</span>
                            <span>{if o.fabric_required { "Yes" } else { "No" }}</span>
                            <span class="text-base-content/60">"Quantity"</span>
                            <span>{o.quantity}</span>
                            <span class="text-base-content/60">"Colors"</span>
                            <span>{o.colors.clone().unwrap_or_else(|| "-".into())}</span>
                            <span class="text-base-content/60">"Urgency"</span>
                            <span>{o.urgency.as_str()}</span>
                            <span class="text-base-content/60">"Charges"</span>
                            <span>{charges}</span>
                            <span class="text-base-content/60">"Paid"</span>
                            <span>{format_ksh(o.charges_paid)}</span>
                            <span class="text-base-content/60">"Balance"</span>
                            <span>{balance}</span>
                            <span class="text-base-content/60">"Placed"</span>
                            <span>{o.created_at.display_date()}</span>
                            <span class="text-base-content/60">"Last updated"</span>
                            <span>{o.updated_at.display_date()}</span>
                        </div>
                    }
                })
            }}
        </Modal>
    }
}
