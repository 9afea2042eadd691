use crate::components::icons::{Eye, Pencil, Trash2};
use crate::orders::OrderBook;
use atelier_shared::{OrderStatus, format_ksh};
use leptos::prelude::*;

pub fn status_badge_class(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Completed => "badge badge-success",
        OrderStatus::InProgress => "badge badge-warning",
        OrderStatus::Cancelled => "badge badge-error",
        OrderStatus::Pending => "badge badge-ghost",
    }
}

/// 订单列表；编辑与删除只对 Pending 订单显示
#[component]
pub fn OrderTable(
    book: RwSignal<OrderBook>,
    loading: Signal<bool>,
    #[prop(into)] on_view: Callback<u64>,
    #[prop(into)] on_edit: Callback<u64>,
    #[prop(into)] on_delete: Callback<u64>,
) -> impl IntoView {
    let is_empty = move || book.with(OrderBook::is_empty);

    view! {
        <div class="overflow-x-auto w-full">
            <table class="table table-zebra w-full">
                <thead>
                    <tr>
                        <th>"#"</th>
                        <th>"Service"</th>
                        <th class="hidden md:table-cell">"Quantity"</th>
                        <th class="hidden md:table-cell">"Charges"</th>
                        <th>"Status"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || is_empty() && !loading.get()>
                        <tr>
                            <td colspan="6" class="text-center py-8 text-base-content/50">
                                "No orders yet. Place one to get started."
                            </td>
                        </tr>
                    </Show>
                    <Show when=move || is_empty() && loading.get()>
                        <tr>
                            <td colspan="6" class="text-center py-8 text-base-content/50">
                                <span class="loading loading-spinner loading-md"></span> " Loading..."
                            </td>
                        </tr>
                    </Show>
                    <For
                        each=move || book.get().orders
                        key=|o| (o.id, o.status.label(), o.quantity, o.service_name.clone())
                        children=move |order| {
                            let id = order.id;
                            let actions = order.status.is_editable().then(|| view! {
                                <button class="btn btn-ghost btn-sm btn-square" title="Edit" on:click=move |_| on_edit.run(id)>
                                    <Pencil attr:class="h-4 w-4" />
                                </button>
                                <button class="btn btn-ghost btn-sm btn-square text-error" title="Delete" on:click=move |_| on_delete.run(id)>
                                    <Trash2 attr:class="h-4 w-4" />
                                </button>
                            });
                            view! {
                                <tr>
                                    <td class="font-mono text-sm">{id}</td>
                                    <td class="font-semibold">{order.service_name.clone()}</td>
                                    <td class="hidden md:table-cell">{order.quantity}</td>
                                    <td class="hidden md:table-cell">
                                        {order.charges.map(format_ksh).unwrap_or_else(|| "Pending quote".to_string())}
                                    </td>
                                    <td>
                                        <span class=status_badge_class(order.status)>{order.status.label()}</span>
                                    </td>
                                    <td>
                                        <div class="flex justify-end gap-1">
                                            <button class="btn btn-ghost btn-sm btn-square" title="View" on:click=move |_| on_view.run(id)>
                                                <Eye attr:class="h-4 w-4" />
                                            </button>
                                            {actions}
                                        </div>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}
