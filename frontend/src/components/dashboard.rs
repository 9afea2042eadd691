//! 用户控制面板：订单、资料、身体尺寸

mod measurements_form;
mod order_details_modal;
mod order_form;
mod order_table;
mod profile_form;

use crate::auth::use_session;
use crate::components::icons::*;
use crate::components::toast::use_toaster;
use crate::content::{LOAD_FAILED, load_dashboard};
use crate::orders::{OrderBook, OrderChange, begin_edit, delete_order, view_order};
use crate::web::window::BrowserConfirm;
use atelier_shared::{OrderStatus, ServiceOffered, UserMeasurements};
use leptos::prelude::*;
use leptos::task::spawn_local;

use measurements_form::MeasurementsForm;
use order_details_modal::OrderDetailsModal;
use order_form::{OrderForm, OrderFormState};
use order_table::OrderTable;
use profile_form::ProfileForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Orders,
    Profile,
    Measurements,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Orders, Tab::Profile, Tab::Measurements];

    fn title(&self) -> &'static str {
        match self {
            Tab::Orders => "Orders",
            Tab::Profile => "Profile",
            Tab::Measurements => "Measurements",
        }
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session();

    view! {
        <Show
            when=move || session.is_authenticated()
            fallback=move || session.is_loading().then(|| view! {
                <div class="flex items-center justify-center min-h-[60vh]">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            })
        >
            <Dashboard />
        </Show>
    }
}

#[component]
fn Dashboard() -> impl IntoView {
    let session = use_session();
    let toaster = use_toaster();

    let book = RwSignal::new(OrderBook::default());
    let services = RwSignal::new(Vec::<ServiceOffered>::new());
    let measurements = RwSignal::new(UserMeasurements::default());
    let loading = RwSignal::new(true);
    let tab = RwSignal::new(Tab::Orders);

    let form_state = OrderFormState::new();
    let form_open = RwSignal::new(false);
    let details_open = RwSignal::new(false);
    let details = RwSignal::new(None);

    // 初始加载：四个接口并发，各自独立生效
    spawn_local(async move {
        let data = load_dashboard(&session.api()).await;
        if let Some(profile) = data.profile.clone() {
            session.set_profile(profile);
        }
        if let Some(m) = data.measurements.clone() {
            measurements.set(m);
        }
        if let Some(orders) = data.orders.clone() {
            book.set(OrderBook::new(orders));
        }
        if let Some(list) = data.services.clone() {
            services.set(list);
        }
        if data.has_failures() {
            toaster.error(LOAD_FAILED);
        }
        loading.set(false);
    });

    let apply_change = move |change: OrderChange| book.update(|b| b.apply(change));

    let open_new = move |_| {
        form_state.reset();
        form_open.set(true);
    };

    let on_view = move |id: u64| {
        spawn_local(async move {
            match view_order(&session.api(), id).await {
                Ok(order) => {
                    details.set(Some(order));
                    details_open.set(true);
                }
                Err(e) => toaster.error(e.user_message("Failed to load order details")),
            }
        });
    };

    let on_edit = move |id: u64| {
        spawn_local(async move {
            match begin_edit(&session.api(), id).await {
                Ok(draft) => {
                    form_state.load(draft);
                    form_state.editing.set(Some(id));
                    form_open.set(true);
                }
                Err(e) => toaster.error(e.user_message("Failed to load order details")),
            }
        });
    };

    let on_delete = move |id: u64| {
        spawn_local(async move {
            match delete_order(&session.api(), id, &BrowserConfirm).await {
                Ok(Some(change)) => {
                    apply_change(change);
                    toaster.success("Order deleted successfully");
                }
                Ok(None) => {}
                Err(e) => toaster.error(e.user_message("Failed to delete order")),
            }
        });
    };

    let count_status = move |status: OrderStatus| {
        book.with(|b| b.orders.iter().filter(|o| o.status == status).count())
    };
    let greeting = move || {
        session
            .profile()
            .map(|p| format!("Welcome, {}", p.display_name()))
            .unwrap_or_default()
    };

    view! {
        <div class="p-4 md:p-8">
            <div class="max-w-7xl mx-auto space-y-8">
                <div class="flex flex-wrap items-center justify-between gap-4">
                    <div>
                        <h1 class="text-3xl font-bold">{greeting}</h1>
                        <p class="text-base-content/70">"Manage your orders, profile and measurements."</p>
                    </div>
                    <button class="btn btn-primary gap-2" on:click=open_new>
                        <Plus attr:class="h-4 w-4" /> "New Order"
                    </button>
                </div>

                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <div class="stat">
                        <div class="stat-figure text-primary"><ShoppingBag attr:class="h-8 w-8" /></div>
                        <div class="stat-title">"Total Orders"</div>
                        <div class="stat-value text-primary">{move || book.with(|b| b.orders.len())}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"Pending"</div>
                        <div class="stat-value">{move || count_status(OrderStatus::Pending)}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"In Progress"</div>
                        <div class="stat-value text-warning">{move || count_status(OrderStatus::InProgress)}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"Completed"</div>
                        <div class="stat-value text-success">{move || count_status(OrderStatus::Completed)}</div>
                    </div>
                </div>

                <div role="tablist" class="tabs tabs-boxed bg-base-100 w-fit">
                    {Tab::ALL
                        .into_iter()
                        .map(|t| view! {
                            <a
                                role="tab"
                                class=move || if tab.get() == t { "tab tab-active" } else { "tab" }
                                on:click=move |_| tab.set(t)
                            >
                                {match t {
                                    Tab::Orders => view! { <ShoppingBag attr:class="h-4 w-4 mr-2" /> }.into_any(),
                                    Tab::Profile => view! { <User attr:class="h-4 w-4 mr-2" /> }.into_any(),
                                    Tab::Measurements => view! { <Ruler attr:class="h-4 w-4 mr-2" /> }.into_any(),
                                }}
                                {t.title()}
                            </a>
                        })
                        .collect_view()}
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        {move || match tab.get() {
                            Tab::Orders => view! {
                                <OrderTable
                                    book=book
                                    loading=loading.into()
                                    on_view=on_view
                                    on_edit=on_edit
                                    on_delete=on_delete
                                />
                            }
                            .into_any(),
                            Tab::Profile => view! { <ProfileForm /> }.into_any(),
                            Tab::Measurements => view! { <MeasurementsForm measurements=measurements /> }.into_any(),
                        }}
                    </div>
                </div>
            </div>

            <OrderForm state=form_state open=form_open services=services.into() on_change=apply_change />
            <OrderDetailsModal open=details_open order=details />
        </div>
    }
}
