use crate::components::modal::Modal;
use atelier_shared::ServiceOffered;
use leptos::prelude::*;

/// 服务详情（数据来自已加载的服务列表，不发请求）
#[component]
pub fn ServiceModal(open: RwSignal<bool>, service: RwSignal<Option<ServiceOffered>>) -> impl IntoView {
    view! {
        <Modal open=open class="max-w-2xl">
            {move || {
                service
                    .get()
                    .map(|s| {
                        let price = s.price_range();
                        view! {
                            <figure class="-mx-6 -mt-6 mb-4">
                                <img src=s.picture alt=s.name.clone() class="w-full h-64 object-cover" />
                            </figure>
                            <h3 class="font-bold text-2xl">{s.name}</h3>
                            <p class="py-4 text-base-content/80 whitespace-pre-line">{s.description}</p>
                            <div class="badge badge-primary badge-lg">{price}</div>
                        }
                    })
            }}
        </Modal>
    }
}
