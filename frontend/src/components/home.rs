//! 首页
//!
//! 五个内容接口并发加载，每个分区只依赖自己的结果。

use crate::auth::use_session;
use crate::components::icons::*;
use crate::components::service_modal::ServiceModal;
use crate::components::toast::use_toaster;
use crate::components::work_modal::WorkModal;
use crate::content::{HomeContent, load_home};
use crate::web::window::{current_hash, scroll_to_section};
use atelier_shared::{
    BusinessAbout, ContactMessage, Faq, ServiceOffered, ShallowCompletedOrder, UserFeedback,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = use_session();
    let content = RwSignal::new(Option::<HomeContent>::None);

    spawn_local(async move {
        let loaded = load_home(&session.api()).await;
        content.set(Some(loaded));
        if let Some(id) = current_hash() {
            request_animation_frame(move || scroll_to_section(&id));
        }
    });

    let about = Signal::derive(move || content.with(|c| c.as_ref().and_then(|c| c.about.clone())));
    let services = Signal::derive(move || {
        content.with(|c| c.as_ref().and_then(|c| c.services.clone()).unwrap_or_default())
    });
    let latest_work = Signal::derive(move || {
        content.with(|c| c.as_ref().and_then(|c| c.latest_work.clone()).unwrap_or_default())
    });
    let feedbacks = Signal::derive(move || {
        content.with(|c| c.as_ref().and_then(|c| c.feedbacks.clone()).unwrap_or_default())
    });
    let faqs = Signal::derive(move || {
        content.with(|c| c.as_ref().and_then(|c| c.faqs.clone()).unwrap_or_default())
    });

    view! {
        <Show
            when=move || content.with(Option::is_some)
            fallback=|| view! {
                <div class="flex items-center justify-center min-h-[60vh]">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
        >
            <Hero about=about />
            <ServicesSection services=services />
            <WorkSection latest_work=latest_work />
            <TestimonialsSection feedbacks=feedbacks />
            <FaqSection faqs=faqs />
            <ContactSection about=about />
        </Show>
    }
}

#[component]
fn Hero(about: Signal<Option<BusinessAbout>>) -> impl IntoView {
    move || {
        about.get().map(|a| {
            let style = a
                .wallpaper
                .clone()
                .map(|w| format!("background-image: url({});", w))
                .unwrap_or_default();
            view! {
                <section class="hero min-h-[70vh] bg-cover bg-center" style=style>
                    <div class="hero-overlay bg-opacity-60"></div>
                    <div class="hero-content text-center text-neutral-content">
                        <div class="max-w-2xl">
                            {a.logo.clone().map(|logo| view! {
                                <img src=logo alt=a.short_name.clone() class="mx-auto h-24 mb-4" />
                            })}
                            <h1 class="mb-5 text-5xl font-bold">{a.name.clone()}</h1>
                            <p class="mb-5 text-xl italic">{a.slogan.clone()}</p>
                            <p class="mb-5 whitespace-pre-line">{a.details.clone()}</p>
                            <p class="text-sm opacity-80">"Since " {a.founded_in.clone()}</p>
                        </div>
                    </div>
                </section>
            }
        })
    }
}

#[component]
fn ServicesSection(services: Signal<Vec<ServiceOffered>>) -> impl IntoView {
    let open = RwSignal::new(false);
    let selected = RwSignal::new(Option::<ServiceOffered>::None);

    view! {
        <section id="services" class="py-16 px-4 max-w-7xl mx-auto">
            <h2 class="text-3xl font-bold text-center mb-10">"Our Services"</h2>
            <div class="grid gap-6 sm:grid-cols-2 lg:grid-cols-3">
                <For
                    each=move || services.get()
                    key=|s| s.name.clone()
                    children=move |service| {
                        let price = service.price_range();
                        let picked = service.clone();
                        view! {
                            <div
                                class="card bg-base-100 shadow-xl cursor-pointer hover:shadow-2xl transition"
                                on:click=move |_| {
                                    selected.set(Some(picked.clone()));
                                    open.set(true);
                                }
                            >
                                <figure>
                                    <img src=service.picture.clone() alt=service.name.clone() class="h-48 w-full object-cover" />
                                </figure>
                                <div class="card-body">
                                    <h3 class="card-title">{service.name.clone()}</h3>
                                    <p class="line-clamp-3 text-base-content/70">{service.description.clone()}</p>
                                    <div class="card-actions justify-end">
                                        <span class="badge badge-outline">{price}</span>
                                    </div>
                                </div>
                            </div>
                        }
                    }
                />
            </div>
            <ServiceModal open=open service=selected />
        </section>
    }
}

#[component]
fn WorkSection(latest_work: Signal<Vec<ShallowCompletedOrder>>) -> impl IntoView {
    let session = use_session();
    let toaster = use_toaster();
    let open = RwSignal::new(false);
    let detail = RwSignal::new(None);

    let show_work = move |id: u64| {
        spawn_local(async move {
            match session.api().latest_work_detail(id).await {
                Ok(work) => {
                    detail.set(Some(work));
                    open.set(true);
                }
                Err(e) => toaster.error(e.user_message("Failed to load data")),
            }
        });
    };

    view! {
        <section id="work" class="py-16 px-4 bg-base-100">
            <div class="max-w-7xl mx-auto">
                <h2 class="text-3xl font-bold text-center mb-10">"Our Latest Work"</h2>
                <div class="grid gap-4 grid-cols-2 md:grid-cols-4">
                    <For
                        each=move || latest_work.get()
                        key=|w| w.id
                        children=move |work| {
                            let id = work.id;
                            view! {
                                <button class="aspect-square overflow-hidden rounded-box" on:click=move |_| show_work(id)>
                                    <img src=work.picture alt="Completed work" class="h-full w-full object-cover hover:scale-105 transition" />
                                </button>
                            }
                        }
                    />
                </div>
            </div>
            <WorkModal open=open work=detail />
        </section>
    }
}

#[component]
fn Stars(count: u8) -> impl IntoView {
    view! {
        <div class="flex gap-1 text-warning">
            {(1..=5u8)
                .map(|i| {
                    let class = if i <= count { "h-4 w-4 fill-current" } else { "h-4 w-4 opacity-30" };
                    view! { <Star attr:class=class /> }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn TestimonialsSection(feedbacks: Signal<Vec<UserFeedback>>) -> impl IntoView {
    view! {
        <section id="testimonials" class="py-16 px-4 max-w-7xl mx-auto">
            <h2 class="text-3xl font-bold text-center mb-10">"What Our Clients Say"</h2>
            <div class="grid gap-6 md:grid-cols-3">
                <For
                    each=move || feedbacks.get()
                    key=|f| f.id
                    children=move |feedback| {
                        let initial = feedback.user.display_name().chars().next().unwrap_or('?');
                        view! {
                            <div class="card bg-base-100 shadow">
                                <div class="card-body">
                                    <Stars count=feedback.rate.stars() />
                                    <p class="italic">"“" {feedback.message.clone()} "”"</p>
                                    <div class="flex items-center gap-3 mt-4">
                                        {match feedback.user.profile.clone() {
                                            Some(src) => view! {
                                                <div class="avatar"><div class="w-10 rounded-full"><img src=src alt="" /></div></div>
                                            }.into_any(),
                                            None => view! {
                                                <div class="avatar placeholder">
                                                    <div class="bg-neutral text-neutral-content w-10 rounded-full">
                                                        <span>{initial.to_string()}</span>
                                                    </div>
                                                </div>
                                            }.into_any(),
                                        }}
                                        <div>
                                            <p class="font-semibold">{feedback.user.display_name()}</p>
                                            <p class="text-xs text-base-content/60">{feedback.user.role.clone()}</p>
                                        </div>
                                    </div>
                                </div>
                            </div>
                        }
                    }
                />
            </div>
        </section>
    }
}

#[component]
fn FaqSection(faqs: Signal<Vec<Faq>>) -> impl IntoView {
    view! {
        <section id="faq" class="py-16 px-4 bg-base-100">
            <div class="max-w-3xl mx-auto space-y-2">
                <h2 class="text-3xl font-bold text-center mb-10">"Frequently Asked Questions"</h2>
                {move || {
                    faqs.get()
                        .into_iter()
                        .enumerate()
                        .map(|(i, faq)| view! {
                            <div class="collapse collapse-arrow bg-base-200">
                                <input type="radio" name="faq-accordion" checked={i == 0} />
                                <div class="collapse-title font-medium">{faq.question}</div>
                                <div class="collapse-content whitespace-pre-line"><p>{faq.answer}</p></div>
                            </div>
                        })
                        .collect_view()
                }}
            </div>
        </section>
    }
}

#[component]
fn ContactSection(about: Signal<Option<BusinessAbout>>) -> impl IntoView {
    let session = use_session();
    let toaster = use_toaster();
    let sender = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let body = RwSignal::new(String::new());
    let sending = RwSignal::new(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let message = ContactMessage {
            sender: sender.get(),
            email: email.get(),
            body: body.get(),
        };
        sending.set(true);
        spawn_local(async move {
            match session.api().send_message(&message).await {
                Ok(detail) => {
                    toaster.success(detail);
                    sender.set(String::new());
                    email.set(String::new());
                    body.set(String::new());
                }
                Err(e) => toaster.error(e.user_message("Failed to send message")),
            }
            sending.set(false);
        });
    };

    view! {
        <section id="contact" class="py-16 px-4 max-w-7xl mx-auto">
            <h2 class="text-3xl font-bold text-center mb-10">"Get In Touch"</h2>
            <div class="grid gap-8 md:grid-cols-2">
                <div class="space-y-4">
                    {move || about.get().map(|a| view! {
                        <p class="flex items-center gap-2"><MapPin attr:class="h-5 w-5 text-primary" /> {a.address.clone()}</p>
                        {a.phone_number.clone().map(|p| view! {
                            <p class="flex items-center gap-2"><Phone attr:class="h-5 w-5 text-primary" /> {p}</p>
                        })}
                        {a.email.clone().map(|m| view! {
                            <p class="flex items-center gap-2"><Mail attr:class="h-5 w-5 text-primary" /> {m}</p>
                        })}
                        <p class="flex items-start gap-2 whitespace-pre-line">
                            <Clock attr:class="h-5 w-5 text-primary" /> {a.business_hours.clone().unwrap_or_default()}
                        </p>
                    })}
                </div>
                <form class="card bg-base-100 shadow-xl card-body space-y-2" on:submit=on_submit>
                    <input
                        type="text"
                        placeholder="Your name"
                        class="input input-bordered w-full"
                        required
                        on:input=move |ev| sender.set(event_target_value(&ev))
                        prop:value=move || sender.get()
                    />
                    <input
                        type="email"
                        placeholder="Your email"
                        class="input input-bordered w-full"
                        required
                        on:input=move |ev| email.set(event_target_value(&ev))
                        prop:value=move || email.get()
                    />
                    <textarea
                        placeholder="Your message"
                        class="textarea textarea-bordered w-full h-32"
                        required
                        on:input=move |ev| body.set(event_target_value(&ev))
                        prop:value=move || body.get()
                    ></textarea>
                    <button class="btn btn-primary gap-2" disabled=move || sending.get()>
                        {move || if sending.get() {
                            view! { <span class="loading loading-spinner"></span> "Sending..." }.into_any()
                        } else {
                            view! { <Send attr:class="h-4 w-4" /> "Send Message" }.into_any()
                        }}
                    </button>
                </form>
            </div>
        </section>
    }
}
