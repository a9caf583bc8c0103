use leptos::{either::Either, prelude::*};

use crate::config::PageConfig;
use crate::device::DeviceMessage;
use crate::geo::GeoStatus;

use super::card::ContentCard;
use super::icons::{CheckIcon, UserIcon};
use super::social::SocialLinks;

/// The whole link page. Owns the location status and the device message;
/// both are filled in by client-side effects after hydration.
#[component]
pub fn LandingPage(config: PageConfig) -> impl IntoView {
    let (geo, set_geo) = signal(GeoStatus::default());
    let (device, set_device) = signal(DeviceMessage::default());

    #[cfg(feature = "hydrate")]
    client::spawn_effects(&config, set_geo, set_device);
    #[cfg(not(feature = "hydrate"))]
    let _ = (set_geo, set_device);

    let footer = config.footer_text();
    let PageConfig {
        hero_image_url,
        display_name,
        handle,
        bio,
        social_links,
        content_cards,
        ..
    } = config;

    let bio = bio
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            view! {
                {(i > 0).then(|| view! { <br /> })}
                {line}
            }
        })
        .collect_view();

    view! {
        <div class="min-h-screen bg-[#0d1117] text-white flex flex-col items-center overflow-x-hidden pb-12">
            <div class="w-full max-w-[430px] relative flex flex-col items-center">
                <div class="absolute top-4 right-6 z-30">
                    <div class="w-9 h-9 bg-white/10 backdrop-blur-md rounded-full flex items-center justify-center border border-white/5 shadow-lg transition-all active:scale-95">
                        <UserIcon class="w-5 h-5 text-white/90" />
                    </div>
                </div>

                <div class="relative w-full aspect-[4/5] overflow-hidden">
                    <img
                        src=hero_image_url
                        alt=display_name.clone()
                        class="w-full h-full object-cover"
                    />
                    <div class="absolute top-0 left-0 w-full h-32 bg-gradient-to-b from-[#0d1117]/60 to-transparent"></div>
                    <div class="absolute inset-x-0 bottom-0 bg-gradient-to-t from-[#0d1117] from-20% via-[#0d1117]/85 via-60% to-transparent pt-64 pb-8 px-6 flex flex-col items-center text-center">
                        <div class="flex items-center gap-1.5 mb-1.5">
                            <h1 class="text-[24px] font-bold tracking-tight">{display_name}</h1>
                            <span class="verified-badge shadow-[0_0_10px_rgba(88,101,242,0.5)]">
                                <CheckIcon class="w-3.5 h-3.5 text-white" />
                            </span>
                        </div>
                        <p class="text-zinc-500 text-[15px] font-medium mb-8">{handle}</p>
                        <SocialLinks links=social_links />
                    </div>
                </div>

                <div class="w-full px-6 flex flex-col items-center gap-4 mt-2">
                    <StatusPill status=geo />
                    <div class="flex flex-col items-center text-center px-6">
                        <p class="text-[15px] text-zinc-400 font-medium leading-snug italic">
                            {bio}
                        </p>
                    </div>
                </div>

                <div class="w-full px-5 mt-4 mb-6 text-center">
                    <p class=move || {
                        format!(
                            "text-[13px] italic {} min-h-[1.2rem] transition-all duration-1000",
                            device.get().class,
                        )
                    }>{move || device.get().text}</p>
                </div>

                <div class="w-full flex flex-col mb-4">
                    {content_cards
                        .into_iter()
                        .map(|card| view! { <ContentCard card /> })
                        .collect_view()}
                </div>

                <footer class="w-full px-6 py-12 flex flex-col items-center border-t border-white/5">
                    <p class="text-[11px] text-zinc-600 font-bold tracking-[0.2em] uppercase">
                        {footer}
                    </p>
                </footer>
            </div>
        </div>
    }
}

/// "Online now in ..." pill; hidden until the lookup settles.
#[component]
fn StatusPill(status: ReadSignal<GeoStatus>) -> impl IntoView {
    let pill_class = move || {
        let visibility = if status.with(GeoStatus::is_settled) {
            "opacity-100 scale-100"
        } else {
            "opacity-0 scale-95"
        };
        format!(
            "flex items-center gap-2.5 bg-zinc-900/40 px-3.5 py-1.5 rounded-full border border-white/5 transition-all duration-700 {visibility}"
        )
    };
    let dot_class = move || {
        let colour = if status.with(GeoStatus::is_unavailable) {
            "bg-zinc-600"
        } else {
            "bg-green-500"
        };
        format!("animate-status-pulse relative inline-flex rounded-full h-2 w-2 {colour}")
    };

    view! {
        <div class=pill_class>
            <div class="relative flex h-2 w-2">
                <span class=dot_class></span>
            </div>
            <span class="text-[11px] font-bold text-zinc-500 uppercase tracking-widest leading-none">
                {move || {
                    let status = status.get();
                    if status.is_unavailable() {
                        Either::Left(view! { <span>"Localização indisponível"</span> })
                    } else {
                        let label = status.label().unwrap_or("...").to_string();
                        Either::Right(
                            view! {
                                <span>
                                    "Online agora em: " <span class="text-white">{label}</span>
                                </span>
                            },
                        )
                    }
                }}
            </span>
        </div>
    }
}

#[cfg(feature = "hydrate")]
mod client {
    use futures::future::{AbortHandle, Abortable, Aborted};
    use leptos::{prelude::*, task::spawn_local};

    use crate::config::PageConfig;
    use crate::device::{device_message, DeviceMessage};
    use crate::geo::{locate, GeoStatus, IpWhoIs};

    /// Starts the two one-shot browser effects: user-agent classification
    /// and the geolocation lookup.
    pub fn spawn_effects(
        config: &PageConfig,
        set_geo: WriteSignal<GeoStatus>,
        set_device: WriteSignal<DeviceMessage>,
    ) {
        Effect::new(move |_| {
            match web_sys::window().map(|w| w.navigator().user_agent()) {
                Some(Ok(ua)) => set_device.set(device_message(&ua)),
                Some(Err(err)) => log::warn!("couldn't read user agent: {err:?}"),
                None => log::warn!("no window to read user agent from"),
            }
        });

        let endpoint = config.geo_endpoint.clone();
        let policy = config.retry_policy();
        Effect::new(move |_| {
            // pending retries must not outlive the page
            let (abort, registration) = AbortHandle::new_pair();
            on_cleanup(move || abort.abort());

            let source = IpWhoIs::new(endpoint.clone());
            spawn_local(async move {
                let lookup = locate(&source, policy, gloo_timers::future::sleep);
                match Abortable::new(lookup, registration).await {
                    Ok(result) => set_geo.update(|status| status.apply(result)),
                    Err(Aborted) => log::debug!("location lookup cancelled"),
                }
            });
        });
    }
}
