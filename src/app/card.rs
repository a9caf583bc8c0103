use leptos::prelude::*;

use crate::config::ContentCardConfig;

use super::icons::ChevronRightIcon;

#[component]
pub fn ContentCard(card: ContentCardConfig) -> impl IntoView {
    let ContentCardConfig {
        href,
        label,
        title,
        emoji,
    } = card;
    view! {
        <div class="w-full px-5 mb-4">
            <a href=href class="group block w-full outline-none">
                <div class="relative w-full py-4 px-4 bg-white/5 backdrop-blur-xl rounded-[24px] border border-white/10 flex items-center gap-4 shadow-xl transition-all duration-500 group-hover:bg-white/10 group-hover:border-white/20 group-active:scale-[0.98]">
                    <div class="w-14 h-14 bg-white/5 rounded-[18px] flex items-center justify-center border border-white/5 group-hover:border-white/15 transition-all duration-500">
                        <span class="text-2xl drop-shadow-lg group-hover:scale-110 transition-transform duration-500">
                            {emoji}
                        </span>
                    </div>
                    <div class="flex-1 flex flex-col justify-center gap-0.5">
                        <span class="text-[11px] font-bold text-[#EAB308] uppercase tracking-[0.1em] opacity-90 group-hover:opacity-100">
                            {label}
                        </span>
                        <h2 class="text-white text-[16px] font-bold tracking-tight drop-shadow-sm">
                            {title}
                        </h2>
                    </div>
                    <div class="pr-2 opacity-30 group-hover:opacity-60 group-hover:translate-x-1 transition-all duration-500">
                        <ChevronRightIcon class="w-5 h-5 text-white" />
                    </div>
                    <div class="absolute inset-0 rounded-[24px] bg-white/2 opacity-0 group-hover:opacity-100 transition-opacity duration-500 pointer-events-none -z-10"></div>
                </div>
            </a>
        </div>
    }
}
