use leptos::prelude::*;

// Stroke icons follow the lucide 24x24 grid.

#[component]
pub fn InstagramIcon(class: &'static str) -> impl IntoView {
    view! {
        <svg
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            class=class
        >
            <rect width="20" height="20" x="2" y="2" rx="5" ry="5" />
            <path d="M16 11.37A4 4 0 1 1 12.63 8 4 4 0 0 1 16 11.37z" />
            <line x1="17.5" x2="17.51" y1="6.5" y2="6.5" />
        </svg>
    }
}

#[component]
pub fn TikTokIcon(class: &'static str) -> impl IntoView {
    view! {
        <svg viewBox="0 0 24 24" fill="currentColor" class=class>
            <path d="M19.59 6.69a4.83 4.83 0 0 1-3.77-4.25V2h-3.45v13.67a2.89 2.89 0 0 1-5.2 1.74 2.89 2.89 0 0 1 2.31-4.64 2.93 2.93 0 0 1 .88.13V9.4a6.84 6.84 0 0 0-1-.05A6.33 6.33 0 0 0 5 20.1a6.34 6.34 0 0 0 10.86-4.43v-7a8.16 8.16 0 0 0 4.77 1.52v-3.4a4.85 4.85 0 0 1-1.04-.1z" />
        </svg>
    }
}

#[component]
pub fn TelegramIcon(class: &'static str) -> impl IntoView {
    view! {
        <svg viewBox="0 0 24 24" fill="currentColor" class=class>
            <path d="M19.333 4.606l-16.712 6.447c-1.138.456-1.131 1.092-.208 1.375l4.288 1.338 9.923-6.258c.469-.285.899-.132.546.182l-8.04 7.252-.312 4.673c.458 0 .66-.21.916-.458l2.198-2.138 4.57 3.376c.843.465 1.448.226 1.658-.785l2.997-14.127c.307-1.233-.473-1.794-1.282-1.43z" />
        </svg>
    }
}

#[component]
pub fn UserIcon(class: &'static str) -> impl IntoView {
    view! {
        <svg
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            class=class
        >
            <path d="M19 21v-2a4 4 0 0 0-4-4H9a4 4 0 0 0-4 4v2" />
            <circle cx="12" cy="7" r="4" />
        </svg>
    }
}

#[component]
pub fn CheckIcon(class: &'static str) -> impl IntoView {
    view! {
        <svg
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="4"
            stroke-linecap="round"
            stroke-linejoin="round"
            class=class
        >
            <path d="M20 6 9 17l-5-5" />
        </svg>
    }
}

#[component]
pub fn ChevronRightIcon(class: &'static str) -> impl IntoView {
    view! {
        <svg
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            class=class
        >
            <path d="m9 18 6-6-6-6" />
        </svg>
    }
}
