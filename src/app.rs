mod card;
mod icons;
mod landing;
mod social;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{components::*, path};

use crate::config::PageConfig;

pub use card::ContentCard;
pub use landing::LandingPage;
pub use social::{SocialIcon, SocialLinks};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="pt-BR">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <meta name="color-scheme" content="dark" />
                <link rel="stylesheet" id="leptos" href="/pkg/link-page.css" />
                <MetaTags />
            </head>
            <body class="bg-[#0d1117] antialiased">
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    let config = PageConfig::default();
    let title = config.display_name.clone();
    let description = config.bio.join(" ");

    view! {
        <Title text=title />
        <Meta name="description" content=description />

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route
                    path=path!("/")
                    view=move || view! { <LandingPage config=config.clone() /> }
                />
            </Routes>
        </Router>
    }
}
