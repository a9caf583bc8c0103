use leptos::{either::EitherOf3, prelude::*};

use crate::config::{Platform, SocialLink};

use super::icons::{InstagramIcon, TelegramIcon, TikTokIcon};

/// Round social-media link with the platform's colours and glyph.
#[component]
pub fn SocialIcon(link: SocialLink) -> impl IntoView {
    let SocialLink { platform, href } = link;
    let class = format!(
        "w-[46px] h-[46px] {} {} rounded-full flex items-center justify-center transition-all duration-300 active:scale-95 shadow-lg hover:brightness-110 social-icon-hover",
        platform.background_class(),
        platform.glow_class(),
    );
    view! {
        <a href=href aria-label=platform.label() class=class>
            {match platform {
                Platform::Instagram => {
                    EitherOf3::A(view! { <InstagramIcon class="w-6 h-6 text-white" /> })
                }
                Platform::TikTok => EitherOf3::B(view! { <TikTokIcon class="w-6 h-6" /> }),
                Platform::Telegram => {
                    EitherOf3::C(view! { <TelegramIcon class="w-6 h-6 text-white" /> })
                }
            }}
        </a>
    }
}

#[component]
pub fn SocialLinks(links: Vec<SocialLink>) -> impl IntoView {
    view! {
        <div class="flex items-center gap-4">
            {links.into_iter().map(|link| view! { <SocialIcon link /> }).collect_view()}
        </div>
    }
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use super::*;

    fn render(link: SocialLink) -> String {
        Owner::new().with(|| view! { <SocialIcon link /> }.to_html())
    }

    #[test]
    fn test_platform_treatment() {
        let html = render(SocialLink::new(Platform::Telegram, "https://t.me/someone"));
        assert!(html.contains(r#"href="https://t.me/someone""#));
        assert!(html.contains(r#"aria-label="Telegram""#));
        assert!(html.contains("bg-[#0088CC]"));
        assert!(html.contains("glow-telegram"));
        assert!(html.contains("<svg"));

        let html = render(SocialLink::new(Platform::Instagram, "#"));
        assert!(html.contains("instagram-gradient"));
        assert!(html.contains("glow-insta"));
        assert!(!html.contains("glow-telegram"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let link = SocialLink::new(Platform::TikTok, "#");
        assert_eq!(render(link.clone()), render(link));
    }
}
