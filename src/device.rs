use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

pub const DEFAULT_CLASS: &str = "text-zinc-500";
const HIGHLIGHT_CLASS: &str = "text-zinc-400 font-semibold";

/// Promotional line shown under the bio, with its tailwind classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceMessage {
    pub text: &'static str,
    pub class: &'static str,
}

impl Default for DeviceMessage {
    fn default() -> Self {
        Self {
            text: "",
            class: DEFAULT_CLASS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevicePlatform {
    Ios,
    Android,
}

#[derive(Debug)]
pub struct DeviceRule {
    pattern: Regex,
    pub platform: DevicePlatform,
    pub message: DeviceMessage,
}

impl DeviceRule {
    pub fn new(
        pattern: &str,
        platform: DevicePlatform,
        text: &'static str,
        class: &'static str,
    ) -> Result<Self, regex::Error> {
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self {
            pattern,
            platform,
            message: DeviceMessage { text, class },
        })
    }

    pub fn matches(&self, user_agent: &str) -> bool {
        self.pattern.is_match(user_agent)
    }
}

/// Built-in rules, evaluated in order.
pub static DEVICE_RULES: LazyLock<Vec<DeviceRule>> = LazyLock::new(|| {
    vec![
        DeviceRule::new(
            "iPhone|iPad|iPod",
            DevicePlatform::Ios,
            "💎 Conteúdo exclusivo em 4K pro seu iPhone.",
            HIGHLIGHT_CLASS,
        )
        .expect("iOS pattern should compile"),
        DeviceRule::new(
            "Android",
            DevicePlatform::Android,
            "🔥 App leve e discreto pro seu Android.",
            HIGHLIGHT_CLASS,
        )
        .expect("Android pattern should compile"),
    ]
});

/// First rule matching `user_agent`, if any.
pub fn classify_with<'a>(rules: &'a [DeviceRule], user_agent: &str) -> Option<&'a DeviceRule> {
    rules.iter().find(|rule| rule.matches(user_agent))
}

pub fn device_message(user_agent: &str) -> DeviceMessage {
    classify_with(&DEVICE_RULES, user_agent)
        .map(|rule| rule.message)
        .unwrap_or_default()
}
