use crate::components::admin_dashboard::AdminDashboard;
use crate::components::landing::Landing;
use crate::components::user_dashboard::UserDashboard;
use analysis_core::display::{BadgeVariant, TagIcon};
use analysis_core::roles::Role;
use leptos::*;

pub fn badge_class(variant: BadgeVariant) -> String {
    format!("badge {}", variant.css_class())
}

pub fn icon_glyph(icon: TagIcon) -> &'static str {
    match icon {
        TagIcon::Car => "\u{1F697}",
        TagIcon::Users => "\u{1F465}",
        TagIcon::Shield => "\u{1F6E1}",
        TagIcon::Moon => "\u{1F319}",
        TagIcon::Alert => "\u{26A0}",
    }
}

#[component]
pub fn App() -> impl IntoView {
    let path = window().location().pathname().unwrap_or_default();

    match Role::from_path(&path) {
        Some(Role::User) => view! { <UserDashboard/> }.into_view(),
        Some(Role::Admin) => view! { <AdminDashboard/> }.into_view(),
        None => view! { <Landing/> }.into_view(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_classes_follow_variants() {
        assert_eq!(badge_class(BadgeVariant::Destructive), "badge destructive");
        assert_eq!(badge_class(BadgeVariant::Outline), "badge outline");
    }

    #[test]
    fn every_icon_has_its_own_glyph() {
        let icons = [TagIcon::Alert, TagIcon::Car, TagIcon::Users, TagIcon::Shield, TagIcon::Moon];
        for (i, a) in icons.iter().enumerate() {
            for b in &icons[i + 1..] {
                assert_ne!(icon_glyph(*a), icon_glyph(*b));
            }
        }
    }
}
