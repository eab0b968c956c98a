//! Accepted share page and its empty state.

use qrfolio_core::html::escape;
use qrfolio_entity::settings::{
    DEFAULT_BACKGROUND_COLOR, DEFAULT_PRIMARY_COLOR, DEFAULT_SECONDARY_COLOR,
};
use qrfolio_service::page::PublicPage;
use qrfolio_service::settings::is_hex_color;

use super::document;
use super::layout::{CardTheme, render_codes};

/// Use `value` when it is a `#RRGGBB` color, otherwise `fallback`.
fn color<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if is_hex_color(value) { value } else { fallback }
}

/// Neutralize a closing tag sequence inside a `<style>` block.
fn style_block(css: &str) -> String {
    format!("<style>{}</style>\n", css.replace("</", "<\\/"))
}

/// Shown when the owner has no active codes.
pub fn render_empty() -> String {
    let body = "<div class=\"notice-wrap\"><div class=\"notice neutral\" role=\"status\">\
<strong>No Payment Methods Available</strong>\
<p>This user has not added any payment QR codes yet.</p></div></div>";
    document("No Payment Methods Available", "", body)
}

/// Render an accepted share page. Falls back to [`render_empty`] when
/// there is nothing to show.
pub fn render_page(page: &PublicPage) -> String {
    if page.is_empty() {
        return render_empty();
    }

    let appearance = &page.appearance;
    let primary = color(&appearance.primary_color, DEFAULT_PRIMARY_COLOR);
    let secondary = color(&appearance.secondary_color, DEFAULT_SECONDARY_COLOR);
    let background = color(&appearance.background_color, DEFAULT_BACKGROUND_COLOR);

    let mut body = format!(
        "<div class=\"page\" style=\"background-color:{background}\"><div class=\"container\"><div class=\"header\">"
    );
    if let Some(logo) = appearance.logo_url.as_deref().filter(|l| !l.is_empty()) {
        body.push_str(&format!(
            "<img class=\"logo\" src=\"{}\" alt=\"Logo\">",
            escape(logo)
        ));
    }
    body.push_str(&format!(
        "<h1 style=\"color:{primary}\">{}</h1><p style=\"color:{primary}99\">{}</p></div>",
        escape(&page.title),
        escape(&page.description)
    ));

    let theme = CardTheme {
        primary,
        secondary,
        show_account_details: appearance.show_account_details,
    };
    body.push_str(&render_codes(appearance.display_style, &page.codes, &theme));
    body.push_str("</div></div>");

    let extra_head = appearance
        .custom_css
        .as_deref()
        .filter(|css| !css.trim().is_empty())
        .map(style_block)
        .unwrap_or_default();

    document(&page.title, &extra_head, &body)
}
