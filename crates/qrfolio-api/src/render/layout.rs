//! QR card markup and the three display styles.

use qrfolio_core::html::escape;
use qrfolio_entity::qr_code::QrCode;
use qrfolio_entity::settings::DisplayStyle;

/// Resolved colors and options shared by every card.
#[derive(Debug, Clone, Copy)]
pub struct CardTheme<'a> {
    pub primary: &'a str,
    pub secondary: &'a str,
    pub show_account_details: bool,
}

/// Suggested download filename: the title with whitespace runs turned into `-`.
fn download_name(title: &str) -> String {
    let slug = title.split_whitespace().collect::<Vec<_>>().join("-");
    format!("{slug}-qr-code.png")
}

/// One payment method card.
pub fn card(qr: &QrCode, theme: &CardTheme<'_>) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"qr-card\">");
    html.push_str(&format!(
        "<div class=\"qr-image\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\"></div>",
        escape(&qr.image_url),
        escape(&qr.title)
    ));
    html.push_str("<div class=\"qr-body\">");
    html.push_str(&format!(
        "<h3 class=\"qr-title\" style=\"color:{}\">{}</h3>",
        theme.primary,
        escape(&qr.title)
    ));
    if let Some(description) = qr.description.as_deref().filter(|d| !d.is_empty()) {
        html.push_str(&format!("<p class=\"qr-desc\">{}</p>", escape(description)));
    }

    let account_name = qr.account_name.as_deref().filter(|v| !v.is_empty());
    let account_number = qr.account_number.as_deref().filter(|v| !v.is_empty());
    if theme.show_account_details && (account_name.is_some() || account_number.is_some()) {
        html.push_str("<div class=\"qr-account\">");
        for (label, value) in [("Account Name", account_name), ("Account Number", account_number)] {
            if let Some(value) = value {
                html.push_str(&format!(
                    "<p><span class=\"label\" style=\"color:{}\">{label}:</span> <span>{}</span></p>",
                    theme.secondary,
                    escape(value)
                ));
            }
        }
        html.push_str("</div>");
    }

    html.push_str(&format!(
        "<a class=\"qr-download\" href=\"{}\" download=\"{}\" style=\"background-color:{}\">Download QR Code</a>",
        escape(&qr.image_url),
        escape(&download_name(&qr.title)),
        theme.primary
    ));
    html.push_str("</div></div>");
    html
}

fn grid(codes: &[QrCode], theme: &CardTheme<'_>) -> String {
    let cards: String = codes.iter().map(|qr| card(qr, theme)).collect();
    format!("<div class=\"grid\">{cards}</div>")
}

fn carousel(codes: &[QrCode], theme: &CardTheme<'_>) -> String {
    let slides: String = codes
        .iter()
        .map(|qr| format!("<div class=\"slide\">{}</div>", card(qr, theme)))
        .collect();
    let mut html = format!("<div class=\"carousel\" data-carousel><div class=\"carousel-track\">{slides}</div>");

    if codes.len() > 1 {
        html.push_str("<button type=\"button\" class=\"nav prev\" aria-label=\"Previous\">&#8249;</button>");
        html.push_str("<button type=\"button\" class=\"nav next\" aria-label=\"Next\">&#8250;</button>");
        html.push_str("<div class=\"dots\">");
        for index in 0..codes.len() {
            let (class, color) = if index == 0 {
                ("dot active", theme.primary)
            } else {
                ("dot", "#d1d5db")
            };
            html.push_str(&format!(
                "<button type=\"button\" class=\"{class}\" style=\"background-color:{color}\" aria-label=\"Go to slide {}\"></button>",
                index + 1
            ));
        }
        html.push_str("</div>");
        html.push_str(&carousel_script(theme.primary));
    }
    html.push_str("</div>");
    html
}

fn carousel_script(primary: &str) -> String {
    format!(
        "<script>(function(){{var root=document.querySelector('[data-carousel]');if(!root)return;\
var track=root.querySelector('.carousel-track'),dots=root.querySelectorAll('.dot'),n=dots.length,i=0;\
function show(k){{i=(k+n)%n;track.scrollTo({{left:track.clientWidth*i,behavior:'smooth'}});\
dots.forEach(function(d,j){{d.classList.toggle('active',j===i);d.style.backgroundColor=j===i?'{primary}':'#d1d5db';}});}}\
root.querySelector('.prev').addEventListener('click',function(){{show(i-1);}});\
root.querySelector('.next').addEventListener('click',function(){{show(i+1);}});\
dots.forEach(function(d,j){{d.addEventListener('click',function(){{show(j);}});}});\
track.addEventListener('scroll',function(){{var k=Math.round(track.scrollLeft/track.clientWidth);\
if(k!==i){{i=k;dots.forEach(function(d,j){{d.classList.toggle('active',j===i);d.style.backgroundColor=j===i?'{primary}':'#d1d5db';}});}}}});}})();</script>"
    )
}

fn single(codes: &[QrCode], theme: &CardTheme<'_>) -> String {
    let mut html = String::from("<div class=\"single\" data-tabs>");
    if codes.len() > 1 {
        html.push_str("<div class=\"tabs\" role=\"tablist\">");
        for (index, qr) in codes.iter().enumerate() {
            let (class, style) = if index == 0 {
                ("tab active", format!(" style=\"background-color:{}\"", theme.primary))
            } else {
                ("tab", String::new())
            };
            html.push_str(&format!(
                "<button type=\"button\" class=\"{class}\" role=\"tab\" data-index=\"{index}\"{style}>{}</button>",
                escape(&qr.title)
            ));
        }
        html.push_str("</div>");
    }
    for (index, qr) in codes.iter().enumerate() {
        let hidden = if index == 0 { "" } else { " hidden" };
        html.push_str(&format!(
            "<div class=\"panel\" role=\"tabpanel\"{hidden}>{}</div>",
            card(qr, theme)
        ));
    }
    if codes.len() > 1 {
        html.push_str(&format!(
            "<script>(function(){{var root=document.querySelector('[data-tabs]');if(!root)return;\
var tabs=root.querySelectorAll('.tab'),panels=root.querySelectorAll('.panel');\
tabs.forEach(function(t,j){{t.addEventListener('click',function(){{\
tabs.forEach(function(u,k){{u.classList.toggle('active',k===j);u.style.backgroundColor=k===j?'{}':'';}});\
panels.forEach(function(p,k){{p.hidden=k!==j;}});}});}});}})();</script>",
            theme.primary
        ));
    }
    html.push_str("</div>");
    html
}

/// Lay out `codes` in the chosen style.
pub fn render_codes(style: DisplayStyle, codes: &[QrCode], theme: &CardTheme<'_>) -> String {
    match style {
        DisplayStyle::Carousel => carousel(codes, theme),
        DisplayStyle::Grid => grid(codes, theme),
        DisplayStyle::Single => single(codes, theme),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn code(title: &str, order: i32) -> QrCode {
        QrCode {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            image_url: "/uploads/qr-codes/a.png".to_string(),
            account_name: Some("Jane Doe".to_string()),
            account_number: Some("0123456789".to_string()),
            display_order: order,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    const THEME: CardTheme<'static> = CardTheme {
        primary: "#3b82f6",
        secondary: "#1e40af",
        show_account_details: true,
    };

    #[test]
    fn test_card_escapes_content() {
        let mut qr = code("<img src=x onerror=alert(1)>", 0);
        qr.description = Some("Pay \"here\"".to_string());
        let html = card(&qr, &THEME);

        assert!(!html.contains("<img src=x"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(html.contains("Pay &quot;here&quot;"));
    }

    #[test]
    fn test_account_details_toggle() {
        let qr = code("Bank", 0);
        assert!(card(&qr, &THEME).contains("Account Number:"));

        let hidden = CardTheme {
            show_account_details: false,
            ..THEME
        };
        assert!(!card(&qr, &hidden).contains("Account Number:"));
    }

    #[test]
    fn test_download_name() {
        assert_eq!(download_name("My  Bank QR"), "My-Bank-QR-qr-code.png");
    }

    #[test]
    fn test_layouts() {
        let codes = vec![code("A", 0), code("B", 1)];
        assert!(render_codes(DisplayStyle::Grid, &codes, &THEME).starts_with("<div class=\"grid\">"));

        let carousel = render_codes(DisplayStyle::Carousel, &codes, &THEME);
        assert_eq!(carousel.matches("class=\"slide\"").count(), 2);
        assert!(carousel.contains("Go to slide 2"));

        let single = render_codes(DisplayStyle::Single, &codes, &THEME);
        assert_eq!(single.matches("role=\"tab\"").count(), 2);
        assert_eq!(single.matches(" hidden>").count(), 1);
    }

    #[test]
    fn test_single_code_has_no_controls() {
        let codes = vec![code("A", 0)];
        let carousel = render_codes(DisplayStyle::Carousel, &codes, &THEME);
        assert!(!carousel.contains("<button"));
        let single = render_codes(DisplayStyle::Single, &codes, &THEME);
        assert!(!single.contains("role=\"tab\""));
    }
}
