//! Server-side HTML for the public share page.
//!
//! Every value that originates from a user (titles, descriptions, account
//! details, URLs, custom CSS) is escaped before interpolation.

pub mod error_page;
pub mod layout;
pub mod page;

pub use error_page::{ErrorCopy, render_rejection};
pub use page::{render_empty, render_page};

use qrfolio_core::html::escape;

/// Shared stylesheet for every share page variant.
pub(crate) const BASE_STYLES: &str = r#"
*{box-sizing:border-box}
body{margin:0;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,'Helvetica Neue',Arial,sans-serif;color:#1f2937}
.notice-wrap{min-height:100vh;display:flex;align-items:center;justify-content:center;background:#f9fafb;padding:16px}
.notice{max-width:28rem;width:100%;border:1px solid #fecaca;background:#fef2f2;color:#991b1b;border-radius:8px;padding:16px}
.notice.neutral{border-color:#e5e7eb;background:#fff;color:#1f2937;text-align:center}
.notice p{margin:4px 0 0}
.page{min-height:100vh;padding:48px 16px}
.container{max-width:72rem;margin:0 auto}
.header{text-align:center;margin-bottom:48px}
.logo{height:80px;width:80px;object-fit:contain;margin:0 auto 24px;display:block}
.header h1{font-size:2.25rem;font-weight:700;margin:0 0 12px}
.header p{font-size:1.125rem;margin:0}
.qr-card{background:#fff;border-radius:8px;box-shadow:0 10px 15px -3px rgba(0,0,0,.1);overflow:hidden}
.qr-image{aspect-ratio:1/1;background:#f9fafb;padding:32px;display:flex;align-items:center;justify-content:center}
.qr-image img{max-width:100%;max-height:100%;object-fit:contain}
.qr-body{padding:24px}
.qr-title{font-size:1.5rem;font-weight:700;margin:0 0 8px}
.qr-desc{color:#4b5563;margin:0}
.qr-account{border-top:1px solid #e5e7eb;margin-top:16px;padding-top:16px;font-size:.875rem}
.qr-account p{margin:4px 0}
.qr-account .label{font-weight:500}
.qr-download{display:block;margin-top:16px;text-align:center;color:#fff;text-decoration:none;padding:10px;border-radius:6px;font-weight:600}
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(280px,1fr));gap:24px}
.carousel{position:relative}
.carousel-track{display:flex;overflow-x:auto;scroll-snap-type:x mandatory;scrollbar-width:none}
.carousel-track::-webkit-scrollbar{display:none}
.slide{flex:0 0 100%;scroll-snap-align:center;padding:0 16px}
.slide .qr-card,.single .qr-card{max-width:28rem;margin:0 auto}
.nav{position:absolute;top:50%;transform:translateY(-50%);border:1px solid #e5e7eb;background:#fff;border-radius:9999px;width:40px;height:40px;cursor:pointer}
.nav.prev{left:8px}.nav.next{right:8px}
.dots{display:flex;justify-content:center;gap:8px;margin-top:24px}
.dot{height:8px;width:8px;border:0;border-radius:9999px;background:#d1d5db;cursor:pointer;padding:0}
.dot.active{width:32px}
.tabs{display:flex;flex-wrap:wrap;justify-content:center;gap:8px;margin-bottom:24px}
.tab{border:1px solid #e5e7eb;background:#fff;border-radius:6px;padding:8px 16px;cursor:pointer}
.tab.active{color:#fff}
"#;

/// Wrap a page body in the HTML document skeleton.
pub(crate) fn document(title: &str, extra_head: &str, body: &str) -> String {
    let mut html = String::with_capacity(BASE_STYLES.len() + body.len() + 512);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<meta name=\"robots\" content=\"noindex, nofollow\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape(title)));
    html.push_str("<style>");
    html.push_str(BASE_STYLES);
    html.push_str("</style>\n");
    html.push_str(extra_head);
    html.push_str("</head>\n<body>\n");
    html.push_str(body);
    html.push_str("\n</body>\n</html>\n");
    html
}
