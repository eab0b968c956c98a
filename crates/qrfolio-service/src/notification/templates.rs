//! HTML bodies for the invite workflow emails.
//!
//! Every interpolated value goes through [`escape`].

use chrono::{DateTime, Datelike, Utc};

use qrfolio_core::html::escape;

const FONT_STACK: &str = "-apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif";

fn document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
</head>
<body style="font-family: {FONT_STACK}; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px;">
{body}
</body>
</html>
"#
    )
}

fn header(title: &str, background: &str) -> String {
    format!(
        r#"  <div style="background: {background}; padding: 30px; border-radius: 12px 12px 0 0; text-align: center;">
    <h1 style="color: white; margin: 0; font-size: 28px;">{title}</h1>
  </div>"#
    )
}

fn footer(now: DateTime<Utc>) -> String {
    format!(
        r#"  <div style="text-align: center; padding: 20px; color: #9ca3af; font-size: 12px;">
    <p style="margin: 0;">&copy; {} QR Payment Portfolio. All rights reserved.</p>
  </div>"#,
        now.year()
    )
}

/// Admin notification about a new access request.
pub fn access_request(name: &str, email: &str, reason: Option<&str>, app_url: &str) -> String {
    let reason = reason
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(|r| {
            format!(
                r#"      <p style="margin: 10px 0;"><strong>Reason:</strong></p>
      <p style="margin: 10px 0; padding: 15px; background: #f7fafc; border-radius: 6px; font-style: italic;">"{}"</p>
"#,
                escape(r)
            )
        })
        .unwrap_or_default();

    let body = format!(
        r#"{header}
  <div style="background: #f7fafc; padding: 30px; border-radius: 0 0 12px 12px; border: 1px solid #e2e8f0;">
    <p style="font-size: 16px; color: #2d3748; margin-bottom: 20px;">
      You have received a new access request for the QR Payment Portfolio platform.
    </p>
    <div style="background: white; padding: 20px; border-radius: 8px; border-left: 4px solid #667eea; margin: 20px 0;">
      <h2 style="margin: 0 0 15px 0; color: #2d3748; font-size: 18px;">Requester Details</h2>
      <p style="margin: 10px 0;"><strong>Name:</strong> {name}</p>
      <p style="margin: 10px 0;"><strong>Email:</strong> <a href="mailto:{email}" style="color: #667eea; text-decoration: none;">{email}</a></p>
{reason}    </div>
    <div style="margin: 30px 0; text-align: center;">
      <a href="{app_url}/admin/access-requests" style="display: inline-block; background: #667eea; color: white; padding: 14px 28px; text-decoration: none; border-radius: 6px; font-weight: 600; font-size: 16px;">Review Request</a>
    </div>
    <p style="font-size: 14px; color: #718096; margin-top: 30px; padding-top: 20px; border-top: 1px solid #e2e8f0;">
      This is an automated notification from QR Payment Portfolio. To approve or reject this request, please log in to your admin dashboard.
    </p>
  </div>"#,
        header = header("New Access Request", "linear-gradient(135deg, #667eea 0%, #764ba2 100%)"),
        name = escape(name),
        email = escape(email),
        app_url = escape(app_url),
    );
    document("New Access Request", &body)
}

/// Approval email carrying the registration phrase.
pub fn access_approved(
    name: &str,
    phrase: &str,
    expires_at: Option<DateTime<Utc>>,
    app_url: &str,
    now: DateTime<Utc>,
) -> String {
    let expiry = expires_at
        .map(|at| {
            format!(
                r#"      <p style="color: #ef4444; font-size: 14px; margin: 10px 0 0 0;">This phrase expires on: <strong>{} at {} UTC</strong></p>
"#,
                at.format("%B %-d, %Y"),
                at.format("%H:%M")
            )
        })
        .unwrap_or_default();

    let body = format!(
        r#"{header}
  <div style="background: #ffffff; padding: 30px; border: 1px solid #e5e7eb; border-top: none; border-radius: 0 0 12px 12px;">
    <p style="font-size: 16px; margin-bottom: 20px;">Hi <strong>{name}</strong>,</p>
    <p style="font-size: 16px; margin-bottom: 20px;">
      Great news! Your access request for <strong>QR Payment Portfolio</strong> has been approved.
    </p>
    <p style="font-size: 16px; margin-bottom: 10px;">Use the registration phrase below to create your account:</p>
    <div style="background: #f0f9ff; border: 2px solid #6366f1; border-radius: 8px; padding: 20px; margin: 20px 0; text-align: center;">
      <p style="font-size: 12px; color: #6366f1; margin: 0 0 10px 0; text-transform: uppercase; letter-spacing: 1px;">Your Registration Phrase</p>
      <p style="font-size: 24px; font-weight: bold; color: #1e293b; margin: 0; font-family: 'Courier New', monospace; letter-spacing: 2px;">{phrase}</p>
{expiry}    </div>
    <div style="text-align: center; margin: 30px 0;">
      <a href="{app_url}/register?phrase={phrase}" style="display: inline-block; background: #6366f1; color: white; text-decoration: none; padding: 14px 32px; border-radius: 8px; font-weight: 600; font-size: 16px;">Create Your Account</a>
    </div>
    <div style="background: #fef3c7; border-left: 4px solid #f59e0b; padding: 15px; margin: 20px 0; border-radius: 0 8px 8px 0;">
      <p style="margin: 0; font-size: 14px; color: #92400e;">
        <strong>Important:</strong> This registration phrase can only be used once. Keep it secure and don't share it with anyone.
      </p>
    </div>
    <p style="font-size: 14px; color: #9ca3af; margin: 0;">
      If you didn't request access to QR Payment Portfolio, you can safely ignore this email.
    </p>
  </div>
{footer}"#,
        header = header("Access Approved", "linear-gradient(135deg, #6366f1 0%, #8b5cf6 100%)"),
        name = escape(name),
        phrase = escape(phrase),
        app_url = escape(app_url),
        footer = footer(now),
    );
    document("Access Request Approved", &body)
}

/// Rejection email inviting the requester to try again.
pub fn access_rejected(name: &str, app_url: &str, now: DateTime<Utc>) -> String {
    let body = format!(
        r#"{header}
  <div style="background: #ffffff; padding: 30px; border: 1px solid #e5e7eb; border-top: none; border-radius: 0 0 12px 12px;">
    <p style="font-size: 16px; margin-bottom: 20px;">Hi <strong>{name}</strong>,</p>
    <p style="font-size: 16px; margin-bottom: 20px;">
      Thank you for your interest in <strong>QR Payment Portfolio</strong>.
    </p>
    <p style="font-size: 16px; margin-bottom: 20px;">
      After reviewing your request, we're unable to approve access at this time.
    </p>
    <p style="font-size: 16px; margin-bottom: 20px;">
      If your circumstances have changed, you're welcome to submit a new access request with additional details.
    </p>
    <div style="text-align: center; margin: 30px 0;">
      <a href="{app_url}/#request-access" style="display: inline-block; background: #6b7280; color: white; text-decoration: none; padding: 14px 32px; border-radius: 8px; font-weight: 600; font-size: 16px;">Submit New Request</a>
    </div>
  </div>
{footer}"#,
        header = header("Access Request Update", "#6b7280"),
        name = escape(name),
        app_url = escape(app_url),
        footer = footer(now),
    );
    document("Access Request Update", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_request_escapes_input() {
        let html = access_request(
            "<b>Eve</b>",
            "eve@example.com",
            Some("I \"need\" it"),
            "https://qr.example.com",
        );
        assert!(html.contains("&lt;b&gt;Eve&lt;/b&gt;"));
        assert!(!html.contains("<b>Eve</b>"));
        assert!(html.contains("I &quot;need&quot; it"));
        assert!(html.contains("https://qr.example.com/admin/access-requests"));
    }

    #[test]
    fn test_request_omits_blank_reason() {
        let html = access_request("Eve", "eve@example.com", Some("  "), "http://x");
        assert!(!html.contains("Reason:"));
    }

    #[test]
    fn test_approved_contains_phrase_and_expiry() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let expires = Utc.with_ymd_and_hms(2026, 3, 4, 12, 30, 0).unwrap();
        let html = access_approved("Ann", "swift-river-1234", Some(expires), "http://app", now);

        assert!(html.contains("swift-river-1234"));
        assert!(html.contains("http://app/register?phrase=swift-river-1234"));
        assert!(html.contains("March 4, 2026 at 12:30 UTC"));
        assert!(html.contains("&copy; 2026"));
    }

    #[test]
    fn test_approved_without_expiry() {
        let html = access_approved("Ann", "swift-river-1234", None, "http://app", Utc::now());
        assert!(!html.contains("expires on"));
    }

    #[test]
    fn test_rejected_escapes_name() {
        let html = access_rejected("<i>x</i>", "http://app", Utc::now());
        assert!(html.contains("&lt;i&gt;x&lt;/i&gt;"));
        assert!(html.contains("http://app/#request-access"));
    }
}
