//! Pages shown when a share link is refused.

use axum::http::StatusCode;

use qrfolio_core::html::escape;
use qrfolio_service::RejectReason;

use super::document;

/// Heading, explanation and status code for a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCopy {
    pub title: &'static str,
    pub message: &'static str,
    pub status: StatusCode,
}

impl ErrorCopy {
    /// Copy for a rejection reason.
    pub fn for_reason(reason: RejectReason) -> Self {
        match reason {
            RejectReason::NotFound => Self {
                title: "Link Not Found",
                message: "This share link does not exist or has been revoked.",
                status: StatusCode::NOT_FOUND,
            },
            RejectReason::AlreadyUsed => Self {
                title: "Link Already Used",
                message: "This one-time link has already been accessed.",
                status: StatusCode::GONE,
            },
            RejectReason::Expired => Self {
                title: "Link Expired",
                message: "This share link has expired.",
                status: StatusCode::GONE,
            },
            RejectReason::ValidationError => Self {
                title: "Validation Error",
                message: "An error occurred while validating this link.",
                status: StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

/// Render the rejection page and its status code.
pub fn render_rejection(reason: RejectReason) -> (StatusCode, String) {
    let copy = ErrorCopy::for_reason(reason);
    let body = format!(
        "<div class=\"notice-wrap\"><div class=\"notice\" role=\"alert\" data-reason=\"{}\"><strong>{}</strong><p>{}</p></div></div>",
        reason.as_str(),
        escape(copy.title),
        escape(copy.message),
    );
    (copy.status, document(copy.title, "", &body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_and_status() {
        let cases = [
            (RejectReason::NotFound, StatusCode::NOT_FOUND, "Link Not Found"),
            (RejectReason::AlreadyUsed, StatusCode::GONE, "Link Already Used"),
            (RejectReason::Expired, StatusCode::GONE, "Link Expired"),
            (
                RejectReason::ValidationError,
                StatusCode::INTERNAL_SERVER_ERROR,
                "Validation Error",
            ),
        ];
        for (reason, status, title) in cases {
            let (code, html) = render_rejection(reason);
            assert_eq!(code, status);
            assert!(html.contains(title), "{title}");
            assert!(html.contains(&format!("data-reason=\"{}\"", reason.as_str())));
        }
    }

    #[test]
    fn test_messages() {
        let (_, html) = render_rejection(RejectReason::AlreadyUsed);
        assert!(html.contains("This one-time link has already been accessed."));
        let (_, html) = render_rejection(RejectReason::NotFound);
        assert!(html.contains("This share link does not exist or has been revoked."));
    }
}
