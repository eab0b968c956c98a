//! Storage keys for uploaded images.

use chrono::{DateTime, Utc};
use rand::Rng;
use uuid::Uuid;

/// Build `{folder}/{owner}/{millis}-{random}.{ext}`.
pub(crate) fn upload_key(folder: &str, owner: Uuid, now: DateTime<Utc>, extension: &str) -> String {
    let suffix: u32 = rand::rng().random();
    format!(
        "{folder}/{owner}/{}-{suffix:08x}.{extension}",
        now.timestamp_millis()
    )
}

/// Whether `key` is a plain path under `{folder}/{owner}/`.
pub(crate) fn key_owned_by(key: &str, folder: &str, owner: Uuid) -> bool {
    let Some(rest) = key.strip_prefix(&format!("{folder}/{owner}/")) else {
        return false;
    };
    !rest.is_empty()
        && !rest.contains('\\')
        && rest.split('/').all(|part| !part.is_empty() && part != "." && part != "..")
}

/// Trim a free-text field, mapping blank input to `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_key_shape() {
        let owner = Uuid::new_v4();
        let now = Utc::now();
        let key = upload_key("qr-codes", owner, now, "png");
        let prefix = format!("qr-codes/{owner}/{}-", now.timestamp_millis());
        assert!(key.starts_with(&prefix), "{key}");
        assert!(key.ends_with(".png"));
        assert_eq!(key.len(), prefix.len() + 8 + 4);
    }

    #[test]
    fn test_key_owned_by() {
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        assert!(key_owned_by(&format!("qr-codes/{owner}/1-ab.png"), "qr-codes", owner));
        assert!(!key_owned_by(&format!("qr-codes/{other}/1-ab.png"), "qr-codes", owner));
        assert!(!key_owned_by(&format!("logos/{owner}/1-ab.png"), "qr-codes", owner));
        assert!(!key_owned_by(&format!("qr-codes/{owner}/"), "qr-codes", owner));
        assert!(!key_owned_by(
            &format!("qr-codes/{owner}/../{other}/1-ab.png"),
            "qr-codes",
            owner
        ));
        assert!(!key_owned_by(&format!("qr-codes/{owner}-x/1.png"), "qr-codes", owner));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some(" x ".to_string())), Some("x".to_string()));
        assert_eq!(non_blank(None), None);
    }
}
