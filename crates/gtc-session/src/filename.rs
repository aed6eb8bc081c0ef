use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::{error::Result, model::Session};

const DISALLOWED_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Replaces every character that is unsafe in file names with `_`.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if DISALLOWED_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// `"{presenters} - {title}"`, sanitized, without extension.
pub fn base_filename(session: &Session) -> String {
    sanitize_filename(&format!("{} - {}", session.display_names(), session.title))
}

/// Deletes a leftover file from a previous run. Returns whether one existed.
pub async fn remove_stale(path: &Path) -> Result<bool> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            debug!("removed stale file {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn prop_sanitize_is_idempotent(name in any::<String>()) {
            let once = sanitize_filename(&name);
            prop_assert_eq!(sanitize_filename(&once), once);
        }

        #[test]
        fn prop_sanitize_only_touches_disallowed(name in any::<String>()) {
            let sanitized = sanitize_filename(&name);
            prop_assert_eq!(sanitized.chars().count(), name.chars().count());
            for (original, replaced) in name.chars().zip(sanitized.chars()) {
                if DISALLOWED_CHARS.contains(&original) {
                    prop_assert_eq!(replaced, '_');
                } else {
                    prop_assert_eq!(replaced, original);
                }
            }
        }
    }
}
