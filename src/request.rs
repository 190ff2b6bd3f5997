//! Inbound request validation and handle normalization
//!
//! Raw query parameters arrive untyped; this module turns them into a
//! [`GraphRequest`] or rejects them with
//! [`SkygraphError::InvalidRequest`]. The date range fields pass
//! through unvalidated: whether a pair is usable is decided where the
//! target URL is built (both-or-neither policy).

use crate::error::{Result, SkygraphError};

/// A validated scrape request: normalized handle plus optional range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphRequest {
    /// Account handle with every mention sigil removed
    pub handle: String,
    /// Optional range start (ISO date string, passed through as-is)
    pub from: Option<String>,
    /// Optional range end (ISO date string, passed through as-is)
    pub to: Option<String>,
}

impl GraphRequest {
    /// Build a request from raw query parameters.
    ///
    /// The handle is normalized via [`normalize_handle`] before the
    /// emptiness check, so `"@"` is as invalid as a missing parameter.
    /// Empty-string range parameters are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`SkygraphError::InvalidRequest`] if the handle is
    /// missing or empty after normalization.
    pub fn from_params(
        name: Option<String>,
        from: Option<String>,
        to: Option<String>,
    ) -> Result<Self> {
        let handle = normalize_handle(name.as_deref().unwrap_or_default());
        if handle.is_empty() {
            return Err(SkygraphError::InvalidRequest(
                "account handle is missing or empty".to_string(),
            )
            .into());
        }
        Ok(Self {
            handle,
            from: from.filter(|value| !value.is_empty()),
            to: to.filter(|value| !value.is_empty()),
        })
    }

    /// The usable date range, honoring the both-or-neither policy.
    ///
    /// A lone `from` or `to` is silently ignored.
    pub fn range(&self) -> Option<(&str, &str)> {
        match (self.from.as_deref(), self.to.as_deref()) {
            (Some(from), Some(to)) => Some((from, to)),
            _ => None,
        }
    }
}

/// Strip every mention sigil (`@`) from a raw handle.
///
/// The site's canonical handle form never contains the sigil, but users
/// paste handles as `@octocat`; all occurrences are removed, not just a
/// leading one.
pub fn normalize_handle(raw: &str) -> String {
    raw.replace('@', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SkygraphError;

    fn classification_of(result: Result<GraphRequest>) -> &'static str {
        result
            .unwrap_err()
            .downcast_ref::<SkygraphError>()
            .map(SkygraphError::classification)
            .unwrap_or("unclassified")
    }

    #[test]
    fn test_leading_sigil_stripped() {
        assert_eq!(normalize_handle("@octocat"), "octocat");
    }

    #[test]
    fn test_all_sigils_stripped_rest_untouched() {
        assert_eq!(normalize_handle("@octo@cat@"), "octocat");
        assert_eq!(normalize_handle("octocat"), "octocat");
    }

    #[test]
    fn test_missing_name_is_invalid_request() {
        let result = GraphRequest::from_params(None, None, None);
        assert_eq!(classification_of(result), "InvalidRequest");
    }

    #[test]
    fn test_sigil_only_name_is_invalid_request() {
        let result = GraphRequest::from_params(Some("@@".to_string()), None, None);
        assert_eq!(classification_of(result), "InvalidRequest");
    }

    #[test]
    fn test_range_requires_both_endpoints() {
        let only_from = GraphRequest::from_params(
            Some("octocat".to_string()),
            Some("2023-01-01".to_string()),
            None,
        )
        .unwrap();
        assert_eq!(only_from.range(), None);

        let only_to = GraphRequest::from_params(
            Some("octocat".to_string()),
            None,
            Some("2023-12-31".to_string()),
        )
        .unwrap();
        assert_eq!(only_to.range(), None);

        let both = GraphRequest::from_params(
            Some("octocat".to_string()),
            Some("2023-01-01".to_string()),
            Some("2023-12-31".to_string()),
        )
        .unwrap();
        assert_eq!(both.range(), Some(("2023-01-01", "2023-12-31")));
    }

    #[test]
    fn test_empty_range_values_count_as_absent() {
        let request = GraphRequest::from_params(
            Some("octocat".to_string()),
            Some(String::new()),
            Some("2023-12-31".to_string()),
        )
        .unwrap();
        assert_eq!(request.from, None);
        assert_eq!(request.range(), None);
    }
}
