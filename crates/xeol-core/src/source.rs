//! Scan target selection
//!
//! The action accepts three mutually exclusive target inputs. Selection is a
//! pure function and runs before anything is downloaded or executed.

use std::fmt;

use crate::error::{XeolError, XeolResult};

/// Message reported when more than one target input is set
pub const MUTUALLY_EXCLUSIVE_MESSAGE: &str =
    "The following options are mutually exclusive: image, path, sbom";

/// The single artifact a scan runs against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanTarget {
    /// Container image reference, passed to xeol unchanged
    Image(String),
    /// Filesystem directory
    Directory(String),
    /// Software bill of materials document
    Sbom(String),
}

impl Default for ScanTarget {
    fn default() -> Self {
        Self::Directory(".".to_string())
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image(reference) => write!(f, "{}", reference),
            Self::Directory(path) => write!(f, "dir:{}", path),
            Self::Sbom(path) => write!(f, "sbom:{}", path),
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Select the scan target from the `image`, `path` and `sbom` inputs
pub fn select_target(
    image: Option<&str>,
    path: Option<&str>,
    sbom: Option<&str>,
) -> XeolResult<ScanTarget> {
    let (image, path, sbom) = (present(image), present(path), present(sbom));

    let defined = [image, path, sbom].iter().filter(|v| v.is_some()).count();
    if defined > 1 {
        return Err(XeolError::invalid_input(MUTUALLY_EXCLUSIVE_MESSAGE));
    }

    let target = match (image, path, sbom) {
        (Some(image), _, _) => ScanTarget::Image(image.to_string()),
        (None, _, Some(sbom)) => ScanTarget::Sbom(sbom.to_string()),
        (None, Some(path), None) => ScanTarget::Directory(path.to_string()),
        (None, None, None) => ScanTarget::default(),
    };
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_current_directory() {
        let target = select_target(None, None, None).unwrap();
        assert_eq!(target, ScanTarget::Directory(".".to_string()));
        assert_eq!(target.to_string(), "dir:.");
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        let target = select_target(Some(""), Some(""), Some("")).unwrap();
        assert_eq!(target.to_string(), "dir:.");
    }

    #[test]
    fn test_image_has_no_prefix() {
        let target = select_target(Some("x"), None, None).unwrap();
        assert_eq!(target, ScanTarget::Image("x".to_string()));
        assert_eq!(target.to_string(), "x");
    }

    #[test]
    fn test_sbom_prefix() {
        let target = select_target(None, None, Some("x")).unwrap();
        assert_eq!(target.to_string(), "sbom:x");
    }

    #[test]
    fn test_directory_prefix() {
        let target = select_target(None, Some("some/dir"), None).unwrap();
        assert_eq!(target.to_string(), "dir:some/dir");
    }

    #[test]
    fn test_multiple_targets_rejected() {
        let combos = [
            (Some("image"), Some("path"), None),
            (Some("image"), None, Some("sbom")),
            (None, Some("path"), Some("sbom")),
            (Some("image"), Some("path"), Some("sbom")),
        ];

        for (image, path, sbom) in combos {
            let err = select_target(image, path, sbom).unwrap_err();
            assert!(err.is_validation(), "{:?}", (image, path, sbom));
            assert_eq!(err.message(), MUTUALLY_EXCLUSIVE_MESSAGE);
        }
    }
}
