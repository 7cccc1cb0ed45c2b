//! Default values resolved once when the action starts

/// Pinned xeol release installed when `xeol-version` is not supplied
pub const DEFAULT_XEOL_VERSION: &str = "v0.10.1";

/// Name of the scanner binary, both in the tool cache and on the search path
pub const XEOL_BINARY: &str = "xeol";

/// Installer script for xeol releases
pub const INSTALLER_URL: &str = "https://raw.githubusercontent.com/xeol-io/xeol/main/install.sh";

/// Output format used when `output-format` is not supplied
pub const DEFAULT_OUTPUT_FORMAT: &str = "table";

/// Textual default of the `fail-build` input
pub const DEFAULT_FAIL_BUILD: &str = "true";

/// Report written when the output format is json
pub const REPORT_FILE: &str = "./results.json";

/// `run` input value selecting the install-only entrypoint
pub const DOWNLOAD_XEOL_ENTRYPOINT: &str = "download-xeol";

/// Message reported when xeol exits non-zero
pub const EOL_FOUND_MESSAGE: &str = "Failed. Xeol found packages that were End-of-Life (EOL)";

/// Warning emitted when only one registry credential is supplied
pub const REGISTRY_CREDENTIALS_WARNING: &str =
    "WARNING: registry-username and registry-password must be specified together";
