//! CLI argument definitions using clap
//!
//! Every action input can be given on the command line. Flags override the
//! `INPUT_*` variables the runner sets, which makes local runs possible:
//!
//! - xeol-action --image alpine:3.9 --output-format json
//! - xeol-action --run download-xeol --xeol-version v0.10.1

use clap::Parser;
use xeol_core::ActionInputs;

#[derive(Parser, Debug)]
#[command(name = "xeol-action")]
#[command(about = "Install xeol and scan an image, directory or SBOM for end-of-life packages")]
#[command(version)]
pub struct Cli {
    /// xeol release to install (defaults to the pinned version)
    #[arg(long)]
    pub xeol_version: Option<String>,

    /// Container image to scan
    #[arg(long)]
    pub image: Option<String>,

    /// Directory to scan
    #[arg(long)]
    pub path: Option<String>,

    /// SBOM file to scan
    #[arg(long)]
    pub sbom: Option<String>,

    /// Fail the run when EOL packages are found ("true" or "false")
    #[arg(long)]
    pub fail_build: Option<String>,

    /// xeol API key
    #[arg(long)]
    pub api_key: Option<String>,

    /// Report format: json or table
    #[arg(long)]
    pub output_format: Option<String>,

    /// Registry user for private images
    #[arg(long)]
    pub registry_username: Option<String>,

    /// Registry password for private images
    #[arg(long)]
    pub registry_password: Option<String>,

    /// Entrypoint; `download-xeol` only installs the scanner
    #[arg(long)]
    pub run: Option<String>,
}

impl Cli {
    /// Command line values as overrides for the runner inputs
    pub fn into_inputs(self) -> ActionInputs {
        ActionInputs {
            xeol_version: self.xeol_version,
            image: self.image,
            path: self.path,
            sbom: self.sbom,
            fail_build: self.fail_build,
            api_key: self.api_key,
            output_format: self.output_format,
            registry_username: self.registry_username,
            registry_password: self.registry_password,
            run: self.run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_map_to_inputs() {
        let cli = Cli::parse_from([
            "xeol-action",
            "--image",
            "alpine:3.9",
            "--output-format",
            "json",
            "--fail-build",
            "false",
            "--registry-username",
            "user",
        ]);
        let inputs = cli.into_inputs();

        assert_eq!(inputs.image.as_deref(), Some("alpine:3.9"));
        assert_eq!(inputs.output_format.as_deref(), Some("json"));
        assert!(!inputs.fail_build());
        assert_eq!(inputs.registry_username.as_deref(), Some("user"));
        assert_eq!(inputs.path, None);
    }

    #[test]
    fn test_flags_override_environment() {
        let mut inputs = ActionInputs::load_from_lookup(|key| match key {
            "INPUT_PATH" => Some("./src".to_string()),
            "INPUT_OUTPUT-FORMAT" => Some("table".to_string()),
            _ => None,
        });
        inputs.merge(Cli::parse_from(["xeol-action", "--output-format", "json"]).into_inputs());

        assert_eq!(inputs.path.as_deref(), Some("./src"));
        assert_eq!(inputs.output_format(), "json");
    }
}
