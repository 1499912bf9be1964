use std::path::PathBuf;

use crate::cli::Cli;

/// Application configuration, resolved once at startup.
pub struct Config {
    pub org_id: String,
    pub workspace_id: String,
    pub app_id: String,
    pub api_key: String,
    pub output_dir: PathBuf,
    pub box_cfg: BoxConfig,
}

/// Box upload credentials. All fields optional; what is present decides
/// the token strategy (see `boxapi::token`).
#[derive(Default, Clone)]
pub struct BoxConfig {
    pub access_token: Option<String>,
    pub folder_id: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub key_id: Option<String>,
    pub private_key: Option<String>,
    pub enterprise_id: Option<String>,
    pub user_id: Option<String>,
    pub passphrase: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("org_id", &self.org_id)
            .field("workspace_id", &self.workspace_id)
            .field("app_id", &self.app_id)
            .field("api_key", &"<redacted>")
            .field("output_dir", &self.output_dir)
            .field("box_folder_id", &self.box_cfg.folder_id)
            .finish_non_exhaustive()
    }
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

/// Treat unset and empty-string values the same, matching environment
/// variables that are exported but blank.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl Config {
    /// Resolve configuration from the CLI/environment surface.
    ///
    /// Reports every missing mandatory identifier in one error rather
    /// than failing on the first, so a bare run shows the full list of
    /// variables to set.
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let mut missing: Vec<&str> = Vec::new();
        let mut require = |name: &'static str, value: Option<String>| -> String {
            match non_empty(value) {
                Some(v) => v,
                None => {
                    missing.push(name);
                    String::new()
                }
            }
        };

        let org_id = require("SARVAM_ORG_ID", cli.org_id);
        let workspace_id = require("SARVAM_WORKSPACE_ID", cli.workspace_id);
        let app_id = require("SARVAM_APP_ID", cli.app_id);
        let api_key = require("SARVAM_API_KEY", cli.api_key);

        if !missing.is_empty() {
            anyhow::bail!(
                "Missing required configuration: {}",
                missing.join(", ")
            );
        }

        Ok(Self {
            org_id,
            workspace_id,
            app_id,
            api_key,
            output_dir: expand_tilde(&cli.output_dir),
            box_cfg: BoxConfig {
                access_token: non_empty(cli.box_access_token),
                folder_id: non_empty(cli.box_folder_id),
                client_id: non_empty(cli.box_client_id),
                client_secret: non_empty(cli.box_client_secret),
                key_id: non_empty(cli.box_key_id),
                private_key: non_empty(cli.box_private_key),
                enterprise_id: non_empty(cli.box_enterprise_id),
                user_id: non_empty(cli.box_user_id),
                passphrase: non_empty(cli.box_passphrase),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        // Clear the env fallbacks so resolver tests stay hermetic even
        // when the shell running them exports real credentials.
        for var in [
            "SARVAM_ORG_ID",
            "SARVAM_WORKSPACE_ID",
            "SARVAM_APP_ID",
            "SARVAM_API_KEY",
            "OUTPUT_DIR",
            "BOX_ACCESS_TOKEN",
            "BOX_FOLDER_ID",
            "BOX_CLIENT_ID",
            "BOX_CLIENT_SECRET",
            "BOX_KEY_ID",
            "BOX_PRIVATE_KEY",
            "BOX_ENTERPRISE_ID",
            "BOX_USER_ID",
            "BOX_PASSPHRASE",
        ] {
            std::env::remove_var(var);
        }
        let mut full = vec!["sarvam-attempts-report"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    fn full_args() -> Vec<&'static str> {
        vec![
            "--org-id",
            "org",
            "--workspace-id",
            "ws",
            "--app-id",
            "app",
            "--api-key",
            "key",
        ]
    }

    #[test]
    fn test_all_mandatory_present() {
        let cfg = Config::from_cli(parse(&full_args())).unwrap();
        assert_eq!(cfg.org_id, "org");
        assert_eq!(cfg.workspace_id, "ws");
        assert_eq!(cfg.app_id, "app");
        assert_eq!(cfg.api_key, "key");
    }

    #[test]
    fn test_all_missing_enumerated() {
        let err = Config::from_cli(parse(&[])).unwrap_err().to_string();
        assert!(err.contains("SARVAM_ORG_ID"), "{err}");
        assert!(err.contains("SARVAM_WORKSPACE_ID"), "{err}");
        assert!(err.contains("SARVAM_APP_ID"), "{err}");
        assert!(err.contains("SARVAM_API_KEY"), "{err}");
    }

    #[test]
    fn test_partial_missing_enumerated() {
        let err = Config::from_cli(parse(&["--org-id", "org", "--api-key", "key"]))
            .unwrap_err()
            .to_string();
        assert!(!err.contains("SARVAM_ORG_ID"), "{err}");
        assert!(err.contains("SARVAM_WORKSPACE_ID"), "{err}");
        assert!(err.contains("SARVAM_APP_ID"), "{err}");
        assert!(!err.contains("SARVAM_API_KEY"), "{err}");
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let mut args = full_args();
        args[1] = "";
        let err = Config::from_cli(parse(&args)).unwrap_err().to_string();
        assert!(err.contains("SARVAM_ORG_ID"), "{err}");
    }

    #[test]
    fn test_box_empty_strings_normalized() {
        let mut args = full_args();
        args.extend_from_slice(&["--box-access-token", "", "--box-folder-id", "123"]);
        let cfg = Config::from_cli(parse(&args)).unwrap();
        assert!(cfg.box_cfg.access_token.is_none());
        assert_eq!(cfg.box_cfg.folder_id.as_deref(), Some("123"));
    }

    #[test]
    fn test_expand_tilde_no_prefix() {
        assert_eq!(
            expand_tilde("/absolute/path"),
            PathBuf::from("/absolute/path")
        );
        assert_eq!(expand_tilde("relative/path"), PathBuf::from("relative/path"));
    }

    #[test]
    fn test_expand_tilde_with_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/reports"), home.join("reports"));
        }
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let cfg = Config::from_cli(parse(&full_args())).unwrap();
        let rendered = format!("{:?}", cfg);
        assert!(!rendered.contains("key\""));
        assert!(rendered.contains("<redacted>"));
    }
}
