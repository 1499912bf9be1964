use clap::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "sarvam-attempts-report",
    about = "Fetch Sarvam attempt analytics and publish an xlsx report to Box"
)]
pub struct Cli {
    /// Sarvam organization id
    #[arg(long, env = "SARVAM_ORG_ID")]
    pub org_id: Option<String>,

    /// Sarvam workspace id
    #[arg(long, env = "SARVAM_WORKSPACE_ID")]
    pub workspace_id: Option<String>,

    /// Sarvam application id
    #[arg(long, env = "SARVAM_APP_ID")]
    pub app_id: Option<String>,

    /// Sarvam analytics API key.
    /// WARNING: passing via --api-key is visible in process listings.
    /// Prefer the SARVAM_API_KEY environment variable instead.
    #[arg(long, env = "SARVAM_API_KEY")]
    pub api_key: Option<String>,

    /// Local directory for the report file
    #[arg(
        long,
        env = "OUTPUT_DIR",
        default_value = "~/Library/CloudStorage/Box-Box"
    )]
    pub output_dir: String,

    /// Pre-issued Box developer token (short-lived). When set, no JWT
    /// exchange is performed.
    #[arg(long, env = "BOX_ACCESS_TOKEN")]
    pub box_access_token: Option<String>,

    /// Box folder id from the folder URL, e.g. .../folder/366400499122
    #[arg(long, env = "BOX_FOLDER_ID")]
    pub box_folder_id: Option<String>,

    /// Box JWT app client id
    #[arg(long, env = "BOX_CLIENT_ID")]
    pub box_client_id: Option<String>,

    /// Box JWT app client secret
    #[arg(long, env = "BOX_CLIENT_SECRET")]
    pub box_client_secret: Option<String>,

    /// Box public key id (kid)
    #[arg(long, env = "BOX_KEY_ID")]
    pub box_key_id: Option<String>,

    /// Box app private key PEM; literal \n sequences are accepted
    #[arg(long, env = "BOX_PRIVATE_KEY")]
    pub box_private_key: Option<String>,

    /// Box enterprise id ("0" for personal accounts)
    #[arg(long, env = "BOX_ENTERPRISE_ID")]
    pub box_enterprise_id: Option<String>,

    /// Box user id, required for personal Box (enterprise id 0)
    #[arg(long, env = "BOX_USER_ID")]
    pub box_user_id: Option<String>,

    /// Passphrase for an encrypted private key
    #[arg(long, env = "BOX_PASSPHRASE")]
    pub box_passphrase: Option<String>,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
