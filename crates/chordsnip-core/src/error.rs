pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed while getting saved settings: {message}")]
    SettingsLoad { message: String },

    #[error("Unknown settings page: {branch}")]
    UnknownBranch { branch: String },

    #[error("Unknown settings control: {key}")]
    UnknownControl { key: String },

    #[error("No saved settings available for {scope}")]
    UnavailableScope { scope: String },

    #[error("Settings JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
