#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(String),

    #[error("Status code: {0}")]
    StatusCode(u16),

    #[error("API did not advertise a master ref")]
    MissingMasterRef,

    #[error("API endpoint is not configured")]
    MissingEndpoint,
}
