use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("revenue error: {0}")]
    Revenue(#[from] revshare_revenue::RevenueError),

    #[error("store error: {0}")]
    Store(#[from] revshare_store::StoreError),

    #[error("config error: {0}")]
    Config(String),

    #[error("logging error: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
