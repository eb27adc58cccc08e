#[derive(Debug, thiserror::Error)]
pub enum DatasourceError {
    #[error("Missing table: {0}")]
    MissingTable(String),

    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl DatasourceError {
    pub fn kind(&self) -> &'static str {
        match self {
            DatasourceError::MissingTable(_) => "missing_table",
            DatasourceError::Mongo(_) => "mongo",
            DatasourceError::Io(_) => "io",
            DatasourceError::Json(_) => "json",
        }
    }
}

pub type Result<T, E = DatasourceError> = std::result::Result<T, E>;
