use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DrawError {
    #[error("cannot draw from the empty range {start}..={end}")]
    EmptyRange { start: u32, end: u32 },
    #[error("drawn value {value} is outside of {start}..={end}")]
    OutOfRange { value: u32, start: u32, end: u32 },
    #[error("no scripted draws left")]
    Exhausted,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to serialize the presentation payload: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("draw range {start}..={end} is empty")]
    EmptyRange { start: u32, end: u32 },
    #[error("reference {reference} can never be drawn from {start}..={end}")]
    ReferenceOutOfRange { reference: u32, start: u32, end: u32 },
    #[error("unknown template: {0}")]
    UnknownTemplate(String),
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum LuckError {
    #[error(transparent)]
    Draw(#[from] DrawError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),
    #[error("failed to write trial output: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
