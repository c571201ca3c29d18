use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Cannot lay out an empty image")]
    EmptyImage,

    #[error("Page has no printable area: {0}")]
    InvalidPageGeometry(String),

    #[error("PDF generation error: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}
