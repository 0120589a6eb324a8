use thiserror::Error;

/// Errors raised while locating or parsing a font.
#[derive(Debug, Error)]
pub enum FontError {
    /// Neither the requested family nor any monospace fallback is installed.
    #[error("No monospace font found (requested family '{family}')")]
    NotFound {
        /// Family that was requested first.
        family: String,
    },

    /// The font bytes could not be parsed as TTF/OTF.
    #[error("Invalid font data: {0}")]
    InvalidFontData(String),
}
