#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid svg document: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("document has no svg root")]
    NoSvgRoot,
    #[error("document has no nav layer container")]
    MissingNavLayer,
    #[error("no document loaded")]
    NoDocument,
}

pub type Result<T> = std::result::Result<T, Error>;
