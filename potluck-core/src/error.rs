use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Recipe not found: {0}")]
    NotFound(Uuid),

    #[error("Only the author may modify this recipe")]
    NotOwner,
}
