pub mod catalog;
pub mod error;
pub mod search;
pub mod types;

pub use catalog::{Catalog, RecipeDraft, RecipePatch};
pub use error::CatalogError;
pub use search::{filter_by_category, search};
pub use types::{Author, Difficulty, IngredientEntry, Recipe, StepEntry};
