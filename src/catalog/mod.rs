mod index;
mod persistence;

pub use index::FoodCatalog;
pub use persistence::{dedupe_by_id, load_foods, save_foods};
