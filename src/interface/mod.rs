pub mod export;
pub mod prompts;
pub mod render;

pub use export::{write_csv, write_json};
pub use prompts::{prompt_number, prompt_targets, prompt_yes_no, resolve_food_id};
pub use render::{
    display_food_list, display_meta, display_ranked_meals, display_rejections, display_targets,
};
