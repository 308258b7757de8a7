use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::models::Food;

/// Deduplicate by id: the last record wins, at the position of the first.
pub fn dedupe_by_id(foods: Vec<Food>) -> Vec<Food> {
    let mut position: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<Food> = Vec::with_capacity(foods.len());
    for food in foods {
        match position.get(&food.id) {
            Some(&i) => out[i] = food,
            None => {
                position.insert(food.id.clone(), out.len());
                out.push(food);
            }
        }
    }
    out
}

/// Load foods from a JSON array file.
pub fn load_foods<P: AsRef<Path>>(path: P) -> Result<Vec<Food>> {
    let content = fs::read_to_string(path.as_ref())?;
    let foods: Vec<Food> = serde_json::from_str(&content)?;
    let total = foods.len();
    let foods = dedupe_by_id(foods);
    debug!(
        path = %path.as_ref().display(),
        total,
        unique = foods.len(),
        "loaded foods"
    );
    Ok(foods)
}

/// Save foods to a JSON file, deduplicated by id.
pub fn save_foods<P: AsRef<Path>>(path: P, foods: &[Food]) -> Result<()> {
    let deduped = dedupe_by_id(foods.to_vec());
    let json = serde_json::to_string_pretty(&deduped)?;
    fs::write(path, json)?;
    Ok(())
}
