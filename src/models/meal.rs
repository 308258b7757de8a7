use crate::error::{EngineError, Result};
use crate::models::{Food, FoodUnit};

/// One food portion in a meal, expressed as quantity + unit.
#[derive(Debug, Clone, PartialEq)]
pub struct MealItem<'a> {
    pub food: &'a Food,
    pub quantity: f64,
    pub unit: FoodUnit,
}

impl<'a> MealItem<'a> {
    /// Build an item, rejecting bad quantities and units the food cannot convert.
    pub fn new(food: &'a Food, quantity: f64, unit: FoodUnit) -> Result<Self> {
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(EngineError::InvalidQuantity(quantity));
        }
        if !food.supports_unit(unit) {
            return Err(EngineError::UnitUndefined {
                food_id: food.id.clone(),
                unit,
            });
        }
        Ok(Self {
            food,
            quantity,
            unit,
        })
    }

    /// Shorthand for a gram-based item.
    pub fn grams(food: &'a Food, grams: f64) -> Result<Self> {
        Self::new(food, grams, FoodUnit::Gram)
    }
}

/// A non-empty, ordered list of meal items.
///
/// Edits return a new meal; the value is never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Meal<'a> {
    id: String,
    name: Option<String>,
    items: Vec<MealItem<'a>>,
}

impl<'a> Meal<'a> {
    pub fn new(id: impl Into<String>, items: Vec<MealItem<'a>>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(EngineError::InvalidInput("meal id is required".to_string()));
        }
        if items.is_empty() {
            return Err(EngineError::EmptyMealConstruction);
        }
        Ok(Self {
            id,
            name: None,
            items,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn items(&self) -> &[MealItem<'a>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false for a constructed meal.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// New meal with `item` appended.
    pub fn with_item(&self, item: MealItem<'a>) -> Self {
        let mut items = self.items.clone();
        items.push(item);
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            items,
        }
    }

    /// New meal with the quantity of item `index` replaced.
    pub fn with_quantity(&self, index: usize, quantity: f64) -> Result<Self> {
        let Some(current) = self.items.get(index) else {
            return Err(EngineError::InvalidInput(format!(
                "item index {} out of bounds",
                index
            )));
        };
        let replacement = MealItem::new(current.food, quantity, current.unit)?;
        let mut items = self.items.clone();
        items[index] = replacement;
        Ok(Self {
            id: self.id.clone(),
            name: self.name.clone(),
            items,
        })
    }

    /// New meal without item `index`; fails if it would leave the meal empty.
    pub fn without_item(&self, index: usize) -> Result<Self> {
        if index >= self.items.len() {
            return Err(EngineError::InvalidInput(format!(
                "item index {} out of bounds",
                index
            )));
        }
        let items: Vec<MealItem<'a>> = self
            .items
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, item)| item.clone())
            .collect();
        let meal = Meal::new(self.id.clone(), items)?;
        Ok(match &self.name {
            Some(name) => meal.with_name(name.clone()),
            None => meal,
        })
    }

    /// New meal with the same id and name but different items.
    pub fn with_items(&self, items: Vec<MealItem<'a>>) -> Result<Self> {
        let meal = Meal::new(self.id.clone(), items)?;
        Ok(match &self.name {
            Some(name) => meal.with_name(name.clone()),
            None => meal,
        })
    }
}
