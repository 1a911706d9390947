// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory drink store.
//!
//! Drinks are keyed by a monotonically increasing ID and titles are unique.
//! Listing order is ascending ID.

use std::collections::BTreeMap;

use crate::error::ApiError;
use crate::models::{Drink, Ingredient};

#[derive(Default)]
pub struct DrinkStore {
    drinks: BTreeMap<i64, Drink>,
    last_id: i64,
}

impl DrinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the house starter drink.
    pub fn with_sample_menu() -> Self {
        let mut store = Self::new();
        // A fresh store has no titles to collide with.
        let _ = store.create(
            "water".to_string(),
            vec![Ingredient {
                name: "water".to_string(),
                color: "blue".to_string(),
                parts: 1,
            }],
        );
        store
    }

    pub fn list(&self) -> Vec<Drink> {
        self.drinks.values().cloned().collect()
    }

    pub fn get(&self, id: i64) -> Option<&Drink> {
        self.drinks.get(&id)
    }

    pub fn create(&mut self, title: String, recipe: Vec<Ingredient>) -> Result<Drink, ApiError> {
        validate(&title, &recipe)?;
        self.ensure_title_free(&title, None)?;

        self.last_id += 1;
        let drink = Drink {
            id: self.last_id,
            title,
            recipe,
        };
        self.drinks.insert(drink.id, drink.clone());
        Ok(drink)
    }

    /// Replace the given fields of drink `id`; `None` keeps the current value.
    pub fn update(
        &mut self,
        id: i64,
        title: Option<String>,
        recipe: Option<Vec<Ingredient>>,
    ) -> Result<Drink, ApiError> {
        let current = self
            .drinks
            .get(&id)
            .ok_or_else(|| ApiError::not_found(format!("no drink with id {id}")))?;

        let title = title.unwrap_or_else(|| current.title.clone());
        let recipe = recipe.unwrap_or_else(|| current.recipe.clone());
        validate(&title, &recipe)?;
        self.ensure_title_free(&title, Some(id))?;

        let drink = Drink { id, title, recipe };
        self.drinks.insert(id, drink.clone());
        Ok(drink)
    }

    pub fn delete(&mut self, id: i64) -> Result<Drink, ApiError> {
        self.drinks
            .remove(&id)
            .ok_or_else(|| ApiError::not_found(format!("no drink with id {id}")))
    }

    fn ensure_title_free(&self, title: &str, except: Option<i64>) -> Result<(), ApiError> {
        let taken = self
            .drinks
            .values()
            .any(|drink| drink.title == title && Some(drink.id) != except);
        if taken {
            return Err(ApiError::bad_request(format!(
                "A drink titled '{title}' already exists"
            )));
        }
        Ok(())
    }
}

fn validate(title: &str, recipe: &[Ingredient]) -> Result<(), ApiError> {
    if title.trim().is_empty() {
        return Err(ApiError::bad_request("title must not be empty"));
    }

    if recipe.is_empty() {
        return Err(ApiError::bad_request("recipe must have at least one ingredient"));
    }

    Ok(())
}
