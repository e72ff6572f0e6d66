//! Favorites list.
//!
//! A client-side list of saved quotes under one store key. Identity for
//! duplicate detection is the (brand, model, year, fuel) tuple; removal is
//! by the id assigned when the entry was saved.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::store::{KvStore, KvStoreExt, StoreError, keys};
use crate::vehicle::VehicleQuote;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteVehicle {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub year: String,
    pub fuel: String,
    pub price: u32,
    pub fipe_code: String,
    pub reference_month: String,
}

#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("Vehicle is already in favorites")]
    AlreadyFavorite,
    #[error("Vehicle not found in favorites")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct Favorites {
    store: Arc<dyn KvStore>,
}

impl Favorites {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Favorites { store }
    }

    /// Saved favorites, oldest first. An absent key reads as an empty list.
    pub fn list(&self) -> Result<Vec<FavoriteVehicle>, FavoritesError> {
        Ok(self.store.get(keys::FAVORITES)?.unwrap_or_default())
    }

    /// Save a quote, assigning it a fresh id.
    pub fn add(&self, quote: &VehicleQuote) -> Result<FavoriteVehicle, FavoritesError> {
        let mut favorites = self.list()?;
        if favorites.iter().any(|fav| matches_quote(fav, quote)) {
            return Err(FavoritesError::AlreadyFavorite);
        }

        let favorite = FavoriteVehicle {
            id: Utc::now().timestamp_millis().to_string(),
            brand: quote.brand.clone(),
            model: quote.model.clone(),
            year: quote.year.clone(),
            fuel: quote.fuel.clone(),
            price: quote.price,
            fipe_code: quote.fipe_code.clone(),
            reference_month: quote.reference_month.clone(),
        };
        favorites.push(favorite.clone());
        self.store.set(keys::FAVORITES, &favorites)?;
        debug!(id = %favorite.id, "favorite added");
        Ok(favorite)
    }

    pub fn remove(&self, id: &str) -> Result<(), FavoritesError> {
        let mut favorites = self.list()?;
        let before = favorites.len();
        favorites.retain(|fav| fav.id != id);
        if favorites.len() == before {
            return Err(FavoritesError::NotFound);
        }
        self.store.set(keys::FAVORITES, &favorites)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), FavoritesError> {
        self.store.set(keys::FAVORITES, &Vec::<FavoriteVehicle>::new())?;
        Ok(())
    }

    pub fn is_favorite(&self, quote: &VehicleQuote) -> Result<bool, FavoritesError> {
        Ok(self.list()?.iter().any(|fav| matches_quote(fav, quote)))
    }
}

fn matches_quote(fav: &FavoriteVehicle, quote: &VehicleQuote) -> bool {
    fav.brand == quote.brand
        && fav.model == quote.model
        && fav.year == quote.year
        && fav.fuel == quote.fuel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn favorites() -> Favorites {
        Favorites::new(Arc::new(MemoryStore::new()))
    }

    fn quote(model: &str) -> VehicleQuote {
        VehicleQuote {
            id: format!("Fiat-{model}-2019"),
            brand: "Fiat".to_string(),
            model: model.to_string(),
            year: "2019".to_string(),
            fuel: "Flex".to_string(),
            price: 45_000,
            fipe_code: "123456".to_string(),
            reference_month: "agosto de 2026".to_string(),
        }
    }

    #[test]
    fn add_list_and_membership() {
        let favorites = favorites();
        assert!(favorites.list().unwrap().is_empty());
        assert!(!favorites.is_favorite(&quote("Uno")).unwrap());

        let saved = favorites.add(&quote("Uno")).unwrap();
        assert!(!saved.id.is_empty());
        assert_eq!(favorites.list().unwrap().len(), 1);
        assert!(favorites.is_favorite(&quote("Uno")).unwrap());
    }

    #[test]
    fn duplicate_add_is_rejected() {
        let favorites = favorites();
        favorites.add(&quote("Uno")).unwrap();
        assert!(matches!(favorites.add(&quote("Uno")), Err(FavoritesError::AlreadyFavorite)));

        // A different model is a different favorite.
        favorites.add(&quote("Argo")).unwrap();
        assert_eq!(favorites.list().unwrap().len(), 2);
    }

    #[test]
    fn remove_by_id_and_unknown_id() {
        let favorites = favorites();
        let saved = favorites.add(&quote("Uno")).unwrap();

        assert!(matches!(favorites.remove("no-such-id"), Err(FavoritesError::NotFound)));
        favorites.remove(&saved.id).unwrap();
        assert!(favorites.list().unwrap().is_empty());
    }

    #[test]
    fn clear_empties_the_list() {
        let favorites = favorites();
        favorites.add(&quote("Uno")).unwrap();
        favorites.add(&quote("Argo")).unwrap();
        favorites.clear().unwrap();
        assert!(favorites.list().unwrap().is_empty());
    }
}
