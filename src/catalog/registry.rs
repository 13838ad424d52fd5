use crate::catalog::CatalogError;
use crate::domain::Place;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

/// The immutable set of places, in catalog order, indexed by id.
#[derive(Debug)]
pub struct Catalog {
    places: Vec<Arc<Place>>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(places: Vec<Place>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(places.len());
        for (index, place) in places.iter().enumerate() {
            match by_id.entry(place.id.clone()) {
                Entry::Occupied(_) => return Err(CatalogError::DuplicateId(place.id.clone())),
                Entry::Vacant(entry) => {
                    entry.insert(index);
                }
            }
        }

        let places = places.into_iter().map(Arc::new).collect();
        Ok(Catalog { places, by_id })
    }

    pub fn places(&self) -> &[Arc<Place>] {
        &self.places
    }

    pub fn by_id(&self, id: &str) -> Option<Arc<Place>> {
        self.by_id.get(id).map(|&index| &self.places[index]).cloned()
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}
