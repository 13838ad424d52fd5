use crate::domain::Coordinate;

/// A selectable place from the catalog. Only `id` and `coordinate` carry meaning for the selection logic.
#[derive(Clone, Debug, PartialEq)]
pub struct Place {
    pub id: String,
    pub title: String,
    pub image: Image,
    pub coordinate: Coordinate,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    pub src: String,
    pub alt: String,
}
