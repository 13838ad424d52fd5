use crate::domain::{Coordinate, Image, Place};
use serde::de::Error;
use serde::{Deserialize, Deserializer};

impl<'de> Deserialize<'de> for Place {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Debug, Deserialize)]
        pub struct Inner {
            id: String,
            title: String,
            image: InnerImage,
            lat: f64,
            lon: f64,
        }

        #[derive(Debug, Deserialize)]
        pub struct InnerImage {
            src: String,
            alt: String,
        }

        let inner = Inner::deserialize(deserializer)?;
        if inner.id.trim().is_empty() {
            return Err(Error::custom(format!("place '{}' has an empty id", inner.title)));
        }

        let coordinate =
            Coordinate::validated(inner.lat, inner.lon).map_err(|e| Error::custom(format!("place '{}' has an {}", inner.id, e)))?;

        Ok(Place {
            id: inner.id,
            title: inner.title,
            image: Image {
                src: inner.image.src,
                alt: inner.image.alt,
            },
            coordinate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn deserializes_a_place() -> Result<(), serde_json::Error> {
        let place: Place = serde_json::from_value(json!({
            "id": "p1",
            "title": "Forest Waterfall",
            "image": { "src": "forest-waterfall.jpg", "alt": "A tranquil forest" },
            "lat": 44.5588,
            "lon": -80.344
        }))?;

        assert_eq!(
            place,
            Place {
                id: "p1".to_string(),
                title: "Forest Waterfall".to_string(),
                image: Image {
                    src: "forest-waterfall.jpg".to_string(),
                    alt: "A tranquil forest".to_string(),
                },
                coordinate: Coordinate {
                    latitude: 44.5588,
                    longitude: -80.344
                },
            }
        );
        Ok(())
    }

    #[test]
    fn rejects_a_place_without_an_id() {
        let result = serde_json::from_value::<Place>(json!({
            "id": " ",
            "title": "Nameless",
            "image": { "src": "x.jpg", "alt": "x" },
            "lat": 1.0,
            "lon": 1.0
        }));

        assert!(result.is_err());
    }

    #[test]
    fn rejects_a_place_with_an_invalid_coordinate() {
        let result = serde_json::from_value::<Place>(json!({
            "id": "p2",
            "title": "Off the map",
            "image": { "src": "x.jpg", "alt": "x" },
            "lat": 1.0,
            "lon": 190.0
        }));

        let error = result.expect_err("expected an invalid longitude");
        assert!(error.to_string().contains("place 'p2' has an invalid longitude"), "unexpected error: {}", error);
    }
}
