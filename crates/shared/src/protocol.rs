use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::{Product, ProductId, GRID_SLOTS};

/// One entry of the catalog response. Unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductPayload {
    #[serde(deserialize_with = "product_id_from_number")]
    pub id: ProductId,
    pub title: String,
    pub image: String,
}

/// Accepts `7` as well as `7.0`; fractional ids have no integral identity.
fn product_id_from_number<'de, D>(deserializer: D) -> Result<ProductId, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(id) = number.as_i64() {
        return Ok(ProductId(id));
    }
    match number.as_f64() {
        Some(value) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => {
            Ok(ProductId(value as i64))
        }
        _ => Err(D::Error::custom(format!(
            "product id {number} is not an integral number"
        ))),
    }
}

impl From<ProductPayload> for Product {
    fn from(value: ProductPayload) -> Self {
        Self {
            id: value.id,
            title: value.title,
            image_url: value.image,
        }
    }
}

/// An entry inside the grid window that could not be read as a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub position: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridCatalog {
    /// Entries in the response before truncation.
    pub received: usize,
    pub products: Vec<Product>,
    pub skipped: Vec<SkippedEntry>,
}

/// Keeps the first [`GRID_SLOTS`] entries in received order and decodes only
/// those, so nothing past the grid window can affect the load.
pub fn products_for_grid(entries: Vec<Value>) -> GridCatalog {
    let received = entries.len();
    let mut catalog = GridCatalog {
        received,
        ..GridCatalog::default()
    };
    for (position, entry) in entries.into_iter().take(GRID_SLOTS).enumerate() {
        match serde_json::from_value::<ProductPayload>(entry) {
            Ok(payload) => catalog.products.push(payload.into()),
            Err(err) => catalog.skipped.push(SkippedEntry {
                position,
                reason: err.to_string(),
            }),
        }
    }
    catalog
}
