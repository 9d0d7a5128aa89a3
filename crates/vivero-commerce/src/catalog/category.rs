//! Category types for product organization.

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::CategoryId;

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductCategory {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// URL-friendly handle.
    pub handle: String,
    /// Whether the category is visible in the storefront.
    pub is_active: bool,
    /// Parent category ID (None for root categories).
    pub parent_category_id: Option<CategoryId>,
}

impl ProductCategory {
    /// Create a new root category, deriving the handle from the name.
    pub fn new_root(name: impl Into<String>, is_active: bool) -> Self {
        let name = name.into();
        Self {
            id: CategoryId::generate(),
            handle: handleize(&name),
            name,
            is_active,
            parent_category_id: None,
        }
    }

    /// Check if this is a root category.
    pub fn is_root(&self) -> bool {
        self.parent_category_id.is_none()
    }
}

/// Look a category up by exact name.
pub fn find_category<'a>(
    categories: &'a [ProductCategory],
    name: &str,
) -> Result<&'a ProductCategory, CommerceError> {
    categories
        .iter()
        .find(|c| c.name == name)
        .ok_or_else(|| CommerceError::CategoryNotFound(name.to_string()))
}

/// Turn a display name into a handle ("Plantas de interior" -> "plantas-de-interior").
pub(crate) fn handleize(name: &str) -> String {
    let mut handle = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            handle.push(c.to_ascii_lowercase());
        } else if !handle.ends_with('-') && !handle.is_empty() {
            handle.push('-');
        }
    }
    handle.trim_end_matches('-').to_string()
}
