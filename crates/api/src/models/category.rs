//! Product category model.

use serde::Serialize;

use brocante_core::CategoryId;

/// A node in the category taxonomy.
///
/// `parent_id` is not resolved at creation time, so a dangling or cyclic
/// parent reference is representable. Nothing in the service traverses the
/// tree, so neither is rejected at write time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CategoryId>,
}

impl Category {
    /// Create a category, optionally attached to a parent.
    #[must_use]
    pub fn new(name: String, parent_id: Option<CategoryId>) -> Self {
        Self {
            id: CategoryId::generate(),
            name,
            parent_id,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_omitted_when_absent() {
        let root = Category::new("Furniture".to_string(), None);
        let json = serde_json::to_value(&root).unwrap();
        assert!(json.get("parentId").is_none());

        let child = Category::new("Tables".to_string(), Some(root.id));
        let json = serde_json::to_value(&child).unwrap();
        assert_eq!(json["parentId"], root.id.to_string());
    }
}
