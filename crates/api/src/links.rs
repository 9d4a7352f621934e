//! Link enrichment.
//!
//! Every resource representation ships with a `_links` map describing the
//! follow-up actions a client can take: relation name to `{href, method}`.
//! One pure function owns the whole shape, parameterized by resource kind
//! and base URL, so every controller emits identical link structures. The
//! input representation is wrapped, never mutated.

use std::collections::BTreeMap;

use serde::Serialize;

use brocante_core::{CategoryId, ProductId, UserId};

/// A single action affordance.
#[derive(Debug, Clone, Serialize)]
pub struct Link {
    pub href: String,
    pub method: &'static str,
}

/// Relation-name to action map, serialized as a JSON object.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Links(BTreeMap<&'static str, Link>);

/// The resource kinds that carry links.
#[derive(Debug, Clone, Copy)]
pub enum Resource {
    /// A product representation (listing, detail, creation, cart result).
    Product {
        id: ProductId,
        category: CategoryId,
        owner: UserId,
    },
    /// A category inside the collection listing.
    CategoryItem { id: CategoryId },
    /// A category detail representation.
    CategoryDetail { id: CategoryId },
    /// A user inside the collection listing.
    UserItem { id: UserId },
    /// The representation returned by signup.
    Signup { id: UserId },
    /// A product inside the caller's cart.
    CartItem { id: ProductId },
}

/// Build the link set for a resource.
#[must_use]
pub fn enrich(base_url: &str, resource: Resource) -> Links {
    let get = |href: String| Link {
        href,
        method: "GET",
    };
    let mut links = BTreeMap::new();

    match resource {
        Resource::Product {
            id,
            category,
            owner,
        } => {
            links.insert("self", get(format!("{base_url}/search/{id}")));
            links.insert("product", get(format!("{base_url}/products/{id}")));
            links.insert("category", get(format!("{base_url}/categories/{category}")));
            links.insert("user", get(format!("{base_url}/user/{owner}")));
            links.insert(
                "addToCart",
                Link {
                    href: format!("{base_url}/cart/{id}"),
                    method: "PUT",
                },
            );
        }
        Resource::CategoryItem { id } => {
            links.insert("self", get(format!("{base_url}/categories/")));
            links.insert("category", get(format!("{base_url}/categories/{id}")));
            links.insert(
                "delete",
                Link {
                    href: format!("{base_url}/categories/{id}"),
                    method: "DELETE",
                },
            );
        }
        Resource::CategoryDetail { id } => {
            links.insert("self", get(format!("{base_url}/categories/{id}")));
            links.insert(
                "delete",
                Link {
                    href: format!("{base_url}/categories/{id}"),
                    method: "DELETE",
                },
            );
        }
        Resource::UserItem { id } => {
            links.insert("self", get(format!("{base_url}/users/")));
            links.insert("user", get(format!("{base_url}/user/{id}")));
        }
        Resource::Signup { id } => {
            links.insert(
                "self",
                Link {
                    href: format!("{base_url}/auth/signup"),
                    method: "POST",
                },
            );
            links.insert("user", get(format!("{base_url}/user/{id}")));
            links.insert(
                "login",
                Link {
                    href: format!("{base_url}/auth/login"),
                    method: "POST",
                },
            );
        }
        Resource::CartItem { id } => {
            links.insert("self", get(format!("{base_url}/cart/")));
            links.insert("product", get(format!("{base_url}/products/{id}")));
            links.insert(
                "addToCart",
                Link {
                    href: format!("{base_url}/cart/{id}"),
                    method: "PUT",
                },
            );
            links.insert(
                "removeFromCart",
                Link {
                    href: format!("{base_url}/cart/{id}"),
                    method: "DELETE",
                },
            );
        }
    }

    Links(links)
}

/// A resource representation extended with its link set.
#[derive(Debug, Serialize)]
pub struct Linked<T> {
    #[serde(flatten)]
    pub resource: T,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl<T> Linked<T> {
    /// Wrap a representation with its links.
    pub const fn new(resource: T, links: Links) -> Self {
        Self { resource, links }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:3000";

    #[test]
    fn test_product_links() {
        let id = ProductId::generate();
        let category = CategoryId::generate();
        let owner = UserId::generate();

        let links = enrich(BASE, Resource::Product {
            id,
            category,
            owner,
        });
        let json = serde_json::to_value(&links).unwrap();

        assert_eq!(json["self"]["href"], format!("{BASE}/search/{id}"));
        assert_eq!(json["product"]["href"], format!("{BASE}/products/{id}"));
        assert_eq!(
            json["category"]["href"],
            format!("{BASE}/categories/{category}")
        );
        assert_eq!(json["user"]["href"], format!("{BASE}/user/{owner}"));
        assert_eq!(json["addToCart"]["method"], "PUT");
    }

    #[test]
    fn test_cart_item_links_carry_both_mutations() {
        let id = ProductId::generate();
        let json = serde_json::to_value(enrich(BASE, Resource::CartItem { id })).unwrap();

        assert_eq!(json["addToCart"]["method"], "PUT");
        assert_eq!(json["removeFromCart"]["method"], "DELETE");
        assert_eq!(
            json["removeFromCart"]["href"],
            format!("{BASE}/cart/{id}")
        );
    }

    #[test]
    fn test_signup_links() {
        let id = UserId::generate();
        let json = serde_json::to_value(enrich(BASE, Resource::Signup { id })).unwrap();

        assert_eq!(json["self"]["method"], "POST");
        assert_eq!(json["login"]["href"], format!("{BASE}/auth/login"));
        assert_eq!(json["user"]["href"], format!("{BASE}/user/{id}"));
    }

    #[test]
    fn test_linked_wrapper_flattens_resource() {
        #[derive(Serialize)]
        struct Thing {
            name: &'static str,
        }

        let id = CategoryId::generate();
        let wrapped = Linked::new(
            Thing { name: "Furniture" },
            enrich(BASE, Resource::CategoryDetail { id }),
        );
        let json = serde_json::to_value(&wrapped).unwrap();

        assert_eq!(json["name"], "Furniture");
        assert_eq!(json["_links"]["delete"]["method"], "DELETE");
    }
}
