//! Cosmetic catalog
//!
//! Only ids and prices matter to the core; colors and artwork belong to the
//! presentation layer.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cosmetic {
    pub id: &'static str,
    pub name: &'static str,
    pub cost: u64,
    pub description: &'static str,
}

pub static CATALOG: [Cosmetic; 5] = [
    Cosmetic {
        id: "default",
        name: "Nebula Night",
        cost: 0,
        description: "The classic cosmic experience",
    },
    Cosmetic {
        id: "solar",
        name: "Solar Flare",
        cost: 100,
        description: "Blazing through the sun's corona",
    },
    Cosmetic {
        id: "aurora",
        name: "Aurora Borealis",
        cost: 200,
        description: "Northern lights guide your way",
    },
    Cosmetic {
        id: "galaxy",
        name: "Galaxy Core",
        cost: 300,
        description: "Journey to the heart of the galaxy",
    },
    Cosmetic {
        id: "void",
        name: "Deep Void",
        cost: 500,
        description: "The emptiness between stars",
    },
];

pub fn find(id: &str) -> Option<&'static Cosmetic> {
    CATALOG.iter().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::record::DEFAULT_COSMETIC;

    #[test]
    fn test_default_is_free() {
        let default = find(DEFAULT_COSMETIC).expect("default in catalog");
        assert_eq!(default.cost, 0);
        assert!(find("plaid").is_none());
    }
}
