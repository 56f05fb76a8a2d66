use serde::{Deserialize, Serialize};

/// One entry in the static garment-type catalog used by the order form.
/// Prices are never part of the catalog; they are entered per order.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct OutfitType {
    pub id: &'static str,
    pub name: &'static str,
    pub gender: &'static str,
    pub category: &'static str,
}

const OUTFIT_TYPES: &[OutfitType] = &[
    OutfitType { id: "f1", name: "saree", gender: "female", category: "Traditional Wear" },
    OutfitType { id: "f2", name: "kurti", gender: "female", category: "Traditional Wear" },
    OutfitType { id: "f3", name: "camisole", gender: "female", category: "Traditional Wear" },
    OutfitType { id: "f4", name: "ethnic_jacket", gender: "female", category: "Traditional Wear" },
    OutfitType { id: "f5", name: "jacket", gender: "female", category: "Western Wear" },
    OutfitType { id: "f6", name: "nighty", gender: "female", category: "Night Wear" },
    OutfitType { id: "f7", name: "slip", gender: "female", category: "Inner Wear" },
    OutfitType { id: "f8", name: "skirt", gender: "female", category: "Western Wear" },
    OutfitType { id: "f9", name: "shrug", gender: "female", category: "Outerwear" },
    OutfitType { id: "f10", name: "cape", gender: "female", category: "Outerwear" },
    OutfitType { id: "f11", name: "top", gender: "female", category: "Western Wear" },
    OutfitType { id: "f12", name: "women_western_suit", gender: "female", category: "Western Wear" },
    OutfitType { id: "f13", name: "jumpsuit", gender: "female", category: "Western Wear" },
    OutfitType { id: "f14", name: "kaftan", gender: "female", category: "Traditional Wear" },
    OutfitType { id: "f15", name: "women_blazer", gender: "female", category: "Western Wear" },
    OutfitType { id: "f16", name: "women_co_ord_set", gender: "female", category: "Western Wear" },
    OutfitType { id: "f17", name: "sharara", gender: "female", category: "Traditional Wear" },
    OutfitType { id: "f18", name: "lehenga", gender: "female", category: "Traditional Wear" },
    OutfitType { id: "f19", name: "underskirt", gender: "female", category: "Traditional Wear" },
    OutfitType { id: "f20", name: "womenssuit", gender: "female", category: "Western Wear" },
    OutfitType { id: "f21", name: "gown", gender: "female", category: "Western Wear" },
    OutfitType { id: "f22", name: "saree+blouse", gender: "female", category: "Traditional Wear" },
    OutfitType { id: "f23", name: "dress", gender: "female", category: "Western Wear" },
    OutfitType { id: "f24", name: "co_ord_set", gender: "female", category: "Western Wear" },
    OutfitType { id: "f25", name: "tshirt", gender: "female", category: "Western Wear" },
    OutfitType { id: "m1", name: "dhoti", gender: "male", category: "Traditional Wear" },
    OutfitType { id: "m2", name: "pajama", gender: "male", category: "Traditional Wear" },
    OutfitType { id: "m3", name: "kurta", gender: "male", category: "Traditional Wear" },
    OutfitType { id: "m4", name: "blazer", gender: "male", category: "Western/Formal Wear" },
    OutfitType { id: "m5", name: "indo_western", gender: "male", category: "Fusion Wear" },
    OutfitType { id: "m6", name: "sherwani", gender: "male", category: "Traditional Wear" },
    OutfitType { id: "m7", name: "waistcost", gender: "male", category: "Traditional Wear" },
    OutfitType { id: "m8", name: "nehrujacket", gender: "male", category: "Traditional Wear" },
    OutfitType { id: "m9", name: "shirt (1)", gender: "male", category: "Western/Formal Wear" },
    OutfitType { id: "m10", name: "pants", gender: "male", category: "Western/Formal Wear" },
    OutfitType { id: "m11", name: "kurta_pajama", gender: "male", category: "Traditional Wear" },
];

/// Static catalog; no database behind it.
#[derive(Clone, Default)]
pub struct OutfitService;

impl OutfitService {
    pub fn new() -> Self {
        Self
    }

    pub fn all(&self) -> &'static [OutfitType] {
        OUTFIT_TYPES
    }

    pub fn by_gender(&self, gender: &str) -> Vec<OutfitType> {
        OUTFIT_TYPES
            .iter()
            .filter(|o| o.gender.eq_ignore_ascii_case(gender))
            .cloned()
            .collect()
    }

    pub fn by_name(&self, name: &str) -> Option<OutfitType> {
        OUTFIT_TYPES.iter().find(|o| o.name == name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_both_genders() {
        let svc = OutfitService::new();
        assert_eq!(svc.all().len(), 36);
        assert_eq!(svc.by_gender("female").len(), 25);
        assert_eq!(svc.by_gender("male").len(), 11);
    }

    #[test]
    fn lookup_by_name() {
        let svc = OutfitService::new();
        assert_eq!(svc.by_name("lehenga").unwrap().id, "f18");
        assert!(svc.by_name("tuxedo").is_none());
    }
}
