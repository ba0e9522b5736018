//! Contact classification
//!
//! Turns an unordered pair of touching bodies into the rule that handles it.
//! The pair is ordered by category bits first, so the table only lists each
//! combination once.

use super::category::Category;
use super::sprite::EntityId;

/// Gameplay rule triggered by a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactRule {
    /// A monster reached the player
    PlayerHit,
    /// The arm struck a monster
    MonsterDestroyed,
}

/// Rule table: (lower category, higher category, rule). First match wins.
pub const CONTACT_RULES: &[(Category, Category, ContactRule)] = &[
    (Category::MONSTER, Category::PLAYER, ContactRule::PlayerHit),
    (Category::MONSTER, Category::ARM, ContactRule::MonsterDestroyed),
];

/// One side of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participant {
    pub id: EntityId,
    pub category: Category,
}

/// A contact matched against the rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified {
    pub rule: ContactRule,
    /// Participant in the lower category (the monster for every rule)
    pub first: Participant,
    pub second: Participant,
}

/// Order a pair so the lower category comes first
pub fn normalize(a: Participant, b: Participant) -> (Participant, Participant) {
    if a.category < b.category { (a, b) } else { (b, a) }
}

/// Find the rule for a contact, if any
pub fn classify(a: Participant, b: Participant) -> Option<Classified> {
    let (first, second) = normalize(a, b);
    CONTACT_RULES
        .iter()
        .find(|(lo, hi, _)| first.category.intersects(*lo) && second.category.intersects(*hi))
        .map(|&(_, _, rule)| Classified { rule, first, second })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(id: u32, category: Category) -> Participant {
        Participant {
            id: EntityId(id),
            category,
        }
    }

    #[test]
    fn test_classify_is_order_independent() {
        let monster = part(7, Category::MONSTER);
        let arm = part(2, Category::ARM);

        let ab = classify(monster, arm).unwrap();
        let ba = classify(arm, monster).unwrap();
        assert_eq!(ab, ba);
        assert_eq!(ab.rule, ContactRule::MonsterDestroyed);
        assert_eq!(ab.first.id, EntityId(7));
        assert_eq!(ab.second.id, EntityId(2));
    }

    #[test]
    fn test_player_hit_rule() {
        let found = classify(part(1, Category::PLAYER), part(9, Category::MONSTER)).unwrap();
        assert_eq!(found.rule, ContactRule::PlayerHit);
        assert_eq!(found.first.category, Category::MONSTER);
    }

    #[test]
    fn test_unmatched_pairs_do_nothing() {
        assert!(classify(part(1, Category::PLAYER), part(2, Category::ARM)).is_none());
        assert!(classify(part(3, Category::MONSTER), part(4, Category::MONSTER)).is_none());
        assert!(classify(part(5, Category::PROJECTILE), part(6, Category::MONSTER)).is_none());
        assert!(classify(part(5, Category::NONE), part(6, Category::PLAYER)).is_none());
    }
}
