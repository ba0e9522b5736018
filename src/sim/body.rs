//! Physics bodies and begin-contact detection
//!
//! Bodies never collide (collision masks are empty); they only report
//! contacts. A pair is reported once, on the tick its shapes start to overlap,
//! and only if one side's category is in the other side's contact-test mask.

use std::collections::BTreeSet;

use glam::Vec2;

use super::category::Category;
use super::sprite::EntityId;

/// Collision shape, centred on the sprite position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rect { size: Vec2 },
    Circle { radius: f32 },
}

/// Physics body attached to a sprite
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub shape: Shape,
    /// Category this body belongs to
    pub category: Category,
    /// Categories whose contacts this body wants reported
    pub contact_test: Category,
    /// Categories this body bounces off (always NONE in this game)
    pub collision: Category,
    /// Continuous detection hint for fast movers
    pub precise: bool,
}

impl Body {
    pub fn rect(size: Vec2, category: Category) -> Self {
        Self::with_shape(Shape::Rect { size }, category)
    }

    pub fn circle(radius: f32, category: Category) -> Self {
        Self::with_shape(Shape::Circle { radius }, category)
    }

    fn with_shape(shape: Shape, category: Category) -> Self {
        Self {
            shape,
            category,
            contact_test: Category::NONE,
            collision: Category::NONE,
            precise: true,
        }
    }

    pub fn with_contact_test(mut self, mask: Category) -> Self {
        self.contact_test = mask;
        self
    }

    /// Either side asked to hear about the other
    pub fn wants_contact(&self, other: &Body) -> bool {
        self.category.intersects(other.contact_test) || other.category.intersects(self.contact_test)
    }
}

/// Overlap test between two centred shapes
pub fn shapes_overlap(a_pos: Vec2, a: &Shape, b_pos: Vec2, b: &Shape) -> bool {
    match (*a, *b) {
        (Shape::Rect { size: sa }, Shape::Rect { size: sb }) => {
            let d = (a_pos - b_pos).abs();
            let reach = (sa + sb) / 2.0;
            d.x < reach.x && d.y < reach.y
        }
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            a_pos.distance_squared(b_pos) < (ra + rb) * (ra + rb)
        }
        (Shape::Circle { radius }, Shape::Rect { size }) => circle_rect(a_pos, radius, b_pos, size),
        (Shape::Rect { size }, Shape::Circle { radius }) => circle_rect(b_pos, radius, a_pos, size),
    }
}

fn circle_rect(center: Vec2, radius: f32, rect_pos: Vec2, size: Vec2) -> bool {
    let half = size / 2.0;
    let closest = center.clamp(rect_pos - half, rect_pos + half);
    center.distance_squared(closest) < radius * radius
}

/// Pair key with the smaller id first
fn pair_key(a: EntityId, b: EntityId) -> (EntityId, EntityId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Remembers which pairs are touching so only new contacts get reported
#[derive(Debug, Clone, Default)]
pub struct ContactTracker {
    active: BTreeSet<(EntityId, EntityId)>,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find contacts that began since the previous step.
    ///
    /// `bodies` is every body in the scene. Pairs involving ids that have
    /// disappeared are forgotten. Results come back in id order.
    pub fn step(&mut self, bodies: &[(EntityId, Vec2, &Body)]) -> Vec<(EntityId, EntityId)> {
        let mut touching = BTreeSet::new();
        for (i, (id_a, pos_a, body_a)) in bodies.iter().enumerate() {
            for (id_b, pos_b, body_b) in &bodies[i + 1..] {
                if !body_a.wants_contact(body_b) {
                    continue;
                }
                if shapes_overlap(*pos_a, &body_a.shape, *pos_b, &body_b.shape) {
                    touching.insert(pair_key(*id_a, *id_b));
                }
            }
        }

        let began = touching.difference(&self.active).copied().collect();
        self.active = touching;
        began
    }

    /// Number of pairs currently touching
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}
