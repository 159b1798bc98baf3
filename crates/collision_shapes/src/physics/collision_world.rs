//! Registry of shape trees with pairwise detection
//!
//! [`CollisionWorld`] owns root shapes behind stable [`ShapeHandle`]s and
//! runs the hierarchical test over every registered pair whose box types
//! interact. Pairs from consecutive [`CollisionWorld::update`] calls are
//! compared to report contacts that started or ended.
//!
//! There is no broad phase: detection is quadratic in the number of
//! registered roots.

use std::collections::HashSet;

use slotmap::{new_key_type, SlotMap};

use crate::config::RaycastConfig;
use crate::foundation::math::Point2;
use crate::physics::box_type::BoxType;
use crate::physics::collision::Shape;
use crate::physics::raycast::{FullRaycastResult, Ray, RaycastResult};

new_key_type! {
    /// Stable handle to a shape registered in a [`CollisionWorld`]
    pub struct ShapeHandle;
}

/// Unordered pair of registered shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactPair {
    /// Smaller handle of the pair
    pub first: ShapeHandle,
    /// Larger handle of the pair
    pub second: ShapeHandle,
}

impl ContactPair {
    /// Create a pair, storing the smaller handle first
    pub fn new(a: ShapeHandle, b: ShapeHandle) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// True if `handle` is part of this pair
    pub fn contains(&self, handle: ShapeHandle) -> bool {
        self.first == handle || self.second == handle
    }
}

/// Overlap between two registered shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// The overlapping shapes
    pub pair: ContactPair,
    /// First contact point found, in world space
    pub point: Point2,
}

/// Owns root shapes and tracks which of them overlap
#[derive(Debug, Default)]
pub struct CollisionWorld {
    shapes: SlotMap<ShapeHandle, Shape>,
    current_pairs: HashSet<ContactPair>,
    previous_pairs: HashSet<ContactPair>,
}

impl CollisionWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a root shape
    pub fn insert(&mut self, shape: Shape) -> ShapeHandle {
        let handle = self.shapes.insert(shape);
        log::trace!("Registered shape {:?}", handle);
        handle
    }

    /// Unregister a shape, returning it
    ///
    /// Contacts involving the shape are reported as ended by the next
    /// [`CollisionWorld::update`].
    pub fn remove(&mut self, handle: ShapeHandle) -> Option<Shape> {
        self.shapes.remove(handle)
    }

    /// Registered shape for `handle`
    pub fn get(&self, handle: ShapeHandle) -> Option<&Shape> {
        self.shapes.get(handle)
    }

    /// Mutable registered shape for `handle`
    pub fn get_mut(&mut self, handle: ShapeHandle) -> Option<&mut Shape> {
        self.shapes.get_mut(handle)
    }

    /// True if `handle` is registered
    pub fn contains(&self, handle: ShapeHandle) -> bool {
        self.shapes.contains_key(handle)
    }

    /// Number of registered shapes
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// True if no shapes are registered
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Handles of every registered shape
    pub fn handles(&self) -> impl Iterator<Item = ShapeHandle> + '_ {
        self.shapes.keys()
    }

    /// Every registered shape with its handle
    pub fn iter(&self) -> impl Iterator<Item = (ShapeHandle, &Shape)> {
        self.shapes.iter()
    }

    /// Remove every shape and forget tracked contacts
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.current_pairs.clear();
        self.previous_pairs.clear();
    }

    /// Test every pair of registered shapes whose box types interact
    ///
    /// Contacts come back sorted by pair.
    pub fn detect(&self) -> Vec<Contact> {
        let mut handles: Vec<ShapeHandle> = self.shapes.keys().collect();
        handles.sort_unstable();

        let mut contacts = Vec::new();
        for (index, &first) in handles.iter().enumerate() {
            for &second in &handles[index + 1..] {
                let (a, b) = (&self.shapes[first], &self.shapes[second]);
                if !BoxType::interacts_either_way(a.box_type(), b.box_type()) {
                    continue;
                }
                if let Some(result) = a.collides_with_shape(b) {
                    contacts.push(Contact {
                        pair: ContactPair::new(first, second),
                        point: result.collision_point,
                    });
                }
            }
        }
        contacts
    }

    /// Run detection and remember the overlapping pairs
    pub fn update(&mut self) -> Vec<Contact> {
        std::mem::swap(&mut self.current_pairs, &mut self.previous_pairs);
        self.current_pairs.clear();

        let contacts = self.detect();
        self.current_pairs.extend(contacts.iter().map(|contact| contact.pair));

        log::debug!(
            "Collision update: {} contacts, {} started, {} ended",
            contacts.len(),
            self.current_pairs.difference(&self.previous_pairs).count(),
            self.previous_pairs.difference(&self.current_pairs).count()
        );
        contacts
    }

    /// Pairs overlapping in the last update but not the one before
    pub fn started(&self) -> Vec<ContactPair> {
        let mut pairs: Vec<ContactPair> = self.current_pairs.difference(&self.previous_pairs).copied().collect();
        pairs.sort_unstable();
        pairs
    }

    /// Pairs overlapping in the update before last but not the last one
    pub fn ended(&self) -> Vec<ContactPair> {
        let mut pairs: Vec<ContactPair> = self.previous_pairs.difference(&self.current_pairs).copied().collect();
        pairs.sort_unstable();
        pairs
    }

    /// Pairs found by the last update
    pub fn current_pairs(&self) -> &HashSet<ContactPair> {
        &self.current_pairs
    }

    /// Closest hit of `ray` and the handle of the root shape containing it
    pub fn raycast(&self, ray: &Ray) -> Option<(ShapeHandle, RaycastResult<'_>)> {
        self.shapes
            .iter()
            .filter_map(|(handle, shape)| ray.raycast(shape).map(|hit| (handle, hit)))
            .min_by(|(_, a), (_, b)| a.length.total_cmp(&b.length))
    }

    /// Reflection chain against every registered shape
    pub fn reflecting_raycast(&self, ray: &Ray, config: &RaycastConfig) -> Vec<RaycastResult<'_>> {
        ray.reflecting_raycast_with_config(config, self.shapes.values())
    }

    /// Length-bounded reflection chain against every registered shape
    pub fn full_raycast(&self, ray: &Ray, config: &RaycastConfig) -> Vec<FullRaycastResult<'_>> {
        ray.full_raycast_with_config(config, self.shapes.values())
    }
}
