//! Scenario tests across shapes, hierarchies, raycasts and the world

mod shape_hierarchy;
