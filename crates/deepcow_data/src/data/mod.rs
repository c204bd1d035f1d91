//! Core data structures for the deepcow simulation.

pub mod action;
pub mod entity;
pub mod observation;
pub mod vector;
