//! Snapshot export of solids and render geometry

pub mod stl;
