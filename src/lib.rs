//! Enfermagem Dashboard - Nursing-education data viewer
//!
//! Loads five CSV datasets about nursing-education programs at Brazilian
//! federal universities and renders them as charts and a marker map.

pub mod charts;
pub mod data;
pub mod gui;
