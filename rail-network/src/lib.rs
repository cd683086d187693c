//! Route-graph query engine for a fictional railway network.
//!
//! Answers: "how do I get from here to there, and what does this service
//! run past without stopping?"

pub mod cache;
pub mod corridor;
pub mod dataset;
pub mod domain;
pub mod navigation;
pub mod network;
pub mod planner;
