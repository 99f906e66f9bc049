//! A toolkit for graph search and game-tree search: uninformed and informed
//! path search, AND-OR solving, local search, and adversarial (minimax)
//! search over caller-supplied domains.

pub mod adversarial;
pub mod graph;
pub mod search;
