//! Aggregation of extracted rating records and per-term course snapshots.
//!
//! This module folds decoded records into per-professor course statistics
//! (including caller-supplied cross-listing merges), builds the
//! instructor → term → course index from snapshot files, and compacts
//! full catalog dumps into those snapshots.

pub mod compact;
pub mod index;
pub mod ledger;
pub mod types;
