//! Execution unit (virtual machine) model.
//!
//! A unit is an abstract processor with a fixed processing rate. It holds no
//! dispatch state; the scheduler tracks what runs where.

use serde::{Deserialize, Serialize};

/// A processor that jobs are dispatched to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionUnit {
    /// Unique unit identifier.
    pub id: u64,
    /// Work units consumed per unit of simulated time (default: 1.0).
    pub capacity: f64,
}

impl ExecutionUnit {
    /// Creates a unit with normalised capacity 1.0.
    pub fn new(id: u64) -> Self {
        Self { id, capacity: 1.0 }
    }

    /// Sets the processing capacity.
    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Creates `count` units with ids `0..count` and unit capacity.
    pub fn pool(count: usize) -> Vec<Self> {
        (0..count as u64).map(Self::new).collect()
    }
}
