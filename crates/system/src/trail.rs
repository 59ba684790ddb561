//! Bounded, distance-gated history of recent positions.

use std::collections::VecDeque;

use orbyte_core::Vector3;
use orbyte_core::constants::TRAIL_CAPACITY;

/// FIFO of world-frame points consumed by renderers. Not part of the physical state.
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<Vector3>,
    capacity: usize,
    last_point: Vector3,
}

impl Trail {
    /// Empty trail whose distance gate is measured from `origin`.
    pub fn new(origin: Vector3) -> Self {
        Trail::with_capacity(origin, TRAIL_CAPACITY)
    }

    pub fn with_capacity(origin: Vector3, capacity: usize) -> Self {
        Trail {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
            last_point: origin,
        }
    }

    /// Append `point` if it lies farther than `threshold` from the last appended point.
    pub fn try_append(&mut self, point: Vector3, threshold: f64) -> bool {
        if point.distance(self.last_point) <= threshold {
            return false;
        }
        self.points.push_back(point);
        self.last_point = point;
        self.evict();
        true
    }

    /// Drop the oldest entries beyond capacity.
    pub fn evict(&mut self) {
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Forget every point and measure the gate from `origin` again.
    pub fn clear(&mut self, origin: Vector3) {
        self.points.clear();
        self.last_point = origin;
    }

    /// Points from oldest to newest.
    pub fn points(&self) -> impl ExactSizeIterator<Item = &Vector3> + '_ {
        self.points.iter()
    }

    pub fn to_vec(&self) -> Vec<Vector3> {
        self.points.iter().copied().collect()
    }

    pub fn last_point(&self) -> Vector3 {
        self.last_point
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Sampling distance that yields roughly one trail point per 1/24 of a circular orbit.
pub fn sampling_threshold(radius: f64) -> f64 {
    0.5 * radius / TRAIL_CAPACITY as f64
}
