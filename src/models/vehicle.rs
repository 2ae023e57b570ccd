//! Vehicle (staff member) type with visit restrictions and distance limits.

use std::collections::BTreeSet;

/// A vehicle (staff member) that serves one route.
///
/// Every vehicle starts and ends at the problem's depot. It may carry:
/// - a *forbidden set*: nodes it must never visit (hard constraint),
/// - a *soft cap*: a route distance budget whose overage is penalized,
/// - a *max distance*: a hard route distance ceiling.
///
/// # Examples
///
/// ```
/// use crew_routing::models::Vehicle;
///
/// let v = Vehicle::new(0).with_soft_cap(200).with_forbidden([2, 3]);
/// assert_eq!(v.id(), 0);
/// assert_eq!(v.soft_cap(), Some(200));
/// assert!(v.forbids(3));
/// assert!(!v.forbids(4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    id: usize,
    forbidden: BTreeSet<usize>,
    soft_cap: Option<i64>,
    max_distance: Option<i64>,
}

impl Vehicle {
    /// Creates an unrestricted vehicle with the given ID.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            forbidden: BTreeSet::new(),
            soft_cap: None,
            max_distance: None,
        }
    }

    /// Adds nodes this vehicle must never visit.
    pub fn with_forbidden(mut self, nodes: impl IntoIterator<Item = usize>) -> Self {
        self.forbidden.extend(nodes);
        self
    }

    /// Sets the soft route distance cap.
    pub fn with_soft_cap(mut self, cap: i64) -> Self {
        self.soft_cap = Some(cap);
        self
    }

    /// Sets the hard maximum route distance.
    pub fn with_max_distance(mut self, max: i64) -> Self {
        self.max_distance = Some(max);
        self
    }

    /// Vehicle ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Nodes this vehicle may not visit.
    pub fn forbidden(&self) -> &BTreeSet<usize> {
        &self.forbidden
    }

    /// Returns `true` if `node` is in the forbidden set.
    pub fn forbids(&self, node: usize) -> bool {
        self.forbidden.contains(&node)
    }

    /// Soft distance cap, if any.
    pub fn soft_cap(&self) -> Option<i64> {
        self.soft_cap
    }

    /// Hard maximum route distance, if any.
    pub fn max_distance(&self) -> Option<i64> {
        self.max_distance
    }
}
