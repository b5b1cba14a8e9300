//! Directed links with load-dependent cost.

use std::collections::VecDeque;
use std::fmt;

use crate::{CostFunction, Error, NetworkId, Result};

/// Identifier of a link within its network.
///
/// Ids are handed out in insertion order and never reused, so ordering by id
/// is ordering by insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkId(pub u64);

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "link#{}", self.0)
    }
}

/// Marker for one traveler currently on a link.
///
/// Markers are numbered per link in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OccupantId(pub u64);

/// A directed road between two nodes.
#[derive(Debug, Clone)]
pub struct Link<N> {
    source: N,
    destination: N,
    label: Option<String>,
    cost_function: CostFunction,
    occupants: VecDeque<OccupantId>,
    next_occupant: u64,
    current_cost: f64,
    free_flow_cost: f64,
    owner: Option<NetworkId>,
}

impl<N> Link<N> {
    /// Create an empty link from `source` to `destination`.
    pub fn new(source: N, destination: N, cost_function: CostFunction) -> Self {
        let free_flow_cost = cost_function.evaluate(0);
        Self {
            source,
            destination,
            label: None,
            cost_function,
            occupants: VecDeque::new(),
            next_occupant: 0,
            current_cost: free_flow_cost,
            free_flow_cost,
            owner: None,
        }
    }

    /// Attach a label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn source(&self) -> &N {
        &self.source
    }

    pub fn destination(&self) -> &N {
        &self.destination
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn cost_function(&self) -> &CostFunction {
        &self.cost_function
    }

    /// Network this link was added to, if any.
    pub fn owner(&self) -> Option<NetworkId> {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: NetworkId) {
        self.owner = Some(owner);
    }

    /// Number of travelers currently on the link.
    pub fn occupancy(&self) -> u64 {
        self.occupants.len() as u64
    }

    /// Occupants in arrival order, oldest first.
    pub fn occupants(&self) -> impl Iterator<Item = OccupantId> + '_ {
        self.occupants.iter().copied()
    }

    /// Travel time at the current occupancy.
    pub fn current_cost(&self) -> f64 {
        self.current_cost
    }

    /// Travel time of the empty link.
    pub fn free_flow_cost(&self) -> f64 {
        self.free_flow_cost
    }

    /// Put one more traveler on the link.
    pub fn add_occupant(&mut self) -> OccupantId {
        let id = self.push_occupant();
        self.recalc();
        id
    }

    /// Put `n` more travelers on the link, re-evaluating the cost once.
    pub fn add_occupants(&mut self, n: u64) -> Vec<OccupantId> {
        let ids = (0..n).map(|_| self.push_occupant()).collect();
        self.recalc();
        ids
    }

    /// Remove the oldest traveler.
    pub fn remove_occupant(&mut self) -> Result<OccupantId> {
        let mut removed = self.remove_occupants(1)?;
        removed.pop().ok_or(Error::Underflow {
            requested: 1,
            present: 0,
        })
    }

    /// Remove the `n` oldest travelers (first in, first out).
    ///
    /// Fails without touching the link if fewer than `n` are present.
    pub fn remove_occupants(&mut self, n: u64) -> Result<Vec<OccupantId>> {
        let present = self.occupancy();
        if n > present {
            return Err(Error::Underflow {
                requested: n,
                present,
            });
        }
        let removed = self.occupants.drain(..n as usize).collect();
        self.recalc();
        Ok(removed)
    }

    fn push_occupant(&mut self) -> OccupantId {
        let id = OccupantId(self.next_occupant);
        self.next_occupant += 1;
        self.occupants.push_back(id);
        id
    }

    fn recalc(&mut self) {
        self.current_cost = self.cost_function.evaluate(self.occupancy());
    }
}

impl<N: fmt::Display> fmt::Display for Link<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "'{}': {} -> {}", label, self.source, self.destination),
            None => write!(f, "{} -> {}", self.source, self.destination),
        }
    }
}
