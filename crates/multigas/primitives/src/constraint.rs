//! Per-resource gas target constraints.

use std::{collections::BTreeMap, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{ConstraintError, NUM_RESOURCE_KIND, ResourceKind};

/// Maximum gas per second a resource may consume, averaged over `period`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceConstraint {
    /// The averaging window.
    pub period: Duration,
    /// Gas per second.
    pub target_per_sec: u64,
}

/// The set of constraints for every resource.
///
/// The chain owner limits the usage of each resource independently. A resource may have several
/// constraints with different periods, but at most one per period. For example:
///
/// - X computation over 12 seconds, so nodes can keep up;
/// - Y computation over 7 days, so fresh nodes can catch up with the chain;
/// - Z history growth over a month, to avoid bloat.
///
/// This is storage only. Enforcing the targets is up to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceConstraints {
    constraints: [BTreeMap<u32, ResourceConstraint>; NUM_RESOURCE_KIND],
}

impl ResourceConstraints {
    /// Creates an empty set of constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the constraint for `resource` over `period_secs`.
    ///
    /// The target is stored as a per-second rate: `target_per_period / period_secs`, truncated.
    pub fn set_constraint(
        &mut self,
        resource: ResourceKind,
        period_secs: u32,
        target_per_period: u64,
    ) -> Result<(), ConstraintError> {
        if period_secs == 0 {
            return Err(ConstraintError::ZeroPeriod);
        }
        self.constraints[resource.index()].insert(
            period_secs,
            ResourceConstraint {
                period: Duration::from_secs(period_secs.into()),
                target_per_sec: target_per_period / u64::from(period_secs),
            },
        );
        Ok(())
    }

    /// Removes the constraint for `resource` over `period_secs`, if any.
    pub fn clear_constraint(&mut self, resource: ResourceKind, period_secs: u32) {
        self.constraints[resource.index()].remove(&period_secs);
    }

    /// Returns the constraint for `resource` over `period_secs`.
    pub fn get(&self, resource: ResourceKind, period_secs: u32) -> Option<&ResourceConstraint> {
        self.constraints[resource.index()].get(&period_secs)
    }

    /// Iterates over the constraints of `resource`, ordered by period.
    pub fn for_resource(
        &self,
        resource: ResourceKind,
    ) -> impl Iterator<Item = (u32, &ResourceConstraint)> + '_ {
        self.constraints[resource.index()].iter().map(|(period, c)| (*period, c))
    }

    /// Returns the number of constraints across all resources.
    pub fn len(&self) -> usize {
        self.constraints.iter().map(BTreeMap::len).sum()
    }

    /// Returns `true` if no constraint is set.
    pub fn is_empty(&self) -> bool {
        self.constraints.iter().all(BTreeMap::is_empty)
    }
}
