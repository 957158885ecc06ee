//! The [`MultiGas`] counter.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::{NUM_RESOURCE_KIND, ResourceKind};

/// A `(kind, amount)` tuple used to build a [`MultiGas`] from several dimensions at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair {
    /// The resource dimension.
    pub kind: ResourceKind,
    /// The amount of gas charged to the dimension.
    pub amount: u64,
}

impl Pair {
    /// Creates a new pair.
    pub const fn new(kind: ResourceKind, amount: u64) -> Self {
        Self { kind, amount }
    }
}

impl From<(ResourceKind, u64)> for Pair {
    fn from((kind, amount): (ResourceKind, u64)) -> Self {
        Self::new(kind, amount)
    }
}

/// Gas broken down by resource dimension.
///
/// `total` is maintained incrementally and always equals the sum of the per-dimension counters,
/// except after a saturating operation clamped it to `u64::MAX`. `refund` is tracked on the side
/// and never contributes to `total`.
///
/// The value is only mutated through its methods. Three families of arithmetic exist:
///
/// - `checked_*` returns `None` if any field would overflow or underflow. The receiver is taken by
///   value or reference and is never modified, so a failed operation has no observable effect.
/// - `saturating_*` clamps each field independently to `[0, u64::MAX]`.
/// - `saturating_*_into` does the same in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MultiGas {
    gas: [u64; NUM_RESOURCE_KIND],
    total: u64,
    refund: u64,
}

impl MultiGas {
    /// The all-zero value.
    pub const ZERO: Self = Self { gas: [0; NUM_RESOURCE_KIND], total: 0, refund: 0 };

    /// Returns the all-zero value.
    pub const fn new() -> Self {
        Self::ZERO
    }

    /// Returns a value with a single dimension set to `amount`.
    pub const fn from_kind(kind: ResourceKind, amount: u64) -> Self {
        let mut gas = [0; NUM_RESOURCE_KIND];
        gas[kind.index()] = amount;
        Self { gas, total: amount, refund: 0 }
    }

    /// Returns a value with only [`ResourceKind::Unknown`] set.
    pub const fn unknown_gas(amount: u64) -> Self {
        Self::from_kind(ResourceKind::Unknown, amount)
    }

    /// Returns a value with only [`ResourceKind::Computation`] set.
    pub const fn computation_gas(amount: u64) -> Self {
        Self::from_kind(ResourceKind::Computation, amount)
    }

    /// Returns a value with only [`ResourceKind::HistoryGrowth`] set.
    pub const fn history_growth_gas(amount: u64) -> Self {
        Self::from_kind(ResourceKind::HistoryGrowth, amount)
    }

    /// Returns a value with only [`ResourceKind::StorageAccess`] set.
    pub const fn storage_access_gas(amount: u64) -> Self {
        Self::from_kind(ResourceKind::StorageAccess, amount)
    }

    /// Returns a value with only [`ResourceKind::StorageGrowth`] set.
    pub const fn storage_growth_gas(amount: u64) -> Self {
        Self::from_kind(ResourceKind::StorageGrowth, amount)
    }

    /// Returns a value with only [`ResourceKind::L1Calldata`] set.
    pub const fn l1_calldata_gas(amount: u64) -> Self {
        Self::from_kind(ResourceKind::L1Calldata, amount)
    }

    /// Returns a value with only [`ResourceKind::L2Calldata`] set.
    pub const fn l2_calldata_gas(amount: u64) -> Self {
        Self::from_kind(ResourceKind::L2Calldata, amount)
    }

    /// Returns a value with only [`ResourceKind::WasmComputation`] set.
    pub const fn wasm_computation_gas(amount: u64) -> Self {
        Self::from_kind(ResourceKind::WasmComputation, amount)
    }

    /// Builds a value from several `(kind, amount)` pairs. Pairs naming the same kind accumulate.
    ///
    /// Meant for fixed amounts known to fit, such as test fixtures and protocol constants.
    ///
    /// # Panics
    ///
    /// Panics if a dimension or the total overflows `u64`.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = Pair>,
    {
        pairs.into_iter().fold(Self::ZERO, |acc, pair| {
            acc.checked_increment(pair.kind, pair.amount).unwrap_or_else(|| {
                panic!("multi-gas overflow adding {} {}", pair.amount, pair.kind)
            })
        })
    }

    /// Returns the gas charged to `kind`.
    #[inline]
    pub const fn get(&self, kind: ResourceKind) -> u64 {
        self.gas[kind.index()]
    }

    /// Returns the sum of all dimensions.
    #[inline]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Returns the refund counter.
    #[inline]
    pub const fn refund(&self) -> u64 {
        self.refund
    }

    /// Returns the scalar gas consumed by the legacy single-dimensional accounting.
    ///
    /// This is the raw total; the refund is not netted here and is applied by the caller at the
    /// end of the transaction like any other refund.
    #[inline]
    pub const fn single_gas(&self) -> u64 {
        self.total
    }

    /// Returns `true` if every dimension, the total and the refund are zero.
    pub fn is_zero(&self) -> bool {
        self.total == 0 && self.refund == 0 && self.gas.iter().all(|g| *g == 0)
    }

    /// Iterates over every dimension in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u64)> + '_ {
        ResourceKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }

    /// Returns a copy with `kind` replaced by `amount` and the total adjusted by the difference.
    ///
    /// Returns `None` if the adjusted total does not fit in a `u64`.
    pub fn with(self, kind: ResourceKind, amount: u64) -> Option<Self> {
        let old = self.gas[kind.index()];
        let total = if amount >= old {
            self.total.checked_add(amount - old)?
        } else {
            self.total.checked_sub(old - amount)?
        };
        let mut res = self;
        res.gas[kind.index()] = amount;
        res.total = total;
        Some(res)
    }

    /// Returns a copy with the refund replaced.
    pub const fn with_refund(mut self, refund: u64) -> Self {
        self.refund = refund;
        self
    }

    /// Replaces the refund counter.
    pub const fn set_refund(&mut self, refund: u64) {
        self.refund = refund;
    }

    /// Adds `other` field by field, or returns `None` if any field overflows.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        let mut res = self;
        for (lhs, rhs) in res.gas.iter_mut().zip(other.gas) {
            *lhs = lhs.checked_add(rhs)?;
        }
        res.total = self.total.checked_add(other.total)?;
        res.refund = self.refund.checked_add(other.refund)?;
        Some(res)
    }

    /// Adds `other` field by field, clamping each overflowing field to `u64::MAX`.
    pub fn saturating_add(mut self, other: Self) -> Self {
        self.saturating_add_into(other);
        self
    }

    /// In-place variant of [`Self::saturating_add`].
    pub fn saturating_add_into(&mut self, other: Self) {
        for (lhs, rhs) in self.gas.iter_mut().zip(other.gas) {
            *lhs = lhs.saturating_add(rhs);
        }
        self.total = self.total.saturating_add(other.total);
        self.refund = self.refund.saturating_add(other.refund);
    }

    /// Subtracts `other` field by field, or returns `None` if any field underflows.
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        let mut res = self;
        for (lhs, rhs) in res.gas.iter_mut().zip(other.gas) {
            *lhs = lhs.checked_sub(rhs)?;
        }
        res.total = self.total.checked_sub(other.total)?;
        res.refund = self.refund.checked_sub(other.refund)?;
        Some(res)
    }

    /// Subtracts `other` field by field, clamping each underflowing field to zero.
    pub fn saturating_sub(mut self, other: Self) -> Self {
        self.saturating_sub_into(other);
        self
    }

    /// In-place variant of [`Self::saturating_sub`].
    pub fn saturating_sub_into(&mut self, other: Self) {
        for (lhs, rhs) in self.gas.iter_mut().zip(other.gas) {
            *lhs = lhs.saturating_sub(rhs);
        }
        self.total = self.total.saturating_sub(other.total);
        self.refund = self.refund.saturating_sub(other.refund);
    }

    /// Adds `amount` to `kind` and to the total, or returns `None` if either overflows.
    pub fn checked_increment(self, kind: ResourceKind, amount: u64) -> Option<Self> {
        let mut res = self;
        res.gas[kind.index()] = self.gas[kind.index()].checked_add(amount)?;
        res.total = self.total.checked_add(amount)?;
        Some(res)
    }

    /// Adds `amount` to `kind` and to the total, clamping each at `u64::MAX`.
    pub fn saturating_increment(mut self, kind: ResourceKind, amount: u64) -> Self {
        self.saturating_increment_into(kind, amount);
        self
    }

    /// In-place variant of [`Self::saturating_increment`].
    #[inline]
    pub fn saturating_increment_into(&mut self, kind: ResourceKind, amount: u64) {
        let slot = &mut self.gas[kind.index()];
        *slot = slot.saturating_add(amount);
        self.total = self.total.saturating_add(amount);
    }

    pub(crate) const fn from_parts(gas: [u64; NUM_RESOURCE_KIND], total: u64, refund: u64) -> Self {
        Self { gas, total, refund }
    }

    pub(crate) const fn dimensions(&self) -> &[u64; NUM_RESOURCE_KIND] {
        &self.gas
    }
}

impl fmt::Display for MultiGas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        let mut first = true;
        for (kind, amount) in self.iter().filter(|(_, amount)| *amount != 0) {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{kind}: {amount}")?;
            first = false;
        }
        write!(f, "}} total={} refund={}", self.total, self.refund)
    }
}
