//! Summary counts shown above the registration list

use crate::model::{Membership, Registration};

/// Headline numbers computed from the full snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    pub paid: usize,
    pub baptized: usize,
    pub professing: usize,
}

impl DashboardStats {
    #[must_use]
    pub fn from_records(records: &[Registration]) -> Self {
        records.iter().fold(Self::default(), |mut stats, reg| {
            stats.total += 1;
            if reg.is_paid() {
                stats.paid += 1;
            }
            match reg.membership {
                Membership::Baptized => stats.baptized += 1,
                Membership::Professing => stats.professing += 1,
                Membership::Other(_) => {}
            }
            stats
        })
    }

    /// Registrations still awaiting payment
    #[must_use]
    pub const fn unpaid(&self) -> usize {
        self.total - self.paid
    }
}
