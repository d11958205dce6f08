use crate::model::{calendar::MonthYear, capacity::SlotState};

/// Month view assembled per request for one user. Derived data only;
/// nothing here is persisted.
#[derive(Debug)]
pub struct MonthContext {
    pub month: MonthYear,
    /// Ordered by date, then schedule.
    pub days: Vec<DayEntry>,
    /// The requesting user's membership-aware price, in cents.
    pub price_per_session: i64,
    pub pricing: Pricing,
    pub can_reserve_next_month: bool,
    pub pending_refunds: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayEntry {
    pub state: SlotState,
    pub status: DayStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    /// Spots remain and the user holds no reservation that day.
    Open,
    /// No spots remain.
    Full,
    /// The user holds a non-cancelled reservation for this slot.
    Reserved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pricing {
    pub member: i64,
    pub visitor: i64,
}
