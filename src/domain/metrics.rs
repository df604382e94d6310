//! Per-event sales metrics shown on the dashboard.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::AttendeeId;

/// Aggregate sales figures for one event.
///
/// An event without purchases yields zero counts, zero revenue, an empty
/// breakdown and `None` for the purchase statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EventMetrics {
    /// Sum of `quantity_purchased` over the event's purchases.
    pub total_tickets_sold: i64,
    /// Sum of `total_price` over the event's purchases.
    pub total_revenue: Decimal,
    /// Number of distinct attendees with at least one purchase.
    pub attendee_count: i64,
    /// Tickets sold per ticket type label.
    pub tickets_by_type: BTreeMap<String, i64>,
    /// Mean purchase total, rounded to cents with halves away from zero.
    pub avg_purchase: Option<Decimal>,
    /// Smallest purchase total.
    pub min_purchase: Option<Decimal>,
    /// Largest purchase total.
    pub max_purchase: Option<Decimal>,
}

/// Folds purchase rows into [`EventMetrics`].
#[derive(Debug, Default)]
pub struct MetricsAccumulator {
    tickets_sold: i64,
    revenue: Decimal,
    purchases: i64,
    attendees: BTreeSet<AttendeeId>,
    by_type: BTreeMap<String, i64>,
    min: Option<Decimal>,
    max: Option<Decimal>,
}

impl MetricsAccumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one purchase.
    pub fn record(
        &mut self,
        attendee_id: AttendeeId,
        ticket_type: &str,
        quantity: i32,
        total_price: Decimal,
    ) {
        let quantity = i64::from(quantity);
        self.tickets_sold = self.tickets_sold.saturating_add(quantity);
        self.revenue = self.revenue.saturating_add(total_price);
        self.purchases = self.purchases.saturating_add(1);
        self.attendees.insert(attendee_id);
        let sold = self.by_type.entry(ticket_type.to_string()).or_insert(0);
        *sold = sold.saturating_add(quantity);
        self.min = Some(self.min.map_or(total_price, |m| m.min(total_price)));
        self.max = Some(self.max.map_or(total_price, |m| m.max(total_price)));
    }

    /// Produces the final metrics.
    #[must_use]
    pub fn finish(self) -> EventMetrics {
        let avg_purchase = if self.purchases == 0 {
            None
        } else {
            self.revenue
                .checked_div(Decimal::from(self.purchases))
                .map(|avg| {
                    // Same rule as PostgreSQL ROUND(numeric, 2).
                    let mut avg =
                        avg.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
                    avg.rescale(2);
                    avg
                })
        };
        EventMetrics {
            total_tickets_sold: self.tickets_sold,
            total_revenue: self.revenue,
            attendee_count: i64::try_from(self.attendees.len()).unwrap_or(i64::MAX),
            tickets_by_type: self.by_type,
            avg_purchase,
            min_purchase: self.min,
            max_purchase: self.max,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn empty_accumulator_yields_zeroes() {
        let metrics = MetricsAccumulator::new().finish();
        assert_eq!(metrics.total_tickets_sold, 0);
        assert_eq!(metrics.total_revenue, Decimal::ZERO);
        assert_eq!(metrics.attendee_count, 0);
        assert!(metrics.tickets_by_type.is_empty());
        assert_eq!(metrics.avg_purchase, None);
        assert_eq!(metrics.min_purchase, None);
        assert_eq!(metrics.max_purchase, None);
        assert_eq!(metrics, EventMetrics::default());
    }

    #[test]
    fn folds_purchases() {
        let mut acc = MetricsAccumulator::new();
        acc.record(AttendeeId::new(1), "General", 2, dec!(100.00));
        acc.record(AttendeeId::new(2), "VIP", 1, dec!(150.00));
        acc.record(AttendeeId::new(1), "General", 1, dec!(50.00));

        let metrics = acc.finish();
        assert_eq!(metrics.total_tickets_sold, 4);
        assert_eq!(metrics.total_revenue, dec!(300.00));
        assert_eq!(metrics.attendee_count, 2);
        assert_eq!(metrics.tickets_by_type.get("General"), Some(&3));
        assert_eq!(metrics.tickets_by_type.get("VIP"), Some(&1));
        assert_eq!(metrics.avg_purchase, Some(dec!(100.00)));
        assert_eq!(metrics.min_purchase, Some(dec!(50.00)));
        assert_eq!(metrics.max_purchase, Some(dec!(150.00)));
    }

    #[test]
    fn average_is_rounded_to_cents() {
        let mut acc = MetricsAccumulator::new();
        acc.record(AttendeeId::new(1), "General", 1, dec!(10.00));
        acc.record(AttendeeId::new(2), "General", 1, dec!(10.00));
        acc.record(AttendeeId::new(3), "General", 1, dec!(10.01));

        let metrics = acc.finish();
        assert_eq!(metrics.avg_purchase, Some(dec!(10.00)));
    }

    #[test]
    fn average_midpoint_rounds_away_from_zero() {
        let mut acc = MetricsAccumulator::new();
        acc.record(AttendeeId::new(1), "General", 1, dec!(0.02));
        acc.record(AttendeeId::new(2), "General", 1, dec!(0.03));
        assert_eq!(acc.finish().avg_purchase, Some(dec!(0.03)));

        let mut acc = MetricsAccumulator::new();
        acc.record(AttendeeId::new(1), "General", 1, dec!(10.00));
        acc.record(AttendeeId::new(2), "General", 1, dec!(10.05));
        assert_eq!(acc.finish().avg_purchase, Some(dec!(10.03)));
    }
}
