//! Client-side statistics over owner listings.
//!
//! Every number here is computed by folding a full in-memory listing;
//! nothing is aggregated store-side. [`summarize`] covers the common
//! shape (a count and an additive metric, broken down by a status-like
//! group) and the named statistics types flatten those summaries into
//! the figures the dashboards show.

use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Add;

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::models::{
    Batch, BatchStatus, Cut, Payment, PaymentStatus, ReceivePieces, ReceiveQuality, Workshop,
    WorkshopStatus,
};

/// A listing entry that can be summarized: a grouping (its status-like
/// enum) and an additive metric (its piece count or amount).
pub trait Aggregate {
    type Group: Copy + Eq + Hash + IntoEnumIterator;
    type Metric: Copy + Default + Add<Output = Self::Metric>;

    fn group(&self) -> Self::Group;
    fn metric(&self) -> Self::Metric;
}

/// Fold result. Group maps are pre-seeded with every variant, so a
/// status nobody uses still reads as zero instead of being absent.
#[derive(Debug, Clone)]
pub struct Summary<A: Aggregate> {
    pub count: usize,
    pub metric_total: A::Metric,
    count_by_group: HashMap<A::Group, usize>,
    metric_by_group: HashMap<A::Group, A::Metric>,
}

impl<A: Aggregate> Summary<A> {
    pub fn count_for(&self, group: A::Group) -> usize {
        self.count_by_group.get(&group).copied().unwrap_or(0)
    }

    pub fn metric_for(&self, group: A::Group) -> A::Metric {
        self.metric_by_group
            .get(&group)
            .copied()
            .unwrap_or_default()
    }
}

pub fn summarize<'a, A>(items: impl IntoIterator<Item = &'a A>) -> Summary<A>
where
    A: Aggregate + 'a,
{
    let mut count_by_group: HashMap<A::Group, usize> =
        A::Group::iter().map(|group| (group, 0)).collect();
    let mut metric_by_group: HashMap<A::Group, A::Metric> = A::Group::iter()
        .map(|group| (group, A::Metric::default()))
        .collect();
    let mut count = 0;
    let mut metric_total = A::Metric::default();

    for item in items {
        count += 1;
        metric_total = metric_total + item.metric();
        *count_by_group.entry(item.group()).or_default() += 1;
        let slot = metric_by_group.entry(item.group()).or_default();
        *slot = *slot + item.metric();
    }

    Summary {
        count,
        metric_total,
        count_by_group,
        metric_by_group,
    }
}

impl Aggregate for Workshop {
    type Group = WorkshopStatus;
    type Metric = i64;

    fn group(&self) -> WorkshopStatus {
        self.status
    }

    fn metric(&self) -> i64 {
        self.total_pieces
    }
}

impl Aggregate for Batch {
    type Group = BatchStatus;
    type Metric = i64;

    fn group(&self) -> BatchStatus {
        self.status
    }

    fn metric(&self) -> i64 {
        self.total_pieces
    }
}

impl Aggregate for Payment {
    type Group = PaymentStatus;
    type Metric = Decimal;

    fn group(&self) -> PaymentStatus {
        self.status
    }

    fn metric(&self) -> Decimal {
        self.amount
    }
}

impl Aggregate for ReceivePieces {
    type Group = ReceiveQuality;
    type Metric = i64;

    fn group(&self) -> ReceiveQuality {
        self.quality
    }

    fn metric(&self) -> i64 {
        self.pieces_received
    }
}

fn in_same_month(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopStatistics {
    pub total: usize,
    pub total_pieces: i64,
    pub green: usize,
    pub yellow: usize,
    pub orange: usize,
    pub red: usize,
}

impl WorkshopStatistics {
    pub fn compute(workshops: &[Workshop]) -> Self {
        let summary = summarize(workshops);
        Self {
            total: summary.count,
            total_pieces: summary.metric_total,
            green: summary.count_for(WorkshopStatus::Green),
            yellow: summary.count_for(WorkshopStatus::Yellow),
            orange: summary.count_for(WorkshopStatus::Orange),
            red: summary.count_for(WorkshopStatus::Red),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CutStatistics {
    pub total: usize,
    pub total_pieces: i64,
}

impl CutStatistics {
    pub fn compute(cuts: &[Cut]) -> Self {
        Self {
            total: cuts.len(),
            total_pieces: cuts.iter().map(|cut| cut.total_pieces).sum(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStatistics {
    pub total: usize,
    pub total_pieces: i64,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl BatchStatistics {
    pub fn compute(batches: &[Batch]) -> Self {
        let summary = summarize(batches);
        Self {
            total: summary.count,
            total_pieces: summary.metric_total,
            pending: summary.count_for(BatchStatus::Pending),
            in_progress: summary.count_for(BatchStatus::InProgress),
            completed: summary.count_for(BatchStatus::Completed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatistics {
    pub total: usize,
    pub pending: usize,
    pub paid: usize,
    pub overdue: usize,
    pub total_amount: Decimal,
    pub pending_amount: Decimal,
    pub paid_amount: Decimal,
    pub overdue_amount: Decimal,
}

impl PaymentStatistics {
    pub fn compute(payments: &[Payment]) -> Self {
        let summary = summarize(payments);
        Self {
            total: summary.count,
            pending: summary.count_for(PaymentStatus::Pending),
            paid: summary.count_for(PaymentStatus::Paid),
            overdue: summary.count_for(PaymentStatus::Overdue),
            total_amount: summary.metric_total,
            pending_amount: summary.metric_for(PaymentStatus::Pending),
            paid_amount: summary.metric_for(PaymentStatus::Paid),
            overdue_amount: summary.metric_for(PaymentStatus::Overdue),
        }
    }
}

/// Receiving figures. "This month" is measured against the caller's
/// reference instant, comparing calendar year and month of the receive
/// date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptStatistics {
    pub total: usize,
    pub total_pieces: i64,
    pub excellent: usize,
    pub good: usize,
    pub regular: usize,
    pub poor: usize,
    pub this_month: usize,
    pub this_month_pieces: i64,
}

impl ReceiptStatistics {
    pub fn compute(receipts: &[ReceivePieces], reference: DateTime<Utc>) -> Self {
        let summary = summarize(receipts);
        let monthly: Vec<&ReceivePieces> = receipts
            .iter()
            .filter(|receipt| in_same_month(receipt.receive_date, reference))
            .collect();
        Self {
            total: summary.count,
            total_pieces: summary.metric_total,
            excellent: summary.count_for(ReceiveQuality::Excellent),
            good: summary.count_for(ReceiveQuality::Good),
            regular: summary.count_for(ReceiveQuality::Regular),
            poor: summary.count_for(ReceiveQuality::Poor),
            this_month: monthly.len(),
            this_month_pieces: monthly.iter().map(|receipt| receipt.pieces_received).sum(),
        }
    }
}

/// Completed-batch figures for the finished production screen. Only
/// completed batches count, and the month bucket follows the batch's
/// last update, which is when it was marked completed unless it was
/// edited afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishedProductionStatistics {
    pub total: usize,
    pub total_pieces: i64,
    pub this_month: usize,
    pub this_month_pieces: i64,
}

impl FinishedProductionStatistics {
    pub fn compute(batches: &[Batch], reference: DateTime<Utc>) -> Self {
        let completed: Vec<&Batch> = batches
            .iter()
            .filter(|batch| batch.status == BatchStatus::Completed)
            .collect();
        let monthly: Vec<&&Batch> = completed
            .iter()
            .filter(|batch| in_same_month(batch.updated_at, reference))
            .collect();
        Self {
            total: completed.len(),
            total_pieces: completed.iter().map(|batch| batch.total_pieces).sum(),
            this_month: monthly.len(),
            this_month_pieces: monthly.iter().map(|batch| batch.total_pieces).sum(),
        }
    }
}
