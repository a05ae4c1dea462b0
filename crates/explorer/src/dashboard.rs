use crate::error::ExplorerError;
use crate::filters::PropertyFilter;
use crate::swipe::SwipeDeck;
use crate::timeline::Timeline;
use analytics::{AnalyticsEngine, MarketReport};
use chrono::{DateTime, Utc};
use core_types::PropertyRecord;

/// The explicit state behind one search session.
///
/// The dashboard owns the loaded records and the active filter. Every
/// transition rebuilds the visible set, the report, the deck and the timeline
/// from scratch, so no derived value can go stale.
///
/// Indices in the report (outliers, top picks) refer to `visible_records()`.
/// Deck cards and timeline frames carry indices into `records()`.
#[derive(Debug, Clone)]
pub struct Dashboard {
    engine: AnalyticsEngine,
    now: DateTime<Utc>,
    records: Vec<PropertyRecord>,
    filter: PropertyFilter,
    visible: Vec<usize>,
    report: MarketReport,
    deck: SwipeDeck,
    timeline: Timeline,
}

impl Dashboard {
    pub fn new(engine: AnalyticsEngine, now: DateTime<Utc>) -> Self {
        Self {
            engine,
            now,
            records: Vec::new(),
            filter: PropertyFilter::default(),
            visible: Vec::new(),
            report: MarketReport::new(now),
            deck: SwipeDeck::default(),
            timeline: Timeline::default(),
        }
    }

    /// Replaces the result set, keeping the active filter.
    pub fn load(&mut self, records: Vec<PropertyRecord>, now: DateTime<Utc>) {
        self.records = records;
        self.now = now;
        self.recompute();
    }

    pub fn set_filter(&mut self, filter: PropertyFilter) -> Result<(), ExplorerError> {
        filter.validate()?;
        self.filter = filter;
        self.recompute();
        Ok(())
    }

    pub fn clear_filter(&mut self) {
        self.filter = PropertyFilter::default();
        self.recompute();
    }

    pub fn records(&self) -> &[PropertyRecord] {
        &self.records
    }

    pub fn filter(&self) -> &PropertyFilter {
        &self.filter
    }

    /// Indices into `records()` that pass the filter.
    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    pub fn visible_records(&self) -> Vec<&PropertyRecord> {
        self.visible.iter().map(|&i| &self.records[i]).collect()
    }

    pub fn report(&self) -> &MarketReport {
        &self.report
    }

    pub fn deck(&self) -> &SwipeDeck {
        &self.deck
    }

    pub fn deck_mut(&mut self) -> &mut SwipeDeck {
        &mut self.deck
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }

    /// Shortlisted listings, resolved to records.
    pub fn shortlist(&self) -> Vec<&PropertyRecord> {
        self.deck
            .shortlist()
            .into_iter()
            .filter_map(|i| self.records.get(i))
            .collect()
    }

    fn recompute(&mut self) {
        self.visible = self.filter.apply(&self.records);
        let visible: Vec<PropertyRecord> =
            self.visible.iter().map(|&i| self.records[i].clone()).collect();

        self.report = self.engine.analyze(&visible, self.now);
        // Best-scored listings first, mapped back to record indices.
        let cards = self
            .engine
            .rank(&visible, self.now)
            .into_iter()
            .map(|scored| self.visible[scored.index])
            .collect();
        self.deck = SwipeDeck::new(cards);
        self.timeline = Timeline::build(&self.records, &self.visible);

        tracing::debug!(
            total = self.records.len(),
            visible = self.visible.len(),
            "Dashboard recomputed."
        );
    }
}
