use crate::error::ExplorerError;
use analytics::statistics::{median, positive_sample};
use chrono::{Datelike, Months, NaiveDate};
use core_types::PropertyRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One calendar month of listing activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// The first day of the month.
    pub month: NaiveDate,
    /// Record indices first listed this month.
    pub listings: Vec<usize>,
    pub new_listings: usize,
    pub cumulative_listings: usize,
    /// Median asking price of this month's priced listings.
    pub median_price: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
    Finished,
}

/// Month-by-month playback of when listings came onto the market.
///
/// Months without listings between the first and last listing month are kept
/// as empty frames. Undated records are counted but never placed on a frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    frames: Vec<Frame>,
    cursor: usize,
    state: PlaybackState,
    undated: usize,
}

impl Timeline {
    pub fn from_records(records: &[PropertyRecord]) -> Self {
        let all: Vec<usize> = (0..records.len()).collect();
        Self::build(records, &all)
    }

    /// Builds frames from the selected record indices only.
    pub fn build(records: &[PropertyRecord], selection: &[usize]) -> Self {
        let mut by_month: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();
        let mut undated = 0;
        for &index in selection {
            let month = records
                .get(index)
                .and_then(|r| r.listing_date)
                .and_then(|d| d.with_day(1));
            match month {
                Some(month) => by_month.entry(month).or_default().push(index),
                None => undated += 1,
            }
        }

        let mut frames = Vec::new();
        if let (Some(&first), Some(&last)) = (by_month.keys().next(), by_month.keys().next_back()) {
            let mut cumulative = 0;
            let mut month = Some(first);
            while let Some(current) = month.filter(|m| *m <= last) {
                let listings = by_month.remove(&current).unwrap_or_default();
                cumulative += listings.len();
                let prices = positive_sample(listings.iter().map(|&i| records[i].listed_price()));
                frames.push(Frame {
                    month: current,
                    new_listings: listings.len(),
                    cumulative_listings: cumulative,
                    median_price: (!prices.is_empty()).then(|| median(&prices)),
                    listings,
                });
                month = current.checked_add_months(Months::new(1));
            }
        }

        tracing::debug!(frames = frames.len(), undated, "Timeline built.");
        Self {
            frames,
            cursor: 0,
            state: PlaybackState::Stopped,
            undated,
        }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn undated(&self) -> usize {
        self.undated
    }

    pub fn current(&self) -> Option<&Frame> {
        self.frames.get(self.cursor)
    }

    /// Starts or resumes playback. Playing a finished timeline starts over.
    pub fn play(&mut self) -> Result<(), ExplorerError> {
        if self.frames.is_empty() {
            return Err(ExplorerError::EmptyTimeline);
        }
        match self.state {
            PlaybackState::Playing => {
                return Err(ExplorerError::InvalidTransition {
                    action: "play",
                    state: self.state,
                });
            }
            PlaybackState::Finished => self.cursor = 0,
            PlaybackState::Stopped | PlaybackState::Paused => {}
        }
        self.state = PlaybackState::Playing;
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), ExplorerError> {
        if self.state != PlaybackState::Playing {
            return Err(ExplorerError::InvalidTransition {
                action: "pause",
                state: self.state,
            });
        }
        self.state = PlaybackState::Paused;
        Ok(())
    }

    /// Advances one frame while playing and reports the frame now shown.
    /// Reaching the last frame finishes playback. Outside `Playing` this is a no-op.
    pub fn tick(&mut self) -> Option<&Frame> {
        if self.state == PlaybackState::Playing {
            if self.cursor + 1 < self.frames.len() {
                self.cursor += 1;
            }
            if self.cursor + 1 >= self.frames.len() {
                self.state = PlaybackState::Finished;
            }
        }
        self.current()
    }

    /// Jumps to a frame. A stopped or finished timeline becomes paused there.
    pub fn seek(&mut self, index: usize) -> Result<&Frame, ExplorerError> {
        if index >= self.frames.len() {
            return Err(ExplorerError::OutOfRange {
                index,
                len: self.frames.len(),
            });
        }
        self.cursor = index;
        if matches!(self.state, PlaybackState::Stopped | PlaybackState::Finished) {
            self.state = PlaybackState::Paused;
        }
        Ok(&self.frames[index])
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
        self.state = PlaybackState::Stopped;
    }
}
