//! Detail overlay and stacked trailer overlay lifecycle

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::content::DetailRecord;
use super::detail::{DetailView, TrailerTrigger, DETAIL_ERROR_MESSAGE};
use super::error::ApiResult;
use super::history::detail_path;
use super::images::ImageUrls;
use super::types::FocusTarget;

/// Time between starting to close and detaching the content
pub const TRANSITION_DELAY: Duration = Duration::from_millis(300);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OverlayPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing {
        since: Instant,
    },
}

impl OverlayPhase {
    fn closing_done(self, now: Instant) -> bool {
        matches!(self, OverlayPhase::Closing { since } if now.duration_since(since) >= TRANSITION_DELAY)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum OverlayContent {
    #[default]
    Empty,
    Loaded(Arc<DetailView>),
    Failed(String),
}

/// Focusable controls inside the detail overlay
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DetailFocus {
    #[default]
    Close,
    Trailer,
    Recommendation(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrailerOverlay {
    pub phase: OverlayPhase,
    pub video_key: String,
    pub name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DetailRequest {
    pub subject_id: u64,
    generation: u64,
}

#[derive(Debug, PartialEq, Eq)]
pub enum OpenOutcome {
    Loaded { path: String },
    Failed,
    /// Overlay was closed or retargeted while the fetch was running
    Discarded,
}

#[derive(Clone, Debug, Default)]
pub struct DetailOverlay {
    pub phase: OverlayPhase,
    pub subject_id: Option<u64>,
    pub focus_return: Option<FocusTarget>,
    pub content: OverlayContent,
    pub focus: DetailFocus,
    pub scroll: u16,
    pub trailer: Option<TrailerOverlay>,
    in_flight: bool,
    generation: u64,
}

impl DetailOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.phase == OverlayPhase::Open
    }

    /// Open or about to be
    pub fn is_active(&self) -> bool {
        matches!(self.phase, OverlayPhase::Opening | OverlayPhase::Open)
    }

    pub fn is_showing(&self, id: u64) -> bool {
        self.is_active() && self.subject_id == Some(id)
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn view(&self) -> Option<&DetailView> {
        match &self.content {
            OverlayContent::Loaded(view) => Some(&**view),
            _ => None,
        }
    }

    pub fn trailer_open(&self) -> bool {
        self.trailer
            .as_ref()
            .is_some_and(|t| t.phase == OverlayPhase::Open)
    }

    /// `trigger` is only recorded when given; retargeting an open overlay keeps
    /// the original focus return
    pub fn begin_open(&mut self, id: u64, trigger: Option<FocusTarget>) -> Option<DetailRequest> {
        if self.in_flight {
            tracing::debug!(id, "Detail open rejected: another detail fetch is in flight");
            return None;
        }
        if self.is_showing(id) {
            return None;
        }

        if trigger.is_some() {
            self.focus_return = trigger;
        } else if !self.is_active() {
            self.focus_return = None;
        }
        if !self.is_active() {
            self.phase = OverlayPhase::Opening;
            self.content = OverlayContent::Empty;
        }

        self.subject_id = Some(id);
        self.trailer = None;
        self.in_flight = true;
        self.generation += 1;

        Some(DetailRequest {
            subject_id: id,
            generation: self.generation,
        })
    }

    pub fn complete_open(
        &mut self,
        request: DetailRequest,
        result: ApiResult<DetailRecord>,
        images: &ImageUrls,
        region: &str,
    ) -> OpenOutcome {
        // A superseded request no longer owns the in-flight flag
        if request.generation != self.generation || !self.is_active() {
            tracing::debug!(id = request.subject_id, "Discarding detail response for closed overlay");
            return OpenOutcome::Discarded;
        }
        self.in_flight = false;

        self.phase = OverlayPhase::Open;
        self.focus = DetailFocus::Close;
        self.scroll = 0;

        match result {
            Ok(record) => {
                let view = DetailView::from_record(&record, images, region);
                let path = detail_path(view.slug_title(), request.subject_id);
                self.content = OverlayContent::Loaded(Arc::new(view));
                OpenOutcome::Loaded { path }
            }
            Err(_) => {
                self.content = OverlayContent::Failed(DETAIL_ERROR_MESSAGE.to_string());
                OpenOutcome::Failed
            }
        }
    }

    /// Starts the closing transition and hands back the focus return target.
    /// Returns `None` if nothing was open.
    pub fn close(&mut self, now: Instant) -> Option<Option<FocusTarget>> {
        if !self.is_active() {
            return None;
        }
        self.phase = OverlayPhase::Closing { since: now };
        self.subject_id = None;
        self.trailer = None;
        self.in_flight = false;
        self.generation += 1;
        Some(self.focus_return.take())
    }

    pub fn open_trailer(&mut self) -> bool {
        if !self.is_open() || self.trailer.is_some() {
            return false;
        }
        let Some(TrailerTrigger::Available { key, name }) = self.view().map(|v| v.trailer.clone()) else {
            return false;
        };
        self.trailer = Some(TrailerOverlay {
            phase: OverlayPhase::Open,
            video_key: key,
            name,
        });
        true
    }

    /// Focus goes back to the trailer button, not to the overlay's trigger
    pub fn close_trailer(&mut self, now: Instant) -> bool {
        match &mut self.trailer {
            Some(trailer) if trailer.phase == OverlayPhase::Open => {
                trailer.phase = OverlayPhase::Closing { since: now };
                self.focus = DetailFocus::Trailer;
                true
            }
            _ => false,
        }
    }

    /// Detaches content whose closing transition has elapsed
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;

        if self.trailer.as_ref().is_some_and(|t| t.phase.closing_done(now)) {
            self.trailer = None;
            changed = true;
        }

        if self.phase.closing_done(now) {
            self.phase = OverlayPhase::Closed;
            self.content = OverlayContent::Empty;
            self.focus = DetailFocus::Close;
            self.scroll = 0;
            changed = true;
        }

        changed
    }

    fn focus_order(&self) -> Vec<DetailFocus> {
        let mut order = vec![DetailFocus::Close];
        if let Some(view) = self.view() {
            if matches!(view.trailer, TrailerTrigger::Available { .. }) {
                order.push(DetailFocus::Trailer);
            }
            order.extend((0..view.recommendations.len()).map(DetailFocus::Recommendation));
        }
        order
    }

    pub fn focus_next(&mut self) {
        let order = self.focus_order();
        let index = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(index + 1) % order.len()];
    }

    pub fn focus_prev(&mut self) {
        let order = self.focus_order();
        let index = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(index + order.len() - 1) % order.len()];
    }

    pub fn focused_recommendation(&self) -> Option<u64> {
        match self.focus {
            DetailFocus::Recommendation(index) => {
                self.view().and_then(|v| v.recommendations.get(index)).map(|r| r.id)
            }
            _ => None,
        }
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}
