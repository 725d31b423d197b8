//! Step-by-step replay of a traversal trace.
//!
//! The player does not own a timer. A host drives it by calling [`TracePlayer::tick`] at its
//! own pace (see `PlaybackConfig::interval`), passing the token it got when the playback
//! started. Starting, repeating or cancelling a playback invalidates all earlier tokens, so a
//! stale timer can never advance or repaint a newer playback.

use crate::error::{Error, Result};
use crate::traversal::{Trace, TraceStep};
use graphwalk_graphlib::VertexId;
use serde::Serialize;

/// What the UI shows for one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaybackFrame {
    pub index: usize,
    pub step: TraceStep,
    pub highlighted: VertexId,
    pub log_line: String,
}

/// Highlighted vertex and log line for a step.
pub fn describe(step: &TraceStep) -> (VertexId, String) {
    match *step {
        TraceStep::Visit { node } => (node, format!("visiting {node}")),
        TraceStep::Backtrack { from, to } => (to, format!("backtrack from {from} to {to}")),
        TraceStep::Jump { to } => (
            to,
            format!("no neighbors remain in this component; jumping to {to}"),
        ),
    }
}

pub fn frame_at(trace: &Trace, index: usize) -> Option<PlaybackFrame> {
    let step = *trace.get(index)?;
    let (highlighted, log_line) = describe(&step);
    Some(PlaybackFrame {
        index,
        step,
        highlighted,
        log_line,
    })
}

impl Trace {
    /// Lazily computed frames, for instant (untimed) replay.
    pub fn frames(&self) -> Frames<'_> {
        Frames {
            trace: self,
            next: 0,
        }
    }
}

pub struct Frames<'a> {
    trace: &'a Trace,
    next: usize,
}

impl Iterator for Frames<'_> {
    type Item = PlaybackFrame;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = frame_at(self.trace, self.next)?;
        self.next += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.trace.len().saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Frames<'_> {}

/// Input accepted by [`TracePlayer::play`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackSource {
    Trace(Trace),
    /// Bare visit order; every identifier is replayed as a `Visit` step.
    Order(Vec<VertexId>),
}

impl PlaybackSource {
    pub fn into_trace(self) -> Trace {
        match self {
            Self::Trace(trace) => trace,
            Self::Order(order) => Trace::from_order(&order),
        }
    }
}

impl From<Trace> for PlaybackSource {
    fn from(value: Trace) -> Self {
        Self::Trace(value)
    }
}

impl From<Vec<VertexId>> for PlaybackSource {
    fn from(value: Vec<VertexId>) -> Self {
        Self::Order(value)
    }
}

/// Handle of one playback; only the most recently issued token is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackToken {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    Frame(PlaybackFrame),
    /// The trace is exhausted; the highlight has been cleared.
    Finished,
    /// The token belongs to a playback that has since been replaced or cancelled.
    Superseded,
}

#[derive(Debug, Clone)]
struct ActivePlayback {
    trace: Trace,
    cursor: usize,
}

#[derive(Debug, Clone, Default)]
pub struct TracePlayer {
    generation: u64,
    active: Option<ActivePlayback>,
    last: Option<Trace>,
    current: Option<VertexId>,
}

impl TracePlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a playback from the first step, replacing any playback in progress.
    pub fn play(&mut self, source: impl Into<PlaybackSource>) -> PlaybackToken {
        self.cancel();
        let trace = source.into().into_trace();
        tracing::debug!(
            generation = self.generation,
            steps = trace.len(),
            "playback started"
        );
        self.last = Some(trace.clone());
        self.active = Some(ActivePlayback { trace, cursor: 0 });
        PlaybackToken {
            generation: self.generation,
        }
    }

    /// Replays the last played trace verbatim.
    pub fn repeat(&mut self) -> Result<PlaybackToken> {
        let trace = self
            .last
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or(Error::NoTraversalToRepeat)?;
        Ok(self.play(trace))
    }

    /// Stops the current playback and invalidates every outstanding token.
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.active = None;
        self.current = None;
    }

    /// Cancels playback and forgets the last trace.
    pub fn reset(&mut self) {
        self.cancel();
        self.last = None;
    }

    pub fn tick(&mut self, token: &PlaybackToken) -> Tick {
        if token.generation != self.generation {
            return Tick::Superseded;
        }
        let Some(active) = self.active.as_mut() else {
            return Tick::Finished;
        };
        match frame_at(&active.trace, active.cursor) {
            Some(frame) => {
                active.cursor += 1;
                self.current = Some(frame.highlighted);
                Tick::Frame(frame)
            }
            None => {
                self.active = None;
                self.current = None;
                Tick::Finished
            }
        }
    }

    pub fn is_live(&self, token: &PlaybackToken) -> bool {
        token.generation == self.generation && self.active.is_some()
    }

    /// Currently highlighted vertex, if a playback is showing a step.
    pub fn current(&self) -> Option<VertexId> {
        self.current
    }

    pub fn last_trace(&self) -> Option<&Trace> {
        self.last.as_ref()
    }

    /// `(steps played, total steps)` of the active playback.
    pub fn progress(&self) -> Option<(usize, usize)> {
        self.active
            .as_ref()
            .map(|a| (a.cursor.min(a.trace.len()), a.trace.len()))
    }
}
