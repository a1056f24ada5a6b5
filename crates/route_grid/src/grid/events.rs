//! Event types and sinks for observing grid runs.
//!
//! [`GridGenerator`](crate::grid::GridGenerator) reports progress through an
//! [`EventSink`] when driven via its `*_with_events` methods.
use crate::grid::config::GridConfig;
use crate::grid::exclusion::ExclusionSummary;

/// Describes events emitted while generating and filtering a grid.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum GridEvent {
    /// Emitted before the first ring is laid out.
    GenerationStarted {
        config: GridConfig,
        /// Corridor radius in meters (scaled haversine).
        corridor_radius_m: f64,
    },

    /// Emitted after each ring, including rings where every candidate was discarded.
    RingCompleted {
        ring: u32,
        radius_m: f64,
        /// Cells kept on this ring.
        emitted: usize,
        /// Candidates outside the corridor radius.
        discarded: usize,
    },

    /// Emitted once layout is complete.
    GenerationFinished { cells: usize, rings: u32 },

    /// Emitted before exclusion marking starts.
    ExclusionStarted { cells: usize, polygons: usize },

    /// Emitted when exclusion marking completes.
    ExclusionFinished { summary: ExclusionSummary },

    /// Non-fatal warning.
    Warning { context: String, message: String },
}

/// Discriminant of [`GridEvent`], used by sinks to opt out of event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridEventKind {
    GenerationStarted,
    RingCompleted,
    GenerationFinished,
    ExclusionStarted,
    ExclusionFinished,
    Warning,
}

impl GridEvent {
    pub fn kind(&self) -> GridEventKind {
        match self {
            GridEvent::GenerationStarted { .. } => GridEventKind::GenerationStarted,
            GridEvent::RingCompleted { .. } => GridEventKind::RingCompleted,
            GridEvent::GenerationFinished { .. } => GridEventKind::GenerationFinished,
            GridEvent::ExclusionStarted { .. } => GridEventKind::ExclusionStarted,
            GridEvent::ExclusionFinished { .. } => GridEventKind::ExclusionFinished,
            GridEvent::Warning { .. } => GridEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`GridEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: GridEvent);

    /// Whether events of `kind` should be built and sent at all.
    #[inline]
    fn wants(&self, _kind: GridEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: GridEvent) {}

    #[inline]
    fn wants(&self, _kind: GridEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(GridEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(GridEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(GridEvent),
{
    #[inline]
    fn send(&mut self, event: GridEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally skipping per-ring events.
#[derive(Default)]
pub struct VecSink {
    events: Vec<GridEvent>,
    skip_rings: bool,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects everything except [`GridEvent::RingCompleted`].
    pub fn without_rings() -> Self {
        Self {
            events: Vec::new(),
            skip_rings: true,
        }
    }

    pub fn into_inner(self) -> Vec<GridEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[GridEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: GridEvent) {
        self.events.push(event);
    }

    fn wants(&self, kind: GridEventKind) -> bool {
        !(self.skip_rings && kind == GridEventKind::RingCompleted)
    }
}

/// Fan-out sink that forwards each event to every contained sink that wants it.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn into_inner(self) -> Vec<S> {
        self.sinks
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self { sinks: Vec::new() }
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: GridEvent) {
        let kind = event.kind();
        for sink in self.sinks.iter_mut().filter(|s| s.wants(kind)) {
            sink.send(event.clone());
        }
    }

    fn wants(&self, kind: GridEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}
