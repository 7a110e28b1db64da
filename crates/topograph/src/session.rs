//! View session state machine.
//!
//! [`Session`] holds everything that changes while a user looks at a
//! topology: the focal CI, the zoom scale and the load phase. Loads are
//! two-step: [`Session::begin_load`] hands out a [`RequestTicket`], and
//! [`Session::resolve`] applies the provider's answer only if that ticket is
//! still the newest one.
//!
//! ```text
//! Idle ──begin_load──▶ Loading ──resolve(Ok)──▶ Ready
//!                        ▲    └──resolve(Err)─▶ Error
//!                        └──── begin_load / begin_reload (from any phase)
//! ```

use log::{info, warn};

use crate::{
    config::ViewConfig,
    error::ProviderError,
    layout::{GraphLayout, RingLayout},
    model::{CiId, Topology},
};

/// Zoom scale a fresh session starts at, before clamping.
const INITIAL_ZOOM: f32 = 1.0;

/// Where the session is in its load cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadPhase {
    /// Nothing requested yet.
    Idle,
    /// A request is in flight.
    Loading,
    /// The latest request succeeded.
    Ready(GraphLayout),
    /// The latest request failed.
    Error(String),
}

impl LoadPhase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready(_) => "ready",
            Self::Error(_) => "error",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The layout, when the phase is [`LoadPhase::Ready`].
    pub fn layout(&self) -> Option<&GraphLayout> {
        match self {
            Self::Ready(layout) => Some(layout),
            _ => None,
        }
    }
}

/// Handle for one provider request.
///
/// Carries what to ask the provider for and the generation used to recognize
/// stale answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
    focal_id: Option<CiId>,
    depth: u8,
}

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn focal_id(&self) -> Option<CiId> {
        self.focal_id
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }
}

/// Outcome of [`Session::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The response belonged to the newest request and was applied.
    Current,
    /// A newer request was issued meanwhile; the response was discarded.
    Stale,
}

/// Clamped zoom scale.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Zoom {
    scale: f32,
    min: f32,
    max: f32,
    step: f32,
}

impl Zoom {
    fn new(view: &ViewConfig) -> Self {
        let (min, max) = (view.min_zoom(), view.max_zoom());
        Self {
            scale: bounded(INITIAL_ZOOM, min, max),
            min,
            max,
            step: view.zoom_step(),
        }
    }

    fn adjust(&mut self, delta: f32) -> f32 {
        self.scale = bounded(self.scale + delta, self.min, self.max);
        self.scale
    }
}

/// Like [`f32::clamp`], but never panics: inverted bounds resolve to `max`
/// and NaN bounds are ignored.
fn bounded(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Mutable state of one topology view.
#[derive(Debug, Clone)]
pub struct Session {
    focal_id: Option<CiId>,
    depth: u8,
    zoom: Zoom,
    phase: LoadPhase,
    generation: u64,
}

impl Session {
    /// Creates an idle session.
    ///
    /// Zoom bounds are applied as given; run [`ViewConfig`] values through
    /// [`AppConfig::validate`](crate::config::AppConfig::validate) first to
    /// reject inverted ones.
    pub fn new(view: &ViewConfig) -> Self {
        Self {
            focal_id: None,
            depth: view.depth(),
            zoom: Zoom::new(view),
            phase: LoadPhase::Idle,
            generation: 0,
        }
    }

    pub fn focal_id(&self) -> Option<CiId> {
        self.focal_id
    }

    /// Traversal depth sent with every request.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn zoom_scale(&self) -> f32 {
        self.zoom.scale
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    /// Generation of the newest request; 0 before the first one.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Sets the focal CI and starts a new request for it.
    ///
    /// Any request still in flight becomes stale. The previous layout is
    /// dropped.
    pub fn begin_load(&mut self, focal_id: Option<CiId>) -> RequestTicket {
        self.focal_id = focal_id;
        self.generation += 1;
        self.phase = LoadPhase::Loading;

        info!(
            focal_id:? = focal_id.map(CiId::get),
            generation = self.generation;
            "Loading topology"
        );

        RequestTicket {
            generation: self.generation,
            focal_id,
            depth: self.depth,
        }
    }

    /// Starts a new request for the current focal CI.
    pub fn begin_reload(&mut self) -> RequestTicket {
        self.begin_load(self.focal_id)
    }

    /// Returns true if `ticket` belongs to the newest request.
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Applies a provider response.
    ///
    /// A stale ticket leaves the session untouched. Otherwise a topology is
    /// laid out with `engine` and the session becomes [`LoadPhase::Ready`],
    /// and a provider error makes it [`LoadPhase::Error`].
    pub fn resolve(
        &mut self,
        ticket: &RequestTicket,
        outcome: Result<Topology, ProviderError>,
        engine: &RingLayout,
    ) -> Applied {
        if !self.is_current(ticket) {
            warn!(
                generation = ticket.generation,
                current = self.generation;
                "Ignoring stale topology response"
            );
            return Applied::Stale;
        }

        self.phase = match outcome {
            Ok(topology) => {
                let layout = engine.layout_topology(&topology, ticket.focal_id);
                info!(
                    nodes = layout.nodes().len(),
                    edges = layout.edges().len();
                    "Topology ready"
                );
                LoadPhase::Ready(layout)
            }
            Err(err) => {
                warn!(err:% = err; "Topology request failed");
                LoadPhase::Error(err.to_string())
            }
        };
        Applied::Current
    }

    /// Increases the zoom scale by one step, up to the maximum.
    pub fn zoom_in(&mut self) -> f32 {
        self.zoom.adjust(self.zoom.step)
    }

    /// Decreases the zoom scale by one step, down to the minimum.
    pub fn zoom_out(&mut self) -> f32 {
        self.zoom.adjust(-self.zoom.step)
    }
}
