//! Interaction controller.
//!
//! [`Controller`] drives a [`Session`] from user actions: it asks a
//! [`DataProvider`] for topology, feeds answers through the layout engine,
//! renders scenes on demand and turns node clicks into navigation plus
//! re-centering.
//!
//! Everything runs on one thread. The session lives in a [`RefCell`] that is
//! never borrowed across an `.await`, so overlapping requests are fine: each
//! one resolves against the session when its answer arrives and only the
//! newest is applied.

use std::cell::{Ref, RefCell};

use async_trait::async_trait;
use log::{debug, info};

use topograph_core::geometry::Point;

use crate::{
    config::AppConfig,
    error::{ProviderError, TopographError},
    layout::RingLayout,
    model::{CiId, Topology},
    scene::{Scene, SceneRenderer},
    session::{Applied, RequestTicket, Session},
};

/// Source of topology data.
#[async_trait(?Send)]
pub trait DataProvider {
    /// Fetches the CIs and relationships around `focal_id`, up to `depth`
    /// hops away, or an overview when `focal_id` is `None`.
    async fn fetch_topology(
        &self,
        focal_id: Option<CiId>,
        depth: u8,
    ) -> Result<Topology, ProviderError>;
}

/// Receiver of "show the detail view for this CI" intents.
pub trait Navigator {
    fn navigate_to_ci(&self, id: CiId);
}

impl<F> Navigator for F
where
    F: Fn(CiId),
{
    fn navigate_to_ci(&self, id: CiId) {
        self(id)
    }
}

/// Drives one topology view.
pub struct Controller<P, N> {
    provider: P,
    navigator: N,
    engine: RingLayout,
    renderer: SceneRenderer,
    session: RefCell<Session>,
}

impl<P, N> Controller<P, N>
where
    P: DataProvider,
    N: Navigator,
{
    /// Creates an idle controller.
    ///
    /// # Errors
    ///
    /// Returns [`TopographError::Config`] if `config` does not validate.
    pub fn new(config: &AppConfig, provider: P, navigator: N) -> Result<Self, TopographError> {
        config.validate()?;
        Ok(Self {
            provider,
            navigator,
            engine: RingLayout::from_config(config.layout()),
            renderer: SceneRenderer::from_config(config)?,
            session: RefCell::new(Session::new(config.view())),
        })
    }

    /// Initial load. Without a focal CI the provider's overview is shown.
    pub async fn mount(&self, focal_id: Option<CiId>) -> Applied {
        let ticket = self.session.borrow_mut().begin_load(focal_id);
        self.load(ticket).await
    }

    /// Re-centers the view on `id` and loads its topology.
    pub async fn set_focal_id(&self, id: CiId) -> Applied {
        let ticket = self.session.borrow_mut().begin_load(Some(id));
        self.load(ticket).await
    }

    /// Loads the current focal CI's topology again.
    pub async fn reload(&self) -> Applied {
        let ticket = self.session.borrow_mut().begin_reload();
        self.load(ticket).await
    }

    /// Emits a navigation intent for `id` and re-centers on it.
    pub async fn on_node_click(&self, id: CiId) -> Applied {
        info!(ci_id = id.get(); "Node clicked");
        self.navigator.navigate_to_ci(id);
        self.set_focal_id(id).await
    }

    /// Hit-tests `point` against the current scene and clicks the node
    /// found there, if any.
    pub async fn click_at(&self, point: Point) -> Option<Applied> {
        let id = self.scene().node_at(point)?;
        Some(self.on_node_click(id).await)
    }

    pub fn zoom_in(&self) -> f32 {
        let scale = self.session.borrow_mut().zoom_in();
        debug!(scale; "Zoomed in");
        scale
    }

    pub fn zoom_out(&self) -> f32 {
        let scale = self.session.borrow_mut().zoom_out();
        debug!(scale; "Zoomed out");
        scale
    }

    /// Renders the current state.
    pub fn scene(&self) -> Scene {
        self.renderer.render_session(&self.session.borrow())
    }

    pub fn session(&self) -> Ref<'_, Session> {
        self.session.borrow()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    async fn load(&self, ticket: RequestTicket) -> Applied {
        let outcome = self
            .provider
            .fetch_topology(ticket.focal_id(), ticket.depth())
            .await;
        self.session
            .borrow_mut()
            .resolve(&ticket, outcome, &self.engine)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, collections::HashMap, rc::Rc};

    use tokio::sync::{Notify, oneshot};

    use super::*;
    use crate::{
        provider::{MemoryProvider, topology},
        scene::Placeholder,
        session::LoadPhase,
    };

    /// Records navigation intents.
    #[derive(Default)]
    struct Recorder {
        visited: RefCell<Vec<CiId>>,
    }

    impl Navigator for Recorder {
        fn navigate_to_ci(&self, id: CiId) {
            self.visited.borrow_mut().push(id);
        }
    }

    fn memory_controller() -> Controller<MemoryProvider, Recorder> {
        let provider = MemoryProvider::new(topology(&[1, 2, 3, 4], &[(1, 2), (2, 3), (3, 4)]));
        Controller::new(&AppConfig::default(), provider, Recorder::default()).unwrap()
    }

    /// Fails every request.
    struct Offline;

    #[async_trait(?Send)]
    impl DataProvider for Offline {
        async fn fetch_topology(
            &self,
            _focal_id: Option<CiId>,
            _depth: u8,
        ) -> Result<Topology, ProviderError> {
            Err(ProviderError::Unavailable("connection refused".to_string()))
        }
    }

    /// Holds answers for chosen CIs until the test releases them.
    struct Gated {
        inner: MemoryProvider,
        started: Rc<Notify>,
        gates: RefCell<HashMap<CiId, oneshot::Receiver<()>>>,
    }

    #[async_trait(?Send)]
    impl DataProvider for Gated {
        async fn fetch_topology(
            &self,
            focal_id: Option<CiId>,
            depth: u8,
        ) -> Result<Topology, ProviderError> {
            let gate = focal_id.and_then(|id| self.gates.borrow_mut().remove(&id));
            if let Some(gate) = gate {
                self.started.notify_one();
                let _ = gate.await;
            }
            self.inner.query(focal_id, depth)
        }
    }

    #[tokio::test]
    async fn test_mount_reaches_ready() {
        let controller = memory_controller();
        assert_eq!(controller.session().phase(), &LoadPhase::Idle);

        let applied = controller.mount(Some(2.into())).await;
        assert_eq!(applied, Applied::Current);

        let session = controller.session();
        let layout = session.phase().layout().unwrap();
        assert_eq!(layout.focal().unwrap().id(), CiId::new(2));
        assert_eq!(layout.nodes().len(), 4);
    }

    #[tokio::test]
    async fn test_mount_without_focal_shows_overview() {
        let controller = memory_controller();
        controller.mount(None).await;

        let session = controller.session();
        let layout = session.phase().layout().unwrap();
        assert_eq!(layout.nodes().len(), 4);
        assert_eq!(layout.focal().unwrap().id(), CiId::new(1));
        assert!(!layout.is_degraded());
    }

    #[tokio::test]
    async fn test_click_navigates_once_and_recenters() {
        let controller = memory_controller();
        controller.mount(Some(1.into())).await;

        controller.on_node_click(3.into()).await;

        assert_eq!(*controller.navigator().visited.borrow(), vec![CiId::new(3)]);
        assert_eq!(controller.session().focal_id(), Some(CiId::new(3)));
        let session = controller.session();
        assert_eq!(
            session.phase().layout().unwrap().focal().unwrap().id(),
            CiId::new(3)
        );
    }

    #[tokio::test]
    async fn test_click_at_uses_scene_hit_test() {
        let controller = memory_controller();
        controller.mount(Some(1.into())).await;

        // Neighbor 2 sits at angle 0 on the inner ring.
        let applied = controller.click_at(Point::new(550.0, 400.0)).await;
        assert_eq!(applied, Some(Applied::Current));
        assert_eq!(controller.session().focal_id(), Some(CiId::new(2)));

        assert_eq!(controller.click_at(Point::new(5.0, 5.0)).await, None);
        assert_eq!(controller.navigator().visited.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_closure_navigator() {
        let seen = Rc::new(Cell::new(None));
        let sink = Rc::clone(&seen);
        let provider = MemoryProvider::new(topology(&[1, 2], &[(1, 2)]));
        let controller = Controller::new(&AppConfig::default(), provider, move |id: CiId| {
            sink.set(Some(id))
        })
        .unwrap();

        controller.on_node_click(2.into()).await;
        assert_eq!(seen.get(), Some(CiId::new(2)));
    }

    #[tokio::test]
    async fn test_provider_failure_shows_no_data() {
        let navigator = |_: CiId| {};
        let controller = Controller::new(&AppConfig::default(), Offline, navigator).unwrap();

        controller.mount(Some(1.into())).await;

        assert!(matches!(controller.session().phase(), LoadPhase::Error(_)));
        assert_eq!(controller.scene().placeholder(), Some(Placeholder::NoData));
    }

    #[tokio::test]
    async fn test_empty_topology_shows_empty_state() {
        let controller = memory_controller();
        controller.mount(Some(99.into())).await;

        assert_eq!(controller.scene().placeholder(), Some(Placeholder::Empty));
    }

    #[tokio::test]
    async fn test_reload_keeps_focal() {
        let controller = memory_controller();
        controller.mount(Some(4.into())).await;
        let generation = controller.session().generation();

        assert_eq!(controller.reload().await, Applied::Current);
        assert_eq!(controller.session().focal_id(), Some(CiId::new(4)));
        assert_eq!(controller.session().generation(), generation + 1);
    }

    #[tokio::test]
    async fn test_zoom_is_local_and_clamped() {
        let controller = memory_controller();
        controller.mount(Some(1.into())).await;
        let generation = controller.session().generation();

        for _ in 0..30 {
            controller.zoom_in();
        }
        assert_eq!(controller.session().zoom_scale(), 2.0);
        for _ in 0..30 {
            controller.zoom_out();
        }
        assert_eq!(controller.session().zoom_scale(), 0.5);
        assert_eq!(controller.session().generation(), generation);

        let scene = controller.scene();
        assert_eq!(scene.hit_regions()[0].circle().radius(), 15.0);
    }

    #[tokio::test]
    async fn test_slow_stale_response_is_discarded() {
        let started = Rc::new(Notify::new());
        let (release, gate) = oneshot::channel();
        let provider = Gated {
            inner: MemoryProvider::new(topology(&[1, 2, 3], &[(1, 2)])),
            started: Rc::clone(&started),
            gates: RefCell::new(HashMap::from([(CiId::new(1), gate)])),
        };
        let controller = Controller::new(&AppConfig::default(), provider, |_: CiId| {}).unwrap();

        let slow = controller.set_focal_id(1.into());
        let fast = async {
            started.notified().await;
            let applied = controller.set_focal_id(2.into()).await;
            let _ = release.send(());
            applied
        };
        let (slow, fast) = tokio::join!(slow, fast);

        assert_eq!(slow, Applied::Stale);
        assert_eq!(fast, Applied::Current);

        let session = controller.session();
        assert_eq!(session.focal_id(), Some(CiId::new(2)));
        assert_eq!(
            session.phase().layout().unwrap().focal().unwrap().id(),
            CiId::new(2)
        );
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config: AppConfig = toml::from_str("[view]\ndepth = 9").unwrap();
        let result = Controller::new(&config, MemoryProvider::default(), |_: CiId| {});
        assert!(matches!(result, Err(TopographError::Config(_))));
    }
}
