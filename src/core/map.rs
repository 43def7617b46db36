use crate::{
    core::{
        bounds::Extent,
        config::ViewerConfig,
        viewport::{RecenterRequest, ViewportClamp},
    },
    data::source::{self, DataSource},
    layers::feature::FeatureLayerDefinition,
    traits::{EngineSetup, MapEngine},
    ui::legend::{Legend, LegendSection},
    Result,
};

/// Lifecycle of the engine's view as reported back to the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Waiting for the engine to report the view is ready
    Initializing,
    /// The extent listener is attached
    Ready,
    /// The view never came up; the extent listener stays detached
    Failed,
}

/// Wires config, engine, permit layer, legend and viewport clamp together.
///
/// The viewer is driven by the engine's notifications: call
/// [`MapViewer::on_view_ready`] once the view has initialized (or failed to)
/// and [`MapViewer::on_extent_changed`] for every extent update.
pub struct MapViewer<E: MapEngine> {
    config: ViewerConfig,
    engine: E,
    clamp: ViewportClamp,
    legend: Legend,
    state: ViewState,
    /// Legend content of the most recently added layer
    legend_sections: Option<Vec<LegendSection>>,
    legend_added: bool,
}

impl<E: MapEngine> MapViewer<E> {
    /// Configures the engine and returns a viewer waiting for the view
    pub fn new(config: ViewerConfig, mut engine: E) -> Result<Self> {
        config.validate()?;
        engine.configure(&EngineSetup::from(&config))?;

        log::debug!(
            "viewer configured: basemap {}, center {:?}, zoom {}",
            config.basemap,
            config.center,
            config.zoom
        );

        Ok(Self {
            clamp: ViewportClamp::new(config.vertical_bounds),
            legend: Legend::new(config.legend_position),
            config,
            engine,
            state: ViewState::Initializing,
            legend_sections: None,
            legend_added: false,
        })
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn is_legend_added(&self) -> bool {
        self.legend_added
    }

    /// Fetches the configured source and adds the permit layer.
    /// Returns the number of permits on the layer.
    pub async fn load_permit_layer(&mut self) -> Result<usize> {
        let source = source::source_for(&self.config.source);
        self.load_permit_layer_from(source.as_ref()).await
    }

    /// Fetches `source` and adds the permit layer. Each call fetches again
    /// and adds another layer.
    pub async fn load_permit_layer_from(&mut self, source: &dyn DataSource) -> Result<usize> {
        let report = source::load(source).await?;
        let layer = FeatureLayerDefinition::methane_permits(report.records);
        let count = layer.source.len();

        let duplicates = layer.duplicate_object_ids();
        if !duplicates.is_empty() {
            log::warn!("duplicate objectId values in permit layer: {:?}", duplicates);
        }

        let sections = self.legend.sections(&layer.renderer);
        self.engine.add_layer(layer)?;
        self.legend_sections = Some(sections);
        log::info!("permit layer added with {} features", count);

        self.add_legend_if_ready();
        Ok(count)
    }

    /// Reports the outcome of the engine's view initialization.
    ///
    /// Only the first report counts. After a failure the clamp is never
    /// attached.
    pub fn on_view_ready(&mut self, outcome: Result<()>) {
        if self.state != ViewState::Initializing {
            return;
        }

        match outcome {
            Ok(()) => {
                self.state = ViewState::Ready;
                log::debug!("view ready, viewport clamp attached");
                self.add_legend_if_ready();
            }
            Err(e) => {
                self.state = ViewState::Failed;
                log::error!("initialization failed: {}", e);
            }
        }
    }

    /// Extent listener. Asks the engine to recenter when the extent has left
    /// the vertical bounds; a refused recenter is dropped silently.
    pub fn on_extent_changed(&mut self, extent: &Extent) -> Option<RecenterRequest> {
        if self.state != ViewState::Ready {
            return None;
        }

        let request = self.clamp.on_extent_changed(extent)?;
        let _ = self.engine.go_to(request.target, request.options);
        Some(request)
    }

    fn add_legend_if_ready(&mut self) {
        if self.legend_added || self.state != ViewState::Ready {
            return;
        }
        let Some(sections) = &self.legend_sections else {
            return;
        };

        match self.engine.add_legend(&self.legend, sections) {
            Ok(()) => self.legend_added = true,
            Err(e) => log::warn!("failed to add legend: {}", e),
        }
    }
}

impl<E: MapEngine> std::fmt::Debug for MapViewer<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapViewer")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("layer_added", &self.legend_sections.is_some())
            .field("legend_added", &self.legend_added)
            .finish()
    }
}
