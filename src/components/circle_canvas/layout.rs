//! Browser-independent core of the circle canvas.
//!
//! [`CircleLayout`] ties the node store, the simulation, bounds clamping and
//! the renderer together behind the four events the component reacts to:
//! a new circle set, a viewport resize, an animation frame and teardown.

use log::debug;

use super::bounds::Bounds;
use super::render::{Renderer, Surface};
use super::scale::ScaleConfig;
use super::simulation::{SimNode, SimulationConfig};
use super::state::CircleState;
use super::theme::Theme;
use super::types::Circle;

/// Everything tunable about the canvas.
#[derive(Clone, Debug)]
pub struct CanvasConfig {
	/// Forces and cooling.
	pub simulation: SimulationConfig,
	/// Element size and edge padding.
	pub scale: ScaleConfig,
	/// Classes per stage.
	pub theme: Theme,
	/// Prepended to a circle id to form its link target.
	pub link_prefix: String,
}

impl Default for CanvasConfig {
	fn default() -> Self {
		Self {
			simulation: SimulationConfig::default(),
			scale: ScaleConfig::default(),
			theme: Theme::default(),
			link_prefix: "/d/".into(),
		}
	}
}

/// Owns the simulation and the rendered elements for one container.
pub struct CircleLayout<S: Surface> {
	state: CircleState,
	renderer: Renderer<S>,
	torn_down: bool,
}

impl<S: Surface> CircleLayout<S> {
	/// Empty layout holding only the anchor.
	pub fn new(surface: S, config: CanvasConfig) -> Self {
		let CanvasConfig {
			simulation,
			scale,
			theme,
			link_prefix,
		} = config;
		Self {
			state: CircleState::new(simulation),
			renderer: Renderer::new(surface, scale, theme, link_prefix),
			torn_down: false,
		}
	}

	/// Replaces the circle set, drops elements for vanished ids and
	/// re-energizes the simulation.
	pub fn update_circles(&mut self, circles: &[Circle]) {
		if self.torn_down {
			return;
		}
		let summary = self.state.update_nodes(circles);
		let removed = self
			.renderer
			.retain(circles.iter().map(|c| c.id.as_str()));
		debug!(
			"circle-canvas: {} circles ({} new, {} dropped, {} elements removed)",
			circles.len(),
			summary.added.len(),
			summary.removed.len(),
			removed
		);
	}

	/// Reheats the simulation so nodes settle into the new bounds.
	pub fn resize(&mut self) {
		if self.torn_down {
			return;
		}
		self.state.reheat();
	}

	/// Runs one frame: step, clamp, paint.
	///
	/// Returns whether another frame is wanted. Nothing happens when the
	/// simulation has settled or the layout was torn down.
	pub fn tick(&mut self) -> bool {
		if self.torn_down || !self.state.sim.is_running() {
			return false;
		}
		self.state.sim.step();

		let (width, height) = self.renderer.surface().viewport();
		let bounds = Bounds::new(width, height, self.renderer.scale().clamp_padding());
		bounds.clamp_nodes(self.state.sim.nodes_mut());

		self.renderer.render(self.state.sim.nodes());
		self.state.sim.is_running()
	}

	/// Whether the next [`CircleLayout::tick`] would do any work.
	pub fn is_running(&self) -> bool {
		!self.torn_down && self.state.sim.is_running()
	}

	/// Stops the simulation for good. Later calls to any method are no-ops.
	pub fn teardown(&mut self) {
		if self.torn_down {
			return;
		}
		self.torn_down = true;
		self.state.sim.stop();
		self.renderer.release();
		debug!("circle-canvas: torn down");
	}

	/// Set once [`CircleLayout::teardown`] has run.
	pub fn is_torn_down(&self) -> bool {
		self.torn_down
	}

	/// All nodes, anchor first.
	pub fn nodes(&self) -> &[SimNode] {
		self.state.sim.nodes()
	}

	/// Node for circle `id`.
	pub fn node(&self, id: &str) -> Option<&SimNode> {
		self.state.node(id)
	}

	/// Current simulation temperature.
	pub fn alpha(&self) -> f64 {
		self.state.sim.alpha()
	}

	/// Whether circle `id` currently has a rendered element.
	pub fn has_element(&self, id: &str) -> bool {
		self.renderer.has_element(id)
	}

	/// Number of rendered elements.
	pub fn element_count(&self) -> usize {
		self.renderer.element_count()
	}

	/// Surface the elements live on.
	pub fn surface(&self) -> &S {
		self.renderer.surface()
	}
}
