//! Circle node store.
//!
//! Merges each incoming circle set into the simulation by id: circles seen
//! before keep their position and velocity, new circles start on a fixed
//! ring around the origin, and the anchor node is always first.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use super::simulation::{SimNode, Simulation, SimulationConfig};
use super::types::Circle;

/// Reserved id of the anchor node.
pub const ANCHOR_ID: &str = "__center__";

/// Collision size of the anchor.
pub const ANCHOR_SIZE: f64 = 24.0;

/// Radius of the ring new circles are placed on.
pub const INITIAL_RING_RADIUS: f64 = 80.0;

/// Alpha applied when the circle set is replaced.
pub const UPDATE_ALPHA: f64 = 0.5;

/// Alpha applied when the viewport changes size.
pub const RESIZE_ALPHA: f64 = 0.3;

/// Node pinned at the origin that anchors the layout. Never rendered.
pub fn anchor_node() -> SimNode {
	SimNode {
		id: ANCHOR_ID.to_string(),
		size: ANCHOR_SIZE,
		fixed: true,
		..Default::default()
	}
}

/// Whether `node` is the pinned anchor.
pub fn is_anchor(node: &SimNode) -> bool {
	node.id == ANCHOR_ID
}

/// Starting position for the `index`-th of `count` new circles.
pub fn ring_position(index: usize, count: usize) -> (f64, f64) {
	let angle = index as f64 / count as f64 * 2.0 * PI;
	(
		angle.cos() * INITIAL_RING_RADIUS,
		angle.sin() * INITIAL_RING_RADIUS,
	)
}

/// Ids touched by one [`CircleState::update_nodes`] call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateSummary {
	/// Ids that had no node before, in sorted order.
	pub added: Vec<String>,
	/// Ids whose node was dropped, in sorted order.
	pub removed: Vec<String>,
}

/// Simulation plus the id bookkeeping around it.
pub struct CircleState {
	/// Anchor first, then circles in id order.
	pub sim: Simulation,
}

impl CircleState {
	/// State holding only the anchor, not running.
	pub fn new(config: SimulationConfig) -> Self {
		let mut sim = Simulation::new(config);
		sim.set_nodes(vec![anchor_node()]);
		Self { sim }
	}

	/// Replaces the node set with one node per circle and re-energizes the
	/// simulation.
	pub fn update_nodes(&mut self, circles: &[Circle]) -> UpdateSummary {
		let existing: HashMap<&str, &SimNode> = self
			.sim
			.nodes()
			.iter()
			.filter(|n| !is_anchor(n))
			.map(|n| (n.id.as_str(), n))
			.collect();

		let mut sorted: Vec<&Circle> = circles.iter().collect();
		sorted.sort_by(|a, b| a.id.cmp(&b.id));

		let mut summary = UpdateSummary::default();
		let mut nodes = Vec::with_capacity(sorted.len() + 1);
		nodes.push(anchor_node());

		for (i, circle) in sorted.iter().enumerate() {
			let (x, y, vx, vy) = match existing.get(circle.id.as_str()) {
				Some(prev) => (prev.x, prev.y, prev.vx, prev.vy),
				None => {
					summary.added.push(circle.id.clone());
					let (x, y) = ring_position(i, sorted.len());
					(x, y, 0.0, 0.0)
				}
			};
			nodes.push(SimNode {
				id: circle.id.clone(),
				title: circle.title.clone(),
				tagline: circle.tagline().map(str::to_string),
				stage: circle.stage.clone(),
				size: circle.effective_size(),
				x,
				y,
				vx,
				vy,
				fixed: false,
			});
		}

		let active: HashSet<&str> = sorted.iter().map(|c| c.id.as_str()).collect();
		let mut removed: Vec<String> = existing
			.keys()
			.filter(|id| !active.contains(*id))
			.map(|id| id.to_string())
			.collect();
		removed.sort();
		summary.removed = removed;

		self.sim.set_nodes(nodes);
		self.sim.restart(UPDATE_ALPHA);
		summary
	}

	/// Re-energizes the simulation without touching the node set.
	pub fn reheat(&mut self) {
		self.sim.restart(RESIZE_ALPHA);
	}

	/// Node for circle `id`.
	pub fn node(&self, id: &str) -> Option<&SimNode> {
		self.sim.nodes().iter().find(|n| n.id == id)
	}

	/// Number of non-anchor nodes.
	pub fn circle_count(&self) -> usize {
		self.sim.nodes().len().saturating_sub(1)
	}
}

impl Default for CircleState {
	fn default() -> Self {
		Self::new(SimulationConfig::default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ids(state: &CircleState) -> Vec<&str> {
		state.sim.nodes().iter().map(|n| n.id.as_str()).collect()
	}

	#[test]
	fn test_empty_input_leaves_only_anchor() {
		let mut state = CircleState::default();
		let summary = state.update_nodes(&[]);
		assert_eq!(ids(&state), vec![ANCHOR_ID]);
		assert_eq!(summary, UpdateSummary::default());
		assert_eq!(state.circle_count(), 0);
	}

	#[test]
	fn test_anchor_is_prepended_and_nodes_sorted() {
		let mut state = CircleState::default();
		state.update_nodes(&[Circle::new("c"), Circle::new("a"), Circle::new("b")]);
		assert_eq!(ids(&state), vec![ANCHOR_ID, "a", "b", "c"]);
		let anchor = &state.sim.nodes()[0];
		assert!(anchor.fixed);
		assert_eq!((anchor.x, anchor.y), (0.0, 0.0));
	}

	#[test]
	fn test_initial_layout_ignores_input_order() {
		let circles = vec![
			Circle::new("delta"),
			Circle::new("alpha"),
			Circle::new("charlie"),
			Circle::new("bravo"),
		];
		let mut reversed = circles.clone();
		reversed.reverse();

		let mut first = CircleState::default();
		let mut second = CircleState::default();
		first.update_nodes(&circles);
		second.update_nodes(&reversed);
		assert_eq!(first.sim.nodes(), second.sim.nodes());

		for (i, id) in ["alpha", "bravo", "charlie", "delta"].iter().enumerate() {
			let node = first.node(id).unwrap();
			let angle = 2.0 * PI * i as f64 / 4.0;
			assert!((node.x - 80.0 * angle.cos()).abs() < 1e-9);
			assert!((node.y - 80.0 * angle.sin()).abs() < 1e-9);
			assert_eq!((node.vx, node.vy), (0.0, 0.0));
		}
	}

	#[test]
	fn test_existing_nodes_keep_motion() {
		let mut state = CircleState::default();
		state.update_nodes(&[Circle::new("x").with_stage("lobby"), Circle::new("y")]);
		for _ in 0..5 {
			state.sim.step();
		}
		let before = state.node("x").cloned().unwrap();

		let summary = state.update_nodes(&[
			Circle::new("x")
				.with_title("renamed")
				.with_tagline("new tagline")
				.with_stage("complete")
				.with_size(90.0),
			Circle::new("a"),
		]);
		let after = state.node("x").unwrap();
		assert_eq!(
			(after.x, after.y, after.vx, after.vy),
			(before.x, before.y, before.vx, before.vy)
		);
		assert_eq!(after.title, "renamed");
		assert_eq!(after.tagline.as_deref(), Some("new tagline"));
		assert_eq!(after.stage.as_deref(), Some("complete"));
		assert_eq!(after.size, 90.0);

		assert_eq!(summary.added, vec!["a".to_string()]);
		assert_eq!(summary.removed, vec!["y".to_string()]);
		assert!(state.node("y").is_none());
	}

	#[test]
	fn test_update_and_reheat_alpha() {
		let mut state = CircleState::default();
		assert!(!state.sim.is_running());
		state.update_nodes(&[Circle::new("a")]);
		assert!(state.sim.is_running());
		assert_eq!(state.sim.alpha(), UPDATE_ALPHA);

		state.sim.stop();
		state.reheat();
		assert!(state.sim.is_running());
		assert_eq!(state.sim.alpha(), RESIZE_ALPHA);
		assert_eq!(ids(&state), vec![ANCHOR_ID, "a"]);
	}
}
