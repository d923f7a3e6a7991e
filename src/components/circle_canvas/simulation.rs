//! Velocity-Verlet force simulation for circle layout.
//!
//! Follows the d3-force model: each step cools `alpha`, lets every force
//! nudge node velocities (or, for centering, positions), then integrates
//! positions with velocity decay. Three forces are combined:
//!
//! - **many-body**: pairwise inverse-distance repulsion scaled by `alpha`
//! - **center**: translates the node set so its mean sits on the centre
//! - **collide**: separates overlapping circles of radius `size + margin`
//!
//! Fixed nodes take part in every force as sources but never move.

/// Node in the simulation, carrying its display attributes along.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimNode {
	/// Circle id, or the anchor id.
	pub id: String,
	/// Copied from the circle.
	pub title: String,
	/// Copied from the circle.
	pub tagline: Option<String>,
	/// Copied from the circle.
	pub stage: Option<String>,
	/// Collision size; the collide radius is `size + collide_margin`.
	pub size: f64,
	/// Horizontal position relative to the container centre.
	pub x: f64,
	/// Vertical position relative to the container centre.
	pub y: f64,
	/// Horizontal velocity, carried across circle-set updates.
	pub vx: f64,
	/// Vertical velocity.
	pub vy: f64,
	/// Pinned nodes stay at `(x, y)` with zero velocity.
	pub fixed: bool,
}

/// Force and cooling parameters.
#[derive(Clone, Debug)]
pub struct SimulationConfig {
	/// Many-body strength; negative values repel.
	pub charge_strength: f64,
	/// Distances below this are treated as this for the many-body force.
	pub charge_distance_min: f64,
	/// Horizontal centre the node set is pulled to.
	pub center_x: f64,
	/// Vertical centre the node set is pulled to.
	pub center_y: f64,
	/// 1 moves the mean onto the centre in one step.
	pub center_strength: f64,
	/// Added to each node's size to get its collision radius.
	pub collide_margin: f64,
	/// Share of an overlap resolved per step.
	pub collide_strength: f64,
	/// Fraction of the remaining distance to `alpha_target` covered per step.
	pub alpha_decay: f64,
	/// Ticking stops once alpha falls below this.
	pub alpha_min: f64,
	/// Value alpha cools towards.
	pub alpha_target: f64,
	/// Fraction of velocity lost per step (d3 "velocityDecay").
	pub velocity_decay: f64,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		Self {
			charge_strength: -300.0,
			charge_distance_min: 1.0,
			center_x: 0.0,
			center_y: 0.0,
			center_strength: 1.0,
			collide_margin: 6.0,
			collide_strength: 1.0,
			alpha_decay: 0.02,
			alpha_min: 0.001,
			alpha_target: 0.0,
			velocity_decay: 0.4,
		}
	}
}

/// Linear congruential generator used to break ties between coincident
/// nodes, seeded identically for every simulation so layouts reproduce.
#[derive(Clone, Debug)]
struct Lcg(u64);

impl Lcg {
	const A: u64 = 1_664_525;
	const C: u64 = 1_013_904_223;
	const M: u64 = 1 << 32;

	fn next(&mut self) -> f64 {
		self.0 = (Self::A * self.0 + Self::C) % Self::M;
		self.0 as f64 / Self::M as f64
	}

	fn jiggle(&mut self) -> f64 {
		(self.next() - 0.5) * 1e-6
	}
}

impl Default for Lcg {
	fn default() -> Self {
		Self(1)
	}
}

/// Owned simulation over a replaceable node list.
///
/// The simulation does not drive itself; the owner calls [`Simulation::step`]
/// once per frame while [`Simulation::is_running`] holds.
#[derive(Clone, Debug)]
pub struct Simulation {
	config: SimulationConfig,
	nodes: Vec<SimNode>,
	alpha: f64,
	running: bool,
	random: Lcg,
}

impl Simulation {
	/// Stopped simulation with no nodes.
	pub fn new(config: SimulationConfig) -> Self {
		Self {
			config,
			nodes: Vec::new(),
			alpha: 1.0,
			running: false,
			random: Lcg::default(),
		}
	}

	/// Parameters in use.
	pub fn config(&self) -> &SimulationConfig {
		&self.config
	}

	/// Nodes in insertion order.
	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	/// Mutable nodes, e.g. for clamping after a step.
	pub fn nodes_mut(&mut self) -> &mut [SimNode] {
		&mut self.nodes
	}

	/// Replaces the node list. Fixed nodes lose any velocity they carry.
	pub fn set_nodes(&mut self, mut nodes: Vec<SimNode>) {
		for node in nodes.iter_mut().filter(|n| n.fixed) {
			node.vx = 0.0;
			node.vy = 0.0;
		}
		self.nodes = nodes;
	}

	/// Current temperature.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// False after [`Simulation::stop`] or once alpha cools below `alpha_min`.
	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Re-energizes the simulation and resumes ticking.
	pub fn restart(&mut self, alpha: f64) {
		self.alpha = alpha;
		self.running = true;
	}

	/// Stops ticking immediately. Alpha is left untouched.
	pub fn stop(&mut self) {
		self.running = false;
	}

	/// Advances the simulation by one tick.
	///
	/// Once alpha drops below `alpha_min` the simulation stops; the step that
	/// crosses the threshold still moves the nodes.
	pub fn step(&mut self) {
		self.alpha += (self.config.alpha_target - self.alpha) * self.config.alpha_decay;

		self.apply_many_body();
		self.apply_center();
		self.apply_collide();
		self.integrate();

		if self.alpha < self.config.alpha_min {
			self.running = false;
		}
	}

	fn apply_many_body(&mut self) {
		let strength = self.config.charge_strength * self.alpha;
		let min2 = self.config.charge_distance_min * self.config.charge_distance_min;
		let n = self.nodes.len();

		for i in 0..n {
			let (xi, yi) = (self.nodes[i].x, self.nodes[i].y);
			let (mut dvx, mut dvy) = (0.0, 0.0);
			for j in 0..n {
				if i == j {
					continue;
				}
				let mut x = self.nodes[j].x - xi;
				let mut y = self.nodes[j].y - yi;
				let mut l = x * x + y * y;
				if x == 0.0 {
					x = self.random.jiggle();
					l += x * x;
				}
				if y == 0.0 {
					y = self.random.jiggle();
					l += y * y;
				}
				if l < min2 {
					l = (min2 * l).sqrt();
				}
				dvx += x * strength / l;
				dvy += y * strength / l;
			}
			self.nodes[i].vx += dvx;
			self.nodes[i].vy += dvy;
		}
	}

	fn apply_center(&mut self) {
		let n = self.nodes.len();
		if n == 0 {
			return;
		}
		let (sx, sy) = self
			.nodes
			.iter()
			.fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
		let dx = (sx / n as f64 - self.config.center_x) * self.config.center_strength;
		let dy = (sy / n as f64 - self.config.center_y) * self.config.center_strength;

		for node in self.nodes.iter_mut().filter(|n| !n.fixed) {
			node.x -= dx;
			node.y -= dy;
		}
	}

	fn apply_collide(&mut self) {
		let margin = self.config.collide_margin;
		let strength = self.config.collide_strength;
		let n = self.nodes.len();

		for i in 0..n {
			let ri = self.nodes[i].size + margin;
			let ri2 = ri * ri;
			// Predicted position, taken once per outer node.
			let xi = self.nodes[i].x + self.nodes[i].vx;
			let yi = self.nodes[i].y + self.nodes[i].vy;

			for j in (i + 1)..n {
				let rj = self.nodes[j].size + margin;
				let r = ri + rj;
				let mut x = xi - self.nodes[j].x - self.nodes[j].vx;
				let mut y = yi - self.nodes[j].y - self.nodes[j].vy;
				let mut l = x * x + y * y;
				if l >= r * r {
					continue;
				}
				if x == 0.0 {
					x = self.random.jiggle();
					l += x * x;
				}
				if y == 0.0 {
					y = self.random.jiggle();
					l += y * y;
				}
				let dist = l.sqrt();
				let push = (r - dist) / dist * strength;
				x *= push;
				y *= push;

				let rj2 = rj * rj;
				let share = rj2 / (ri2 + rj2);
				self.nodes[i].vx += x * share;
				self.nodes[i].vy += y * share;
				self.nodes[j].vx -= x * (1.0 - share);
				self.nodes[j].vy -= y * (1.0 - share);
			}
		}
	}

	fn integrate(&mut self) {
		let keep = 1.0 - self.config.velocity_decay;
		for node in &mut self.nodes {
			if node.fixed {
				node.vx = 0.0;
				node.vy = 0.0;
				continue;
			}
			node.vx *= keep;
			node.vy *= keep;
			node.x += node.vx;
			node.y += node.vy;
		}
	}
}

impl Default for Simulation {
	fn default() -> Self {
		Self::new(SimulationConfig::default())
	}
}
