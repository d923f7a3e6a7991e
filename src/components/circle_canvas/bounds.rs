//! Viewport bounds in simulation space.

use super::simulation::SimNode;

/// Half extents of the area node centres may occupy, centred on the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	/// Largest allowed `|x|`.
	pub half_w: f64,
	/// Largest allowed `|y|`.
	pub half_h: f64,
}

impl Bounds {
	/// Bounds for a `width` x `height` container, shrunk by `padding` on
	/// every side.
	pub fn new(width: f64, height: f64, padding: f64) -> Self {
		Self {
			half_w: width / 2.0 - padding,
			half_h: height / 2.0 - padding,
		}
	}

	/// Clamps a point into the bounds.
	///
	/// A container narrower than twice the padding yields negative half
	/// extents; the point then lands on `-half`, same as `max(-h, min(h, v))`.
	pub fn clamp(&self, x: f64, y: f64) -> (f64, f64) {
		(
			x.min(self.half_w).max(-self.half_w),
			y.min(self.half_h).max(-self.half_h),
		)
	}

	/// True when the point needs no clamping.
	pub fn contains(&self, x: f64, y: f64) -> bool {
		x.abs() <= self.half_w && y.abs() <= self.half_h
	}

	/// Clamps every non-fixed node in place.
	pub fn clamp_nodes(&self, nodes: &mut [SimNode]) {
		for node in nodes.iter_mut().filter(|n| !n.fixed) {
			(node.x, node.y) = self.clamp(node.x, node.y);
		}
	}
}
