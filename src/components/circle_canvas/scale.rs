//! Rendered element sizing.
//!
//! Every circle is drawn as a fixed square element regardless of its
//! simulation `size`, which only feeds the collision radius. The clamp
//! padding is derived from the same element size so that a clamped node
//! never pokes out of the container.
//!
//! # Coordinate Spaces
//!
//! - **Simulation space**: origin at the container centre, y grows downward.
//! - **Container space**: CSS pixels from the container's top-left corner.
//!
//! [`ScaleConfig::to_container`] converts a node centre from the former to
//! the top-left corner of its element in the latter.

/// Sizing of rendered circle elements, in CSS pixels.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Side length of the square element box.
	pub element_size: f64,
	/// Extra gap kept between an element and the container edge.
	pub clamp_margin: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			element_size: 128.0,
			clamp_margin: 8.0,
		}
	}
}

impl ScaleConfig {
	/// Half the element side.
	pub fn element_radius(&self) -> f64 {
		self.element_size / 2.0
	}

	/// Distance kept between a node centre and the container edge.
	pub fn clamp_padding(&self) -> f64 {
		self.element_radius() + self.clamp_margin
	}

	/// Top-left corner of the element for a node centred at `(x, y)` in a
	/// `width` x `height` container.
	pub fn to_container(&self, x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
		let r = self.element_radius();
		(width / 2.0 + x - r, height / 2.0 + y - r)
	}
}
