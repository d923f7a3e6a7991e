//! Element reconciliation for circle nodes.
//!
//! Each non-anchor node owns one persistent element on a [`Surface`]. Every
//! tick the renderer creates missing elements and pushes the node's text,
//! stage classes and position into them. Elements are only removed when the
//! circle set changes, through [`Renderer::retain`].

use std::collections::{HashMap, HashSet};

use log::warn;

use super::scale::ScaleConfig;
use super::simulation::SimNode;
use super::state::is_anchor;
use super::theme::Theme;
use crate::error::Result;

/// Drawing target the renderer writes into.
///
/// Implemented over the DOM by [`super::dom::DomSurface`]; anything that can
/// hold a link element with a title and a tagline region will do.
pub trait Surface {
	/// Handle to one rendered circle.
	type Element;

	/// Current container size in CSS pixels.
	fn viewport(&self) -> (f64, f64);

	/// Creates a link element pointing at `href` with the given classes,
	/// containing an empty title region and an empty tagline region.
	fn create_element(&mut self, href: &str, class: &str) -> Result<Self::Element>;

	/// Replaces the title text.
	fn set_title(&mut self, element: &Self::Element, text: &str);

	/// Shows the tagline with `text`, or hides the region when `None`.
	fn set_tagline(&mut self, element: &Self::Element, text: Option<&str>);

	/// Replaces the element's full class list.
	fn set_class(&mut self, element: &Self::Element, class: &str);

	/// Moves the element's top-left corner to `(left, top)`.
	fn set_position(&mut self, element: &Self::Element, left: f64, top: f64);

	/// Detaches the element for good.
	fn remove_element(&mut self, element: Self::Element);
}

/// Keeps surface elements in step with simulation nodes.
pub struct Renderer<S: Surface> {
	surface: S,
	scale: ScaleConfig,
	theme: Theme,
	link_prefix: String,
	elements: HashMap<String, S::Element>,
	/// Stage last written to each element's classes.
	applied_stage: HashMap<String, Option<String>>,
}

impl<S: Surface> Renderer<S> {
	/// Renderer with no elements yet; links are `link_prefix` followed by the circle id.
	pub fn new(surface: S, scale: ScaleConfig, theme: Theme, link_prefix: String) -> Self {
		Self {
			surface,
			scale,
			theme,
			link_prefix,
			elements: HashMap::new(),
			applied_stage: HashMap::new(),
		}
	}

	/// Underlying surface.
	pub fn surface(&self) -> &S {
		&self.surface
	}

	/// Sizing used to place elements.
	pub fn scale(&self) -> &ScaleConfig {
		&self.scale
	}

	/// Whether circle `id` has an element.
	pub fn has_element(&self, id: &str) -> bool {
		self.elements.contains_key(id)
	}

	/// Number of live elements.
	pub fn element_count(&self) -> usize {
		self.elements.len()
	}

	/// Link target for a circle.
	pub fn href(&self, id: &str) -> String {
		format!("{}{}", self.link_prefix, id)
	}

	/// Paints every non-anchor node.
	pub fn render(&mut self, nodes: &[SimNode]) {
		let (width, height) = self.surface.viewport();
		for node in nodes.iter().filter(|n| !is_anchor(n)) {
			self.render_node(node, width, height);
		}
	}

	fn render_node(&mut self, node: &SimNode, width: f64, height: f64) {
		if !self.elements.contains_key(&node.id) {
			let href = self.href(&node.id);
			let class = self.theme.element_classes(node.stage.as_deref());
			match self.surface.create_element(&href, &class) {
				Ok(element) => {
					self.elements.insert(node.id.clone(), element);
					self.applied_stage
						.insert(node.id.clone(), node.stage.clone());
				}
				Err(e) => {
					warn!("circle-canvas: could not create element for {}: {}", node.id, e);
					return;
				}
			}
		}
		let Some(element) = self.elements.get(&node.id) else {
			return;
		};

		self.surface.set_title(element, &node.title);
		self.surface.set_tagline(
			element,
			node.tagline.as_deref().filter(|t| !t.is_empty()),
		);

		if self.applied_stage.get(&node.id) != Some(&node.stage) {
			let class = self.theme.element_classes(node.stage.as_deref());
			self.surface.set_class(element, &class);
			self.applied_stage
				.insert(node.id.clone(), node.stage.clone());
		}

		let (left, top) = self.scale.to_container(node.x, node.y, width, height);
		self.surface.set_position(element, left, top);
	}

	/// Removes elements whose id is not in `active`. Returns how many went.
	pub fn retain<'a>(&mut self, active: impl IntoIterator<Item = &'a str>) -> usize {
		let active: HashSet<&str> = active.into_iter().collect();
		let stale: Vec<String> = self
			.elements
			.keys()
			.filter(|id| !active.contains(id.as_str()))
			.cloned()
			.collect();
		for id in &stale {
			if let Some(element) = self.elements.remove(id) {
				self.surface.remove_element(element);
			}
			self.applied_stage.remove(id);
		}
		stale.len()
	}

	/// Forgets every element without touching the surface.
	pub fn release(&mut self) {
		self.elements.clear();
		self.applied_stage.clear();
	}
}
