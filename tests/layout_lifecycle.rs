//! Lifecycle scenarios for the circle layout over an in-memory surface.

// Test target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use std::cell::Cell;
use std::f64::consts::PI;
use std::rc::Rc;

use circle_canvas::components::circle_canvas::{ANCHOR_ID, Bounds, UPDATE_ALPHA};
use circle_canvas::{CanvasConfig, Circle, CircleLayout, Error, Result, Surface};

#[derive(Debug, Default, Clone)]
struct FakeElement {
	href: String,
	class: String,
	title: String,
	tagline: Option<String>,
	left: f64,
	top: f64,
	class_writes: usize,
	removed: bool,
}

/// In-memory surface that records every write.
struct FakeSurface {
	viewport: Rc<Cell<(f64, f64)>>,
	elements: Vec<FakeElement>,
	writes: usize,
}

impl FakeSurface {
	fn new(viewport: Rc<Cell<(f64, f64)>>) -> Self {
		Self {
			viewport,
			elements: Vec::new(),
			writes: 0,
		}
	}

	fn live(&self) -> Vec<&FakeElement> {
		self.elements.iter().filter(|e| !e.removed).collect()
	}

	fn by_href(&self, href: &str) -> Option<&FakeElement> {
		self.elements.iter().find(|e| e.href == href)
	}
}

impl Surface for FakeSurface {
	type Element = usize;

	fn viewport(&self) -> (f64, f64) {
		self.viewport.get()
	}

	fn create_element(&mut self, href: &str, class: &str) -> Result<usize> {
		if href.is_empty() {
			return Err(Error::Dom("empty href".into()));
		}
		self.writes += 1;
		self.elements.push(FakeElement {
			href: href.into(),
			class: class.into(),
			..Default::default()
		});
		Ok(self.elements.len() - 1)
	}

	fn set_title(&mut self, element: &usize, text: &str) {
		self.writes += 1;
		self.elements[*element].title = text.into();
	}

	fn set_tagline(&mut self, element: &usize, text: Option<&str>) {
		self.writes += 1;
		self.elements[*element].tagline = text.map(Into::into);
	}

	fn set_class(&mut self, element: &usize, class: &str) {
		self.writes += 1;
		let el = &mut self.elements[*element];
		el.class = class.into();
		el.class_writes += 1;
	}

	fn set_position(&mut self, element: &usize, left: f64, top: f64) {
		self.writes += 1;
		let el = &mut self.elements[*element];
		el.left = left;
		el.top = top;
	}

	fn remove_element(&mut self, element: usize) {
		self.writes += 1;
		self.elements[element].removed = true;
	}
}

fn layout(width: f64, height: f64) -> (CircleLayout<FakeSurface>, Rc<Cell<(f64, f64)>>) {
	let viewport = Rc::new(Cell::new((width, height)));
	let layout = CircleLayout::new(FakeSurface::new(viewport.clone()), CanvasConfig::default());
	(layout, viewport)
}

fn run_to_rest(layout: &mut CircleLayout<FakeSurface>, max: usize) -> usize {
	let mut frames = 0;
	while layout.tick() {
		frames += 1;
		assert!(frames < max, "simulation did not settle in {max} frames");
	}
	frames
}

fn assert_within(layout: &CircleLayout<FakeSurface>, width: f64, height: f64) {
	let bounds = Bounds::new(width, height, 72.0);
	for node in layout.nodes().iter().filter(|n| n.id != ANCHOR_ID) {
		assert!(
			bounds.contains(node.x, node.y),
			"{} at ({}, {}) outside {:?}",
			node.id,
			node.x,
			node.y,
			bounds
		);
	}
}

fn assert_anchor_pinned(layout: &CircleLayout<FakeSurface>) {
	let anchor = &layout.nodes()[0];
	assert_eq!(anchor.id, ANCHOR_ID);
	assert_eq!((anchor.x, anchor.y), (0.0, 0.0));
}

#[test]
fn end_to_end_update_restyles_and_removes() {
	let (mut layout, _) = layout(1024.0, 768.0);
	layout.update_circles(&[
		Circle::new("a").with_title("A").with_stage("lobby"),
		Circle::new("b").with_title("B").with_stage("complete"),
	]);

	let a = layout.node("a").unwrap();
	assert!((a.x - 80.0).abs() < 1e-9 && a.y.abs() < 1e-9);
	let b = layout.node("b").unwrap();
	assert!((b.x - 80.0 * PI.cos()).abs() < 1e-9 && (b.y - 80.0 * PI.sin()).abs() < 1e-9);

	assert!(layout.tick());
	assert_eq!(layout.element_count(), 2);
	let surface = layout.surface();
	let el_a = surface.by_href("/d/a").unwrap();
	let el_b = surface.by_href("/d/b").unwrap();
	assert!(el_a.class.contains("bg-base-100"));
	assert!(el_b.class.contains("bg-success"));
	assert_eq!(el_a.title, "A");
	assert_eq!(el_a.tagline, None);

	for _ in 0..10 {
		layout.tick();
	}
	let before = layout.node("a").cloned().unwrap();

	layout.update_circles(&[Circle::new("a").with_title("A").with_stage("complete")]);
	assert!(layout.node("b").is_none());
	assert!(!layout.has_element("b"));
	assert!(layout.surface().by_href("/d/b").unwrap().removed);
	assert_eq!(layout.surface().live().len(), 1);

	let after = layout.node("a").unwrap();
	assert_eq!((after.x, after.y, after.vx, after.vy), (before.x, before.y, before.vx, before.vy));
	assert!(layout.is_running());
	assert_eq!(layout.alpha(), UPDATE_ALPHA);

	layout.tick();
	let el_a = layout.surface().by_href("/d/a").unwrap();
	assert_eq!(el_a.class_writes, 1);
	assert!(el_a.class.contains("bg-success"));
}

#[test]
fn continuity_survives_attribute_changes() {
	let (mut layout, _) = layout(800.0, 600.0);
	layout.update_circles(&[Circle::new("x"), Circle::new("y"), Circle::new("z")]);
	for _ in 0..25 {
		layout.tick();
	}
	let before = layout.node("x").cloned().unwrap();

	layout.update_circles(&[
		Circle::new("z"),
		Circle::new("x")
			.with_title("changed")
			.with_tagline("now with tagline")
			.with_stage("lobby")
			.with_size(20.0),
		Circle::new("w"),
	]);
	let after = layout.node("x").unwrap();
	assert_eq!((after.x, after.y, after.vx, after.vy), (before.x, before.y, before.vx, before.vy));

	layout.tick();
	let el = layout.surface().by_href("/d/x").unwrap();
	assert_eq!(el.title, "changed");
	assert_eq!(el.tagline.as_deref(), Some("now with tagline"));
}

#[test]
fn nodes_stay_inside_a_shrinking_viewport() {
	let (mut layout, viewport) = layout(600.0, 400.0);
	let circles: Vec<Circle> = (0..12).map(|i| Circle::new(format!("c{i:02}"))).collect();
	layout.update_circles(&circles);

	for _ in 0..40 {
		layout.tick();
		assert_within(&layout, 600.0, 400.0);
	}

	viewport.set((300.0, 250.0));
	layout.resize();
	assert!(layout.is_running());
	while layout.tick() {
		assert_within(&layout, 300.0, 250.0);
	}
	assert_within(&layout, 300.0, 250.0);

	let el = layout.surface().by_href("/d/c00").unwrap();
	let node = layout.node("c00").unwrap();
	assert_eq!(el.left, 150.0 + node.x - 64.0);
	assert_eq!(el.top, 125.0 + node.y - 64.0);
}

#[test]
fn anchor_is_pinned_and_never_rendered() {
	let (mut layout, _) = layout(900.0, 700.0);
	assert_anchor_pinned(&layout);

	layout.update_circles(&[Circle::new("a"), Circle::new("b"), Circle::new("c")]);
	for _ in 0..30 {
		layout.tick();
		assert_anchor_pinned(&layout);
	}
	layout.update_circles(&[Circle::new("c")]);
	run_to_rest(&mut layout, 1000);
	assert_anchor_pinned(&layout);

	assert!(!layout.has_element(ANCHOR_ID));
	assert!(layout.surface().by_href(&format!("/d/{ANCHOR_ID}")).is_none());
	assert_eq!(layout.surface().live().len(), 1);
}

#[test]
fn steady_stage_never_rewrites_classes() {
	let (mut layout, _) = layout(800.0, 600.0);
	layout.update_circles(&[
		Circle::new("a").with_stage("lobby"),
		Circle::new("b"),
		Circle::new("c").with_stage("voting"),
	]);
	run_to_rest(&mut layout, 1000);
	for el in layout.surface().live() {
		assert_eq!(el.class_writes, 0, "{} was restyled", el.href);
	}
	let c = layout.surface().by_href("/d/c").unwrap();
	assert!(c.class.contains("bg-primary"));
}

#[test]
fn empty_input_renders_nothing() {
	let (mut layout, _) = layout(800.0, 600.0);
	layout.update_circles(&[]);
	assert_eq!(layout.nodes().len(), 1);
	assert!(layout.tick());
	assert_eq!(layout.element_count(), 0);
	assert_eq!(layout.surface().writes, 0);
}

#[test]
fn settled_layout_stops_ticking() {
	let (mut layout, _) = layout(800.0, 600.0);
	layout.update_circles(&[Circle::new("a"), Circle::new("b")]);
	let frames = run_to_rest(&mut layout, 1000);
	assert!(frames > 100);
	assert!(!layout.is_running());

	let writes = layout.surface().writes;
	assert!(!layout.tick());
	assert_eq!(layout.surface().writes, writes);

	layout.resize();
	assert!(layout.is_running());
	assert!(layout.tick());
	assert!(layout.surface().writes > writes);
}

#[test]
fn teardown_silences_every_trigger() {
	let (mut layout, viewport) = layout(800.0, 600.0);
	layout.update_circles(&[Circle::new("a"), Circle::new("b")]);
	for _ in 0..5 {
		layout.tick();
	}

	layout.teardown();
	assert!(layout.is_torn_down());
	assert!(!layout.is_running());
	let writes = layout.surface().writes;
	let alpha = layout.alpha();

	assert!(!layout.tick());
	viewport.set((400.0, 300.0));
	layout.resize();
	assert!(!layout.is_running());
	assert!(!layout.tick());
	layout.update_circles(&[Circle::new("c")]);
	assert!(!layout.tick());

	assert_eq!(layout.surface().writes, writes);
	assert_eq!(layout.alpha(), alpha);
	assert!(layout.node("c").is_none());
}
