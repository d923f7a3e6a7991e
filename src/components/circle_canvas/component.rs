//! Leptos component hosting the circle layout.
//!
//! The component renders an empty container and, once it is in the DOM,
//! builds a [`CircleLayout`] over it. Frames are driven by
//! `requestAnimationFrame` only while the simulation is hot; data changes and
//! container resizes wake the loop again. All browser registrations are held
//! as [`Subscription`]s and released together on cleanup.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, ResizeObserver, Window};

use super::dom::{DomSurface, listen};
use super::layout::{CanvasConfig, CircleLayout};
use super::subscription::{Subscription, Subscriptions};
use super::types::Circle;
use crate::error::{Error, Result};

type SharedLayout = Rc<RefCell<CircleLayout<DomSurface>>>;

/// Animation frame loop that ticks the layout until it settles.
#[derive(Clone)]
struct FrameLoop {
	window: Window,
	callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
	fn new(window: Window, layout: SharedLayout) -> Self {
		let frames = Self {
			window,
			callback: Rc::new(RefCell::new(None)),
			pending: Rc::new(Cell::new(None)),
		};
		let inner = frames.clone();
		*frames.callback.borrow_mut() = Some(Closure::new(move || {
			inner.pending.set(None);
			if layout.borrow_mut().tick() {
				inner.schedule();
			}
		}));
		frames
	}

	/// Requests a frame unless one is already pending.
	fn wake(&self) {
		if self.pending.get().is_none() {
			self.schedule();
		}
	}

	fn schedule(&self) {
		if let Some(ref cb) = *self.callback.borrow() {
			match self
				.window
				.request_animation_frame(cb.as_ref().unchecked_ref())
			{
				Ok(handle) => self.pending.set(Some(handle)),
				Err(e) => warn!("circle-canvas: requestAnimationFrame failed: {:?}", e),
			}
		}
	}

	/// Cancels the pending frame and drops the callback, so nothing ticks
	/// after the subscription is cancelled.
	fn subscription(&self) -> Subscription {
		let frames = self.clone();
		Subscription::new(move || {
			if let Some(handle) = frames.pending.take() {
				let _ = frames.window.cancel_animation_frame(handle);
			}
			frames.callback.borrow_mut().take();
		})
	}
}

/// Watches the container size. Falls back to the window `resize` event when
/// `ResizeObserver` is missing, and to nothing if that fails as well.
fn observe_resize(
	container: &HtmlElement,
	window: &Window,
	on_resize: Rc<dyn Fn()>,
) -> Option<Subscription> {
	let observer_cb = on_resize.clone();
	let callback = Closure::<dyn FnMut()>::new(move || observer_cb());
	match ResizeObserver::new(callback.as_ref().unchecked_ref()) {
		Ok(observer) => {
			observer.observe(container);
			Some(Subscription::new(move || {
				observer.disconnect();
				drop(callback);
			}))
		}
		Err(_) => {
			warn!("circle-canvas: ResizeObserver unavailable, using window resize");
			listen(window, "resize", move |_| on_resize())
				.inspect_err(|e| warn!("circle-canvas: resize reflow disabled: {}", e))
				.ok()
		}
	}
}

/// A layout mounted into a live container, with its frame loop and
/// observers.
///
/// Usable without Leptos: mount it into an existing element, feed it circle
/// sets, and call [`CircleCanvasHandle::teardown`] when done.
pub struct CircleCanvasHandle {
	layout: SharedLayout,
	frames: FrameLoop,
	subscriptions: Subscriptions,
}

impl CircleCanvasHandle {
	/// Builds the layout inside `container` and starts observing its size.
	pub fn mount(container: HtmlElement, config: CanvasConfig) -> Result<Self> {
		let window = web_sys::window().ok_or(Error::NoWindow)?;
		let surface = DomSurface::new(container.clone(), &config.theme)?;
		let layout = Rc::new(RefCell::new(CircleLayout::new(surface, config)));
		let frames = FrameLoop::new(window.clone(), layout.clone());

		let mut subscriptions = Subscriptions::default();
		subscriptions.push(frames.subscription());

		let (layout_resize, frames_resize) = (layout.clone(), frames.clone());
		let on_resize: Rc<dyn Fn()> = Rc::new(move || {
			layout_resize.borrow_mut().resize();
			frames_resize.wake();
		});
		if let Some(sub) = observe_resize(&container, &window, on_resize) {
			subscriptions.push(sub);
		}

		info!(
			"circle-canvas: mounted ({}x{})",
			container.client_width(),
			container.client_height()
		);
		Ok(Self {
			layout,
			frames,
			subscriptions,
		})
	}

	/// Mounts into the element with the given id.
	pub fn mount_by_id(id: &str, config: CanvasConfig) -> Result<Self> {
		let document = web_sys::window()
			.ok_or(Error::NoWindow)?
			.document()
			.ok_or(Error::NoDocument)?;
		let container = document
			.get_element_by_id(id)
			.and_then(|el| el.dyn_into::<HtmlElement>().ok())
			.ok_or_else(|| Error::MissingContainer(id.to_string()))?;
		Self::mount(container, config)
	}

	/// Replaces the circle set and restarts the frame loop.
	pub fn update(&self, circles: &[Circle]) {
		self.layout.borrow_mut().update_circles(circles);
		self.frames.wake();
	}

	/// Stops the simulation and releases every browser registration.
	pub fn teardown(mut self) {
		self.layout.borrow_mut().teardown();
		self.subscriptions.cancel_all();
		info!("circle-canvas: unmounted");
	}
}

/// Lays out circles inside a container that fills its parent.
///
/// Every change of `circles` is merged into the running layout; circles that
/// stay keep their position. The container is `position: relative` and clips
/// its children, so the parent decides the visible size.
#[component]
pub fn CircleCanvas(
	/// Complete current circle set.
	#[prop(into)] circles: Signal<Vec<Circle>>,
	/// Overrides the default forces, sizes and classes.
	#[prop(optional)] config: Option<CanvasConfig>,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let handle: Rc<RefCell<Option<CircleCanvasHandle>>> = Rc::new(RefCell::new(None));
	let (handle_mount, handle_data) = (handle.clone(), handle.clone());

	Effect::new(move |_| {
		let Some(container) = container_ref.get() else {
			return;
		};
		if handle_mount.borrow().is_some() {
			return;
		}
		let container: HtmlElement = container.into();
		match CircleCanvasHandle::mount(container, config.clone().unwrap_or_default()) {
			Ok(mounted) => {
				mounted.update(&circles.get_untracked());
				*handle_mount.borrow_mut() = Some(mounted);
			}
			Err(e) => error!("circle-canvas: mount failed: {}", e),
		}
	});

	Effect::new(move |_| {
		let circles = circles.get();
		if let Some(ref mounted) = *handle_data.borrow() {
			mounted.update(&circles);
		}
	});

	let handle = SendWrapper::new(handle);
	on_cleanup(move || {
		if let Some(mounted) = handle.borrow_mut().take() {
			mounted.teardown();
		}
	});

	view! {
		<div
			node_ref=container_ref
			class="circle-canvas relative w-full h-full overflow-hidden"
		/>
	}
}
