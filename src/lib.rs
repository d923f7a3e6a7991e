//! circle-canvas: force-directed circle layout for the browser.
//!
//! This crate provides a WASM component that lays out labeled circles with a
//! physics simulation and renders them as positioned link elements, reflowing
//! smoothly when the circle set or the container size changes.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, Event, HtmlScriptElement, Window};

pub mod components;
pub mod error;

pub use components::circle_canvas::{
	CanvasConfig, Circle, CircleCanvas, CircleCanvasHandle, CircleLayout, CirclesUpdated, Surface,
};
pub use error::{Error, Result};

/// Name of the window event carrying a new circle set in its `detail`.
pub const CIRCLES_UPDATED_EVENT: &str = "circles_updated";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("circle-canvas: logging initialized");
}

/// Parse a `{ "circles": [...] }` document.
pub fn parse_circles(json: &str) -> Result<Vec<Circle>> {
	Ok(serde_json::from_str::<CirclesUpdated>(json)?.circles)
}

/// Load the initial circle set from a script element with id="circle-data".
fn load_circles() -> Option<Vec<Circle>> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("circle-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match parse_circles(&json_text) {
		Ok(circles) => {
			info!("circle-canvas: loaded {} circles", circles.len());
			Some(circles)
		}
		Err(e) => {
			warn!("circle-canvas: failed to parse circle data: {}", e);
			None
		}
	}
}

/// Extract the circle set from a `circles_updated` event.
fn circles_from_event(event: &Event) -> Result<Vec<Circle>> {
	let detail = event
		.dyn_ref::<CustomEvent>()
		.map(CustomEvent::detail)
		.ok_or_else(|| Error::Dom(format!("{CIRCLES_UPDATED_EVENT} is not a CustomEvent")))?;
	let json: String = js_sys::JSON::stringify(&detail)?.into();
	parse_circles(&json)
}

/// Main application component.
/// Loads circles from the DOM, then follows `circles_updated` window events.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let circles = RwSignal::new(load_circles().unwrap_or_default());

	if let Some(window) = web_sys::window() {
		match components::circle_canvas::listen(&window, CIRCLES_UPDATED_EVENT, move |event| {
			match circles_from_event(&event) {
				Ok(next) => circles.set(next),
				Err(e) => warn!("circle-canvas: ignoring {}: {}", CIRCLES_UPDATED_EVENT, e),
			}
		}) {
			Ok(subscription) => {
				let subscription = SendWrapper::new(subscription);
				on_cleanup(move || subscription.take().cancel());
			}
			Err(e) => warn!("circle-canvas: cannot listen for updates: {}", e),
		}
	}

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text="Circles" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fixed inset-0">
			<CircleCanvas circles=circles />
		</div>
	}
}
