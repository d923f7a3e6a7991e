//! DOM-backed [`Surface`].
//!
//! Circles are absolutely positioned `<a>` elements appended to the
//! container and moved with CSS transforms.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{Document, Event, EventTarget, HtmlElement};

use super::render::Surface;
use super::subscription::Subscription;
use super::theme::Theme;
use crate::error::{Error, Result};

/// Handles to the parts of one rendered circle.
pub struct CircleElement {
	link: HtmlElement,
	title: HtmlElement,
	tagline: HtmlElement,
}

/// Renders circles as children of a container element.
pub struct DomSurface {
	document: Document,
	container: HtmlElement,
	title_class: String,
	tagline_class: String,
}

impl DomSurface {
	/// Surface writing circle elements into `container`.
	pub fn new(container: HtmlElement, theme: &Theme) -> Result<Self> {
		let document = container.owner_document().ok_or(Error::NoDocument)?;
		Ok(Self {
			document,
			container,
			title_class: theme.title.clone(),
			tagline_class: theme.tagline.clone(),
		})
	}

	fn html_element(&self, tag: &str) -> Result<HtmlElement> {
		self.document
			.create_element(tag)?
			.dyn_into::<HtmlElement>()
			.map_err(|_| Error::Dom(format!("<{tag}> is not an HtmlElement")))
	}
}

impl Surface for DomSurface {
	type Element = CircleElement;

	fn viewport(&self) -> (f64, f64) {
		(
			self.container.client_width() as f64,
			self.container.client_height() as f64,
		)
	}

	fn create_element(&mut self, href: &str, class: &str) -> Result<CircleElement> {
		let link = self.html_element("a")?;
		link.set_attribute("href", href)?;
		link.set_class_name(class);

		let title = self.html_element("span")?;
		title.set_class_name(&self.title_class);
		let tagline = self.html_element("span")?;
		tagline.set_class_name(&self.tagline_class);

		link.append_child(&title)?;
		link.append_child(&tagline)?;
		self.container.append_child(&link)?;

		Ok(CircleElement {
			link,
			title,
			tagline,
		})
	}

	fn set_title(&mut self, element: &CircleElement, text: &str) {
		element.title.set_text_content(Some(text));
	}

	fn set_tagline(&mut self, element: &CircleElement, text: Option<&str>) {
		let style = element.tagline.style();
		match text {
			Some(text) => {
				element.tagline.set_text_content(Some(text));
				let _ = style.remove_property("display");
			}
			None => {
				let _ = style.set_property("display", "none");
			}
		}
	}

	fn set_class(&mut self, element: &CircleElement, class: &str) {
		element.link.set_class_name(class);
	}

	fn set_position(&mut self, element: &CircleElement, left: f64, top: f64) {
		let _ = element
			.link
			.style()
			.set_property("transform", &format!("translate({left}px, {top}px)"));
	}

	fn remove_element(&mut self, element: CircleElement) {
		element.link.remove();
	}
}

/// Adds an event listener and returns the subscription that removes it.
pub fn listen(
	target: &EventTarget,
	event: &'static str,
	handler: impl FnMut(Event) + 'static,
) -> Result<Subscription> {
	let callback = Closure::<dyn FnMut(Event)>::new(handler);
	target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
	let target = target.clone();
	Ok(Subscription::new(move || {
		let _ = target.remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
	}))
}
