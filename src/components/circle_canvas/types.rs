//! Circle records supplied to the layout component.

use serde::{Deserialize, Deserializer};

/// Size used when a circle does not carry a usable one.
pub const DEFAULT_CIRCLE_SIZE: f64 = 48.0;

/// One circle as pushed by the data source.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Circle {
	/// Unique, stable identifier. Also used to build the link target.
	pub id: String,
	/// Main label shown inside the circle. `null` reads as empty.
	#[serde(default, deserialize_with = "deserialize_null_default")]
	pub title: String,
	/// Optional second line. An empty string counts as absent.
	#[serde(default)]
	pub tagline: Option<String>,
	/// Status label driving the visual style (e.g. "lobby", "complete").
	#[serde(default)]
	pub stage: Option<String>,
	/// Collision size. Falls back to [`DEFAULT_CIRCLE_SIZE`].
	#[serde(default)]
	pub size: Option<f64>,
}

fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	T: Default + Deserialize<'de>,
	D: Deserializer<'de>,
{
	let opt = Option::deserialize(deserializer)?;
	Ok(opt.unwrap_or_default())
}

impl Circle {
	/// Circle with only an id; every other field takes its default.
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			..Default::default()
		}
	}

	/// Sets the title.
	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = title.into();
		self
	}

	/// Sets the tagline.
	pub fn with_tagline(mut self, tagline: impl Into<String>) -> Self {
		self.tagline = Some(tagline.into());
		self
	}

	/// Sets the stage label.
	pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
		self.stage = Some(stage.into());
		self
	}

	/// Sets the collision size.
	pub fn with_size(mut self, size: f64) -> Self {
		self.size = Some(size);
		self
	}

	/// Size with zero, negative and NaN values replaced by the default.
	pub fn effective_size(&self) -> f64 {
		self.size
			.filter(|s| *s > 0.0)
			.unwrap_or(DEFAULT_CIRCLE_SIZE)
	}

	/// Tagline, if it has any text.
	pub fn tagline(&self) -> Option<&str> {
		self.tagline.as_deref().filter(|t| !t.is_empty())
	}
}

/// Payload of the `circles_updated` event: the complete current circle set.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CirclesUpdated {
	/// Every circle currently shown; ids missing here are removed.
	pub circles: Vec<Circle>,
}
