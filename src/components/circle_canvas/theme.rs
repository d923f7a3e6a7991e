//! Stage-driven styling for circle elements.
//!
//! Classes are Tailwind/DaisyUI utility classes; the host page is expected to
//! ship the matching stylesheet.

/// Known circle stages. Anything unrecognized renders with the primary style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
	/// Finished; success style.
	Complete,
	/// Waiting to start; neutral card style.
	Lobby,
	/// Any other or missing label.
	Other,
}

impl Stage {
	/// Maps a stage label.
	pub fn from_label(label: Option<&str>) -> Self {
		match label {
			Some("complete") => Stage::Complete,
			Some("lobby") => Stage::Lobby,
			_ => Stage::Other,
		}
	}
}

/// Class sets applied to circle elements.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Layout, shape and hover classes shared by every element.
	pub base: String,
	/// Classes for the title region.
	pub title: String,
	/// Classes for the tagline region.
	pub tagline: String,
	/// Classes for [`Stage::Complete`].
	pub complete: String,
	/// Classes for [`Stage::Lobby`].
	pub lobby: String,
	/// Fallback for missing or unrecognized stages.
	pub primary: String,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			base: "absolute top-0 left-0 z-10 flex flex-col items-center justify-center \
			       rounded-full shadow-xl cursor-pointer w-32 h-32 text-center \
			       hover:scale-110 hover:shadow-2xl transition-shadow duration-200"
				.into(),
			title: "font-bold text-xs px-2 leading-tight line-clamp-2".into(),
			tagline: "text-xs opacity-70 px-2 mt-1 leading-tight line-clamp-2".into(),
			complete: "bg-success text-success-content border-2 border-success-content/20".into(),
			lobby: "bg-base-100 text-base-content border-2 border-base-300".into(),
			primary: "bg-primary text-primary-content border-2 border-primary-content/20".into(),
		}
	}
}

impl Theme {
	/// Stage-specific classes, without the base set.
	pub fn stage_classes(&self, stage: Stage) -> &str {
		match stage {
			Stage::Complete => &self.complete,
			Stage::Lobby => &self.lobby,
			Stage::Other => &self.primary,
		}
	}

	/// Full class attribute for an element in the given stage.
	pub fn element_classes(&self, stage: Option<&str>) -> String {
		format!(
			"{} {}",
			self.base,
			self.stage_classes(Stage::from_label(stage))
		)
	}
}
