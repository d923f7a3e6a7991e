//! Force-directed circle layout component.
//!
//! Renders a set of labeled circles as link elements inside a container,
//! positioned by a force simulation so that they:
//! - never overlap (collision radius derived from each circle's size)
//! - stay inside the container, even while it is resized
//! - keep their position and momentum across data updates
//! - start from a reproducible ring layout ordered by id
//!
//! # Example
//!
//! ```ignore
//! use circle_canvas::{Circle, CircleCanvas};
//!
//! let circles = RwSignal::new(vec![
//!     Circle::new("a").with_title("Alpha").with_stage("lobby"),
//!     Circle::new("b").with_title("Beta").with_stage("complete"),
//! ]);
//!
//! view! { <CircleCanvas circles=circles /> }
//! ```

mod bounds;
mod component;
mod dom;
mod layout;
mod render;
pub mod scale;
mod simulation;
mod state;
mod subscription;
pub mod theme;
mod types;

pub use bounds::Bounds;
pub use component::{CircleCanvas, CircleCanvasHandle};
pub use dom::listen;
pub use layout::{CanvasConfig, CircleLayout};
pub use render::{Renderer, Surface};
pub use simulation::{SimNode, Simulation, SimulationConfig};
pub use state::{ANCHOR_ID, CircleState, INITIAL_RING_RADIUS, RESIZE_ALPHA, UPDATE_ALPHA};
pub use subscription::{Subscription, Subscriptions};
pub use theme::Theme;
pub use types::{Circle, CirclesUpdated, DEFAULT_CIRCLE_SIZE};
