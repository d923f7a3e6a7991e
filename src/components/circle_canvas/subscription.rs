//! Cancelable registrations.
//!
//! Every callback the component hands to the browser (animation frames,
//! resize observer, event listeners) is paired with a [`Subscription`] that
//! undoes the registration. Dropping a subscription cancels it too.

/// Undo action for one registration. Runs at most once.
#[must_use = "dropping a Subscription cancels it"]
pub struct Subscription {
	cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
	/// Wraps the teardown for one registration.
	pub fn new(cancel: impl FnOnce() + 'static) -> Self {
		Self {
			cancel: Some(Box::new(cancel)),
		}
	}

	/// Runs the teardown now.
	pub fn cancel(mut self) {
		self.run();
	}

	fn run(&mut self) {
		if let Some(cancel) = self.cancel.take() {
			cancel();
		}
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		self.run();
	}
}

/// A set of subscriptions cancelled together.
#[derive(Default)]
pub struct Subscriptions {
	items: Vec<Subscription>,
}

impl Subscriptions {
	/// Adds a handle; it is cancelled before earlier ones.
	pub fn push(&mut self, subscription: Subscription) {
		self.items.push(subscription);
	}

	/// Number of live handles.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// True when nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Cancels everything, most recent registration first.
	pub fn cancel_all(&mut self) {
		while let Some(subscription) = self.items.pop() {
			subscription.cancel();
		}
	}
}

impl Drop for Subscriptions {
	fn drop(&mut self) {
		self.cancel_all();
	}
}
