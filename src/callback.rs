//! Ordered token callbacks notified after successful exchanges.
//!
//! Callbacks are registered as shared handles ([`CallbackHandle`]) and compared by identity:
//! registering the same handle twice yields two notifications, and removal drops the first
//! registration of that exact handle. The registry is a plain collection; mutation needs
//! `&mut` access, so sharing it across threads requires external synchronization.

// self
use crate::{
	_prelude::*,
	error::{BoxError, CallbackError, CallbackFailure},
	token::TokenPayload,
};

/// Result returned by a callback.
pub type CallbackResult = std::result::Result<(), BoxError>;

/// Shared, identity-compared callback handle.
pub type CallbackHandle = Arc<dyn TokenCallback>;

/// Observer notified with the payload of every successful token exchange.
pub trait TokenCallback: Send + Sync {
	/// Receives the payload issued by the token endpoint.
	fn receive(&self, payload: &TokenPayload) -> CallbackResult;
}
impl<F> TokenCallback for F
where
	F: Send + Sync + Fn(&TokenPayload) -> CallbackResult,
{
	fn receive(&self, payload: &TokenPayload) -> CallbackResult {
		self(payload)
	}
}

/// Ordered collection of callback handles.
#[derive(Clone, Default)]
pub struct CallbackRegistry {
	callbacks: Vec<CallbackHandle>,
}
impl CallbackRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends `callback`; duplicates are kept.
	pub fn add(&mut self, callback: CallbackHandle) {
		self.callbacks.push(callback);
	}

	/// Wraps `callback` in a handle, appends it, and returns the handle for later removal.
	pub fn register(&mut self, callback: impl 'static + TokenCallback) -> CallbackHandle {
		let handle: CallbackHandle = Arc::new(callback);

		self.callbacks.push(handle.clone());

		handle
	}

	/// Removes the first registration of `callback`, returning whether one was found.
	pub fn remove(&mut self, callback: &CallbackHandle) -> bool {
		match self.callbacks.iter().position(|registered| Arc::ptr_eq(registered, callback)) {
			Some(idx) => {
				self.callbacks.remove(idx);

				true
			},
			None => false,
		}
	}

	/// Checks whether `callback` is registered at least once.
	pub fn contains(&self, callback: &CallbackHandle) -> bool {
		self.callbacks.iter().any(|registered| Arc::ptr_eq(registered, callback))
	}

	/// Number of registrations.
	pub fn len(&self) -> usize {
		self.callbacks.len()
	}

	/// Returns true when nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.callbacks.is_empty()
	}

	/// Drops every registration.
	pub fn clear(&mut self) {
		self.callbacks.clear();
	}

	/// Notifies every callback in registration order with the same `payload`.
	///
	/// A failing callback does not stop the remaining ones. Failures are collected and returned
	/// together once every callback has run.
	pub fn notify_all(&self, payload: &TokenPayload) -> Result<(), CallbackError> {
		let failures = self
			.callbacks
			.iter()
			.enumerate()
			.filter_map(|(index, callback)| {
				callback.receive(payload).err().map(|source| CallbackFailure { index, source })
			})
			.collect::<Vec<_>>();

		if failures.is_empty() {
			Ok(())
		} else {
			Err(CallbackError {
				payload: payload.clone(),
				notified: self.callbacks.len(),
				failures,
			})
		}
	}
}
impl Debug for CallbackRegistry {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CallbackRegistry").field("len", &self.callbacks.len()).finish()
	}
}
