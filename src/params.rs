//! Parameter resolution: named accessors over a [`ClientIdentity`] turned into request
//! parameters.
//!
//! A [`ParamBinding`] pairs a wire name (`client_id`, `scope`, ...) with a typed accessor.
//! [`resolve`] walks a binding list, drops every parameter whose accessor yields `None`, and
//! encodes the remaining values with the requested [`ValueEncoding`]. [`RequestBindings`]
//! groups the three binding lists a client needs (authorization, token, refresh) and is fixed
//! once the client is constructed.

pub mod encoding;

pub use encoding::*;

// self
use crate::{_prelude::*, provider::ClientIdentity};

/// Typed accessor reading one value from a client identity.
pub type Accessor<I> = for<'a> fn(&'a I) -> Option<&'a str>;

/// Multi-valued request parameters that keep declaration order.
///
/// Order carries no protocol meaning; it is kept so generated URIs and request bodies are
/// deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterSet(Vec<(String, Vec<String>)>);
impl ParameterSet {
	/// Creates an empty parameter set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends `value` to the values of `name`, creating the entry when missing.
	pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
		let name = name.into();
		let value = value.into();

		match self.0.iter_mut().find(|(key, _)| *key == name) {
			Some((_, values)) => values.push(value),
			None => self.0.push((name, vec![value])),
		}
	}

	/// Sets `name` to the single `value`, replacing previous values.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
		let name = name.into();
		let value = value.into();

		match self.0.iter_mut().find(|(key, _)| *key == name) {
			Some((_, values)) => *values = vec![value],
			None => self.0.push((name, vec![value])),
		}
	}

	/// Removes `name` and returns its values.
	pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
		let idx = self.0.iter().position(|(key, _)| key == name)?;

		Some(self.0.remove(idx).1)
	}

	/// Returns every value recorded for `name`.
	pub fn get(&self, name: &str) -> Option<&[String]> {
		self.0.iter().find(|(key, _)| key == name).map(|(_, values)| values.as_slice())
	}

	/// Returns the first value recorded for `name`.
	pub fn first(&self, name: &str) -> Option<&str> {
		self.get(name).and_then(|values| values.first()).map(String::as_str)
	}

	/// Checks whether `name` is present.
	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	/// Number of distinct parameter names.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true when no parameters are present.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates over `(name, value)` pairs, repeating the name for multi-valued entries.
	pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().flat_map(|(name, values)| {
			values.iter().map(move |value| (name.as_str(), value.as_str()))
		})
	}
}

/// Binds a wire parameter name to the identity accessor that supplies its value.
pub struct ParamBinding<I>
where
	I: ?Sized,
{
	name: &'static str,
	accessor: Accessor<I>,
}
impl<I> ParamBinding<I>
where
	I: ?Sized,
{
	/// Creates a binding for an arbitrary accessor.
	pub const fn new(name: &'static str, accessor: Accessor<I>) -> Self {
		Self { name, accessor }
	}

	/// Wire name of the parameter.
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Reads the parameter value from `identity`.
	pub fn read<'a>(&self, identity: &'a I) -> Option<&'a str> {
		(self.accessor)(identity)
	}
}
impl<I> ParamBinding<I>
where
	I: ?Sized + ClientIdentity,
{
	/// `response_type` binding.
	pub fn response_type() -> Self {
		Self::new("response_type", |identity| Some(identity.response_type()))
	}

	/// `client_id` binding.
	pub fn client_id() -> Self {
		Self::new("client_id", |identity| Some(identity.client_id()))
	}

	/// `client_secret` binding (omitted for public clients).
	pub fn client_secret() -> Self {
		Self::new("client_secret", |identity| identity.client_secret())
	}

	/// `redirect_uri` binding.
	pub fn redirect_uri() -> Self {
		Self::new("redirect_uri", |identity| Some(identity.redirect_uri()))
	}

	/// `scope` binding (omitted when unset).
	pub fn scope() -> Self {
		Self::new("scope", |identity| identity.scope())
	}

	/// `state` binding (omitted when unset).
	pub fn state() -> Self {
		Self::new("state", |identity| identity.state())
	}
}
impl<I> Clone for ParamBinding<I>
where
	I: ?Sized,
{
	fn clone(&self) -> Self {
		*self
	}
}
impl<I> Copy for ParamBinding<I> where I: ?Sized {}
impl<I> Debug for ParamBinding<I>
where
	I: ?Sized,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ParamBinding").field(&self.name).finish()
	}
}

/// Binding lists for the three request shapes a client builds.
pub struct RequestBindings<I>
where
	I: ?Sized,
{
	/// Parameters appended to the authorization URI.
	pub authorization: Vec<ParamBinding<I>>,
	/// Parameters sent with `grant_type=authorization_code`.
	pub token: Vec<ParamBinding<I>>,
	/// Parameters sent with `grant_type=refresh_token`.
	pub refresh: Vec<ParamBinding<I>>,
}
impl<I> RequestBindings<I>
where
	I: ?Sized + ClientIdentity,
{
	/// RFC 6749 bindings: `response_type client_id redirect_uri scope state` for authorization,
	/// `redirect_uri client_id client_secret` for code exchanges, and `client_id client_secret`
	/// for refreshes.
	pub fn standard() -> Self {
		Self {
			authorization: vec![
				ParamBinding::response_type(),
				ParamBinding::client_id(),
				ParamBinding::redirect_uri(),
				ParamBinding::scope(),
				ParamBinding::state(),
			],
			token: vec![
				ParamBinding::redirect_uri(),
				ParamBinding::client_id(),
				ParamBinding::client_secret(),
			],
			refresh: vec![ParamBinding::client_id(), ParamBinding::client_secret()],
		}
	}
}
impl<I> Clone for RequestBindings<I>
where
	I: ?Sized,
{
	fn clone(&self) -> Self {
		Self {
			authorization: self.authorization.clone(),
			token: self.token.clone(),
			refresh: self.refresh.clone(),
		}
	}
}
impl<I> Debug for RequestBindings<I>
where
	I: ?Sized,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestBindings")
			.field("authorization", &self.authorization)
			.field("token", &self.token)
			.field("refresh", &self.refresh)
			.finish()
	}
}
impl<I> Default for RequestBindings<I>
where
	I: ?Sized + ClientIdentity,
{
	fn default() -> Self {
		Self::standard()
	}
}

/// Resolves `bindings` against `identity` into a fresh [`ParameterSet`].
///
/// Bindings whose accessor yields `None` are omitted entirely. Present values are encoded with
/// `encoding` and recorded once each, in binding order.
pub fn resolve<I>(
	identity: &I,
	bindings: &[ParamBinding<I>],
	encoding: ValueEncoding,
) -> ParameterSet
where
	I: ?Sized,
{
	let mut params = ParameterSet::new();

	for binding in bindings {
		if let Some(value) = binding.read(identity) {
			params.append(binding.name(), encoding.apply(value));
		}
	}

	params
}
