//! Flat token payloads parsed from token endpoint responses.

// crates.io
use serde::de::{self, Deserializer, MapAccess, Visitor};
// self
use crate::_prelude::*;

const REDACTED_KEYS: [&str; 3] = ["access_token", "refresh_token", "id_token"];

/// Failure raised while turning a token endpoint body into a [`TokenPayload`].
#[derive(Debug, ThisError)]
pub enum PayloadParseError {
	/// Body is not a JSON object of scalar values; the path points at the offending member.
	#[error("Token payload is invalid at `{}`.", .0.path())]
	Shape(#[source] serde_path_to_error::Error<serde_json::Error>),
	/// Body holds a valid object followed by trailing data.
	#[error("Token payload has trailing data.")]
	TrailingData(#[source] serde_json::Error),
}

/// Flat key/value view of a successful token response.
///
/// Every value is kept as a string: JSON strings are stored verbatim, booleans as `true`/`false`,
/// and integers within `i64`/`u64` as their decimal text. Other numbers are read as `f64` and
/// rendered in shortest round-trip form (`3600.0` becomes `3600`, `1e3` becomes `1000`), so
/// integers beyond `u64` lose precision. Nulls, arrays, and nested objects are rejected, so a
/// payload either mirrors the whole response or does not exist at all.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TokenPayload(BTreeMap<String, String>);
impl TokenPayload {
	/// Parses a response body into a payload.
	pub fn parse(body: &[u8]) -> Result<Self, PayloadParseError> {
		let mut de = serde_json::Deserializer::from_slice(body);
		let payload = serde_path_to_error::deserialize(&mut de).map_err(PayloadParseError::Shape)?;

		de.end().map_err(PayloadParseError::TrailingData)?;

		Ok(payload)
	}

	/// Returns the raw value stored under `key`.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.get(key).map(String::as_str)
	}

	/// `access_token` member. Callers must avoid logging this value.
	pub fn access_token(&self) -> Option<&str> {
		self.get("access_token")
	}

	/// `token_type` member.
	pub fn token_type(&self) -> Option<&str> {
		self.get("token_type")
	}

	/// `refresh_token` member. Callers must avoid logging this value.
	pub fn refresh_token(&self) -> Option<&str> {
		self.get("refresh_token")
	}

	/// `scope` member.
	pub fn scope(&self) -> Option<&str> {
		self.get("scope")
	}

	/// `expires_in` member interpreted as whole seconds.
	///
	/// Returns `None` when the member is missing or not an integer.
	pub fn expires_in(&self) -> Option<Duration> {
		self.get("expires_in")?.trim().parse::<i64>().ok().map(Duration::seconds)
	}

	/// Iterates over all members in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
	}

	/// Number of members.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true when the payload has no members.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Borrows the underlying map.
	pub fn as_map(&self) -> &BTreeMap<String, String> {
		&self.0
	}

	/// Consumes the payload, returning the underlying map.
	pub fn into_map(self) -> BTreeMap<String, String> {
		self.0
	}
}
impl From<BTreeMap<String, String>> for TokenPayload {
	fn from(map: BTreeMap<String, String>) -> Self {
		Self(map)
	}
}
impl<'de> Deserialize<'de> for TokenPayload {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_map(PayloadVisitor)
	}
}
impl Debug for TokenPayload {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let mut map = f.debug_map();

		for (key, value) in &self.0 {
			if REDACTED_KEYS.contains(&key.as_str()) {
				map.entry(key, &"<redacted>");
			} else {
				map.entry(key, value);
			}
		}

		map.finish()
	}
}

struct PayloadVisitor;
impl<'de> Visitor<'de> for PayloadVisitor {
	type Value = TokenPayload;

	fn expecting(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("a JSON object of scalar values")
	}

	fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
	where
		A: MapAccess<'de>,
	{
		let mut map = BTreeMap::new();

		while let Some((key, FlatValue(value))) = access.next_entry::<String, FlatValue>()? {
			map.insert(key, value);
		}

		Ok(TokenPayload(map))
	}
}

struct FlatValue(String);
impl<'de> Deserialize<'de> for FlatValue {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_any(FlatValueVisitor)
	}
}

struct FlatValueVisitor;
impl<'de> Visitor<'de> for FlatValueVisitor {
	type Value = FlatValue;

	fn expecting(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("a string, number, or boolean")
	}

	fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
	where
		E: de::Error,
	{
		Ok(FlatValue(value.to_owned()))
	}

	fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
	where
		E: de::Error,
	{
		Ok(FlatValue(value))
	}

	fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
	where
		E: de::Error,
	{
		Ok(FlatValue(value.to_string()))
	}

	fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
	where
		E: de::Error,
	{
		Ok(FlatValue(value.to_string()))
	}

	fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
	where
		E: de::Error,
	{
		Ok(FlatValue(value.to_string()))
	}

	fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
	where
		E: de::Error,
	{
		Ok(FlatValue(value.to_string()))
	}
}
