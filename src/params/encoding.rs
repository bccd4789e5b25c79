//! Value encodings applied by the parameter resolver.

// crates.io
use url::form_urlencoded;
// self
use crate::_prelude::*;

/// How resolved parameter values are encoded before they leave the resolver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueEncoding {
	/// Values pass through untouched; the transport encodes them later.
	#[default]
	Unencoded,
	/// `application/x-www-form-urlencoded` encoding (spaces become `+`).
	Form,
	/// Form encoding adjusted to RFC 3986: spaces become `%20` and `!'()~` stay literal.
	Rfc3986,
}
impl ValueEncoding {
	/// Encodes a single value according to the selected mode.
	pub fn apply(self, value: &str) -> Cow<'_, str> {
		match self {
			ValueEncoding::Unencoded => Cow::Borrowed(value),
			ValueEncoding::Form =>
				Cow::Owned(form_urlencoded::byte_serialize(value.as_bytes()).collect()),
			ValueEncoding::Rfc3986 => Cow::Owned(encode_rfc3986(value)),
		}
	}
}

/// Percent-encodes `value` for use inside an authorization URI.
///
/// Form encoding over-escapes the unreserved characters `!'()~` and renders spaces as `+`,
/// which user agents expecting RFC 3986 may misread. The form-encoded output is therefore
/// post-processed: `+` turns into `%20` and `%21 %27 %28 %29 %7E` turn back into their literal
/// characters. A literal `+` in the input is already `%2B` at that point and is unaffected.
pub fn encode_rfc3986(value: &str) -> String {
	let mut buf = String::with_capacity(value.len());

	for chunk in form_urlencoded::byte_serialize(value.as_bytes()) {
		let replaced = match chunk {
			"+" => "%20",
			"%21" => "!",
			"%27" => "'",
			"%28" => "(",
			"%29" => ")",
			"%7E" => "~",
			other => other,
		};

		buf.push_str(replaced);
	}

	buf
}
