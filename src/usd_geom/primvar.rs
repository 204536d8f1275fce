use crate::{
	declare_public_tokens,
	sdf::FIELD_KEYS,
	tf, usd,
	vt::{self, ValueType},
};

declare_public_tokens!(Tokens, TOKENS, [
	constant: "constant",
	uniform: "uniform",
	vertex: "vertex",
	varying: "varying",
	face_varying: "faceVarying",

	primvars_prefix: "primvars:"
]);

/// Schema wrapper for [`usd::Attribute`] for authoring and introspecting
/// attributes that are primvars.
pub struct Primvar<'a> {
	pub attr: usd::Attribute<'a>,
}

impl<'a> Primvar<'a> {
	pub fn new(attr: usd::Attribute<'a>) -> Self {
		Self { attr }
	}

	/// Author the primvar's value.
	pub fn set<T: ValueType>(&self, value: T) -> crate::Result<()> {
		self.attr.set(value)
	}

	/// Return the Primvar's interpolation, which is `constant` if unauthored.
	pub fn interpolation(&self) -> tf::Token {
		self.attr
			.metadata(&FIELD_KEYS.interpolation)
			.unwrap_or_else(|| TOKENS.constant.clone())
	}

	/// Author the Primvar's interpolation.
	pub fn set_interpolation(&self, interpolation: &tf::Token) -> crate::Result<()> {
		self.attr.stage().author_attribute_value(
			self.attr.path(),
			&FIELD_KEYS.interpolation,
			vt::Value::new(interpolation.clone()),
		)
	}

	/// Validate that the provided `interpolation` is a valid setting.
	pub fn is_valid_interpolation(interpolation: &tf::Token) -> bool {
		interpolation == &TOKENS.constant
			|| interpolation == &TOKENS.uniform
			|| interpolation == &TOKENS.vertex
			|| interpolation == &TOKENS.varying
			|| interpolation == &TOKENS.face_varying
	}
}

impl<'a> From<Primvar<'a>> for usd::Attribute<'a> {
	fn from(primvar: Primvar<'a>) -> Self {
		primvar.attr
	}
}
