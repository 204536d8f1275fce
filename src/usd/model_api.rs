use crate::{
	sdf::FIELD_KEYS,
	tf, usd, vt,
};

/// API for model-hierarchy metadata on a prim.
pub struct ModelApi<'a> {
	pub prim: &'a usd::Prim<'a>,
}

impl<'a> ModelApi<'a> {
	pub fn new(prim: &'a usd::Prim<'a>) -> Self {
		Self { prim }
	}

	/// Author the prim's kind metadata, e.g. `component`.
	pub fn set_kind(&self, kind: &tf::Token) -> crate::Result<()> {
		self.prim
			.set_metadata(&FIELD_KEYS.kind, vt::Value::new(kind.clone()))
	}

	/// Return the prim's composed kind metadata.
	pub fn kind(&self) -> Option<tf::Token> {
		self.prim.metadata(&FIELD_KEYS.kind)
	}
}
