use crate::{
	sdf::{self, FIELD_KEYS},
	usd, vt,
};

/// Wrapper for editing the reference arcs on a prim.
pub struct References<'a> {
	stage: &'a usd::Stage,
	prim_path: sdf::Path,
}

impl<'a> References<'a> {
	pub(crate) fn new(stage: &'a usd::Stage, prim_path: sdf::Path) -> Self {
		Self { stage, prim_path }
	}

	/// Add `reference` at the back of the prepend list.
	///
	/// Accepts anything convertible to [`sdf::Reference`]; a bare asset
	/// path string references the target layer's default prim.
	pub fn add_reference(&self, reference: impl Into<sdf::Reference>) -> crate::Result<()> {
		let reference = reference.into();
		let target = self.stage.edit_target();
		let spec_path = target.map_to_spec_path(&self.prim_path);
		self.stage
			.ensure_prim_spec(target.layer(), &spec_path, sdf::Specifier::Over)?;

		let mut op = target
			.layer()
			.get(&spec_path, &FIELD_KEYS.references)
			.and_then(|v| v.get::<sdf::ReferenceListOp>())
			.unwrap_or_default();
		op.prepend(reference);
		target
			.layer()
			.set(&spec_path, &FIELD_KEYS.references, vt::Value::new(op));
		Ok(())
	}
}
