use crate::{
	sdf::{self, CHILDREN_KEYS, FIELD_KEYS},
	tf, usd, vt, Error,
};

/// Accessor for the variant sets on a prim.
pub struct VariantSets<'a> {
	stage: &'a usd::Stage,
	prim_path: sdf::Path,
}

impl<'a> VariantSets<'a> {
	pub(crate) fn new(stage: &'a usd::Stage, prim_path: sdf::Path) -> Self {
		Self { stage, prim_path }
	}

	/// Create the named variant set on the prim (or return the existing
	/// one) and record it in the prim's variantSets metadata.
	pub fn add_variant_set(&self, name: &str) -> crate::Result<VariantSet<'a>> {
		let target = self.stage.edit_target();
		let spec_path = target.map_to_spec_path(&self.prim_path);
		self.stage
			.ensure_prim_spec(target.layer(), &spec_path, sdf::Specifier::Over)?;

		let mut op = target
			.layer()
			.get(&spec_path, &FIELD_KEYS.variant_set_names)
			.and_then(|v| v.get::<sdf::TokenListOp>())
			.unwrap_or_default();
		op.prepend(tf::Token::new(name));
		target.layer().set(
			&spec_path,
			&FIELD_KEYS.variant_set_names,
			vt::Value::new(op),
		);

		let set_path = spec_path.append_variant_selection(name, "");
		target.layer().create_spec(&set_path, sdf::SpecType::VariantSet);

		Ok(VariantSet {
			stage: self.stage,
			prim_path: self.prim_path.clone(),
			name: name.to_string(),
		})
	}

	/// Return the named variant set without creating anything.
	pub fn variant_set(&self, name: &str) -> VariantSet<'a> {
		VariantSet {
			stage: self.stage,
			prim_path: self.prim_path.clone(),
			name: name.to_string(),
		}
	}
}

/// A named selector on a prim holding alternate opinion bundles with a
/// single active selection.
pub struct VariantSet<'a> {
	stage: &'a usd::Stage,
	prim_path: sdf::Path,
	name: String,
}

impl<'a> VariantSet<'a> {
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Create a new variant in this set.
	pub fn add_variant(&self, variant: &str) -> crate::Result<()> {
		let target = self.stage.edit_target();
		let spec_path = target.map_to_spec_path(&self.prim_path);
		let set_path = spec_path.append_variant_selection(&self.name, "");
		let variant_path = spec_path.append_variant_selection(&self.name, variant);

		target
			.layer()
			.create_spec(&variant_path, sdf::SpecType::Variant);
		target.layer().append_to_token_array(
			&set_path,
			&CHILDREN_KEYS.variant_children,
			&tf::Token::new(variant),
		);
		Ok(())
	}

	/// Return the variants that have been added to this set.
	pub fn variant_names(&self) -> Vec<String> {
		let target = self.stage.edit_target();
		let spec_path = target.map_to_spec_path(&self.prim_path);
		let set_path = spec_path.append_variant_selection(&self.name, "");
		target
			.layer()
			.get(&set_path, &CHILDREN_KEYS.variant_children)
			.and_then(|v| v.get::<vt::Array<tf::Token>>())
			.map(|names| names.iter().map(|t| t.as_str().to_string()).collect())
			.unwrap_or_default()
	}

	/// Select one of the added variants. Selecting a name that was never
	/// added is an error.
	pub fn set_variant_selection(&self, variant: &str) -> crate::Result<()> {
		if !self.variant_names().iter().any(|name| name == variant) {
			return Err(Error::UnknownVariant {
				set: self.name.clone(),
				variant: variant.to_string(),
			});
		}

		let target = self.stage.edit_target();
		let spec_path = target.map_to_spec_path(&self.prim_path);
		let mut selections = target
			.layer()
			.get(&spec_path, &FIELD_KEYS.variant_selection)
			.and_then(|v| v.get::<vt::Dictionary>())
			.unwrap_or_default();
		selections.insert(
			self.name.clone(),
			vt::Value::new(variant.to_string()),
		);
		target.layer().set(
			&spec_path,
			&FIELD_KEYS.variant_selection,
			vt::Value::new(selections),
		);
		Ok(())
	}

	/// Return the composed selection for this set.
	pub fn variant_selection(&self) -> Option<String> {
		self.stage
			.prim_index(&self.prim_path)?
			.variant_selections()
			.remove(&self.name)
	}

	/// Return an edit target capturing edits inside the currently
	/// selected variant.
	pub fn variant_edit_target(&self) -> crate::Result<usd::EditTarget> {
		let selection = self
			.variant_selection()
			.ok_or_else(|| Error::NoVariantSelection(self.name.clone()))?;
		let target = self.stage.edit_target();
		let spec_path = target.map_to_spec_path(&self.prim_path);
		Ok(usd::EditTarget::for_variant(
			target.layer().clone(),
			&spec_path,
			&self.name,
			&selection,
		))
	}

	/// Enter a scoped edit context for the selected variant.
	pub fn variant_edit_context(&self) -> crate::Result<usd::EditContext<'a>> {
		Ok(usd::EditContext::new(
			self.stage,
			self.variant_edit_target()?,
		))
	}
}
