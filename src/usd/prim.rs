use super::{Attribute, Object, Property, Relationship};
use crate::{
	sdf::{self, FIELD_KEYS},
	tf, usd, vt,
};

/// [`usd::Prim`] is the sole persistent scenegraph object on a [`usd::Stage`].
#[repr(transparent)]
#[derive(Clone)]
pub struct Prim<'a>(Object<'a>);

impl<'a> Prim<'a> {
	pub(crate) fn new(stage: &'a usd::Stage, path: sdf::Path) -> Self {
		Prim(Object::new(stage, path))
	}

	/// Whether any composed spec contributes to this prim.
	pub fn is_valid(&self) -> bool {
		self.path().is_absolute_root() || self.stage().prim_index(self.path()).is_some()
	}

	pub fn is_pseudo_root(&self) -> bool {
		self.path().is_absolute_root()
	}

	pub fn specifier(&self) -> Option<sdf::Specifier> {
		self.metadata(&FIELD_KEYS.specifier)
	}

	pub fn type_name(&self) -> tf::Token {
		self.metadata(&FIELD_KEYS.type_name).unwrap_or_default()
	}

	/// Whether the composed type name matches `type_name`.
	pub fn is_a(&self, type_name: &tf::Token) -> bool {
		&self.type_name() == type_name
	}

	/// Whether this prim is active; unauthored means active.
	pub fn is_active(&self) -> bool {
		self.metadata(&FIELD_KEYS.active).unwrap_or(true)
	}

	/// Author the active flag into the current edit target.
	pub fn set_active(&self, active: bool) -> crate::Result<()> {
		self.set_metadata(&FIELD_KEYS.active, vt::Value::new(active))
	}

	/// Whether any composed site defines this prim (rather than just
	/// carrying overs).
	pub fn is_defined(&self) -> bool {
		self.stage().prim_is_defined(self.path())
	}

	pub fn children(&self) -> ChildrenIter<'a> {
		ChildrenIter::new(self.stage(), self.path())
	}

	pub fn properties(&self) -> PropertyIter<'a> {
		PropertyIter::new(self.stage(), self.path())
	}

	/// Return the names of all composed properties, sorted.
	pub fn property_names(&self) -> vt::Array<tf::Token> {
		self.stage().compose_properties(self.path())
	}

	/// Return a [`usd::Property`] with the given `name`.
	pub fn property(&self, name: &tf::Token) -> Property<'a> {
		Property::new(self.stage(), self.path().append_property(name))
	}

	/// Return the references wrapper for editing this prim's reference arcs.
	pub fn references(&self) -> usd::References<'a> {
		usd::References::new(self.stage(), self.path().clone())
	}

	/// Return the variant sets wrapper for this prim.
	pub fn variant_sets(&self) -> usd::VariantSets<'a> {
		usd::VariantSets::new(self.stage(), self.path().clone())
	}

	/// Record an applied API schema in this prim's metadata.
	pub fn apply_api_schema(&self, schema: &tf::Token) -> crate::Result<()> {
		let mut op = self
			.metadata::<sdf::TokenListOp>(&FIELD_KEYS.api_schemas)
			.unwrap_or_default();
		op.prepend(schema.clone());
		self.set_metadata(&FIELD_KEYS.api_schemas, vt::Value::new(op))
	}
}

/// Variants
impl<'a> Prim<'a> {
	/// Return the variant selections that apply to this prim.
	pub fn variant_selections(&self) -> std::collections::HashMap<String, String> {
		if let Some(index) = self.stage().prim_index(self.path()) {
			index.variant_selections()
		} else {
			std::collections::HashMap::new()
		}
	}
}

/// Attributes
impl<'a> Prim<'a> {
	/// Return a [`usd::Attribute`] with the given `name`.
	pub fn attribute(&self, name: &tf::Token) -> Attribute<'a> {
		Attribute::new(self.stage(), self.path().append_property(name))
	}

	pub fn has_attribute(&self, name: &tf::Token) -> bool {
		self.stage()
			.resolve_value(&self.path().append_property(name), &FIELD_KEYS.default)
			.is_some()
	}

	/// Return an attribute with the given `name`, authoring its spec with
	/// the declared type if it does not exist yet.
	pub fn create_attribute(
		&self,
		name: &tf::Token,
		type_name: &tf::Token,
		variability: sdf::Variability,
	) -> crate::Result<Attribute<'a>> {
		let path = self.path().append_property(name);
		self.stage()
			.author_attribute_spec(&path, type_name, variability)?;
		Ok(Attribute::new(self.stage(), path))
	}
}

/// Relationships
impl<'a> Prim<'a> {
	/// Return a [`usd::Relationship`] with the given `name`.
	pub fn relationship(&self, name: &tf::Token) -> Relationship<'a> {
		Relationship::new(self.stage(), self.path().append_property(name))
	}

	/// Return a relationship with the given `name`, authoring its spec if
	/// it does not exist yet.
	pub fn create_relationship(&self, name: &tf::Token) -> crate::Result<Relationship<'a>> {
		let path = self.path().append_property(name);
		self.stage().author_relationship_spec(&path)?;
		Ok(Relationship::new(self.stage(), path))
	}
}

impl<'a> std::ops::Deref for Prim<'a> {
	type Target = Object<'a>;
	fn deref(&self) -> &Self::Target {
		unsafe { std::mem::transmute(self) }
	}
}

impl<'a> std::fmt::Display for Prim<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{}", self.path())
	}
}

pub struct ChildrenIter<'a> {
	stage: &'a usd::Stage,
	base_path: sdf::Path,
	prim_children: vt::Array<tf::Token>,
	index: usize,
}

impl<'a> ChildrenIter<'a> {
	pub fn new(stage: &'a usd::Stage, path: &sdf::Path) -> Self {
		ChildrenIter {
			stage,
			base_path: path.clone(),
			prim_children: stage.compose_children(path),
			index: 0,
		}
	}
}

impl<'a> Iterator for ChildrenIter<'a> {
	type Item = Prim<'a>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.index < self.prim_children.len() {
			let name = self.prim_children[self.index].clone();
			self.index += 1;
			Some(Prim::new(self.stage, self.base_path.append_child(&name)))
		} else {
			None
		}
	}
}

pub struct PropertyIter<'a> {
	stage: &'a usd::Stage,
	base_path: sdf::Path,
	property_children: vt::Array<tf::Token>,
	index: usize,
}

impl<'a> PropertyIter<'a> {
	pub fn new(stage: &'a usd::Stage, path: &sdf::Path) -> Self {
		PropertyIter {
			stage,
			base_path: path.clone(),
			property_children: stage.compose_properties(path),
			index: 0,
		}
	}
}

impl<'a> Iterator for PropertyIter<'a> {
	type Item = Property<'a>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.index < self.property_children.len() {
			let name = self.property_children[self.index].clone();
			self.index += 1;
			Some(Property::new(
				self.stage,
				self.base_path.append_property(&name),
			))
		} else {
			None
		}
	}
}
