//! Shading schemas: materials, shaders and the connections between them.

use crate::{declare_public_tokens, sdf, tf, usd, vt::ValueType};

declare_public_tokens!(Tokens, TOKENS, [
	material: "Material",
	shader: "Shader",

	info_id: "info:id",
	surface: "surface",

	inputs_prefix: "inputs:",
	outputs_prefix: "outputs:",

	material_binding: "material:binding",
	material_binding_api: "MaterialBindingAPI"
]);

/// Schema wrapper for shader prims: a node in a shading network carrying
/// an implementation identifier and typed inputs and outputs.
pub struct Shader<'a> {
	prim: usd::Prim<'a>,
}

impl<'a> Shader<'a> {
	pub fn define(stage: &'a usd::Stage, path: impl Into<sdf::Path>) -> crate::Result<Self> {
		let prim = stage.define_prim(path, &TOKENS.shader)?;
		Ok(Self { prim })
	}

	pub fn get(stage: &'a usd::Stage, path: impl Into<sdf::Path>) -> Option<Self> {
		get_typed_prim(stage, path, &TOKENS.shader).map(|prim| Self { prim })
	}

	pub fn prim(&self) -> &usd::Prim<'a> {
		&self.prim
	}

	/// Author the shader's implementation identifier, e.g. `UsdPreviewSurface`.
	pub fn create_id_attr(&self, id: &tf::Token) -> crate::Result<usd::Attribute<'a>> {
		let attr = self.prim.create_attribute(
			&TOKENS.info_id,
			&sdf::VALUE_TYPE_NAMES.token,
			sdf::Variability::Uniform,
		)?;
		attr.set(id.clone())?;
		Ok(attr)
	}

	pub fn implementation_id(&self) -> Option<tf::Token> {
		self.prim.attribute(&TOKENS.info_id).try_get::<tf::Token>()
	}

	pub fn create_input(&self, name: &str, type_name: &tf::Token) -> crate::Result<Input<'a>> {
		create_input(&self.prim, name, type_name)
	}

	pub fn create_output(&self, name: &str, type_name: &tf::Token) -> crate::Result<Output<'a>> {
		create_output(&self.prim, name, type_name)
	}
}

/// Schema wrapper for material prims: the root of a shading network,
/// exposing terminal outputs and public interface inputs.
pub struct Material<'a> {
	prim: usd::Prim<'a>,
}

impl<'a> Material<'a> {
	pub fn define(stage: &'a usd::Stage, path: impl Into<sdf::Path>) -> crate::Result<Self> {
		let prim = stage.define_prim(path, &TOKENS.material)?;
		Ok(Self { prim })
	}

	pub fn get(stage: &'a usd::Stage, path: impl Into<sdf::Path>) -> Option<Self> {
		get_typed_prim(stage, path, &TOKENS.material).map(|prim| Self { prim })
	}

	pub fn prim(&self) -> &usd::Prim<'a> {
		&self.prim
	}

	/// Author the material's terminal surface output.
	pub fn create_surface_output(&self) -> crate::Result<Output<'a>> {
		create_output(&self.prim, TOKENS.surface.as_str(), &sdf::VALUE_TYPE_NAMES.token)
	}

	/// Author a public interface input on the material.
	pub fn create_input(&self, name: &str, type_name: &tf::Token) -> crate::Result<Input<'a>> {
		create_input(&self.prim, name, type_name)
	}
}

/// A typed, connectable input attribute in the `inputs:` namespace.
pub struct Input<'a> {
	attr: usd::Attribute<'a>,
}

impl<'a> Input<'a> {
	pub fn attr(&self) -> &usd::Attribute<'a> {
		&self.attr
	}

	pub fn path(&self) -> sdf::Path {
		self.attr.path().clone()
	}

	pub fn set<T: ValueType>(&self, value: T) -> crate::Result<()> {
		self.attr.set(value)
	}

	/// Connect this input to the named output of `source`, authoring the
	/// output attribute on the source if it does not exist yet.
	pub fn connect_to_source(&self, source: &Shader, output: &str) -> crate::Result<()> {
		let source_output = source.create_output(output, &self.attr.type_name())?;
		self.attr.add_connection(&source_output.path())
	}

	/// Connect this input directly to the attribute at `source_path`.
	pub fn connect_to_source_path(&self, source_path: &sdf::Path) -> crate::Result<()> {
		self.attr.add_connection(source_path)
	}
}

/// A typed, connectable output attribute in the `outputs:` namespace.
pub struct Output<'a> {
	attr: usd::Attribute<'a>,
}

impl<'a> Output<'a> {
	pub fn attr(&self) -> &usd::Attribute<'a> {
		&self.attr
	}

	pub fn path(&self) -> sdf::Path {
		self.attr.path().clone()
	}

	/// Connect this output to the named output of `source`, authoring the
	/// output attribute on the source if it does not exist yet.
	pub fn connect_to_source(&self, source: &Shader, output: &str) -> crate::Result<()> {
		let source_output = source.create_output(output, &self.attr.type_name())?;
		self.attr.add_connection(&source_output.path())
	}
}

/// Applied API schema associating a geometric prim with the material used
/// to shade it.
pub struct MaterialBindingApi<'a> {
	prim: usd::Prim<'a>,
}

impl<'a> MaterialBindingApi<'a> {
	pub fn new(prim: &usd::Prim<'a>) -> Self {
		Self { prim: prim.clone() }
	}

	/// Record the applied schema in the prim's metadata.
	pub fn apply(prim: &usd::Prim<'a>) -> crate::Result<Self> {
		prim.apply_api_schema(&TOKENS.material_binding_api)?;
		Ok(Self { prim: prim.clone() })
	}

	/// Author the direct material binding relationship.
	pub fn bind(&self, material: &Material) -> crate::Result<()> {
		let rel = self.prim.create_relationship(&TOKENS.material_binding)?;
		rel.set_targets(vec![material.prim().path().clone()])
	}

	/// Return the directly bound material path, if any.
	pub fn bound_material(&self) -> Option<sdf::Path> {
		self.prim
			.relationship(&TOKENS.material_binding)
			.targets()
			.into_iter()
			.next()
	}
}

fn create_input<'a>(
	prim: &usd::Prim<'a>,
	name: &str,
	type_name: &tf::Token,
) -> crate::Result<Input<'a>> {
	let attr_name = tf::Token::new(format!("{}{}", TOKENS.inputs_prefix, name));
	let attr = prim.create_attribute(&attr_name, type_name, sdf::Variability::Varying)?;
	Ok(Input { attr })
}

fn create_output<'a>(
	prim: &usd::Prim<'a>,
	name: &str,
	type_name: &tf::Token,
) -> crate::Result<Output<'a>> {
	let attr_name = tf::Token::new(format!("{}{}", TOKENS.outputs_prefix, name));
	let attr = prim.create_attribute(&attr_name, type_name, sdf::Variability::Varying)?;
	Ok(Output { attr })
}

fn get_typed_prim<'a>(
	stage: &'a usd::Stage,
	path: impl Into<sdf::Path>,
	type_name: &tf::Token,
) -> Option<usd::Prim<'a>> {
	let prim = stage.prim_at_path(path);
	if prim.is_valid() && prim.is_a(type_name) {
		Some(prim)
	} else {
		None
	}
}
