use super::TOKENS;
use crate::{gf, sdf, tf, usd, vt};

/// Schema wrapper for transform prims.
pub struct Xform<'a> {
	prim: usd::Prim<'a>,
}

impl<'a> Xform<'a> {
	pub fn define(stage: &'a usd::Stage, path: impl Into<sdf::Path>) -> crate::Result<Self> {
		let prim = stage.define_prim(path, &TOKENS.xform)?;
		Ok(Self { prim })
	}

	pub fn get(stage: &'a usd::Stage, path: impl Into<sdf::Path>) -> Option<Self> {
		get_typed_prim(stage, path, &TOKENS.xform).map(|prim| Self { prim })
	}

	pub fn prim(&self) -> &usd::Prim<'a> {
		&self.prim
	}
}

/// Schema wrapper for sphere gprims.
pub struct Sphere<'a> {
	prim: usd::Prim<'a>,
}

impl<'a> Sphere<'a> {
	pub fn define(stage: &'a usd::Stage, path: impl Into<sdf::Path>) -> crate::Result<Self> {
		let prim = stage.define_prim(path, &TOKENS.sphere)?;
		Ok(Self { prim })
	}

	pub fn get(stage: &'a usd::Stage, path: impl Into<sdf::Path>) -> Option<Self> {
		get_typed_prim(stage, path, &TOKENS.sphere).map(|prim| Self { prim })
	}

	pub fn prim(&self) -> &usd::Prim<'a> {
		&self.prim
	}

	/// The sphere's radius attribute; the schema type is double.
	pub fn radius_attr(&self) -> crate::Result<usd::Attribute<'a>> {
		self.prim.create_attribute(
			&TOKENS.radius,
			&sdf::VALUE_TYPE_NAMES.double_,
			sdf::Variability::Varying,
		)
	}

	pub fn extent_attr(&self) -> crate::Result<usd::Attribute<'a>> {
		self.prim.create_attribute(
			&TOKENS.extent,
			&sdf::VALUE_TYPE_NAMES.float3_array,
			sdf::Variability::Varying,
		)
	}

	pub fn display_color_attr(&self) -> crate::Result<usd::Attribute<'a>> {
		display_color_attr(&self.prim)
	}

	/// The composed radius, or the schema fallback of 1.
	pub fn radius(&self) -> f64 {
		self.prim
			.attribute(&TOKENS.radius)
			.try_get::<f64>()
			.unwrap_or(1.0)
	}

	/// The composed extent, or the schema fallback of the unit cube.
	pub fn extent(&self) -> vt::Array<gf::Vec3f> {
		self.prim
			.attribute(&TOKENS.extent)
			.try_get::<vt::Array<gf::Vec3f>>()
			.unwrap_or_else(|| {
				vec![
					gf::Vec3f::new(-1.0, -1.0, -1.0),
					gf::Vec3f::new(1.0, 1.0, 1.0),
				]
			})
	}
}

/// Schema wrapper for polygonal meshes.
pub struct Mesh<'a> {
	prim: usd::Prim<'a>,
}

impl<'a> Mesh<'a> {
	pub fn define(stage: &'a usd::Stage, path: impl Into<sdf::Path>) -> crate::Result<Self> {
		let prim = stage.define_prim(path, &TOKENS.mesh)?;
		Ok(Self { prim })
	}

	pub fn get(stage: &'a usd::Stage, path: impl Into<sdf::Path>) -> Option<Self> {
		get_typed_prim(stage, path, &TOKENS.mesh).map(|prim| Self { prim })
	}

	pub fn prim(&self) -> &usd::Prim<'a> {
		&self.prim
	}

	pub fn create_points_attr(&self) -> crate::Result<usd::Attribute<'a>> {
		self.prim.create_attribute(
			&TOKENS.points,
			&sdf::VALUE_TYPE_NAMES.point3f_array,
			sdf::Variability::Varying,
		)
	}

	pub fn create_face_vertex_counts_attr(&self) -> crate::Result<usd::Attribute<'a>> {
		self.prim.create_attribute(
			&TOKENS.face_vertex_counts,
			&sdf::VALUE_TYPE_NAMES.int_array,
			sdf::Variability::Varying,
		)
	}

	pub fn create_face_vertex_indices_attr(&self) -> crate::Result<usd::Attribute<'a>> {
		self.prim.create_attribute(
			&TOKENS.face_vertex_indices,
			&sdf::VALUE_TYPE_NAMES.int_array,
			sdf::Variability::Varying,
		)
	}

	pub fn create_extent_attr(&self) -> crate::Result<usd::Attribute<'a>> {
		self.prim.create_attribute(
			&TOKENS.extent,
			&sdf::VALUE_TYPE_NAMES.float3_array,
			sdf::Variability::Varying,
		)
	}

	pub fn display_color_attr(&self) -> crate::Result<usd::Attribute<'a>> {
		display_color_attr(&self.prim)
	}
}

/// Schema view over any geometric prim, for the attributes shared by all
/// gprims.
pub struct Gprim<'a> {
	prim: usd::Prim<'a>,
}

impl<'a> Gprim<'a> {
	pub fn get(stage: &'a usd::Stage, path: impl Into<sdf::Path>) -> Option<Self> {
		let prim = stage.prim_at_path(path);
		if !prim.is_valid() {
			return None;
		}
		let type_name = prim.type_name();
		if type_name == TOKENS.sphere || type_name == TOKENS.mesh {
			Some(Self { prim })
		} else {
			None
		}
	}

	pub fn prim(&self) -> &usd::Prim<'a> {
		&self.prim
	}

	pub fn display_color_attr(&self) -> crate::Result<usd::Attribute<'a>> {
		display_color_attr(&self.prim)
	}
}

fn display_color_attr<'a>(prim: &usd::Prim<'a>) -> crate::Result<usd::Attribute<'a>> {
	prim.create_attribute(
		&TOKENS.display_color,
		&sdf::VALUE_TYPE_NAMES.color3f_array,
		sdf::Variability::Varying,
	)
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

/// The builtin property names each schema serves in addition to authored
/// ones; the stand-in for the schema registry.
pub fn schema_property_names(type_name: &tf::Token) -> &'static [&'static str] {
	match type_name.as_str() {
		"Xform" => &["proxyPrim", "purpose", "visibility", "xformOpOrder"],
		"Sphere" => &[
			"doubleSided",
			"extent",
			"orientation",
			"primvars:displayColor",
			"primvars:displayOpacity",
			"proxyPrim",
			"purpose",
			"radius",
			"visibility",
			"xformOpOrder",
		],
		"Mesh" => &[
			"cornerIndices",
			"cornerSharpnesses",
			"creaseIndices",
			"creaseLengths",
			"creaseSharpnesses",
			"doubleSided",
			"extent",
			"faceVertexCounts",
			"faceVertexIndices",
			"holeIndices",
			"interpolateBoundary",
			"normals",
			"orientation",
			"points",
			"primvars:displayColor",
			"primvars:displayOpacity",
			"proxyPrim",
			"purpose",
			"subdivisionScheme",
			"velocities",
			"visibility",
			"xformOpOrder",
		],
		_ => &[],
	}
}

/// Composed and builtin property names for a prim, sorted, the way the
/// property inspection workflow lists them.
pub fn property_names_with_builtins(prim: &usd::Prim) -> vt::Array<tf::Token> {
	let mut names = prim.property_names();
	for builtin in schema_property_names(&prim.type_name()) {
		let token = tf::Token::new(*builtin);
		if !names.contains(&token) {
			names.push(token);
		}
	}
	names.sort_by(|a, b| a.as_str().cmp(b.as_str()));
	names
}
