//! Geometry schemas: transformable prims, gprims and primvars.

mod primvar;
mod primvars_api;
mod schemas;
mod xformable;

pub use primvar::Primvar;
pub use primvars_api::PrimvarsApi;
pub use schemas::*;
pub use xformable::*;

use crate::{declare_public_tokens, sdf::FIELD_KEYS, tf, usd, vt};

declare_public_tokens!(Tokens, TOKENS, [
	y: "Y",
	z: "Z",

	xform: "Xform",
	sphere: "Sphere",
	mesh: "Mesh",

	extent: "extent",
	radius: "radius",
	points: "points",
	face_vertex_counts: "faceVertexCounts",
	face_vertex_indices: "faceVertexIndices",
	display_color: "primvars:displayColor",
	xform_op_order: "xformOpOrder",

	varying: "varying"
]);

/// Author the stage's up-axis metadata.
pub fn set_stage_up_axis(stage: &usd::Stage, axis: &tf::Token) {
	stage.set_metadata(&FIELD_KEYS.up_axis, vt::Value::new(axis.clone()));
}

/// Return the stage's up-axis metadata; Y if unauthored.
pub fn stage_up_axis(stage: &usd::Stage) -> tf::Token {
	stage
		.root_layer()
		.get(&crate::sdf::Path::absolute_root_path(), &FIELD_KEYS.up_axis)
		.and_then(|v| v.get::<tf::Token>())
		.unwrap_or_else(|| TOKENS.y.clone())
}
