use microusd::{sdf, tf, tutorial, usd::Stage, usd_geom, usd_shade, vt};
use tempfile::tempdir;

fn open_shading_stage(dir: &std::path::Path) -> Stage {
	tutorial::simple_shading(dir).unwrap();
	Stage::open(dir.join("simpleShading.usd")).unwrap()
}

#[test]
fn model_root_is_a_component_with_y_up() {
	let dir = tempdir().unwrap();
	let stage = open_shading_stage(dir.path());

	assert_eq!(usd_geom::stage_up_axis(&stage).as_str(), "Y");

	let model_root = stage.prim_at_path("/TexModel");
	assert_eq!(
		microusd::usd::ModelApi::new(&model_root).kind(),
		Some(tf::Token::new("component"))
	);
}

#[test]
fn card_mesh_carries_topology_and_texture_coordinates() {
	let dir = tempdir().unwrap();
	let stage = open_shading_stage(dir.path());

	let card = stage.prim_at_path("/TexModel/card");
	assert_eq!(card.type_name().as_str(), "Mesh");

	assert_eq!(
		card.attribute(&usd_geom::TOKENS.face_vertex_counts)
			.get::<vt::Array<i32>>(),
		vec![4]
	);
	assert_eq!(
		card.attribute(&usd_geom::TOKENS.face_vertex_indices)
			.get::<vt::Array<i32>>(),
		vec![0, 1, 2, 3]
	);
	assert_eq!(
		card.attribute(&usd_geom::TOKENS.points)
			.get::<vt::Array<microusd::gf::Vec3f>>()
			.len(),
		4
	);

	let primvars = usd_geom::PrimvarsApi::new(&card);
	let st = primvars.primvar(&tf::Token::new("st"));
	assert_eq!(st.interpolation().as_str(), "varying");
	assert_eq!(
		st.attr.get::<vt::Array<microusd::gf::Vec2f>>(),
		vec![
			microusd::gf::Vec2f::new(0.0, 0.0),
			microusd::gf::Vec2f::new(1.0, 0.0),
			microusd::gf::Vec2f::new(1.0, 1.0),
			microusd::gf::Vec2f::new(0.0, 1.0),
		]
	);
}

#[test]
fn shading_network_is_fully_connected() {
	let dir = tempdir().unwrap();
	let stage = open_shading_stage(dir.path());

	// Material surface output feeds from the preview surface shader.
	let surface = stage
		.prim_at_path("/TexModel/boardMat")
		.attribute(&tf::Token::new("outputs:surface"));
	assert_eq!(
		surface.connections(),
		vec![sdf::Path::from(
			"/TexModel/boardMat/PBRShader.outputs:surface"
		)]
	);

	// The preview surface reads its diffuse color from the texture.
	let diffuse = stage
		.prim_at_path("/TexModel/boardMat/PBRShader")
		.attribute(&tf::Token::new("inputs:diffuseColor"));
	assert_eq!(
		diffuse.connections(),
		vec![sdf::Path::from(
			"/TexModel/boardMat/diffuseTexture.outputs:rgb"
		)]
	);

	// The texture reads its coordinates from the primvar reader.
	let st = stage
		.prim_at_path("/TexModel/boardMat/diffuseTexture")
		.attribute(&tf::Token::new("inputs:st"));
	assert_eq!(
		st.connections(),
		vec![sdf::Path::from(
			"/TexModel/boardMat/stReader.outputs:result"
		)]
	);

	// The reader's varname comes from the material's interface input.
	let varname = stage
		.prim_at_path("/TexModel/boardMat/stReader")
		.attribute(&tf::Token::new("inputs:varname"));
	assert_eq!(
		varname.connections(),
		vec![sdf::Path::from(
			"/TexModel/boardMat.inputs:frame:stPrimvarName"
		)]
	);
	assert_eq!(
		stage
			.prim_at_path("/TexModel/boardMat")
			.attribute(&tf::Token::new("inputs:frame:stPrimvarName"))
			.get::<tf::Token>(),
		tf::Token::new("st")
	);
}

#[test]
fn shader_identifiers_and_inputs_are_authored() {
	let dir = tempdir().unwrap();
	let stage = open_shading_stage(dir.path());

	let pbr = usd_shade::Shader::get(&stage, "/TexModel/boardMat/PBRShader").unwrap();
	assert_eq!(
		pbr.implementation_id(),
		Some(tf::Token::new("UsdPreviewSurface"))
	);
	assert_eq!(
		pbr.prim()
			.attribute(&tf::Token::new("inputs:roughness"))
			.get::<f32>(),
		0.4
	);

	let texture = usd_shade::Shader::get(&stage, "/TexModel/boardMat/diffuseTexture").unwrap();
	assert_eq!(texture.implementation_id(), Some(tf::Token::new("UsdUVTexture")));
	let file = texture
		.prim()
		.attribute(&tf::Token::new("inputs:file"))
		.get::<sdf::AssetPath>();
	assert_eq!(file.authored_path, "./extras/USDLogoLrg.png");
}

#[test]
fn material_is_bound_to_the_mesh() {
	let dir = tempdir().unwrap();
	let stage = open_shading_stage(dir.path());

	let card = stage.prim_at_path("/TexModel/card");
	let binding = usd_shade::MaterialBindingApi::new(&card);
	assert_eq!(
		binding.bound_material(),
		Some(sdf::Path::from("/TexModel/boardMat"))
	);

	let applied = card
		.metadata::<sdf::TokenListOp>(&sdf::FIELD_KEYS.api_schemas)
		.unwrap()
		.applied_items();
	assert!(applied.contains(&tf::Token::new("MaterialBindingAPI")));
}
