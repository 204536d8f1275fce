//! The introductory USD tutorials, sequenced as one driver.
//!
//! Each demo is a self-contained routine; they communicate only through
//! the files they leave in the base directory, so the order matters:
//! property inspection reads what hello-world wrote, referencing reads
//! what inspection mutated, and so on. Any error aborts the sequence.

use crate::{gf, sdf, tf, usd, usd_geom, usd_shade, vt, Error, Result};
use std::path::Path;

/// Run every demo in order, rooted at `dir`.
pub fn run_all(dir: &Path) -> Result<()> {
	stage_creation()?;
	hello_world(dir)?;
	inspect_and_author_properties(dir)?;
	referencing_layers(dir)?;
	stage_traversal(dir)?;
	authoring_variants(dir)?;
	transformations_and_animations(dir)?;
	simple_shading(dir)?;
	Ok(())
}

/// Creating an in-memory stage exercises nothing but library
/// initialization; the observable effect is the absence of an error, and
/// no file is left behind.
pub fn stage_creation() -> Result<()> {
	let _stage = usd::Stage::create_in_memory();
	Ok(())
}

/// An xform holding a sphere, exported and saved.
pub fn hello_world(dir: &Path) -> Result<()> {
	println!("** Hello World **");

	let stage = usd::Stage::create_new(dir.join("HelloWorld.usda"))?;
	let _xform = usd_geom::Xform::define(&stage, "/hello")?;
	let _sphere = usd_geom::Sphere::define(&stage, "/hello/world")?;

	println!(
		"Content of file HelloWorld.usda:\n{}",
		stage.root_layer().export_to_string()
	);

	stage.root_layer().save()
}

/// Reopen the hello-world stage, list properties, then author radius,
/// extent and display color.
pub fn inspect_and_author_properties(dir: &Path) -> Result<()> {
	println!("** Inspect and author properties **");

	let stage = usd::Stage::open(dir.join("HelloWorld.usda"))?;
	let xform = stage.prim_at_path("/hello");
	let sphere = stage.prim_at_path("/hello/world");

	print_property_names("xformProperties", &xform);
	print_property_names("sphereProperties", &sphere);

	let sphere_schema = usd_geom::Sphere::get(&stage, "/hello/world")
		.ok_or_else(|| Error::PrimNotFound("/hello/world".into()))?;

	// The schema fallback, since nothing is authored yet.
	let extent = sphere_schema.extent();
	print!("extentAttr.Get(): (");
	for corner in &extent {
		print!("({}, {}, {}),", corner.x, corner.y, corner.z);
	}
	println!(")");

	println!("Setting \"radius\" to 2.0 and doubling the extent.");
	// The schema types radius as double.
	sphere_schema.radius_attr()?.set(2.0_f64)?;
	let doubled: vt::Array<gf::Vec3f> = extent.iter().map(|corner| *corner * 2.0).collect();
	sphere_schema.extent_attr()?.set(doubled)?;

	println!("Setting \"primvars:displayColor\" to (0,0,1)");
	sphere_schema
		.display_color_attr()?
		.set(vec![gf::Vec3f::new(0.0, 0.0, 1.0)])?;

	println!(
		"New content of Hello World:\n{}",
		stage.root_layer().export_to_string()
	);

	stage.root_layer().save()
}

/// Reference the hello-world layer twice from a new stage, suppressing
/// the inherited transform on one copy and recoloring the other.
pub fn referencing_layers(dir: &Path) -> Result<()> {
	println!("** Referencing layers **");

	println!("---- Step 1 ----");
	let stage = usd::Stage::open(dir.join("HelloWorld.usda"))?;
	let hello = stage.prim_at_path("/hello");
	stage.set_default_prim(&hello);
	usd_geom::XformCommonApi::new(&hello).set_translate(gf::Vec3d::new(4.0, 5.0, 6.0))?;

	println!(
		"Content of file HelloWorld.usda:\n{}",
		stage.root_layer().export_to_string()
	);

	println!("---- Step 2 ----");
	let ref_stage = usd::Stage::create_new(dir.join("RefExample.usda"))?;
	let ref_sphere = ref_stage.override_prim("/refSphere")?;

	println!(
		"Content of file RefExample.usda:\n{}",
		ref_stage.root_layer().export_to_string()
	);

	println!("---- Step 3 ----");
	ref_sphere.references().add_reference("./HelloWorld.usda")?;

	println!(
		"Content of file RefExample.usda after referencing HelloWorld.usda:\n{}",
		ref_stage.root_layer().export_to_string()
	);

	println!("---- Step 4 ----");
	let ref_xform = usd_geom::Xformable::new(&ref_sphere);
	ref_xform.set_xform_op_order(&[])?;

	println!(
		"Content of file RefExample.usda after setting XformOpOrder to empty:\n{}",
		ref_stage.root_layer().export_to_string()
	);

	println!("---- Step 5 ----");
	let ref_sphere2 = ref_stage.override_prim("/refSphere2")?;
	ref_sphere2.references().add_reference("./HelloWorld.usda")?;

	println!(
		"Content of file RefExample.usda after adding a second reference to HelloWorld.usda:\n{}",
		ref_stage.root_layer().export_to_string()
	);

	println!("---- Step 6 ----");
	let over_sphere = usd_geom::Sphere::get(&ref_stage, "/refSphere2/world")
		.ok_or_else(|| Error::PrimNotFound("/refSphere2/world".into()))?;
	over_sphere
		.display_color_attr()?
		.set(vec![gf::Vec3f::new(1.0, 0.0, 0.0)])?;

	println!(
		"Content of file RefExample.usda after setting the display color of /refSphere2/world to red:\n{}",
		ref_stage.root_layer().export_to_string()
	);

	stage.root_layer().save()?;
	ref_stage.root_layer().save()
}

/// Walk the referencing example: default traversal, schema filtering,
/// pre/post visits, and the effect of deactivation.
pub fn stage_traversal(dir: &Path) -> Result<()> {
	println!("** Stage traversal **");

	println!("---- Step 1 ----");
	let ref_stage = usd::Stage::open(dir.join("RefExample.usda"))?;
	println!("All prims in the stage of RefExample.usda:");
	for prim in ref_stage.traverse() {
		println!("{}", prim.path());
	}

	println!("---- Step 2 ----");
	let spheres: Vec<_> = ref_stage
		.traverse()
		.filter(|prim| prim.is_a(&usd_geom::TOKENS.sphere))
		.collect();
	println!("All prims in the stage of RefExample.usda that are spheres:\n");
	for sphere in &spheres {
		println!("{}", sphere.path());
	}

	println!("---- Step 3 ----");
	let pseudo_root = ref_stage.pseudo_root();
	println!("All prims in the stage of RefExample.usda with pre and post visit:\n");
	for (prim, is_post_visit) in ref_stage.pre_and_post_visit(&pseudo_root) {
		println!(
			"{} {}",
			prim.path(),
			if is_post_visit { "True" } else { "False" }
		);
	}

	println!("---- Step 4 ----");
	ref_stage.override_prim("/refSphere2")?.set_active(false)?;

	println!(
		"Content of file RefExample.usda after deactivating refSphere2:\n{}",
		ref_stage.root_layer().export_to_string()
	);

	println!("Prims (active, defined) in the stage of RefExample.usda after deactivating refSphere2:");
	for prim in ref_stage.traverse() {
		println!("{}", prim.path());
	}

	println!();

	println!("All prims in the stage of RefExample.usda after deactivating refSphere2:");
	for prim in ref_stage.traverse_all() {
		println!("{}", prim.path());
	}

	Ok(())
}

/// Attach a shading variant set to the hello-world stage and author a
/// display color inside each variant.
pub fn authoring_variants(dir: &Path) -> Result<()> {
	println!("** Authoring variants **");

	println!("---- Step 1 ----");
	// Local opinions are stronger than variant selections, so the direct
	// display color must be cleared before the variants are authored.
	let stage = usd::Stage::open(dir.join("HelloWorld.usda"))?;
	let gprim = usd_geom::Gprim::get(&stage, "/hello/world")
		.ok_or_else(|| Error::PrimNotFound("/hello/world".into()))?;
	let color_attr = gprim.display_color_attr()?;
	color_attr.clear()?;

	println!(
		"Content of file HelloWorld.usda after clearing the display color of /hello/world:\n{}",
		stage.root_layer().export_to_string()
	);

	println!("---- Step 2 ----");
	let root_prim = stage.prim_at_path("/hello");
	let vset = root_prim.variant_sets().add_variant_set("shadingVariant")?;

	println!(
		"Content of file HelloWorld.usda after adding a variant set to /hello:\n{}",
		stage.root_layer().export_to_string()
	);

	println!("---- Step 3 ----");
	vset.add_variant("red")?;
	vset.add_variant("blue")?;
	vset.add_variant("green")?;

	println!(
		"Content of file HelloWorld.usda after adding variants to the variant set of /hello:\n{}",
		stage.root_layer().export_to_string()
	);

	println!("---- Step 4 & 5 ----");
	// The last selection stays authored, so green becomes the default.
	let variants = [
		("red", gf::Vec3f::new(1.0, 0.0, 0.0)),
		("blue", gf::Vec3f::new(0.0, 0.0, 1.0)),
		("green", gf::Vec3f::new(0.0, 1.0, 0.0)),
	];
	for (name, color) in variants {
		vset.set_variant_selection(name)?;
		{
			let _context = vset.variant_edit_context()?;
			color_attr.set(vec![color])?;
		}
	}

	println!(
		"Content of file HelloWorld.usda after setting the color of /hello/world according to the variant selection:\n{}",
		stage.root_layer().export_to_string()
	);

	println!("---- Step 6 ----");
	// Only the selected variant survives in the flattened view.
	println!(
		"Flattened view of the stage of HelloWorld.usda:\n{}",
		stage.export_to_string()
	);

	println!("---- Step 7 ----");
	stage
		.root_layer()
		.export(dir.join("HelloWorldWithVariants.usda"))?;
	println!("The stage of HelloWorld.usda with variants has been saved in HelloWorldWithVariants.usda.");

	stage.root_layer().save()
}

/// Create a new stage with the shared time range and a Z up-axis.
pub fn make_initial_stage(path: impl AsRef<Path>) -> Result<usd::Stage> {
	let stage = usd::Stage::create_new(path)?;
	usd_geom::set_stage_up_axis(&stage, &usd_geom::TOKENS.z);
	stage.set_start_time_code(1.0);
	stage.set_end_time_code(192.0);
	Ok(stage)
}

/// Define an xform at `path` referencing the bundled top geometry.
pub fn add_reference_to_geometry<'a>(
	stage: &'a usd::Stage,
	path: &str,
) -> Result<usd_geom::Xform<'a>> {
	let geom = usd_geom::Xform::define(stage, path)?;
	geom.prim()
		.references()
		.add_reference("./extras/top.geom.usd")?;
	Ok(geom)
}

/// Eight full rotations over the stage's time range.
pub fn add_spin(geom: &usd_geom::Xform) -> Result<()> {
	let spin = usd_geom::Xformable::new(geom.prim()).add_rotate_z_op(
		usd_geom::XformOpPrecision::Float,
		&tf::Token::new("spin"),
	)?;
	spin.set_time_sample(1.0, 0.0_f32)?;
	spin.set_time_sample(192.0, 1440.0_f32)?;
	Ok(())
}

/// A static twelve-degree tilt.
pub fn add_tilt(geom: &usd_geom::Xform) -> Result<()> {
	let tilt = usd_geom::Xformable::new(geom.prim()).add_rotate_x_op(
		usd_geom::XformOpPrecision::Float,
		&tf::Token::new("tilt"),
	)?;
	tilt.set(12.0_f32)
}

/// A small static translation away from the rotation center.
pub fn add_offset(geom: &usd_geom::Xform) -> Result<()> {
	let offset = usd_geom::Xformable::new(geom.prim()).add_translate_op(
		usd_geom::XformOpPrecision::Float,
		&tf::Token::new("offset"),
	)?;
	offset.set(gf::Vec3f::new(0.0, 0.1, 0.0))
}

/// One full revolution over the stage's time range.
pub fn add_precession(geom: &usd_geom::Xform) -> Result<()> {
	let precession = usd_geom::Xformable::new(geom.prim()).add_rotate_z_op(
		usd_geom::XformOpPrecision::Float,
		&tf::Token::new("precess"),
	)?;
	precession.set_time_sample(1.0, 0.0_f32)?;
	precession.set_time_sample(192.0, 360.0_f32)?;
	Ok(())
}

/// Build the six animation stages, demonstrating op ordering and layer
/// offsets.
pub fn transformations_and_animations(dir: &Path) -> Result<()> {
	println!("\n** Transformations and animations **");

	println!("---- Step 1 ----");
	let stage = make_initial_stage(dir.join("Step1.usda"))?;
	stage.set_metadata(&sdf::FIELD_KEYS.comment, "Step 1: Start and end time codes");
	stage.root_layer().save()?;

	println!(
		"Content of file Step1.usda:\n{}",
		stage.root_layer().export_to_string()
	);

	println!("---- Step 2 ----");
	let stage = make_initial_stage(dir.join("Step2.usda"))?;
	stage.set_metadata(&sdf::FIELD_KEYS.comment, "Step 2: Geometry reference");
	let _top = add_reference_to_geometry(&stage, "/Top")?;
	stage.root_layer().save()?;

	println!(
		"Content of file Step2.usda:\n{}",
		stage.root_layer().export_to_string()
	);

	println!("---- Step 3 ----");
	let stage = make_initial_stage(dir.join("Step3.usda"))?;
	stage.set_metadata(&sdf::FIELD_KEYS.comment, "Step 3: Adding spin animation");
	let top = add_reference_to_geometry(&stage, "/Top")?;
	add_spin(&top)?;
	stage.root_layer().save()?;

	println!(
		"Content of file Step3.usda:\n{}",
		stage.root_layer().export_to_string()
	);

	println!("---- Step 4 ----");
	let stage = make_initial_stage(dir.join("Step4.usda"))?;
	stage.set_metadata(&sdf::FIELD_KEYS.comment, "Step 4: Adding tilt");
	let top = add_reference_to_geometry(&stage, "/Top")?;
	add_tilt(&top)?;
	add_spin(&top)?;
	stage.root_layer().save()?;

	println!(
		"Content of file Step4.usda:\n{}",
		stage.root_layer().export_to_string()
	);

	println!("---- Step 4A ----");
	let stage = make_initial_stage(dir.join("Step4A.usda"))?;
	stage.set_metadata(&sdf::FIELD_KEYS.comment, "Step 4A: Adding spin and tilt");
	let top = add_reference_to_geometry(&stage, "/Top")?;
	add_spin(&top)?;
	add_tilt(&top)?;
	stage.root_layer().save()?;

	println!(
		"Content of file Step4A.usda (Added Spin BEFORE Tilt):\n{}",
		stage.root_layer().export_to_string()
	);

	println!("---- Step 5 ----");
	let stage = make_initial_stage(dir.join("Step5.usda"))?;
	stage.set_metadata(&sdf::FIELD_KEYS.comment, "Step 5: Adding precession and offset");
	let top = add_reference_to_geometry(&stage, "/Top")?;
	add_precession(&top)?;
	add_offset(&top)?;
	add_tilt(&top)?;
	add_spin(&top)?;
	stage.root_layer().save()?;

	println!(
		"Content of file Step5.usda:\n{}",
		stage.root_layer().export_to_string()
	);

	println!("---- Step 6 ----");
	// The animated layer from Step 5, shifted and compressed per sibling.
	let anim_layer_path = "./Step5.usda";

	let stage = make_initial_stage(dir.join("Step6.usda"))?;
	stage.set_metadata(&sdf::FIELD_KEYS.comment, "Step 6: Layer offsets and animation");

	let _left = usd_geom::Xform::define(&stage, "/Left")?;
	let left_top = usd_geom::Xform::define(&stage, "/Left/Top")?;
	left_top
		.prim()
		.references()
		.add_reference(sdf::Reference::new(anim_layer_path).with_prim_path("/Top"))?;

	let middle = usd_geom::Xform::define(&stage, "/Middle")?;
	usd_geom::Xformable::new(middle.prim())
		.add_translate_op(usd_geom::XformOpPrecision::Double, &tf::Token::empty())?
		.set(gf::Vec3d::new(2.0, 0.0, 0.0))?;
	let middle_top = usd_geom::Xform::define(&stage, "/Middle/Top")?;
	middle_top.prim().references().add_reference(
		sdf::Reference::new(anim_layer_path)
			.with_prim_path("/Top")
			.with_layer_offset(sdf::Retiming::with_offset(96.0)),
	)?;

	let right = usd_geom::Xform::define(&stage, "/Right")?;
	usd_geom::Xformable::new(right.prim())
		.add_translate_op(usd_geom::XformOpPrecision::Double, &tf::Token::empty())?
		.set(gf::Vec3d::new(4.0, 0.0, 0.0))?;
	let right_top = usd_geom::Xform::define(&stage, "/Right/Top")?;
	right_top.prim().references().add_reference(
		sdf::Reference::new(anim_layer_path)
			.with_prim_path("/Top")
			.with_layer_offset(sdf::Retiming::with_scale(0.25)),
	)?;

	stage.root_layer().save()?;

	println!(
		"Content of file Step6.usda:\n{}",
		stage.root_layer().export_to_string()
	);

	Ok(())
}

/// A textured card: mesh, preview surface, primvar reader, UV texture,
/// and the binding that ties them together.
pub fn simple_shading(dir: &Path) -> Result<()> {
	println!("** Simple shading **");

	println!("---- Step 1 ; Making a Model ----");
	let stage = usd::Stage::create_new(dir.join("simpleShading.usd"))?;
	usd_geom::set_stage_up_axis(&stage, &usd_geom::TOKENS.y);

	let model_root = usd_geom::Xform::define(&stage, "/TexModel")?;
	usd::ModelApi::new(model_root.prim()).set_kind(&tf::Token::new("component"))?;

	println!(
		"Content of file simpleShading.usd:\n{}",
		stage.root_layer().export_to_string()
	);

	println!("---- Step 2 ; Adding a Mesh Billboard ----");
	let billboard = usd_geom::Mesh::define(&stage, "/TexModel/card")?;
	billboard.create_points_attr()?.set(vec![
		gf::Vec3f::new(-430.0, -145.0, 0.0),
		gf::Vec3f::new(430.0, -145.0, 0.0),
		gf::Vec3f::new(430.0, 145.0, 0.0),
		gf::Vec3f::new(-430.0, 145.0, 0.0),
	])?;
	billboard.create_face_vertex_counts_attr()?.set(vec![4])?;
	billboard
		.create_face_vertex_indices_attr()?
		.set(vec![0, 1, 2, 3])?;
	billboard.create_extent_attr()?.set(vec![
		gf::Vec3f::new(-430.0, -145.0, 0.0),
		gf::Vec3f::new(430.0, 145.0, 0.0),
	])?;
	let tex_coords = usd_geom::PrimvarsApi::new(billboard.prim()).create_primvar(
		&tf::Token::new("st"),
		&sdf::VALUE_TYPE_NAMES.texcoord2f_array,
		&usd_geom::TOKENS.varying,
	)?;
	tex_coords.set(vec![
		gf::Vec2f::new(0.0, 0.0),
		gf::Vec2f::new(1.0, 0.0),
		gf::Vec2f::new(1.0, 1.0),
		gf::Vec2f::new(0.0, 1.0),
	])?;

	stage.save()?;

	println!(
		"Content of file simpleShading.usd after adding a card mesh to the TexModel:\n{}",
		stage.root_layer().export_to_string()
	);

	println!("---- Step 3 ; Make a Material ----");
	let material = usd_shade::Material::define(&stage, "/TexModel/boardMat")?;

	println!("---- Step 4 ; Add a preview surface ----");
	let pbr_shader = usd_shade::Shader::define(&stage, "/TexModel/boardMat/PBRShader")?;
	pbr_shader.create_id_attr(&tf::Token::new("UsdPreviewSurface"))?;
	pbr_shader
		.create_input("roughness", &sdf::VALUE_TYPE_NAMES.float_)?
		.set(0.4_f32)?;
	pbr_shader
		.create_input("metallic", &sdf::VALUE_TYPE_NAMES.float_)?
		.set(0.0_f32)?;

	material
		.create_surface_output()?
		.connect_to_source(&pbr_shader, "surface")?;

	println!(
		"Content of file simpleShading.usd after adding a PBRShader shader to the boardMat:\n{}",
		stage.root_layer().export_to_string()
	);

	println!("---- Step 5 ; Add Texturing ----");
	let st_reader = usd_shade::Shader::define(&stage, "/TexModel/boardMat/stReader")?;
	st_reader.create_id_attr(&tf::Token::new("UsdPrimvarReader_float2"))?;

	let diffuse_texture = usd_shade::Shader::define(&stage, "/TexModel/boardMat/diffuseTexture")?;
	diffuse_texture.create_id_attr(&tf::Token::new("UsdUVTexture"))?;
	diffuse_texture
		.create_input("file", &sdf::VALUE_TYPE_NAMES.asset)?
		.set(sdf::AssetPath::new("./extras/USDLogoLrg.png"))?;
	diffuse_texture
		.create_input("st", &sdf::VALUE_TYPE_NAMES.float2)?
		.connect_to_source(&st_reader, "result")?;
	diffuse_texture.create_output("rgb", &sdf::VALUE_TYPE_NAMES.float3)?;
	pbr_shader
		.create_input("diffuseColor", &sdf::VALUE_TYPE_NAMES.color3f)?
		.connect_to_source(&diffuse_texture, "rgb")?;

	let st_input = material.create_input("frame:stPrimvarName", &sdf::VALUE_TYPE_NAMES.token)?;
	st_input.set(tf::Token::new("st"))?;

	st_reader
		.create_input("varname", &sdf::VALUE_TYPE_NAMES.token)?
		.connect_to_source_path(&st_input.path())?;

	usd_shade::MaterialBindingApi::apply(billboard.prim())?.bind(&material)?;

	stage.save()?;
	println!(
		"Content of file simpleShading.usd after adding texturing to the boardMat:\n{}",
		stage.root_layer().export_to_string()
	);

	Ok(())
}

fn print_property_names(label: &str, prim: &usd::Prim) {
	print!("{}: [", label);
	for name in usd_geom::property_names_with_builtins(prim) {
		print!("{},", name);
	}
	println!("]");
}
