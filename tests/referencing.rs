use microusd::{gf, tf, tutorial, usd::Stage, usd_geom, vt};
use tempfile::tempdir;

fn run_referencing_flow(dir: &std::path::Path) {
	tutorial::hello_world(dir).unwrap();
	tutorial::inspect_and_author_properties(dir).unwrap();
	tutorial::referencing_layers(dir).unwrap();
}

#[test]
fn default_prim_composes_the_referenced_subtree() {
	let dir = tempdir().unwrap();
	run_referencing_flow(dir.path());

	let stage = Stage::open(dir.path().join("RefExample.usda")).unwrap();

	// The reference names no prim path, so the target's defaultPrim
	// subtree composes beneath the referencing prim.
	let world = stage.prim_at_path("/refSphere/world");
	assert!(world.is_valid());
	assert_eq!(world.type_name().as_str(), "Sphere");
	assert_eq!(world.attribute(&usd_geom::TOKENS.radius).get::<f64>(), 2.0);
}

#[test]
fn local_override_wins_over_the_referenced_opinion() {
	let dir = tempdir().unwrap();
	run_referencing_flow(dir.path());

	let stage = Stage::open(dir.path().join("RefExample.usda")).unwrap();

	// The recolored copy shows the local opinion.
	let color = stage
		.prim_at_path("/refSphere2/world")
		.attribute(&usd_geom::TOKENS.display_color)
		.get::<vt::Array<gf::Vec3f>>();
	assert_eq!(color, vec![gf::Vec3f::new(1.0, 0.0, 0.0)]);

	// The untouched copy still shows the referenced opinion.
	let color = stage
		.prim_at_path("/refSphere/world")
		.attribute(&usd_geom::TOKENS.display_color)
		.get::<vt::Array<gf::Vec3f>>();
	assert_eq!(color, vec![gf::Vec3f::new(0.0, 0.0, 1.0)]);
}

#[test]
fn empty_op_order_suppresses_the_inherited_translate() {
	let dir = tempdir().unwrap();
	run_referencing_flow(dir.path());

	let stage = Stage::open(dir.path().join("RefExample.usda")).unwrap();

	let suppressed = stage
		.prim_at_path("/refSphere")
		.attribute(&usd_geom::TOKENS.xform_op_order)
		.get::<vt::Array<tf::Token>>();
	assert!(suppressed.is_empty());

	// The second copy inherits the translate op untouched.
	let inherited = stage
		.prim_at_path("/refSphere2")
		.attribute(&usd_geom::TOKENS.xform_op_order)
		.get::<vt::Array<tf::Token>>();
	assert_eq!(inherited, vec![tf::Token::new("xformOp:translate")]);
}

#[test]
fn reference_arcs_survive_the_round_trip_to_disk() {
	let dir = tempdir().unwrap();
	run_referencing_flow(dir.path());

	let text = std::fs::read_to_string(dir.path().join("RefExample.usda")).unwrap();
	assert!(text.contains("prepend references = @./HelloWorld.usda@"));

	let layer = microusd::sdf::Layer::import(&text).unwrap();
	assert_eq!(layer.export_to_string(), text);
}
