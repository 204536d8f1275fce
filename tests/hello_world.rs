use microusd::{gf, sdf, tutorial, usd::Stage, usd_geom, vt};
use tempfile::tempdir;

#[test]
fn in_memory_stage_leaves_no_file() {
	let dir = tempdir().unwrap();
	let previous = std::fs::read_dir(dir.path()).unwrap().count();

	tutorial::stage_creation().unwrap();

	assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), previous);
}

#[test]
fn hello_world_authors_an_xform_and_a_sphere() {
	let dir = tempdir().unwrap();
	tutorial::hello_world(dir.path()).unwrap();

	assert!(dir.path().join("HelloWorld.usda").is_file());

	let stage = Stage::open(dir.path().join("HelloWorld.usda")).unwrap();
	let hello = stage.prim_at_path("/hello");
	let world = stage.prim_at_path("/hello/world");

	assert!(hello.is_valid());
	assert!(world.is_valid());
	assert_eq!(hello.type_name().as_str(), "Xform");
	assert_eq!(world.type_name().as_str(), "Sphere");
	assert_eq!(world.specifier(), Some(sdf::Specifier::Def));
}

#[test]
fn inspection_authors_radius_extent_and_color() {
	let dir = tempdir().unwrap();
	tutorial::hello_world(dir.path()).unwrap();
	tutorial::inspect_and_author_properties(dir.path()).unwrap();

	let stage = Stage::open(dir.path().join("HelloWorld.usda")).unwrap();
	let sphere = usd_geom::Sphere::get(&stage, "/hello/world").unwrap();

	assert_eq!(sphere.radius(), 2.0);
	assert_eq!(
		sphere.extent(),
		vec![
			gf::Vec3f::new(-2.0, -2.0, -2.0),
			gf::Vec3f::new(2.0, 2.0, 2.0),
		]
	);

	let color = stage
		.prim_at_path("/hello/world")
		.attribute(&usd_geom::TOKENS.display_color)
		.get::<vt::Array<gf::Vec3f>>();
	assert_eq!(color, vec![gf::Vec3f::new(0.0, 0.0, 1.0)]);

	// The radius attribute must be typed as double to match the schema.
	let radius = stage
		.prim_at_path("/hello/world")
		.attribute(&usd_geom::TOKENS.radius);
	assert_eq!(radius.type_name().as_str(), "double");
}

#[test]
fn authoring_the_wrong_value_type_is_rejected() {
	let dir = tempdir().unwrap();
	tutorial::hello_world(dir.path()).unwrap();

	let stage = Stage::open(dir.path().join("HelloWorld.usda")).unwrap();
	let sphere = usd_geom::Sphere::get(&stage, "/hello/world").unwrap();
	let radius = sphere.radius_attr().unwrap();

	// Float against a double-typed attribute is a schema violation.
	assert!(radius.set(2.0_f32).is_err());
	assert!(radius.set(2.0_f64).is_ok());
}

#[test]
fn saved_stage_reopens_to_the_same_text() {
	let dir = tempdir().unwrap();
	tutorial::hello_world(dir.path()).unwrap();
	tutorial::inspect_and_author_properties(dir.path()).unwrap();

	let stage = Stage::open(dir.path().join("HelloWorld.usda")).unwrap();
	let exported = stage.root_layer().export_to_string();

	let reparsed = sdf::Layer::import(&exported).unwrap();
	assert_eq!(reparsed.export_to_string(), exported);
}
