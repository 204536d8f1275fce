use microusd::{tf, tutorial, usd::Stage, usd_geom};
use tempfile::tempdir;

fn traversed_paths<'a>(range: impl Iterator<Item = microusd::usd::Prim<'a>>) -> Vec<String> {
	range.map(|prim| prim.path().to_string()).collect()
}

fn open_ref_example(dir: &std::path::Path) -> Stage {
	tutorial::hello_world(dir).unwrap();
	tutorial::inspect_and_author_properties(dir).unwrap();
	tutorial::referencing_layers(dir).unwrap();
	Stage::open(dir.join("RefExample.usda")).unwrap()
}

#[test]
fn default_traversal_is_depth_first() {
	let dir = tempdir().unwrap();
	let stage = open_ref_example(dir.path());

	assert_eq!(
		traversed_paths(stage.traverse()),
		vec![
			"/refSphere",
			"/refSphere/world",
			"/refSphere2",
			"/refSphere2/world",
		]
	);
}

#[test]
fn traversal_filtered_by_schema_type() {
	let dir = tempdir().unwrap();
	let stage = open_ref_example(dir.path());

	let spheres: Vec<String> = stage
		.traverse()
		.filter(|prim| prim.is_a(&usd_geom::TOKENS.sphere))
		.map(|prim| prim.path().to_string())
		.collect();
	assert_eq!(spheres, vec!["/refSphere/world", "/refSphere2/world"]);
}

#[test]
fn pre_and_post_visit_yields_each_prim_twice() {
	let dir = tempdir().unwrap();
	let stage = open_ref_example(dir.path());

	let pseudo_root = stage.pseudo_root();
	let visits: Vec<(String, bool)> = stage
		.pre_and_post_visit(&pseudo_root)
		.map(|(prim, is_post_visit)| (prim.path().to_string(), is_post_visit))
		.collect();

	// Four prims plus the pseudo-root, each visited twice.
	assert_eq!(visits.len(), 10);
	assert_eq!(visits.first().unwrap(), &("/".to_string(), false));
	assert_eq!(visits.last().unwrap(), &("/".to_string(), true));
	assert_eq!(
		visits[1..5],
		[
			("/refSphere".to_string(), false),
			("/refSphere/world".to_string(), false),
			("/refSphere/world".to_string(), true),
			("/refSphere".to_string(), true),
		]
	);
}

#[test]
fn pre_and_post_visit_count_scales_with_the_tree() {
	let stage = Stage::create_in_memory();
	let xform = tf::Token::new("Xform");
	stage.define_prim("/root", &xform).unwrap();
	stage.define_prim("/root/left", &xform).unwrap();
	stage.define_prim("/root/left/leaf", &xform).unwrap();
	stage.define_prim("/root/right", &xform).unwrap();
	stage.define_prim("/root/right/leaf", &xform).unwrap();

	let pseudo_root = stage.pseudo_root();
	let visits = stage.pre_and_post_visit(&pseudo_root).count();

	// Five prims plus the pseudo-root, each visited twice.
	assert_eq!(visits, 12);
}

#[test]
fn deactivation_prunes_the_subtree() {
	let dir = tempdir().unwrap();
	let stage = open_ref_example(dir.path());

	// An override carrying active=false over the composed prim.
	stage
		.override_prim("/refSphere2")
		.unwrap()
		.set_active(false)
		.unwrap();

	assert_eq!(
		traversed_paths(stage.traverse()),
		vec!["/refSphere", "/refSphere/world"]
	);

	// The inactive prim itself is still enumerable; its children are
	// never composed.
	assert_eq!(
		traversed_paths(stage.traverse_all()),
		vec!["/refSphere", "/refSphere/world", "/refSphere2"]
	);
}
