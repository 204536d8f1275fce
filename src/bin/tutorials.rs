use anyhow::Result;

fn main() -> Result<()> {
	env_logger::init();

	let dir = std::env::current_dir()?;
	microusd::tutorial::run_all(&dir)?;

	println!("End of main.");
	Ok(())
}
