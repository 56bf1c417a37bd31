use anyhow::Result;
use release_manager_core::annotations;

pub fn execute() -> Result<()> {
    for (name, key) in annotations::ALL {
        println!("{name:<20} {key}");
    }
    Ok(())
}
