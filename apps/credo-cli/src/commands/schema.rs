// schema.rs — `credo schema`: emit the published registry schema documents.

use std::fs;
use std::path::Path;

use credo_registry::{behavior_schema, charter_schema};

pub fn execute(out: Option<&Path>) -> anyhow::Result<()> {
    let charter = serde_json::to_string_pretty(&charter_schema())?;
    let behavior = serde_json::to_string_pretty(&behavior_schema())?;

    match out {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            fs::write(dir.join("charter.schema.json"), &charter)?;
            fs::write(dir.join("behavior.schema.json"), &behavior)?;
            println!("Wrote charter.schema.json and behavior.schema.json to {}", dir.display());
        }
        None => {
            println!("{}", charter);
            println!("{}", behavior);
        }
    }
    Ok(())
}
