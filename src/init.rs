use crate::db::Db;
use anyhow::Result;
use std::path::Path;

pub fn run(db_path: &Path) -> Result<()> {
    let db = Db::open(db_path)?;

    db.init()?;

    println!("Initialized {}", db_path.display());

    Ok(())
}
