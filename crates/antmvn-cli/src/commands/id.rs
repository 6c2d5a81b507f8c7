//! Id command - print the generated id of a repository URL

use crate::error::Result;

pub fn run(url: &str) -> Result<()> {
    println!("{}", antmvn_repo::id::generate(url));
    Ok(())
}
