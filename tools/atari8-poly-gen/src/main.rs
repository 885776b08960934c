use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use atari8_pokey_poly::{poly17, poly4, poly5, poly9};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "atari8-poly-gen",
    about = "Generate the POKEY polynomial-counter lookup tables (poly_N.dat)."
)]
struct Args {
    /// Directory the tables are written into
    #[arg(long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create {}", args.out_dir.display()))?;

    for (n, table) in [(4, poly4()), (5, poly5()), (9, poly9()), (17, poly17())] {
        let path = args.out_dir.join(format!("poly_{n}.dat"));
        fs::write(&path, &table).with_context(|| format!("write {}", path.display()))?;
        eprintln!("{}: {} bytes", path.display(), table.len());
    }
    Ok(())
}
