#![forbid(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use patchline_model::ContentStore;
use patchline_sitemap::{render_xml, site_paths};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "patchline-sitemap")]
#[command(about = "Generate sitemap.xml from the site content tables")]
struct Cli {
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
    #[arg(long, default_value = "https://www.patchlinedrywall.com")]
    base_url: String,
    #[arg(long, default_value = "sitemap.xml")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let store = ContentStore::load_from_dir(&cli.data_dir)
        .with_context(|| format!("load content tables from {}", cli.data_dir.display()))?;
    let paths = site_paths(&store);
    let xml = render_xml(&cli.base_url, &paths);
    std::fs::write(&cli.out, xml)
        .with_context(|| format!("write sitemap to {}", cli.out.display()))?;
    println!("wrote {} urls to {}", paths.len(), cli.out.display());
    Ok(())
}
