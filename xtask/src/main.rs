use anyhow::Context;
use clap::{Parser, Subcommand};
use fs_err as fs;
use patchfold_types::schema;
use std::path::Path;
use std::process::Command as ProcessCommand;

#[derive(Debug, Parser)]
#[command(name = "xtask", about = "Workspace helper tasks")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print on-disk format constants used by patchfold.
    PrintSchemas,
    /// Create a profile directory layout with a starter base version.
    InitProfile {
        #[arg(long, default_value = "profile")]
        dir: String,
    },
    /// Run the cucumber acceptance suite.
    Bdd,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::PrintSchemas => {
            println!("order file version: {}", schema::ORDER_FILE_VERSION);
            println!(
                "binary cache: {} v{}",
                String::from_utf8_lossy(schema::BINARY_CACHE_MAGIC),
                schema::BINARY_CACHE_VERSION
            );
            println!("launcher version: {}", schema::CURRENT_LAUNCHER_VERSION);
        }
        Command::InitProfile { dir } => {
            init_profile(Path::new(&dir))?;
            println!("initialized {dir}/{{versions,patches,cache}}");
        }
        Command::Bdd => {
            let status = ProcessCommand::new("cargo")
                .args(["test", "-p", "patchfold-bdd", "--test", "cucumber"])
                .status()
                .context("run cucumber suite")?;
            if !status.success() {
                anyhow::bail!("bdd failed");
            }
        }
    }
    Ok(())
}

fn init_profile(dir: &Path) -> anyhow::Result<()> {
    for sub in ["versions", "patches", "cache"] {
        let path = dir.join(sub);
        fs::create_dir_all(&path).with_context(|| format!("create {}", path.display()))?;
    }

    let base = dir.join("versions").join("base.json");
    if !base.exists() {
        let doc = serde_json::json!({
            "id": "base",
            "fileId": "net.minecraft",
            "order": -2,
            "mainClass": "net.minecraft.client.main.Main",
            "libraries": []
        });
        fs::write(&base, serde_json::to_string_pretty(&doc)? + "\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_profile_creates_layout_and_keeps_existing_base() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("p");

        init_profile(&root).unwrap();
        assert!(root.join("patches").is_dir());
        assert!(root.join("cache").is_dir());
        let base = root.join("versions").join("base.json");
        let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&base).unwrap()).unwrap();
        assert_eq!(v["fileId"], "net.minecraft");

        fs::write(&base, "{}").unwrap();
        init_profile(&root).unwrap();
        assert_eq!(fs::read_to_string(&base).unwrap(), "{}");
    }
}
