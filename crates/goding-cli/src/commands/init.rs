//! The `goding init` command.

use anyhow::Result;

use goding_core::bank::BUILTIN_BANK_TOML;

pub fn execute() -> Result<()> {
    if std::path::Path::new("goding.toml").exists() {
        println!("goding.toml already exists, skipping.");
    } else {
        std::fs::write("goding.toml", SAMPLE_CONFIG)?;
        println!("Created goding.toml");
    }

    std::fs::create_dir_all("question-banks")?;
    let bank_path = std::path::Path::new("question-banks/goding-test.toml");
    if bank_path.exists() {
        println!("question-banks/goding-test.toml already exists, skipping.");
    } else {
        std::fs::write(bank_path, BUILTIN_BANK_TOML)?;
        println!("Created question-banks/goding-test.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit question-banks/goding-test.toml to adjust questions or recommendations");
    println!("  2. Run: goding validate --bank question-banks/goding-test.toml");
    println!("  3. Run: goding take");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# goding configuration

bank = "question-banks/goding-test.toml"
# output_dir = "./goding-results"
default_format = "text"
"#;
