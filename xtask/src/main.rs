//! Build automation tasks for Duel
//!
//! - Writing the read API's OpenAPI document to disk
//! - Generating the `duel-ingest` CLI reference from its clap definition

use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for Duel", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Write the OpenAPI document served at /openapi.json
    GenerateApiDocs {
        /// Output file
        #[arg(short, long, default_value = "docs/openapi.json")]
        output: PathBuf,
    },

    /// Generate the duel-ingest CLI reference in Markdown
    GenerateCliDocs {
        /// Output directory for generated documentation
        #[arg(short, long, default_value = "docs")]
        output_dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenerateApiDocs { output } => generate_api_docs(&output)?,
        Command::GenerateCliDocs { output_dir } => generate_cli_docs(&output_dir)?,
    }

    Ok(())
}

fn generate_api_docs(output: &Path) -> anyhow::Result<()> {
    let document = duel_server::api::docs::openapi_document();

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, serde_json::to_string_pretty(&document)? + "\n")?;

    println!("Generated OpenAPI document at: {}", output.display());
    Ok(())
}

fn generate_cli_docs(output_dir: &Path) -> anyhow::Result<()> {
    let markdown = clap_markdown::help_markdown::<duel_ingest::cli::Cli>();

    let content = format!(
        r#"# duel-ingest CLI Reference

Auto-generated from the CLI source code. Last updated: {}.

Loads every `*.json` export from the data directory into the `users` table. Malformed
files are logged and skipped; the run only fails if the directory cannot be listed or
the schema cannot be applied.

## Environment Variables

- `DATABASE_URL` - PostgreSQL connection string (required)
- `DUEL_DATA_DIR` - input directory (default: `./data`)
- `DUEL_SCHEMA_PATH` - table definition (default: `./database/20240901000000_initial_schema.sql`)
- `DUEL_MAX_FILES` - files taken per run (default: `10000`)
- `DUEL_FILE_EXTENSION` - input extension (default: `json`)
- `DUEL_INGEST_CONCURRENCY` - files in flight (default: `1`)
- `DUEL_SHOW_PROGRESS` - progress bar (default: `false`)
- `LOG_LEVEL`, `LOG_OUTPUT`, `LOG_FORMAT`, `LOG_DIR` - logging

{}

---

*To update, run `cargo xtask generate-cli-docs`.*
"#,
        chrono::Utc::now().format("%Y-%m-%d"),
        markdown
    );

    fs::create_dir_all(output_dir)?;
    let file_path = output_dir.join("duel-ingest.md");
    fs::write(&file_path, content)?;

    println!("Generated CLI documentation at: {}", file_path.display());
    Ok(())
}
