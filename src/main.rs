use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use relplan::{
    compile_json, compile_predicate,
    config::{self, OutputFormat},
    CompiledPredicate,
};

/// relplan - compile a search predicate into a relation expression
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Predicate text, e.g. 'match_all: { geq: ["salaries.salary", 60000] }'.
    /// Read from --file or stdin when omitted.
    predicate: Option<String>,

    /// Read the predicate from a file
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// Input is a JSON predicate AST instead of DSL text
    #[arg(long)]
    json: bool,

    /// YAML compiler configuration. When omitted, settings come from
    /// RELPLAN_ALIAS_FILE, RELPLAN_STRICT_IDENTIFIERS and RELPLAN_OUTPUT.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// YAML file mapping short identifiers to dotted relation paths
    #[arg(long)]
    aliases: Option<String>,

    /// Reject identifiers with empty path segments
    #[arg(long)]
    strict: bool,

    /// What to print: expression, tree or full
    #[arg(long)]
    output: Option<OutputFormat>,
}

impl From<&Cli> for config::CliConfig {
    fn from(cli: &Cli) -> Self {
        config::CliConfig {
            alias_file: cli.aliases.clone(),
            strict_identifiers: cli.strict,
            output_format: cli.output,
        }
    }
}

fn read_input(cli: &Cli) -> anyhow::Result<String> {
    if let Some(predicate) = &cli.predicate {
        return Ok(predicate.clone());
    }
    if let Some(path) = &cli.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("reading predicate from {}", path.display()));
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("reading predicate from stdin")?;
    Ok(buf)
}

fn render(compiled: &CompiledPredicate, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Expression => compiled.expression().to_string(),
        OutputFormat::Tree => serde_json::to_string_pretty(compiled.relation.tree())?,
        OutputFormat::Full => serde_json::to_string_pretty(compiled)?,
    })
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = config::CompilerConfig::load(cli.config.as_deref(), (&cli).into())?;
    let aliases = config.load_aliases()?;
    let options = config.compile_options();
    let input = read_input(&cli)?;

    let compiled = if cli.json {
        let value: serde_json::Value =
            serde_json::from_str(&input).context("predicate is not valid JSON")?;
        compile_json(&value, aliases.as_ref(), &options)?
    } else {
        compile_predicate(&input, aliases.as_ref(), &options)?
    };

    println!("{}", render(&compiled, config.output_format)?);
    Ok(())
}

fn main() {
    // Defaults to WARN, can be overridden with RUST_LOG env var
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
