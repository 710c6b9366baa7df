use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::anyhow;
use clap::Parser as ClapParser;
use clap::Subcommand;
use indexmap::IndexMap;
use serde::Serialize;
use sqlclauses::{ClauseKind, DecomposerConfig, Decomposition, QueryDecomposer, SelectClauses};

#[derive(clap::Parser)]
#[command(name = "sqlclauses")]
#[command(about = "SQL SELECT clause extractor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract every clause from one or more SQL files.
    Decompose(DecomposeCommand),
    /// Extract a single clause from a SQL file.
    Clause(ClauseCommand),
}

#[derive(clap::Args)]
struct ConfigArgs {
    /// Path to a TOML file with decomposer options.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Accept statements that do not start with `select`.
    #[arg(long)]
    lenient: bool,
}

#[derive(clap::Args)]
struct DecomposeCommand {
    #[command(flatten)]
    config: ConfigArgs,
    /// Path to the SQL file or directory containing SQL files, `-` for stdin.
    #[arg(value_name = "SQL_[FILE|DIR]")]
    sql: PathBuf,
    /// Pretty-print the output.
    #[arg(long)]
    pretty: bool,
}

#[derive(clap::Args)]
struct ClauseCommand {
    #[command(flatten)]
    config: ConfigArgs,
    /// Clause to extract (select, from, join, where, having, group_by, order_by,
    /// limit, offset, subquery).
    kind: ClauseKind,
    /// Path to the SQL file, `-` for stdin.
    #[arg(value_name = "SQL_FILE")]
    sql: PathBuf,
}

#[derive(Serialize)]
#[serde(untagged)]
enum OutDecomposition {
    Ok(Decomposition),
    ErrDecomposition { error: String },
}

fn load_config(args: &ConfigArgs) -> anyhow::Result<DecomposerConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let content = std::fs::read_to_string(path).map_err(|_| {
                anyhow!("Failed to read config file: {}", path.display().to_string())
            })?;
            toml::from_str(&content).map_err(|err| {
                anyhow!(
                    "Failed to parse TOML config in file {} due to error: {}",
                    path.display().to_string(),
                    err
                )
            })?
        }
        None => DecomposerConfig::default(),
    };
    if args.lenient {
        config.strict = false;
    }
    log::debug!("Using config: {:?}", config);
    Ok(config)
}

fn read_sql(sql_path: &Path) -> anyhow::Result<String> {
    if sql_path == Path::new("-") {
        let mut sql = String::new();
        std::io::stdin().read_to_string(&mut sql)?;
        return Ok(sql);
    }
    std::fs::read_to_string(sql_path)
        .map_err(|_| anyhow!("Failed to read sql file {}", sql_path.display().to_string()))
}

fn output_decomposition(
    config: &DecomposerConfig,
    sql_file_path: &Path,
) -> anyhow::Result<OutDecomposition> {
    let sql = read_sql(sql_file_path)?;
    let out = match QueryDecomposer::with_config(&sql, config) {
        Ok(decomposer) => OutDecomposition::Ok(decomposer.decompose()),
        Err(err) => OutDecomposition::ErrDecomposition {
            error: format!(
                "Could not decompose SQL in file {} due to error: {}",
                sql_file_path.display(),
                err
            ),
        },
    };
    Ok(out)
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    if pretty {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(serde_json::to_string(value)?)
    }
}

fn decompose(command: &DecomposeCommand) -> anyhow::Result<String> {
    let config = load_config(&command.config)?;
    let sql_file_or_dir = &command.sql;
    if sql_file_or_dir.is_dir() {
        let mut file_decompositions: IndexMap<String, OutDecomposition> = IndexMap::new();
        let sql_in_dir: Vec<_> = std::fs::read_dir(sql_file_or_dir)?
            .filter_map(|res| res.ok())
            .map(|entry| entry.path())
            .filter(|file| file.extension().is_some_and(|ext| ext == "sql"))
            .collect();

        for sql_file in sql_in_dir {
            let out = output_decomposition(&config, &sql_file)?;
            file_decompositions.insert(
                std::path::absolute(&sql_file)?.display().to_string(),
                out,
            );
        }
        to_json(&file_decompositions, command.pretty)
    } else {
        let out = output_decomposition(&config, sql_file_or_dir)?;
        to_json(&out, command.pretty)
    }
}

fn clause(command: &ClauseCommand) -> anyhow::Result<String> {
    let config = load_config(&command.config)?;
    let sql = read_sql(&command.sql)?;
    let decomposer = QueryDecomposer::with_config(&sql, &config)?;
    let value = match command.kind {
        ClauseKind::Select => serde_json::to_value(decomposer.columns()?)?,
        ClauseKind::From => serde_json::to_value(decomposer.source()?)?,
        ClauseKind::Join => serde_json::to_value(decomposer.joins()?)?,
        ClauseKind::Where => serde_json::to_value(decomposer.where_clauses()?)?,
        ClauseKind::Having => serde_json::to_value(decomposer.having_clauses()?)?,
        ClauseKind::GroupBy => serde_json::to_value(decomposer.group_by_columns()?)?,
        ClauseKind::OrderBy => serde_json::to_value(decomposer.sort_columns()?)?,
        ClauseKind::Limit => serde_json::to_value(decomposer.limit()?)?,
        ClauseKind::Offset => serde_json::to_value(decomposer.offset()?)?,
        ClauseKind::Subquery => serde_json::to_value(decomposer.subqueries())?,
    };
    to_json(&value, false)
}

fn main() -> anyhow::Result<()> {
    let now = Instant::now();

    env_logger::init();
    let cli = Cli::parse();

    let out_str = match &cli.command {
        Commands::Decompose(decompose_command) => decompose(decompose_command)?,
        Commands::Clause(clause_command) => clause(clause_command)?,
    };
    println!("{}", out_str);

    let elapsed = now.elapsed();
    log::info!("Elapsed: {:.2?}", elapsed);

    Ok(())
}
