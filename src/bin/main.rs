use clap::Parser;
use crossterm::style::Stylize;
use crossterm::{cursor::MoveTo, execute, terminal::Clear, terminal::ClearType};
use pantry_core::core::ranker::Page;
use pantry_core::core::types::Resolution;
use pantry_core::persistence::load_catalog_json;
use pantry_core::{EngineConfig, PageRequest, SearchEngine};
use std::io::{stdin, stdout, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Find recipes for the ingredients you have on hand.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON catalog feed with "ingredients" and "recipes"
    #[arg(long, default_value = "data/catalog.json")]
    catalog: PathBuf,

    /// Optional JSON engine config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Binary snapshot to load on start (if present) and write on exit
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => EngineConfig::load_or_default(path)?,
        None => EngineConfig::default(),
    };
    let catalog = load_catalog_json(&args.catalog)?;
    let engine = match &args.snapshot {
        Some(path) => SearchEngine::from_snapshot_or(path, catalog, &config)?,
        None => SearchEngine::new(catalog, &config)?,
    };

    let mut request = config.page_request();
    let mut inputs: Vec<String> = Vec::new();
    let mut last: Option<(Vec<Resolution>, Page)> = None;

    loop {
        print_ui(&inputs, &request, last.as_ref())?;

        let mut line = String::new();
        if stdin().read_line(&mut line)? == 0 {
            break;
        }
        let cmd = line.trim();

        match cmd {
            "exit" => break,
            "" => continue,
            s if s.starts_with(":list") => {
                let prefix = s[":list".len()..].trim();
                let prefix = (!prefix.is_empty()).then_some(prefix);
                let names = engine.snapshot().catalog.ingredient_names(prefix, 50);
                println!("\n{}", names.join(", "));
                print!("\n[Enter] to continue ");
                stdout().flush()?;
                stdin().read_line(&mut String::new())?;
                continue;
            }
            s if s.starts_with(':') => {
                if !apply_setting(s, &mut request) {
                    continue;
                }
            }
            s => {
                inputs = split_ingredients(s);
                request.page = 1;
            }
        }

        if !inputs.is_empty() {
            let resolutions = engine.explain(&inputs);
            let page = engine.search(&inputs, &request);
            last = Some((resolutions, page));
        }
    }

    if let Err(e) = engine.save_snapshot() {
        eprintln!("[ERROR] Could not save snapshot: {}", e);
    }
    Ok(())
}

/// The caller owns delimiter parsing: commas and newlines separate entries.
fn split_ingredients(line: &str) -> Vec<String> {
    line.split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Handles `:page N`, `:limit N` and `:min X`. Returns whether anything changed.
fn apply_setting(cmd: &str, request: &mut PageRequest) -> bool {
    let mut parts = cmd[1..].split_whitespace();
    let (Some(name), Some(value)) = (parts.next(), parts.next()) else {
        return false;
    };
    let updated = match name {
        "page" => value.parse().map(|page| PageRequest { page, ..*request }),
        "limit" => value.parse().map(|limit| PageRequest { limit, ..*request }),
        "min" => match value.parse() {
            Ok(min_score) => Ok(PageRequest { min_score, ..*request }),
            Err(_) => return false,
        },
        _ => return false,
    };
    match updated {
        Ok(next) => {
            *request = next.clamped();
            true
        }
        Err(_) => false,
    }
}

fn print_ui(
    inputs: &[String],
    request: &PageRequest,
    last: Option<&(Vec<Resolution>, Page)>,
) -> std::io::Result<()> {
    let mut out = stdout();
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    println!("{}", "Pantry Search".bold());
    println!("---------------------------------------------------------------");
    println!("Type ingredients separated by commas and press [Enter].");
    println!(":page N, :limit N, :min 0.5, :list [prefix]. 'exit' to quit.\n");
    println!(
        "Input: [{}]  limit={} page={} min_score={}",
        inputs.join(", "),
        request.limit,
        request.page,
        request.min_score
    );

    if let Some((resolutions, page)) = last {
        println!("\nResolved:");
        for r in resolutions {
            match r.stage {
                Some(stage) => println!("  {} -> {} ({:?})", r.input, r.names.join(", ").green(), stage),
                None => println!("  {} -> {}", r.input, "no match".red()),
            }
        }

        if page.items.is_empty() {
            println!("\nNo recipes found.");
        } else {
            println!("\nRecipes (page {}/{}, {} total):", page.page, page.total_pages, page.total);
            for (i, recipe) in page.items.iter().enumerate() {
                let rank = (page.page - 1) * page.limit + i + 1;
                println!(
                    "  {:>3}. {} {} ({} matched)",
                    rank,
                    recipe.title.clone().bold(),
                    format!("{:.3}", recipe.score).cyan(),
                    recipe.match_count
                );
                if !recipe.missing.is_empty() {
                    println!("       missing: {}", recipe.missing.join(", ").dark_grey());
                }
            }
        }
    }
    print!("\n> ");
    out.flush()
}
