use std::num::NonZeroU32;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use knit_counter::achievements::AchievementsState;
use knit_counter::config::{Config, SortOrder};
use knit_counter::projects::{Project, ProjectChange, ProjectId};
use knit_counter::{Committed, Knitbook};

#[derive(Parser, Debug)]
#[command(name = "knit-counter", version, about = "Count rows across knitting projects")]
struct Cli {
    /// Path to config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding persisted state (overrides config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// List projects
    List,
    /// Start a new project
    Add {
        name: String,
        /// Goal row count
        #[arg(long)]
        target: Option<NonZeroU32>,
    },
    /// Show one project
    Show { project: String },
    /// Knit rows (+1 by default)
    Inc {
        project: String,
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u32,
    },
    /// Take one row back
    Dec { project: String },
    /// Set the counter back to zero
    Reset { project: String },
    /// Rename a project
    Rename { project: String, name: String },
    /// Set the goal row count; omit the value to clear it
    Target {
        project: String,
        target: Option<NonZeroU32>,
    },
    /// Set the memo; omit the text to clear it
    Memo {
        project: String,
        text: Option<String>,
    },
    /// Delete a project permanently
    Delete { project: String },
    /// Show achievements and lifetime progress
    Achievements,
    /// Star or unstar a chart symbol
    Fav { symbol: String },
    /// List starred symbols
    Favs,
}

fn main() -> Result<()> {
    knit_counter::logging::init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.storage.resolved_data_dir());
    let mut book = Knitbook::open_dir(data_dir.clone())
        .with_context(|| format!("failed to open data in '{}'", data_dir.display()))?;

    run(&mut book, &config, cli.command.unwrap_or(Command::List))
}

fn run(book: &mut Knitbook, config: &Config, command: Command) -> Result<()> {
    match command {
        Command::List => list_projects(book, config.display.sort),

        Command::Add { name, target } => {
            let id = saved(book.create_project(&name, target)?);
            if let Some(project) = book.project(&id) {
                println!("Added {}", describe(project));
            }
        }

        Command::Show { project } => {
            let project = book.projects().resolve_prefix(&project)?;
            print_project(project);
        }

        Command::Inc { project, count } => {
            let id = resolve(book, &project)?;
            for _ in 0..count {
                let knitted = saved(book.knit_row(&id));
                if knitted.completed {
                    println!("🎉 Target reached!");
                }
                for achievement in &knitted.unlocked {
                    println!(
                        "{} Achievement unlocked: {} ({})",
                        achievement.icon, achievement.title, achievement.description
                    );
                }
            }
            show_counter(book, &id);
        }

        Command::Dec { project } => {
            let id = resolve(book, &project)?;
            if saved(book.unknit_row(&id)) == ProjectChange::Reopened {
                println!("Back below target, project reopened");
            }
            show_counter(book, &id);
        }

        Command::Reset { project } => {
            let id = resolve(book, &project)?;
            saved(book.reset_row(&id));
            show_counter(book, &id);
        }

        Command::Rename { project, name } => {
            let id = resolve(book, &project)?;
            saved(book.rename(&id, &name)?);
            show_counter(book, &id);
        }

        Command::Target { project, target } => {
            let id = resolve(book, &project)?;
            if saved(book.set_target(&id, target)) == ProjectChange::Reopened {
                println!("Target no longer met, project reopened");
            }
            show_counter(book, &id);
        }

        Command::Memo { project, text } => {
            let id = resolve(book, &project)?;
            saved(book.set_memo(&id, text.as_deref().unwrap_or("")));
            if let Some(project) = book.project(&id) {
                print_project(project);
            }
        }

        Command::Delete { project } => {
            let id = resolve(book, &project)?;
            let name = book.project(&id).map(|p| p.name.clone()).unwrap_or_default();
            saved(book.delete_project(&id));
            println!("Deleted {}", name);
        }

        Command::Achievements => print_achievements(book.achievements()),

        Command::Fav { symbol } => {
            if saved(book.toggle_favorite(&symbol)) {
                println!("★ {}", symbol);
            } else {
                println!("☆ {}", symbol);
            }
        }

        Command::Favs => {
            let favorites = book.favorites();
            if favorites.is_empty() {
                println!("No favorites yet");
            }
            for symbol in favorites.iter() {
                println!("★ {}", symbol);
            }
        }
    }
    Ok(())
}

/// Unwrap a committed change, warning when it was not written to disk.
fn saved<T>(committed: Committed<T>) -> T {
    let (value, persist_error) = committed.into_parts();
    if let Some(e) = persist_error {
        eprintln!("Warning: change may not survive a restart: {}", e);
    }
    value
}

fn resolve(book: &Knitbook, prefix: &str) -> Result<ProjectId> {
    Ok(book.projects().resolve_prefix(prefix)?.id.clone())
}

fn short_id(id: &ProjectId) -> &str {
    let s = id.as_str();
    s.get(..8).unwrap_or(s)
}

fn describe(project: &Project) -> String {
    let rows = match project.target_row {
        Some(target) => format!("{}/{}段", project.current_row, target),
        None => format!("{}段", project.current_row),
    };
    let done = if project.is_completed() { "  ✓" } else { "" };
    format!("{}  {}  {}{}", short_id(&project.id), project.name, rows, done)
}

fn list_projects(book: &Knitbook, sort: SortOrder) {
    let state = book.projects();
    if state.is_empty() {
        println!("No projects yet. Start one with `knit-counter add <name>`");
        return;
    }
    let projects: Vec<&Project> = match sort {
        SortOrder::Recent => state.by_recent_activity(),
        SortOrder::Created => state.projects.iter().collect(),
    };
    for project in projects {
        println!("{}", describe(project));
    }
}

fn show_counter(book: &Knitbook, id: &ProjectId) {
    if let Some(project) = book.project(id) {
        println!("{}", describe(project));
    }
}

fn print_project(project: &Project) {
    println!("{}", project.name);
    println!("  id:       {}", project.id);
    println!("  row:      {}", project.current_row);
    if let Some(target) = project.target_row {
        let remaining = project.remaining_rows().unwrap_or(0);
        let percent = project.progress_percent().unwrap_or(0.0);
        println!("  target:   {} ({} left, {:.0}%)", target, remaining, percent);
    }
    if let Some(completed_at) = project.completed_at {
        println!("  done:     {}", completed_at.to_rfc3339());
    }
    if let Some(memo) = &project.memo {
        println!("  memo:     {}", memo);
    }
    println!("  created:  {}", project.created_at.to_rfc3339());
    println!("  updated:  {}", project.updated_at.to_rfc3339());
}

fn print_achievements(state: &AchievementsState) {
    println!(
        "Total rows: {}  Projects: {}  Unlocked: {}/{} ({}%)",
        state.progress.total_rows,
        state.progress.project_count,
        state.unlocked_count(),
        state.achievements.len(),
        state.completion_percent()
    );
    for achievement in &state.achievements {
        let progress = state.progress_for(achievement);
        let icon = if achievement.unlocked { achievement.icon.as_str() } else { "🔒" };
        println!(
            "{} {}  {}/{}{}  {}",
            icon,
            achievement.title,
            progress.current,
            progress.threshold,
            achievement.condition.unit(),
            achievement.description
        );
    }
}
