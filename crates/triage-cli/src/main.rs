// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow};
use config::Config;
use logging::LogTarget;
use runtime::StoreRuntime;
use std::env;
use std::path::PathBuf;
use time::OffsetDateTime;
use triage_app::{
    AppState, AssigneeFilter, PriorityFilter, SortOrder, ViewSelection, elapsed_days,
};
use triage_store::{DATE_LAYOUT, TicketStore, parse_created_at};
use triage_tui::AppRuntime;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `triage --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    let log_target = if options.list || options.check_only {
        LogTarget::Stderr
    } else {
        LogTarget::File(config.log_file()?)
    };
    logging::init(&config, log_target)?;

    let store = load_store(&options, &config)?;
    let runtime = StoreRuntime::new(&store, options.now);

    if options.check_only {
        let future = count_future_tickets(&store, runtime.now());
        if future > 0 {
            tracing::warn!(
                tickets = future,
                "tickets are dated after now and will show absolute dates"
            );
        }
        tracing::info!(tickets = store.len(), "startup check passed");
        return Ok(());
    }

    let mut state = initial_state(&config, &options);
    if options.list {
        print!(
            "{}",
            triage_tui::render_plain(&state, runtime.tickets(), runtime.now())
        );
        println!();
        return Ok(());
    }

    triage_tui::run_app(&mut state, &runtime)
}

fn load_store(options: &CliOptions, config: &Config) -> Result<TicketStore> {
    match options.tickets_path.clone().or_else(|| config.tickets_path()) {
        Some(path) => TicketStore::load_json(&path).with_context(|| {
            format!(
                "load tickets {} -- fix the file or set [data].tickets_path / --tickets",
                path.display()
            )
        }),
        None => TicketStore::seed().context("load built-in tickets"),
    }
}

/// Config defaults first, then any view flags given on the command line.
fn initial_state(config: &Config, options: &CliOptions) -> AppState {
    AppState {
        view: ViewSelection {
            priority_filter: options
                .priority
                .unwrap_or_else(|| config.default_priority()),
            sort_order: options.sort.unwrap_or_else(|| config.default_sort()),
            assignee_filter: options
                .assignee
                .clone()
                .map_or(AssigneeFilter::All, AssigneeFilter::Named),
            ..ViewSelection::default()
        },
        locale: config.locale(),
        status_line: None,
    }
}

fn count_future_tickets(store: &TicketStore, now: OffsetDateTime) -> usize {
    store
        .tickets()
        .iter()
        .filter(|ticket| elapsed_days(ticket.created_at, now).is_err())
        .count()
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    tickets_path: Option<PathBuf>,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    list: bool,
    priority: Option<PriorityFilter>,
    sort: Option<SortOrder>,
    assignee: Option<String>,
    now: Option<OffsetDateTime>,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        tickets_path: None,
        print_config_path: false,
        print_example: false,
        check_only: false,
        list: false,
        priority: None,
        sort: None,
        assignee: None,
        now: None,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = next_value(&mut iter, "--config", "a file path")?;
                options.config_path = PathBuf::from(value);
            }
            "--tickets" => {
                let value = next_value(&mut iter, "--tickets", "a file path")?;
                options.tickets_path = Some(PathBuf::from(value));
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--list" => {
                options.list = true;
            }
            "--priority" => {
                let value = next_value(
                    &mut iter,
                    "--priority",
                    "all, critical, high, medium, or low",
                )?;
                let filter = PriorityFilter::parse(&value)
                    .with_context(|| format!("invalid --priority {value:?}"))?;
                options.priority = Some(filter);
            }
            "--sort" => {
                let value = next_value(&mut iter, "--sort", "newest or oldest")?;
                let order = SortOrder::parse(&value).ok_or_else(|| {
                    anyhow!("invalid --sort {value:?}; use newest or oldest")
                })?;
                options.sort = Some(order);
            }
            "--assignee" => {
                options.assignee = Some(next_value(&mut iter, "--assignee", "a name")?);
            }
            "--now" => {
                let value = next_value(&mut iter, "--now", "a date")?;
                let now = parse_created_at(&value).ok_or_else(|| {
                    anyhow!("invalid --now {value:?}; use {DATE_LAYOUT} or RFC 3339")
                })?;
                options.now = Some(now);
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn next_value<I, S>(iter: &mut I, flag: &str, what: &str) -> Result<String>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    iter.next()
        .map(|value| value.as_ref().to_owned())
        .ok_or_else(|| anyhow!("{flag} requires {what}"))
}

fn print_help() {
    println!("triage");
    println!("  --config <path>          Use a specific config path");
    println!("  --tickets <path>         Load tickets from a JSON file instead of the built-in set");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --check                  Validate config and tickets, then exit");
    println!("  --list                   Print the grouped ticket list and exit");
    println!("  --priority <key>         Start with a priority filter (all|critical|high|medium|low)");
    println!("  --sort <order>           Start with a sort order (newest|oldest)");
    println!("  --assignee <name>        Start filtered to one assignee");
    println!("  --now <{DATE_LAYOUT}>      Treat this date as now");
    println!("  --help                   Show this help");
}
