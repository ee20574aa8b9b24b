use anyhow::{anyhow, Context, Result};
use clap::{arg, ArgAction, ArgMatches, Command};
use env_logger::{Builder, Env, Target};
use log::{info, warn};
use std::{fs, path::PathBuf, time::Duration, time::Instant};

use hub_routing::evaluation::SolutionEvaluator;
use hub_routing::generator::{generate, GeneratorConfig};
use hub_routing::io::{read_problem, render_json, write_report};
use hub_routing::search::{HubSearch, SearchConfig};

fn cli() -> Command {
    Command::new("hub-routing")
        .about("Exact hub activation and capacitated delivery routing")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("solve")
                .about("Solves a problem file and writes the report")
                .arg(
                    arg!([INPUT] "Problem file")
                        .value_parser(clap::value_parser!(PathBuf))
                        .default_value("caso.txt"),
                )
                .arg(
                    arg!([OUTPUT] "Report file")
                        .value_parser(clap::value_parser!(PathBuf))
                        .default_value("solucion.txt"),
                )
                .arg(
                    arg!(--candidates <K> "Nearest pending destinations tried per step")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--exhaustive "Try every pending destination at each step")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("candidates"),
                )
                .arg(
                    arg!(--parallel "Evaluate hub subsets on all cores")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    arg!(--deadline <SECONDS> "Stop enumerating hub subsets after this long")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    arg!(--json <PATH> "Also write a JSON report")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("generate")
                .about("Generates a random problem file")
                .arg(
                    arg!([OUTPUT] "Problem file to write")
                        .value_parser(clap::value_parser!(PathBuf))
                        .default_value("caso.txt"),
                )
                .arg(
                    arg!(--nodos <N> "Number of nodes")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("10"),
                )
                .arg(
                    arg!(--hubs <N> "Number of candidate hubs")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("3"),
                )
                .arg(
                    arg!(--paquetes <N> "Number of packages")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("5"),
                )
                .arg(
                    arg!(--capacidad <N> "Truck capacity")
                        .value_parser(clap::value_parser!(i64))
                        .default_value("8"),
                )
                .arg(
                    arg!(--seed <N> "Random seed, 0 for a time-based one")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("123"),
                ),
        )
}

fn main() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stderr)
        .format_timestamp_millis()
        .init();

    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("solve", sub_m)) => solve(sub_m),
        Some(("generate", sub_m)) => generate_case(sub_m),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn solve(args: &ArgMatches) -> Result<()> {
    let input = required::<PathBuf>(args, "INPUT")?;
    let output = required::<PathBuf>(args, "OUTPUT")?;

    let problem =
        read_problem(&input).with_context(|| format!("failed to load {}", input.display()))?;
    info!(
        "loaded {}: {} nodes, {} hubs, {} packages, capacity {}",
        input.display(),
        problem.num_nodes(),
        problem.hubs().len(),
        problem.total_packages(),
        problem.capacity()
    );

    let mut config = if args.get_flag("exhaustive") {
        SearchConfig::exhaustive()
    } else {
        SearchConfig::default()
    };
    if let Some(&k) = args.get_one::<usize>("candidates") {
        config = config.with_candidate_limit(k);
    }
    if let Some(&secs) = args.get_one::<f64>("deadline") {
        let deadline = Duration::try_from_secs_f64(secs)
            .map_err(|_| anyhow!("invalid deadline: {secs}"))?;
        config = config.with_deadline(deadline);
    }
    config = config.with_parallel(args.get_flag("parallel"));

    let started = Instant::now();
    let outcome = HubSearch::new(&problem, config)?.run();
    let elapsed = started.elapsed();

    if outcome.summary.timed_out {
        warn!("search stopped at the deadline; the result may not be optimal");
    }
    let Some(best) = outcome.best else {
        info!("no solution: no hub subset can deliver every package");
        return Ok(());
    };

    for violation in SolutionEvaluator::new(&problem).evaluate(&best) {
        warn!("solution check failed: {:?}", violation.kind);
    }

    info!(
        "best total cost {:.2} (distance {:.2}, hubs {:.2}) with {} trips",
        best.total_cost(),
        best.distance_cost(),
        best.activation_cost(),
        best.num_routes()
    );

    write_report(&output, &best, elapsed)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("report written to {}", output.display());

    if let Some(path) = args.get_one::<PathBuf>("json") {
        fs::write(path, render_json(&best, elapsed)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("JSON report written to {}", path.display());
    }
    Ok(())
}

fn generate_case(args: &ArgMatches) -> Result<()> {
    let output = required::<PathBuf>(args, "OUTPUT")?;
    let config = GeneratorConfig::default()
        .with_nodes(*required::<usize>(args, "nodos")?)
        .with_hubs(*required::<usize>(args, "hubs")?)
        .with_packages(*required::<usize>(args, "paquetes")?)
        .with_capacity(*required::<i64>(args, "capacidad")?)
        .with_seed(*required::<u64>(args, "seed")?);

    let instance = generate(&config)?;
    fs::write(&output, instance.to_text())
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(
        "case written to {} ({} nodes, {} hubs, {} packages, seed {})",
        output.display(),
        instance.nodes().len(),
        instance.hubs().len(),
        instance.packages().len(),
        instance.seed()
    );
    Ok(())
}

fn required<'a, T: Clone + Send + Sync + 'static>(args: &'a ArgMatches, id: &str) -> Result<&'a T> {
    args.get_one::<T>(id)
        .ok_or_else(|| anyhow!("missing argument {id}"))
}
