use clap::{Parser, Subcommand};
use crossterm::event::{Event, KeyCode, KeyEventKind};
use std::process::ExitCode;
use std::time::Duration;
use tracing::error;
use widegraph::error::SimulationError;
use widegraph::graph::node::NodeId;
use widegraph::scenario::scenario::ScenarioKind;
use widegraph::search::shortest::shortest_route;
use widegraph::search::widest::{CapacityMode, widest_path};
use widegraph::simulation::config::{
    DEFAULT_CONNECTION_COUNT, DEFAULT_MAX_HOLD_TIME, DEFAULT_MIN_HOLD_TIME, DEFAULT_SEED,
    RoutingPolicy, SimulationConfig,
};
use widegraph::simulation::engine::SimulationEngine;
use widegraph::simulation::sweep::{Sweep, format_report};
use widegraph::tui::app::App;
use widegraph::tui::draw::draw_app;

#[derive(Parser)]
#[command(name = "widegraph")]
#[command(about = "Widest-path routing and call admission on capacity-limited meshes", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Blocking rate for every holding time in a range
    Sweep {
        /// Topology and request stream
        #[arg(short, long, value_enum, default_value_t = ScenarioKind::Basic)]
        scenario: ScenarioKind,

        /// Seed of the request stream and random topologies
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Requests per run
        #[arg(short = 'n', long, default_value_t = DEFAULT_CONNECTION_COUNT)]
        connections: usize,

        /// Shortest holding time, in steps
        #[arg(long, default_value_t = DEFAULT_MIN_HOLD_TIME)]
        min_hold: usize,

        /// Longest holding time, in steps
        #[arg(long, default_value_t = DEFAULT_MAX_HOLD_TIME)]
        max_hold: usize,

        /// Route selection before admission
        #[arg(short, long, value_enum, default_value_t = RoutingPolicy::Widest)]
        routing: RoutingPolicy,
    },

    /// Route one request on the unloaded topology
    Path {
        #[arg(short, long, value_enum, default_value_t = ScenarioKind::Basic)]
        scenario: ScenarioKind,

        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Source node id
        #[arg(long)]
        from: usize,

        /// Destination node id
        #[arg(long)]
        to: usize,

        #[arg(short, long, value_enum, default_value_t = RoutingPolicy::Widest)]
        algorithm: RoutingPolicy,
    },

    /// Step through a single run interactively
    Tui {
        #[arg(short, long, value_enum, default_value_t = ScenarioKind::Basic)]
        scenario: ScenarioKind,

        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        #[arg(short = 'n', long, default_value_t = DEFAULT_CONNECTION_COUNT)]
        connections: usize,

        /// Holding time, in steps
        #[arg(long, default_value_t = 10)]
        hold_time: usize,

        #[arg(short, long, value_enum, default_value_t = RoutingPolicy::Widest)]
        routing: RoutingPolicy,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // the terminal UI owns the screen, so it never logs
    if cli.debug && !matches!(cli.command, Commands::Tui { .. }) {
        tracing_subscriber::fmt()
            .with_env_filter("widegraph=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(%e, "aborted");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), SimulationError> {
    match command {
        Commands::Sweep {
            scenario,
            seed,
            connections,
            min_hold,
            max_hold,
            routing,
        } => {
            let sweep = Sweep::new(scenario, seed, min_hold..=max_hold, connections, routing)?;
            for report in sweep.run()? {
                println!("{}", format_report(&report));
            }
            Ok(())
        }
        Commands::Path {
            scenario,
            seed,
            from,
            to,
            algorithm,
        } => print_route(scenario, seed, NodeId(from), NodeId(to), algorithm),
        Commands::Tui {
            scenario,
            seed,
            connections,
            hold_time,
            routing,
        } => {
            let (graph, scenario) = scenario.build(seed)?;
            let config = SimulationConfig::new(hold_time, connections)?.with_routing(routing);
            let engine = SimulationEngine::new(graph, scenario, config)?;
            run_tui(engine)
        }
    }
}

fn print_route(
    scenario: ScenarioKind,
    seed: u64,
    source: NodeId,
    destination: NodeId,
    algorithm: RoutingPolicy,
) -> Result<(), SimulationError> {
    let (graph, _) = scenario.build(seed)?;

    match algorithm {
        RoutingPolicy::Widest | RoutingPolicy::StaticWidest => {
            let mode = if algorithm == RoutingPolicy::Widest {
                CapacityMode::Dynamic
            } else {
                CapacityMode::Static
            };
            match widest_path(&graph, source, destination, mode)? {
                Some(widest) => {
                    println!("route: {}", widest.path().describe(&graph));
                    println!("links: {}", widest.path().labels(&graph).join(", "));
                    println!("bottleneck: {}", widest.bottleneck());
                }
                None => println!("no path from {source} to {destination}"),
            }
        }
        RoutingPolicy::Shortest => match shortest_route(&graph, source, destination)? {
            Some(path) => {
                println!("route: {}", path.describe(&graph));
                println!("links: {}", path.labels(&graph).join(", "));
                println!("hops: {}", path.hop_count());
                println!("length: {}", path.length(&graph));
            }
            None => println!("no path from {source} to {destination}"),
        },
    }
    Ok(())
}

fn run_tui(engine: SimulationEngine) -> Result<(), SimulationError> {
    let mut terminal = ratatui::init();
    let mut app = App::new(engine);

    while app.running {
        terminal.draw(|frame| draw_app(frame, &app))?;

        if crossterm::event::poll(Duration::from_millis(16))? {
            match crossterm::event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') => app.running = false,
                    KeyCode::Char(' ') => app.advance(1),
                    KeyCode::Char('r') => app.advance(App::BURST),
                    _ => {}
                },
                _ => continue,
            }
        }
    }
    Ok(())
}
