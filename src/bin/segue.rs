use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use segue::{
    BehaviourCollection, Rect, RecordingContext, RelativeWindow, Screen, ScreenRef,
    TransitionDef, TransitionDirection, TransitionRequest, ViewArena, ViewHost, ViewId, ViewNames,
};

#[derive(Parser, Debug)]
#[command(name = "segue", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the absolute animation window of every behaviour.
    Plan(PlanArgs),
    /// Run a transition headlessly in an in-memory view tree.
    Simulate(SimulateArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DirectionChoice {
    Present,
    Dismiss,
}

impl From<DirectionChoice> for TransitionDirection {
    fn from(d: DirectionChoice) -> Self {
        match d {
            DirectionChoice::Present => Self::Present,
            DirectionChoice::Dismiss => Self::Dismiss,
        }
    }
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Input transition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Direction to plan.
    #[arg(long, value_enum, default_value_t = DirectionChoice::Present)]
    direction: DirectionChoice,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input transition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Direction to run.
    #[arg(long, value_enum, default_value_t = DirectionChoice::Present)]
    direction: DirectionChoice,

    /// Frame rate of the simulated host clock.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Run interactively: scrub to this progress, then release the gesture.
    #[arg(long)]
    scrub: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

/// Give every referenced view name a placeholder id.
fn placeholder_views(def: &TransitionDef) -> ViewNames {
    def.view_names()
        .into_iter()
        .enumerate()
        .map(|(i, name)| (name.to_owned(), ViewId(i as u64)))
        .collect()
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let def = TransitionDef::from_path(&args.in_path)?;
    let built = def
        .build(&placeholder_views(&def))
        .with_context(|| format!("build '{}'", args.in_path.display()))?;
    let presenting = TransitionDirection::from(args.direction).is_presenting();

    println!(
        "transition '{}' ({:?}, {:.3}s)",
        built.config.transition_identifier, args.direction, built.config.duration
    );
    for (side, collections) in [("source", &built.source), ("destination", &built.destination)] {
        for collection in collections
            .iter()
            .filter(|c| c.transition_identifier() == built.config.transition_identifier)
        {
            for behaviour in collection.behaviours() {
                let b = behaviour.borrow();
                let window = b.timing_attrs().schedule(
                    RelativeWindow::FULL,
                    presenting,
                    built.config.duration,
                );
                println!(
                    "  {side:<11} {:<20} {:<22} delay {:>7.3}s  duration {:>7.3}s",
                    b.effect_name(),
                    if b.behaviour_identifier().is_empty() {
                        "-"
                    } else {
                        b.behaviour_identifier()
                    },
                    window.delay,
                    window.duration,
                );
            }
        }
    }
    Ok(())
}

struct SimScreen {
    root: ViewId,
    collections: Vec<BehaviourCollection>,
}

impl Screen for SimScreen {
    fn root_view(&self) -> ViewId {
        self.root
    }

    fn behaviour_collections(&self) -> &[BehaviourCollection] {
        &self.collections
    }
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.fps.is_finite() && args.fps > 0.0,
        "fps must be finite and > 0"
    );
    let def = TransitionDef::from_path(&args.in_path)?;

    let bounds = Rect::new(0.0, 0.0, 390.0, 844.0);
    let mut arena = ViewArena::new();
    let window = arena.create_view("window", bounds);
    let container = arena.create_child(window, "container", bounds);
    let source_root = arena.create_child(window, "source", bounds);
    let destination_root = arena.create_view("destination", bounds);

    let source_names = source_view_names(&def);
    let mut views = ViewNames::new();
    for name in def.view_names() {
        let parent = if source_names.iter().any(|n| n == name) {
            source_root
        } else {
            destination_root
        };
        let id = arena.create_child(parent, name, Rect::new(0.0, 0.0, 100.0, 100.0));
        views.insert(name.to_owned(), id);
    }

    let built = def
        .build(&views)
        .with_context(|| format!("build '{}'", args.in_path.display()))?;
    let orchestrator = built.orchestrator().into_handle();
    let source: ScreenRef = Rc::new(SimScreen {
        root: source_root,
        collections: built.source.clone(),
    });
    let destination: ScreenRef = Rc::new(SimScreen {
        root: destination_root,
        collections: built.destination.clone(),
    });

    let direction = TransitionDirection::from(args.direction);
    if !direction.is_presenting() {
        // A dismissal starts from the presented state.
        arena.add_child(container, source_root);
        arena.add_child(container, destination_root);
    }
    let context = RecordingContext::new(container);
    let log = context.log();
    let request = TransitionRequest {
        direction,
        source,
        destination,
        context: Box::new(context),
    };

    orchestrator.borrow_mut().set_interactive(args.scrub.is_some());
    orchestrator
        .borrow_mut()
        .begin_transition(&mut arena, request)?;

    if let Some(percent) = args.scrub {
        let mut o = orchestrator.borrow_mut();
        o.update(&mut arena, percent)?;
        if percent > built.rollback {
            o.finish(&mut arena)?;
        } else {
            o.cancel(&mut arena)?;
        }
    }

    let dt = 1.0 / args.fps;
    let mut frames = 0u64;
    while orchestrator.borrow().is_running() {
        orchestrator.borrow_mut().advance(&mut arena, dt);
        frames += 1;
        anyhow::ensure!(frames < 1_000_000, "transition never finished");
    }

    let outcome = orchestrator
        .borrow()
        .last_outcome()
        .context("run finished without an outcome")?;
    println!(
        "{:?} finished after {frames} frame(s): cancelled={} presented={} behaviours={}",
        outcome.direction, outcome.cancelled, outcome.presented, outcome.behaviours
    );
    println!("context: {:?}", log.borrow());
    println!(
        "container children: {:?}",
        arena
            .children(container)
            .iter()
            .filter_map(|v| arena.label(*v))
            .collect::<Vec<_>>()
    );
    Ok(())
}

fn source_view_names(def: &TransitionDef) -> Vec<String> {
    def.source
        .collections
        .iter()
        .flat_map(|c| c.behaviours.iter())
        .flat_map(|b| b.views.iter().cloned())
        .collect()
}
