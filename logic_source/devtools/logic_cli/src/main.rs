use anyhow::{Context, bail};
use logic_runtime::{LogicConfig, LogicRuntime, NodeRegistry, SceneDesc};
use serde_json::{Map, Value};
use std::env;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = "logic.toml";

fn main() {
    let args: Vec<String> = env::args().collect();
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let Some(command) = args.get(1).map(String::as_str) else {
        print_usage();
        std::process::exit(2);
    };

    let result = match command {
        "run" => run_command(&args, &cwd),
        "nodes" => nodes_command(),
        _ => {
            print_usage();
            eprintln!("unknown command `{command}`");
            std::process::exit(2);
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  logic_cli run --scene <scene.json> [--config <logic.toml>] [--tree <name>]");
    eprintln!("  logic_cli nodes                     # list node types");
}

fn parse_flag_value(args: &[String], flag: &str) -> Option<String> {
    let idx = args.iter().position(|a| a == flag)?;
    args.get(idx + 1).cloned()
}

/// `--config` when given, else `logic.toml` next to the scene.
fn config_path(args: &[String], scene: &Path, cwd: &Path) -> PathBuf {
    match parse_flag_value(args, "--config") {
        Some(path) => cwd.join(path),
        None => scene
            .parent()
            .map(|dir| dir.join(DEFAULT_CONFIG))
            .unwrap_or_else(|| cwd.join(DEFAULT_CONFIG)),
    }
}

fn run_command(args: &[String], cwd: &Path) -> anyhow::Result<()> {
    let Some(scene_arg) = parse_flag_value(args, "--scene") else {
        print_usage();
        eprintln!("missing --scene <scene.json>");
        std::process::exit(2);
    };
    let scene_path = cwd.join(scene_arg);
    let config_path = config_path(args, &scene_path, cwd);

    let config = LogicConfig::load(&config_path)
        .with_context(|| format!("failed to read config {}", config_path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log.filter.as_str()))
        .init();

    let scene = SceneDesc::load(&scene_path)
        .with_context(|| format!("failed to load scene {}", scene_path.display()))?;
    let mut runtime = LogicRuntime::from_scene(&scene, &config)
        .with_context(|| format!("failed to build scene {}", scene_path.display()))?;

    let report = match parse_flag_value(args, "--tree") {
        Some(name) => runtime.run_tree(&name)?,
        None => {
            if runtime.trees().is_empty() {
                bail!("scene {} has no logic trees", scene_path.display());
            }
            runtime.run_all()?
        }
    };
    log::info!("executed {} nodes", report.executed.len());

    let mut bodies = Map::new();
    for (name, _, state) in runtime.body_states() {
        bodies.insert(name, serde_json::to_value(state)?);
    }
    println!("{}", serde_json::to_string_pretty(&Value::Object(bodies))?);
    Ok(())
}

fn nodes_command() -> anyhow::Result<()> {
    for name in NodeRegistry::with_builtin().names() {
        println!("{name}");
    }
    Ok(())
}
