use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use stackflow::dump::{dump_stack, DumpOptions};
use stackflow::script::{parse_script, Card, ScriptCommand, ScriptRunner};
use stackflow::{RenderCommand, StackConfiguration};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stackflow-debug")]
#[command(about = "Replays a navigation script against a stack and prints the resulting layout")]
struct Args {
    /// Path to a script file
    script: Option<String>,

    /// Extra script line, run after the file (repeatable)
    #[arg(short = 'e', long = "exec")]
    exec: Vec<String>,

    /// JSON file with the stack configuration
    #[arg(long)]
    config: Option<String>,

    /// Override the transition duration in milliseconds
    #[arg(long)]
    duration_ms: Option<u64>,

    /// Container width
    #[arg(long, default_value_t = 320.0)]
    width: f32,

    /// Container height
    #[arg(long, default_value_t = 480.0)]
    height: f32,

    /// Run queued transitions to completion before printing
    #[arg(long)]
    settle: bool,

    /// Output format (tree, json, commands)
    #[arg(long, default_value = "tree")]
    format: String,

    /// Save output to file instead of stdout
    #[arg(long)]
    output: Option<String>,

    /// Show the constraints behind each item
    #[arg(long)]
    show_constraints: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => load_configuration(path)?,
        None => StackConfiguration::default(),
    };
    if let Some(millis) = args.duration_ms {
        config = config.with_transition_duration(Duration::from_millis(millis));
    }

    let commands = load_commands(&args)?;
    tracing::info!("Running {} command(s)", commands.len());

    let mut runner = ScriptRunner::new(config, Vec2::new(args.width, args.height)).with_debug(args.verbose);
    runner.run(&commands);
    if args.settle {
        runner.execute(&ScriptCommand::Settle);
    }

    let output_text = match args.format.as_str() {
        "tree" => generate_tree_output(&runner, &args),
        "json" => generate_json_output(&runner)?,
        "commands" => generate_command_output(&runner),
        _ => anyhow::bail!("Unknown format: {}. Use 'tree', 'json', or 'commands'", args.format),
    };

    if let Some(output_file) = &args.output {
        fs::write(output_file, output_text).with_context(|| format!("Failed to write to file: {}", output_file))?;
        println!("Output written to: {}", output_file);
    } else {
        print!("{}", output_text);
    }

    Ok(())
}

fn load_configuration(path: &str) -> Result<StackConfiguration> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read config: {}", path))?;
    let config: StackConfiguration =
        serde_json::from_str(&text).with_context(|| format!("Failed to parse config: {}", path))?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn load_commands(args: &Args) -> Result<Vec<ScriptCommand>> {
    let mut commands = Vec::new();

    if let Some(script) = &args.script {
        if !Path::new(script).exists() {
            anyhow::bail!("Script file not found: {}", script);
        }
        let source = fs::read_to_string(script).with_context(|| format!("Failed to read script: {}", script))?;
        commands.extend(parse_script(&source).with_context(|| format!("Failed to parse {}", script))?);
    }

    let inline = args.exec.join("\n");
    commands.extend(parse_script(&inline).context("Failed to parse --exec lines")?);

    if commands.is_empty() {
        anyhow::bail!("Nothing to run: pass a script file or --exec lines");
    }
    Ok(commands)
}

fn generate_tree_output(runner: &ScriptRunner, args: &Args) -> String {
    let options = DumpOptions {
        show_constraints: args.show_constraints,
        ..DumpOptions::default()
    };
    dump_stack(runner.stack(), card_label, &options)
}

fn generate_json_output(runner: &ScriptRunner) -> Result<String> {
    let stack = runner.stack();
    let layout = stack.layout();

    let items: Vec<serde_json::Value> = stack
        .items()
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let frame = layout.item_frame(item.id()).unwrap_or_default();
            let fade = stack.fade().item(item.id());
            serde_json::json!({
                "index": index,
                "name": item.content().name,
                "title": item.title(),
                "frame": frame,
                "opacity": fade.map(|f| f.opacity),
                "interactive": fade.map(|f| f.interactive).unwrap_or(false),
            })
        })
        .collect();

    let value = serde_json::json!({
        "state": stack.state().to_string(),
        "configuration": stack.configuration(),
        "content_bounds": layout.content_bounds,
        "items": items,
    });

    serde_json::to_string_pretty(&value).context("Failed to serialize stack")
}

fn generate_command_output(runner: &ScriptRunner) -> String {
    let mut output = String::new();
    for (index, batch) in runner.stack().renderer().batches().iter().enumerate() {
        output.push_str(&format!("batch {}\n", index));
        for command in batch {
            let detail = match command {
                RenderCommand::ApplyLayout { duration, .. }
                | RenderCommand::ApplyFade { duration, .. }
                | RenderCommand::FadeOutItem { duration, .. } => format!(" {}ms", duration.as_millis()),
                _ => String::new(),
            };
            output.push_str(&format!("  {}{}\n", command.name(), detail));
        }
    }
    output
}

fn card_label(card: &Card) -> String {
    card.name.clone()
}
