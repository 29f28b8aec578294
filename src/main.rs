// Factory Autonomous Agent - Main Entry Point
// Goal-driven planning over an external factory simulation

use clap::Parser;
use factorio_agent::{
    foreman::CycleOutcome, output_broker, verbosity, ConfigManager, Foreman, HttpEnvironment,
    DEFAULT_CONFIG_FILE,
};

#[derive(Parser, Debug)]
#[command(name = "factorio_agent", about = "Autonomous factory-building agent")]
struct Args {
    /// Configuration file path
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    /// Override the target goal id from the config
    #[arg(long)]
    target: Option<String>,

    /// Override the simulation server URL from the config
    #[arg(long)]
    server_url: Option<String>,

    /// Output verbosity (0=quiet, 1=basic, 2=full)
    #[arg(short, long, default_value_t = 1)]
    verbosity: u8,

    /// Print the plan for the current goal and exit without executing
    #[arg(long)]
    plan_only: bool,

    /// Stop after this many cycles (default: run until complete or stuck)
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Log every environment request/response to api_debug.log
    #[arg(long)]
    log_api: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    verbosity::set_verbosity_level(args.verbosity);
    output_broker::init_output_broker();

    println!("🏭 Factory Autonomous Agent Starting...");

    let manager = ConfigManager::new(&args.config)?;
    let mut config = manager.config().clone();
    if let Some(target) = args.target {
        config.goal.target = target;
    }
    if let Some(url) = args.server_url {
        config.environment.base_url = url;
    }
    config.validate().map_err(|e| format!("invalid configuration: {}", e))?;

    let mut env = HttpEnvironment::new(
        &config.environment.base_url,
        config.environment.request_timeout_seconds,
    )?;
    env.set_api_logging(args.log_api);

    let mut foreman = Foreman::new(Box::new(env), config.clone());

    if args.plan_only {
        return print_plan(&mut foreman).await;
    }

    foreman = foreman.with_hot_reload(manager);

    println!("🎯 Target goal: {}", config.goal.target);
    println!("🚀 Starting continuous autonomous operations (Ctrl+C to stop)");

    match foreman.run_continuous(args.max_cycles).await {
        Ok(CycleOutcome::Complete) => {
            println!("\n🎉 Target goal achieved!");
            Ok(())
        }
        Ok(CycleOutcome::Stuck) => {
            println!("\n🧱 Agent is stuck: no workable goal remains.");
            println!("{}", foreman.goals().tree_summary());
            Err("no progress possible".into())
        }
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("\n❌ Autonomous operations failed: {}", e);
            Err(e)
        }
    }
}

/// Observe once, plan the current goal and print the generated script.
async fn print_plan(foreman: &mut Foreman) -> Result<(), Box<dyn std::error::Error>> {
    use factorio_agent::GoalSelection;

    let outcome = foreman.run_plan_preview().await?;
    match outcome {
        GoalSelection::Complete => println!("🎉 Target goal already complete - nothing to plan"),
        GoalSelection::Stuck => println!("🧱 No workable goal - nothing to plan"),
        GoalSelection::Work(_) => {}
    }
    Ok(())
}
