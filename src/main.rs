use anyhow::Result;
use clap::Parser;
use sandfall_lib::app::App;
use sandfall_lib::model::config::AppConfig;
use sandfall_lib::model::stats::{AvalancheStats, GrainStats};
use sandfall_lib::ui::renderer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Override the configured output directory
    #[arg(short, long)]
    output: Option<String>,

    /// Dump the final grid to the console
    #[arg(long)]
    ascii: bool,

    /// Print grain and avalanche statistics after the run
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "sandfall=info,sandfall_lib=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let mut config = AppConfig::load(&args.config)?;
    if let Some(output) = args.output {
        config.output.directory = output;
    }

    let mut app = App::new(config)?;
    app.run()?;

    if let Some(grid) = app.pile.grid() {
        if args.ascii {
            print!("{}", renderer::render_cells(grid));
        }
        if args.stats {
            let grains = GrainStats::measure(grid);
            let avalanches = AvalancheStats::measure(app.pile.avalanches());
            print!("{}", renderer::render_statistics(&grains, &avalanches));
        }
    }

    Ok(())
}
