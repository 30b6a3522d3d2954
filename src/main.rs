use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use viewkit::config::Config;
use viewkit::dom::Document;
use viewkit::logging;
use viewkit::resource::{HttpResource, Resource};
use viewkit::timer::{Timer, TokioTimer, VirtualTimer};
use viewkit::ui::calendar::{decode_events, Calendar, GridRenderer};
use viewkit::ui::carousel::{Carousel, CarouselItem, CarouselTimer, ItemRenderer};

#[derive(Parser)]
#[command(name = "viewkit", version)]
#[command(about = "Render calendar and carousel widgets as markup", long_about = None)]
struct Cli {
    /// Config file (defaults to the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print one month's calendar grid
    Calendar {
        #[arg(long, requires = "month")]
        year: Option<i32>,

        /// One-based month
        #[arg(long, requires = "year", value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// JSON file holding an array of events
        #[arg(long, conflicts_with = "fetch")]
        events: Option<PathBuf>,

        /// Fetch events from the configured endpoint
        #[arg(long)]
        fetch: bool,
    },
    /// Rotate a carousel of titled items
    Carousel {
        #[arg(required = true)]
        items: Vec<String>,

        /// Auto-advances to simulate on a virtual clock
        #[arg(long, default_value_t = 3)]
        steps: usize,

        /// Run on the real clock for this many seconds instead
        #[arg(long)]
        live: Option<u64>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        logging::init_stderr();
    } else {
        logging::init_tracing();
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Command::Calendar {
            year,
            month,
            events,
            fetch,
        } => run_calendar(&config, year.zip(month), events, fetch).await,
        Command::Carousel { items, steps, live } => match live {
            Some(seconds) => run_carousel_live(&config, items, Duration::from_secs(seconds)).await,
            None => run_carousel_steps(&config, items, steps),
        },
    }
}

fn document_with_root(id: &str) -> Result<Document> {
    let mut document = Document::new();
    let body = document.body();
    document.append_markup(body, &format!(r#"<div id="{id}"></div>"#))?;
    Ok(document)
}

async fn run_calendar(
    config: &Config,
    month: Option<(i32, u32)>,
    events_file: Option<PathBuf>,
    fetch: bool,
) -> Result<()> {
    let resource: Arc<dyn Resource> = Arc::new(
        HttpResource::new(config.http.base_url.clone(), config.http.timeout())
            .context("Failed to build HTTP client")?,
    );
    let mut calendar = Calendar::new(
        document_with_root("calendar")?,
        "calendar",
        &config.calendar.events_url,
        resource,
        GridRenderer,
    )?;

    if let Some((year, month)) = month {
        let date = NaiveDate::from_ymd_opt(year, month, 1)
            .with_context(|| format!("{year}-{month} is not a valid month"))?;
        calendar.set_date(date);
    }

    if let Some(path) = events_file {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read events file '{}'", path.display()))?;
        let events = decode_events(serde_json::from_str(&content)?)?;
        calendar.set_calendar_view(&events)?;
    } else if fetch {
        calendar.reload().await?;
    } else {
        calendar.set_calendar_view(&[])?;
    }

    println!("{}", calendar.document().inner_html(calendar.root()));
    Ok(())
}

fn titled(items: Vec<String>) -> Vec<CarouselItem> {
    items.into_iter().map(CarouselItem::titled).collect()
}

fn print_current<T>(label: &str, carousel: &Carousel<CarouselItem, ItemRenderer, T>) {
    if let Some(item) = carousel.current_item() {
        println!("{label}: [{}] {}", carousel.index(), item.title);
    }
}

fn run_carousel_steps(config: &Config, items: Vec<String>, steps: usize) -> Result<()> {
    let timing = config.carousel.timing();
    let mut carousel = Carousel::with_timing(
        document_with_root("carousel")?,
        "carousel",
        ItemRenderer,
        titled(items),
        VirtualTimer::new(),
        timing,
    )?;
    print_current("start", &carousel);
    if !carousel.is_rotating() {
        return Ok(());
    }

    for step in 1..=steps {
        let fired = carousel.timer_mut().advance(timing.advance_delay);
        for token in fired {
            carousel.on_timer(token)?;
        }
        print_current(&format!("step {step}"), &carousel);
    }
    Ok(())
}

async fn run_carousel_live(config: &Config, items: Vec<String>, duration: Duration) -> Result<()> {
    let (timer, mut fired) = TokioTimer::new();
    let mut carousel = Carousel::with_timing(
        document_with_root("carousel")?,
        "carousel",
        ItemRenderer,
        titled(items),
        timer,
        config.carousel.timing(),
    )?;
    print_current("start", &carousel);

    let deadline = tokio::time::sleep(duration);
    tokio::pin!(deadline);
    loop {
        tokio::select! {
            Some(token) = fired.recv() => {
                carousel.on_timer(token)?;
                if token == CarouselTimer::AutoAdvance {
                    print_current("advanced", &carousel);
                }
            }
            _ = &mut deadline => break,
        }
    }
    carousel.timer_mut().cancel(&CarouselTimer::AutoAdvance);
    Ok(())
}
