use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use data_loader::Feature;
use pipeline::{RawPreferences, Recommendation};
use rand::Rng;
use server::{DirectoryLoader, RecommendationService};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::info;

/// SongRecs - find songs that match the audio features you like
#[derive(Parser)]
#[command(name = "song-recs")]
#[command(about = "Song recommendations by nearest neighbours in audio-feature space", long_about = None)]
struct Cli {
    /// Directory holding spotify_data.json and scaler_params.json
    #[arg(short, long, default_value = "data", env = "SONG_RECS_DATA_DIR")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get the top 5 songs for a set of feature preferences
    Recommend {
        #[command(flatten)]
        preferences: PreferenceArgs,

        /// Print the JSON response body instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Load the dataset, check it, and print a summary
    Validate,

    /// Show the feature names and normalization parameters
    Features,

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

/// Raw preference values. Every one is required by the engine; they are
/// optional here so that omissions are reported by the engine itself.
#[derive(Args, Debug)]
struct PreferenceArgs {
    /// Tempo in beats per minute
    #[arg(long)]
    bpm: Option<f64>,
    /// Danceability, 0-100
    #[arg(long)]
    danceability: Option<f64>,
    /// Mood (valence), 0-100
    #[arg(long)]
    valence: Option<f64>,
    /// Energy, 0-100
    #[arg(long)]
    energy: Option<f64>,
    /// Acousticness, 0-100
    #[arg(long)]
    acousticness: Option<f64>,
    /// Instrumentalness, 0-100
    #[arg(long)]
    instrumentalness: Option<f64>,
    /// Liveness, 0-100
    #[arg(long)]
    liveness: Option<f64>,
    /// Speechiness, 0-100
    #[arg(long)]
    speechiness: Option<f64>,
}

impl PreferenceArgs {
    fn to_raw(&self) -> RawPreferences {
        [
            (Feature::Bpm, self.bpm),
            (Feature::Danceability, self.danceability),
            (Feature::Valence, self.valence),
            (Feature::Energy, self.energy),
            (Feature::Acousticness, self.acousticness),
            (Feature::Instrumentalness, self.instrumentalness),
            (Feature::Liveness, self.liveness),
            (Feature::Speechiness, self.speechiness),
        ]
        .into_iter()
        .filter_map(|(feature, value)| value.map(|v| (feature.alias().to_string(), v)))
        .collect()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let service = Arc::new(RecommendationService::new(DirectoryLoader::new(&cli.data_dir)));

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend { preferences, json } => {
            handle_recommend(&service, &preferences, json)?
        }
        Commands::Validate => handle_validate(&service)?,
        Commands::Features => handle_features(&service)?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(service, requests, concurrent).await?,
    }

    Ok(())
}

/// Load the dataset up front so data problems are reported before anything else
fn load(service: &RecommendationService) -> Result<()> {
    let start = Instant::now();
    let songs = service
        .warm_up()
        .context("Failed to load song dataset")?;
    eprintln!("{} Loaded {} songs in {:?}", "✓".green(), songs, start.elapsed());
    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    service: &RecommendationService,
    preferences: &PreferenceArgs,
    json: bool,
) -> Result<()> {
    load(service)?;

    let recommendations = service
        .recommend(&preferences.to_raw())
        .context("Could not compute recommendations")?;

    if json {
        let body = serde_json::json!({ "recommendations": recommendations });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print_recommendations(&recommendations);
    }
    Ok(())
}

/// Handle the 'validate' command
fn handle_validate(service: &RecommendationService) -> Result<()> {
    load(service)?;
    let snapshot = service.snapshot()?;
    let catalog = snapshot.catalog();
    let params = snapshot.normalizer().params();

    println!("{}", "Dataset summary".bold().blue());
    println!("{}Songs: {}", "• ".green(), catalog.len());
    println!("{}Features per song: {}", "• ".green(), Feature::COUNT);

    let with_streams = catalog.entries().iter().filter(|e| e.streams.is_some()).count();
    println!("{}Songs with stream counts: {}", "• ".green(), with_streams);

    let years = catalog.entries().iter().map(|e| e.year);
    if let (Some(first), Some(last)) = (years.clone().min(), years.max()) {
        println!("{}Release years: {} - {}", "• ".green(), first, last);
    }

    let duplicates = catalog.duplicates().len();
    if duplicates > 0 {
        println!("{}Duplicate title/artist pairs: {}", "• ".yellow(), duplicates);
    }

    if let Some(ranges) = catalog.feature_ranges() {
        println!("Feature ranges (natural units):");
        for range in ranges {
            println!(
                "  - {:<18} {:>8.1} .. {:<8.1} (standardized {:.2} .. {:.2})",
                range.feature.label(),
                params.destandardize(range.feature, range.min),
                params.destandardize(range.feature, range.max),
                range.min,
                range.max
            );
        }
    }
    Ok(())
}

/// Handle the 'features' command
fn handle_features(service: &RecommendationService) -> Result<()> {
    load(service)?;
    let snapshot = service.snapshot()?;
    let params = snapshot.normalizer().params();

    println!(
        "{}",
        format!(
            "{:<18} {:<18} {:<20} {:>10} {:>10}",
            "label", "input name", "dataset column", "mean", "scale"
        )
        .bold()
    );
    for feature in Feature::ALL {
        println!(
            "{:<18} {:<18} {:<20} {:>10.3} {:>10.3}",
            feature.label(),
            feature.alias(),
            feature.canonical_name(),
            params.mean()[feature],
            params.scale()[feature]
        );
    }
    Ok(())
}

/// Random preferences spread over each feature's natural range
fn random_preferences(rng: &mut impl Rng) -> RawPreferences {
    Feature::ALL
        .into_iter()
        .map(|feature| {
            let (lo, hi) = feature.raw_range();
            (feature.alias().to_string(), rng.random_range(lo..=hi))
        })
        .collect()
}

/// Handle the 'benchmark' command
///
/// The service is deliberately not warmed up: the first wave of requests
/// races on the lazy load.
async fn handle_benchmark(
    service: Arc<RecommendationService>,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    if requests == 0 || concurrent == 0 {
        bail!("requests and concurrent must both be at least 1");
    }

    let payloads: Vec<RawPreferences> = {
        let mut rng = rand::rng();
        (0..requests).map(|_| random_preferences(&mut rng)).collect()
    };

    info!("Running {} requests, {} at a time", requests, concurrent);
    let limiter = Arc::new(Semaphore::new(concurrent));
    let wall_clock = Instant::now();

    let mut handles = vec![];
    for raw in payloads {
        let service = service.clone();
        let permit = limiter.clone().acquire_owned().await?;
        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let start = Instant::now();
            service.recommend(&raw)?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings: Vec<Duration> = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }
    let total_time = wall_clock.elapsed();

    let busy_time: Duration = timings.iter().sum();
    let avg_latency = busy_time / (timings.len() as u32);
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[(timings.len() as f32 * 0.95) as usize];
    let p99 = timings[(timings.len() as f32 * 0.99) as usize];
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", requests, concurrent);
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[Recommendation]) {
    println!("{}", "Song Recommendations:".bold().blue());
    if recommendations.is_empty() {
        println!("  (the catalog is empty)");
        return;
    }
    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} - {} ({}) {}",
            (i + 1).to_string().green(),
            rec.track_name.bold(),
            rec.artist_name,
            rec.year,
            format!("[{} match]", rec.match_score).cyan()
        );
        println!("   {}", rec.spotify_link.dimmed());
    }
}
