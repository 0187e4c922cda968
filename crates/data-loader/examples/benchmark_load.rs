use data_loader::Dataset;
use std::path::Path;
use std::time::Instant;

fn main() {
    let data_dir = Path::new("data");

    println!("Loading song dataset...\n");

    let start = Instant::now();
    let dataset = Dataset::load_from_files(data_dir)
        .expect("Failed to load dataset");
    let elapsed = start.elapsed();

    let (songs, features) = dataset.counts();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Songs: {}", songs);
    println!("Features per song: {}", features);
    println!("\nPerformance: {:.0} songs/second",
             songs as f64 / elapsed.as_secs_f64());
}
