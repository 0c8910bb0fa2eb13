use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
struct Options {
    /// Path to the .hwr or .ht file
    input: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let options = Options::parse();

    let data = std::fs::read(&options.input)?;
    let file = humminbird::decode_file(&data)?;

    println!("Waypoints: {}", file.waypoints.len());
    for wpt in file.waypoints.iter().take(10) {
        println!(
            "  {:?} lat={:.6} lon={:.6} depth={:?} icon={:?}",
            wpt.name, wpt.latitude, wpt.longitude, wpt.depth, wpt.icon
        );
    }

    println!("Routes: {}", file.routes.len());
    for route in &file.routes {
        println!("  {:?} ({} points)", route.name, route.points.len());
    }

    println!("Tracks: {}", file.tracks.len());
    for track in &file.tracks {
        println!(
            "  [{}] {:?} ({} points)",
            track.number,
            track.name,
            track.points.len()
        );
    }

    Ok(())
}
