use crate::{error, info, recommend::stats::listening_stats, utils, warning};

use super::connect;

/// Prints the user's top tracks, artists and genres of the last weeks.
pub async fn stats() {
    let client = connect().await;

    let pb = utils::spinner("Fetching listening stats...");
    let result = listening_stats(&client).await;
    pb.finish_and_clear();

    let stats = match result {
        Ok(s) => s,
        Err(e) if e.is_unauthorized() => error!("{}. Please run spotmix auth", e),
        Err(e) => error!("Cannot fetch listening stats. Err: {}", e),
    };

    if let Ok(user) = client.current_user().await {
        info!("Listening stats for {}", user.display_name.unwrap_or(user.id));
    }

    print_list("Top tracks", &stats.top_tracks);
    print_list("Top artists", &stats.top_artists);

    let genres: Vec<String> = stats.top_genres.iter().map(|g| g.to_string()).collect();
    print_list("Top genres", &genres);
}

fn print_list(title: &str, entries: &[String]) {
    if entries.is_empty() {
        warning!("{}: nothing yet", title);
        return;
    }

    info!("{}:", title);
    for (i, entry) in entries.iter().enumerate() {
        println!("  {}. {}", i + 1, entry);
    }
}
