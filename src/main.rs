use std::env;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use wayfinder::app::gen_session;
use wayfinder::search::bootstrap::ProviderReadiness;
use wayfinder::search::session::{SearchSession, SessionSnapshot, UiState};
use wayfinder::services::places_client::places_service::GOOGLE_MAPS_HOST;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    info!("Starting search session...");

    let host = env::var("GOOGLE_MAPS_HOST").unwrap_or_else(|_| GOOGLE_MAPS_HOST.to_string());
    let api_key = env::var("GOOGLE_MAPS_API_KEY").ok();

    let session = gen_session(&host, api_key);

    if session.ensure_ready().await != ProviderReadiness::Ready {
        if let UiState::Error(message) = session.snapshot().ui {
            eprintln!("{}", message);
        }
        std::process::exit(1);
    }

    println!("Type to search. Commands: /select <n>, /history, /clear, /quit");
    session.on_focus();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        match line {
            "/quit" => break,
            "/clear" => session.clear(),
            "/history" => {
                session.on_input("").await;
                session.on_focus();
            }
            _ if line.starts_with("/select") => {
                select(&session, line.trim_start_matches("/select")).await;
            }
            text => session.on_input(text).await,
        }
        render(&session.snapshot(), session.take_notice());
    }
}

async fn select(session: &SearchSession, arg: &str) {
    let picked = match arg.trim().parse::<usize>() {
        Ok(n) if n > 0 => n,
        _ => {
            println!("Usage: /select <number>");
            return;
        }
    };

    let snapshot = session.snapshot();
    let place_id = match snapshot.ui {
        UiState::ShowingPredictions => {
            snapshot.predictions.get(picked - 1).map(|p| p.place_id.clone())
        }
        UiState::ShowingHistory => snapshot.history.get(picked - 1).map(|e| e.place_id.clone()),
        _ => None,
    };

    match place_id {
        Some(place_id) => session.on_select(&place_id).await,
        None => println!("Nothing to select"),
    }
}

fn render(snapshot: &SessionSnapshot, notice: Option<String>) {
    if let Some(notice) = notice {
        println!("! {}", notice);
    }

    match &snapshot.ui {
        UiState::Loading => println!("Loading..."),
        UiState::Idle => {
            if !snapshot.query.is_empty() {
                println!("No matches for {:?}", snapshot.query);
            }
        }
        UiState::ShowingHistory => {
            println!("Recent searches:");
            for (i, entry) in snapshot.history.iter().enumerate() {
                println!("  {}. {}", i + 1, entry.name);
            }
        }
        UiState::ShowingPredictions => {
            for (i, prediction) in snapshot.predictions.iter().enumerate() {
                println!(
                    "  {}. {} ({})",
                    i + 1,
                    prediction.main_text,
                    prediction.secondary_text
                );
            }
        }
        UiState::Selected => {
            if let Some(place) = &snapshot.selected {
                println!("{}", place.name);
                println!("{}", place.formatted_address);
                if let Some(phone) = &place.phone {
                    println!("{}", phone);
                }
                if let Some(rating) = place.rating {
                    println!("{} stars ({} reviews)", rating, place.rating_count.unwrap_or(0));
                }
            }
            if let Some(map) = &snapshot.map {
                println!(
                    "Map centered at ({}, {}), zoom {}",
                    map.center().lat,
                    map.center().lng,
                    map.zoom()
                );
            }
        }
        UiState::Error(message) => println!("{}", message),
    }
}
