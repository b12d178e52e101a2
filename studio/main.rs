/// ferrite-playground Studio
///
/// A JSON-over-HTTP surface for the playground engine: pick a dataset, shape
/// a network, train it step by step or in the background, and sample its
/// decision field. Served by a synchronous tiny_http server.
///
/// Run with:
///   cargo run --bin studio --release [config.json]
/// The config path may also come from PLAYGROUND_CONFIG.
///
/// Routes:
///   GET  /state          POST /dataset      POST /network
///   POST /train/start    POST /train/stop   POST /step
///   GET  /predict?resolution=N              GET  /train/events (SSE)

mod config;
mod state;
mod routes;
mod handlers;
mod util;

use std::sync::{Arc, Mutex};

use log::error;
use tiny_http::Server;

use config::StudioConfig;
use state::StudioState;

fn main() {
    env_logger::init();

    let config = match StudioConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("could not load config: {e}");
            std::process::exit(1);
        }
    };
    let addr = config.addr.clone();

    let studio_state = match StudioState::new(config) {
        Ok(s) => s,
        Err(e) => {
            error!("invalid startup network: {e}");
            std::process::exit(1);
        }
    };

    let server = match Server::http(addr.as_str()) {
        Ok(s) => s,
        Err(e) => {
            error!("failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };

    let shared_state = Arc::new(Mutex::new(studio_state));

    println!("╔══════════════════════════════════════════════╗");
    println!("║          ferrite-playground Studio           ║");
    println!("╠══════════════════════════════════════════════╣");
    println!("║  Listening on http://{addr}");
    println!("║  GET /state for a snapshot                   ║");
    println!("╚══════════════════════════════════════════════╝");

    // Each request is dispatched on its own thread so the SSE handler
    // (which blocks for the entire training duration) does not stall
    // regular requests.
    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }
}
