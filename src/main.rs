//! Studio-rs: booking and administration server for a yoga and wellness
//! studio.

use clap::Parser;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use studio_rs::store::FsImageStore;
use studio_rs::{Args, Config, MemoryStudioStore, StudioServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug {
        Level::DEBUG
    } else if args.silent {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    // Create configuration from arguments
    let config = Config::from(args);

    // Create the server, persisting images to disk when a location is given
    let server = match config.location.clone().filter(|_| !config.in_memory) {
        Some(location) => {
            let images = Arc::new(FsImageStore::new(location.join("images")).await?);
            let store = Arc::new(MemoryStudioStore::new());
            StudioServer::with_storage(config, store, images)
        }
        None => StudioServer::new(config),
    };

    println!(
        r#"
Studio service is starting at {}

Default admin account: studio@localhost
Default access key: c3R1ZGlvLWRldi1hZG1pbi1rZXk=

Sign in with:
curl -X POST {}/api/admin/sessions -d '{{"email":"studio@localhost","key":"c3R1ZGlvLWRldi1hZG1pbi1rZXk="}}'

Press Ctrl+C to stop the server.
"#,
        server.bind_address(),
        server.base_url()
    );

    server.run().await
}
