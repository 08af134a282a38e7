// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Photo Challenge headless client
//!
//! Connects to Firebase and drives the client core from stdin, printing
//! challenge updates and notices as they arrive.

use anyhow::Context;
use photo_challenge::{
    client::ChallengeClient,
    config::Config,
    console,
    db::FirestoreDb,
    services::{ChannelSensor, FirebaseAuth, FirebaseStorage, IdentityService},
    AppState,
};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        project = %config.firebase_project_id,
        bucket = %config.storage_bucket,
        "Starting Photo Challenge client"
    );

    let db = FirestoreDb::new(&config.firebase_project_id)
        .await
        .context("Failed to connect to Firestore")?;

    let identity: Arc<dyn IdentityService> = Arc::new(FirebaseAuth::new(&config));
    let storage = FirebaseStorage::new(&config, identity.clone());
    let sensor = Arc::new(ChannelSensor::new());

    let state = Arc::new(AppState::new(
        config,
        identity,
        Arc::new(db),
        Arc::new(storage),
        sensor.clone(),
    ));

    let (mut client, mut notices) = ChallengeClient::new(state);

    // Print notices and challenge changes as they happen
    let mut challenge = client.subscribe_challenge_text();
    let printer = tokio::spawn(async move {
        loop {
            tokio::select! {
                notice = notices.recv() => match notice {
                    Some(notice) => println!("[notice] {}", notice),
                    None => break,
                },
                changed = challenge.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    println!("[challenge] {}", *challenge.borrow_and_update());
                }
            }
        }
    });

    let stdin = BufReader::new(tokio::io::stdin());
    console::run(&mut client, &sensor, stdin).await?;

    // Dropping the client releases the sensor and closes both channels
    drop(client);
    let _ = printer.await;

    tracing::info!("Client stopped");
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("photo_challenge=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
