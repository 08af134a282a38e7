// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Line-oriented console that drives a [`ChallengeClient`] without a GUI.
//!
//! One command per line:
//!
//! ```text
//! nav <screen>
//! login <email> <password>
//! register <email> <password>
//! accel <x> <y> <z>
//! upload <path> <name>
//! status
//! quit
//! ```

use crate::client::ChallengeClient;
use crate::models::AccelSample;
use crate::services::ChannelSensor;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// A parsed console command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Navigate(String),
    Login { email: String, password: String },
    Register { email: String, password: String },
    Accel(AccelSample),
    Upload { path: PathBuf, name: String },
    Status,
    Quit,
}

/// Errors from parsing a console line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

impl Command {
    /// Parse one line. Blank lines parse to `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (verb, args.as_slice()) {
            ("nav", [target]) => Command::Navigate(target.to_string()),
            ("nav", _) => return Err(CommandError::Usage("nav <screen>")),
            ("login", [email, password]) => Command::Login {
                email: email.to_string(),
                password: password.to_string(),
            },
            ("login", _) => return Err(CommandError::Usage("login <email> <password>")),
            ("register", [email, password]) => Command::Register {
                email: email.to_string(),
                password: password.to_string(),
            },
            ("register", _) => return Err(CommandError::Usage("register <email> <password>")),
            ("accel", [x, y, z]) => {
                let axis = |raw: &str| {
                    raw.parse::<f32>()
                        .map_err(|_| CommandError::Usage("accel <x> <y> <z>"))
                };
                Command::Accel(AccelSample::new(axis(x)?, axis(y)?, axis(z)?))
            }
            ("accel", _) => return Err(CommandError::Usage("accel <x> <y> <z>")),
            // The image name is everything after the path, spaces included
            ("upload", [path, name @ ..]) => Command::Upload {
                path: PathBuf::from(path),
                name: name.join(" "),
            },
            ("upload", _) => return Err(CommandError::Usage("upload <path> <name>")),
            ("status", []) => Command::Status,
            ("quit" | "exit", []) => Command::Quit,
            (other, _) => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

/// Read commands from `input` until EOF or `quit`.
pub async fn run<R>(
    client: &mut ChallengeClient,
    sensor: &ChannelSensor,
    input: R,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        if !execute(client, sensor, command).await {
            break;
        }
    }

    Ok(())
}

/// Run one command. Returns false when the console should stop.
pub async fn execute(client: &mut ChallengeClient, sensor: &ChannelSensor, command: Command) -> bool {
    match command {
        Command::Navigate(target) => client.navigate(&target),
        Command::Login { email, password } => client.sign_in(&email, &password).await,
        Command::Register { email, password } => client.register(&email, &password).await,
        Command::Accel(sample) => {
            sensor.push(sample);
        }
        Command::Upload { path, name } => {
            let image = match tokio::fs::read(&path).await {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Could not read image");
                    None
                }
            };
            client.upload(image, &name).await;
        }
        Command::Status => print_status(client),
        Command::Quit => return false,
    }
    true
}

fn print_status(client: &ChallengeClient) {
    let options: Vec<&str> = client
        .nav_options()
        .iter()
        .map(|item| item.screen.id())
        .collect();

    println!("screen:    {}", client.route());
    println!("signed in: {}", client.is_authenticated());
    println!("nav:       {}", options.join(" | "));
    println!("challenge: {}", client.challenge_text());

    let images = client.gallery_images();
    if images.is_empty() {
        println!("gallery:   No images uploaded yet. Please upload an image.");
    } else {
        for image in images {
            println!("gallery:   Challenge: {} <{}>", image.name, image.url);
        }
    }
}
