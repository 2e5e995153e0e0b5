//! Interactive support chat in the terminal.
//!
//! Set MINDMATE_API_KEY in your environment and run:
//!   cargo run --example chat -p mindmate-chat -- [mood]

use std::io::Write;

use mindmate_chat::{ChatSession, MindMate, Mood, SUGGESTED_PROMPTS};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let client = MindMate::from_env()?;
    let mut session = ChatSession::new(client);

    if let Some(arg) = std::env::args().nth(1) {
        let mood: Mood = arg.parse()?;
        println!("I see you're feeling {} {} today", mood.emoji(), mood.label().to_lowercase());
        session.set_mood(Some(mood));
    }

    println!("Hi there! 💚 I'm here to listen. What's on your mind today?");
    for prompt in SUGGESTED_PROMPTS {
        println!("  - {prompt}");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\nyou> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        print!("mindmate> ");
        std::io::stdout().flush()?;

        let result = session
            .send(&line, |delta| {
                print!("{delta}");
                let _ = std::io::stdout().flush();
            })
            .await;

        if let Err(err) = result {
            eprintln!("\n{}", err.user_message());
        } else {
            println!();
        }
    }

    Ok(())
}
