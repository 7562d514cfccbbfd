use std::io::{self, BufRead, Write};

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use faqbot_chat::{decode_query, ChatSession, FaqAssistant, Rating};
use faqbot_core::config::Config;
use faqbot_core::error::Error;
use faqbot_text::TfIdfMatcher;

/// Interactive FAQ chat
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = Config::load().context("loading configuration")?;
    let assistant = FaqAssistant::from_config(&config).context("building FAQ assistant")?;
    info!(entries = assistant.corpus().len(), "assistant ready");

    println!("FAQ Assistant");
    println!("=============");
    println!("Hello! Ask me anything about your account, orders, payments or our products.");
    println!("Type /help for commands.");
    println!();

    chat_loop(&assistant)
}

fn show_help() {
    println!("Commands:");
    println!("  /help            - Show this help message");
    println!("  /categories      - List FAQ categories");
    println!("  /suggest         - Show suggested questions");
    println!("  /rate up|down    - Rate the last answer");
    println!("  /history         - Print the conversation as JSON");
    println!("  /clear           - Forget the conversation");
    println!("  /quit            - Exit");
    println!("  <question>       - Ask a question");
}

fn chat_loop(assistant: &FaqAssistant<TfIdfMatcher>) -> anyhow::Result<()> {
    let mut session = ChatSession::new();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = Vec::new();

    loop {
        print!("you> ");
        io::stdout().flush()?;

        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            println!();
            break;
        }
        let text = match decode_query(&line) {
            Ok(text) => text.trim(),
            Err(e) => {
                println!("⚠️  {}", e);
                continue;
            }
        };
        if text.is_empty() {
            continue;
        }

        match text {
            "/help" | "/h" => show_help(),
            "/categories" | "/c" => {
                for c in assistant.categories() {
                    println!("  {} ({})", c.name, c.count);
                }
            }
            "/suggest" | "/s" => {
                for q in assistant.suggested_questions() {
                    println!("  • {}", q);
                }
            }
            "/history" => println!("{}", session.to_json()?),
            "/clear" => {
                session.clear();
                println!("Conversation cleared.");
            }
            "/quit" | "/q" | "quit" | "exit" => {
                println!("Goodbye!");
                break;
            }
            _ if text.starts_with("/rate") => rate_last(&mut session, text.trim_start_matches("/rate")),
            _ => match session.send(assistant, text) {
                Ok(reply) => {
                    println!("bot> {}", reply.content);
                    if let (Some(id), Some(confidence)) = (reply.faq_id, reply.confidence) {
                        println!("     (FAQ #{}, confidence {:.0}%)", id, confidence * 100.0);
                    }
                }
                Err(Error::InvalidInput(msg)) => println!("⚠️  {}", msg),
                Err(e) => return Err(e.into()),
            },
        }
    }
    Ok(())
}

fn rate_last(session: &mut ChatSession, arg: &str) {
    let rating: Rating = match arg.parse() {
        Ok(r) => r,
        Err(e) => {
            println!("⚠️  {}", e);
            return;
        }
    };
    let Some(id) = session.last_bot_message().map(|m| m.id) else {
        println!("Nothing to rate yet.");
        return;
    };
    match session.rate(id, rating) {
        Ok(()) => println!("{}", rating.acknowledgement()),
        Err(e) => warn!(error = %e, "rating failed"),
    }
}
