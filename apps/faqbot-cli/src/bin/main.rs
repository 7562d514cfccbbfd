use std::env;
use std::process;

use anyhow::{bail, Context};
use tracing::info;
use tracing_subscriber::EnvFilter;

use faqbot_chat::{FaqAssistant, FaqFilter};
use faqbot_core::config::Config;
use faqbot_core::types::FaqEntry;
use faqbot_text::TfIdfMatcher;

fn usage(bin: &str) {
    eprintln!("Usage: {} <command> [args]", bin);
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  ask <question> [--json]            Answer a question from the FAQ");
    eprintln!("  browse [--category <name>] [term]  List entries, optionally filtered");
    eprintln!("  categories                         List categories with entry counts");
    eprintln!("  show <id>                          Print one entry");
    eprintln!();
    eprintln!("Example: {} ask 'How do I reset my password?'", bin);
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let bin = args.first().map(String::as_str).unwrap_or("faqbot");
    let Some(command) = args.get(1) else {
        usage(bin);
        process::exit(1);
    };

    let config = Config::load().context("loading configuration")?;
    let assistant = FaqAssistant::from_config(&config).context("building FAQ assistant")?;
    info!(entries = assistant.corpus().len(), "assistant ready");

    let rest = &args[2..];
    match command.as_str() {
        "ask" => ask(&assistant, &config, rest),
        "browse" => browse(&assistant, rest),
        "categories" => {
            for c in assistant.categories() {
                println!("{:<24} {}", c.name, c.count);
            }
            Ok(())
        }
        "show" => {
            let id: u32 = rest
                .first()
                .context("show needs an id")?
                .parse()
                .context("id must be a number")?;
            print_entry(assistant.get(id)?, true);
            Ok(())
        }
        "help" | "--help" | "-h" => {
            usage(bin);
            Ok(())
        }
        other => {
            usage(bin);
            bail!("unknown command '{}'", other)
        }
    }
}

fn ask(assistant: &FaqAssistant<TfIdfMatcher>, config: &Config, rest: &[String]) -> anyhow::Result<()> {
    let json = rest.iter().any(|a| a == "--json");
    let question = rest.iter().filter(|a| *a != "--json").cloned().collect::<Vec<_>>().join(" ");
    let reply = assistant.ask(&question)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
        return Ok(());
    }

    println!("{}", reply.text);
    match (reply.faq_id, reply.category.as_deref()) {
        (Some(id), Some(category)) => {
            println!("\n  FAQ #{}  {}  confidence {:.0}%", id, category, reply.confidence * 100.0);
        }
        _ => println!("\n  No FAQ entry matched."),
    }

    let top_k = config.scoring()?.top_k;
    let related: Vec<_> = assistant
        .candidates(&question, top_k + 1)?
        .into_iter()
        .filter(|m| Some(m.id) != reply.faq_id)
        .take(top_k)
        .collect();
    if !related.is_empty() {
        println!("\nRelated questions:");
        for m in related {
            println!("  #{:<3} {}  (score {:.3})", m.id, m.question, m.score);
        }
    }
    Ok(())
}

fn browse(assistant: &FaqAssistant<TfIdfMatcher>, rest: &[String]) -> anyhow::Result<()> {
    let mut filter = FaqFilter::default();
    let mut terms = Vec::new();
    let mut iter = rest.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--category" | "-c" => {
                let name = iter.next().context("--category needs a value")?;
                filter = filter.category(name.clone());
            }
            _ => terms.push(arg.clone()),
        }
    }
    if !terms.is_empty() {
        filter = filter.search(terms.join(" "));
    }

    let hits = assistant.browse(&filter);
    if hits.is_empty() {
        println!("No FAQ entries match.");
    }
    for entry in &hits {
        print_entry(entry, false);
    }
    Ok(())
}

fn print_entry(entry: &FaqEntry, with_keywords: bool) {
    println!("#{} [{}] {}", entry.id, entry.category, entry.question);
    println!("    {}", entry.answer);
    if with_keywords && !entry.keywords.is_empty() {
        println!("    keywords: {}", entry.keywords.join(", "));
    }
}
