//! Terminal host for pitch-accent study sessions.

mod client;
mod config;
mod input;
mod messages;
mod render;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kaki_core::{LearnerId, StudyDriver};

use crate::client::ApiClient;
use crate::config::Config;
use crate::input::{parse_choice, parse_key, Command};
use crate::messages::Lang;

type Input = Lines<BufReader<Stdin>>;

/// Where the learner goes after leaving a session.
enum Flow {
    ChangeCategory,
    Quit,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;
    tracing::info!(backend = %config.backend_url, user = ?config.username, "starting kaki");

    let client = ApiClient::new(config.backend_url.clone());
    let mut driver = match config.seed {
        Some(seed) => StudyDriver::with_seed(client, seed),
        None => StudyDriver::new(client),
    };
    let learner = config.username.clone().map(LearnerId::new);
    let lang = config.lang;
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let Some(category) = pick_category(driver.source(), lang, &mut input).await? else {
            break;
        };

        println!("{}", lang.loading());
        if let Err(error) = driver.start_session(learner.clone(), &category).await {
            println!("{error}");
        }

        match study(&mut driver, lang, &mut input).await? {
            Flow::ChangeCategory => continue,
            Flow::Quit => break,
        }
    }

    Ok(())
}

async fn pick_category(
    client: &ApiClient,
    lang: Lang,
    input: &mut Input,
) -> anyhow::Result<Option<String>> {
    let categories = client.list_categories().await?;
    if categories.is_empty() {
        println!("{}", lang.no_categories());
        return Ok(None);
    }

    loop {
        println!();
        println!("{}", lang.pick_category());
        for (i, category) in categories.iter().enumerate() {
            println!("  {}) {} ({})", i + 1, category.name, category.word_count);
        }

        let Some(line) = input.next_line().await? else {
            return Ok(None);
        };
        if matches!(line.trim(), "q" | "Q") {
            return Ok(None);
        }
        if let Some(index) = parse_choice(&line, categories.len()) {
            return Ok(Some(categories[index].name.clone()));
        }
    }
}

async fn study(
    driver: &mut StudyDriver<ApiClient>,
    lang: Lang,
    input: &mut Input,
) -> anyhow::Result<Flow> {
    let mut show_details = false;

    loop {
        let Some(session) = driver.session() else {
            return Ok(Flow::ChangeCategory);
        };

        if session.is_complete() && !session.is_halted() {
            println!();
            println!("{}", lang.complete());
            return Ok(Flow::ChangeCategory);
        }

        println!();
        if session.word().is_some() {
            println!("{}", render::question(session, lang, show_details));
        }
        let halted = session.is_halted();
        if halted {
            println!("{}", lang.halted());
        }
        let option_count = session.options().len();

        let Some(line) = input.next_line().await? else {
            return Ok(Flow::Quit);
        };

        match parse_key(&line, option_count) {
            Some(Command::Quit) => return Ok(Flow::Quit),
            Some(Command::ChangeCategory) => return Ok(Flow::ChangeCategory),
            Some(Command::ToggleDetails) => show_details = !show_details,
            Some(_) if halted => {}
            Some(Command::Select(index)) => {
                if let Err(error) = driver.select_answer(index).await {
                    println!("{error}");
                }
            }
            Some(Command::Continue) => {
                if driver.continue_to_next() {
                    show_details = false;
                }
            }
            None => {}
        }
    }
}
