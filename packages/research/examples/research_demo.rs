//! End-to-end research run against live services.
//!
//! ```sh
//! cargo run --example research_demo -- "rust async runtimes" web
//! ```
//!
//! The second argument is an optional scope (`web`, `academic`, `both`).

use research::{ResearchQuery, Researcher, Settings, SourceScope};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "research=info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let text = args
        .next()
        .unwrap_or_else(|| "rust async runtimes".to_string());
    let scope = SourceScope::parse_or_default(&args.next().unwrap_or_default());

    let settings = Settings::from_env();
    let max_size = settings.content.max_content_size;
    let researcher = Researcher::new(settings);

    let query = ResearchQuery::new(text, scope, 3)?;
    let result = researcher.run(&query).await?;

    println!("{}", result.render(max_size));
    eprintln!(
        "\n({} candidates, {} accepted, {:.1}s)",
        result.total_candidates,
        result.accepted.len(),
        result.elapsed_secs
    );

    Ok(())
}
