use clap::{Parser, Subcommand};
use dotenv::dotenv;
use outreach_rs::error::Result;
use outreach_rs::llm::openai::OpenAIModel;
use outreach_rs::outreach::config::OutreachConfig;
use outreach_rs::outreach::graph::{OutreachGraph, RunReport};
use outreach_rs::outreach::input::LeadInput;
use outreach_rs::outreach::store::MemoryLeadStore;
use outreach_rs::outreach::tools::gmail::GmailClient;
use outreach_rs::outreach::tools::linkedin::LocalLinkedInQueue;
use outreach_rs::outreach::tools::search::TavilySearch;

use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Process a single lead and print the drafts
    Run {
        /// Lead identifier: email or "first last - Company"
        #[arg(short, long)]
        lead: String,

        /// Stable lead id used for output filenames (minted when absent)
        #[arg(long)]
        lead_id: Option<String>,

        /// Path to the leads enrichment JSON file
        #[arg(short, long, default_value = "data/leads.json")]
        data: String,

        /// Optional outreach profile YAML
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Serve the HTTP API
    Serve {
        #[arg(short, long, default_value_t = 8080)]
        port: u16,

        /// Path to the leads enrichment JSON file
        #[arg(short, long, default_value = "data/leads.json")]
        data: String,

        /// Optional outreach profile YAML
        #[arg(short, long)]
        config: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Run {
            lead,
            lead_id,
            data,
            config,
        } => {
            let config = OutreachConfig::load_or_default(config.as_deref())?;
            config.validate()?;

            let store = Arc::new(MemoryLeadStore::from_json_file(&data)?);
            let graph = build_graph(&config, store)?;

            let input = LeadInput::parse(&lead)?;
            let lead_id = lead_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            println!("Processing lead: {}", input.display_identifier());

            let report = graph.execute(input.into_state(lead_id)).await;
            print_report(&report);
        }
        Commands::Serve { port, data, config } => {
            let config = OutreachConfig::load_or_default(config.as_deref())?;
            config.validate()?;

            let store = Arc::new(MemoryLeadStore::from_json_file(&data)?);
            let graph = build_graph(&config, store.clone())?;

            outreach_rs::outreach::server::serve(port, graph, store).await?;
        }
    }

    Ok(())
}

fn build_graph(config: &OutreachConfig, store: Arc<MemoryLeadStore>) -> Result<OutreachGraph> {
    let search = Arc::new(TavilySearch::new()?);
    let model = Arc::new(OpenAIModel::new(config.model_name.clone())?);

    let mut graph = OutreachGraph::new(config.clone(), store, search, model);

    match GmailClient::new() {
        Ok(gmail) => graph = graph.with_email_drafts(Arc::new(gmail)),
        Err(e) => log::warn!("Gmail drafts disabled: {}", e),
    }

    graph = graph.with_linkedin_drafts(Arc::new(LocalLinkedInQueue::new(
        config.output_dir.clone(),
    )));

    Ok(graph)
}

fn print_report(report: &RunReport) {
    let state = &report.state;

    println!();
    println!("Run {} - status: {}", report.run_id, state.status);
    println!("Enrichment sufficient: {}", state.enrichment_sufficient);
    println!("Research performed: {}", state.research_results.is_some());
    if let Some(error) = &state.error {
        println!("Error: {}", error);
    }

    print_section("EMAIL DRAFT", state.email_draft.as_deref());
    print_section("LINKEDIN MESSAGE", state.linkedin_draft.as_deref());
    print_section("CALL SCRIPT", state.call_script.as_deref());

    println!();
    println!(
        "Scores: email={:?} linkedin={:?} call_script={:?} research_depth={} completion={}",
        report.scores.email,
        report.scores.linkedin,
        report.scores.call_script,
        report.scores.research_depth,
        report.scores.completion_rate
    );
}

fn print_section(title: &str, content: Option<&str>) {
    println!();
    println!("--- {} ---", title);
    println!("{}", content.unwrap_or("(not generated)"));
}
