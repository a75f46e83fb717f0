//! Brand name evaluation service and CLI.
//!
//! Usage:
//!     namecast serve --port 8000
//!     namecast evaluate Kestrel --mission "A journal for bird watchers"
//!     namecast compare Kestrel Plume Talon
//!     namecast workflow "A journal for bird watchers" --idea Kestrel

mod api;
mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use namecast_explain::{explain_match, render_markdown, summarize, summarize_trademark};
use namecast_model::EvaluationResult;
use namecast_query::{
    CompareRequest, CompareResponse, EvaluateRequest, WorkflowRequest, WorkflowResponse,
};
use namecast_workflow::NamingWorkflow;

use crate::api::{build_router, AppState};
use crate::config::ServiceConfig;

#[derive(Parser)]
#[command(name = "namecast")]
#[command(about = "Evaluate and generate brand names")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    service: ServiceConfig,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    Markdown,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(long, env = "NAMECAST_HOST", default_value = "127.0.0.1")]
        host: String,

        #[arg(short, long, env = "NAMECAST_PORT", default_value_t = 8000)]
        port: u16,

        /// Allowed browser origins (comma-separated)
        #[arg(
            long,
            env = "NAMECAST_CORS_ORIGINS",
            value_delimiter = ',',
            default_value = "http://localhost:5173,http://localhost:5174,http://localhost:5175,http://localhost:5176,http://localhost:5177,http://localhost:3000"
        )]
        cors_origins: Vec<String>,
    },

    /// Evaluate one name
    Evaluate {
        name: String,

        /// What the brand is for; enables mission alignment
        #[arg(short, long)]
        mission: Option<String>,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Evaluate several names and pick the best
    Compare {
        names: Vec<String>,

        #[arg(short, long)]
        mission: Option<String>,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Generate, filter and rank candidates for a project
    Workflow {
        description: String,

        /// A name idea of your own (repeatable)
        #[arg(short, long = "idea")]
        ideas: Vec<String>,

        #[arg(long, default_value_t = 10)]
        generate_count: usize,

        #[arg(long, default_value_t = 5)]
        max_to_evaluate: usize,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("namecast=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let workflow = cli.service.build()?;

    match cli.command {
        Commands::Serve {
            host,
            port,
            cors_origins,
        } => {
            run_serve(workflow, &host, port, &cors_origins).await?;
        }
        Commands::Evaluate {
            name,
            mission,
            format,
        } => {
            run_evaluate(&workflow, EvaluateRequest { name, mission }, format).await?;
        }
        Commands::Compare {
            names,
            mission,
            format,
        } => {
            run_compare(&workflow, CompareRequest { names, mission }, format).await?;
        }
        Commands::Workflow {
            description,
            ideas,
            generate_count,
            max_to_evaluate,
            format,
        } => {
            let request = WorkflowRequest {
                project_description: description,
                name_ideas: (!ideas.is_empty()).then_some(ideas),
                generate_count,
                max_to_evaluate,
            };
            run_workflow(&workflow, request, format).await?;
        }
    }

    Ok(())
}

async fn run_serve(
    workflow: NamingWorkflow,
    host: &str,
    port: u16,
    cors_origins: &[String],
) -> Result<()> {
    let app = build_router(Arc::new(AppState { workflow }), cors_origins);
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {host}:{port}"))?;
    tracing::info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, app).await?;
    Ok(())
}

fn print_evaluation(result: &EvaluationResult) {
    println!("{}", summarize(result));
    if let Some(trademark) = &result.trademark {
        println!("   {}", summarize_trademark(trademark));
        for m in &trademark.matches {
            println!(
                "   {} (risk {:.2}) Flags: {:?}",
                m.mark,
                m.risk_score,
                m.flags.iter().map(|f| f.label()).collect::<Vec<_>>()
            );
            for explanation in explain_match(m, &result.name) {
                println!("   - {}: {}", explanation.summary, explanation.detail);
            }
        }
    }
    if let Some(perception) = &result.perception {
        println!(
            "   Evokes: {} | Memorability: {:?}",
            perception.evokes, perception.memorability
        );
    }
}

async fn run_evaluate(
    workflow: &NamingWorkflow,
    request: EvaluateRequest,
    format: Format,
) -> Result<()> {
    request.validate()?;

    let result = workflow
        .evaluator()
        .evaluate(&request.name, request.mission.as_deref())
        .await;

    match format {
        Format::Json => println!("{}", result.to_json()?),
        Format::Markdown => println!("{}", render_markdown(&result)),
        Format::Text => print_evaluation(&result),
    }

    Ok(())
}

async fn run_compare(
    workflow: &NamingWorkflow,
    request: CompareRequest,
    format: Format,
) -> Result<()> {
    request.validate()?;

    let comparison = workflow
        .evaluator()
        .compare(&request.names, request.mission.as_deref())
        .await;

    match format {
        Format::Json => {
            let response = CompareResponse::new(comparison.results, comparison.winner)
                .context("Comparison produced no winner")?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Format::Markdown => {
            for result in &comparison.results {
                println!("{}\n", render_markdown(result));
            }
        }
        Format::Text => {
            for (i, result) in comparison.results.iter().enumerate() {
                print!("{}. ", i + 1);
                print_evaluation(result);
            }
            if let Some(winner) = comparison.winner() {
                println!("\n---");
                println!("Winner: {} ({:.1})", winner.name, winner.overall_score);
            }
        }
    }

    Ok(())
}

async fn run_workflow(
    workflow: &NamingWorkflow,
    request: WorkflowRequest,
    format: Format,
) -> Result<()> {
    request.validate()?;

    let result = workflow.run(&request).await;

    match format {
        Format::Json => {
            let response = WorkflowResponse::from(result);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Format::Markdown => {
            for result in result.evaluated_candidates().filter_map(|c| c.evaluation.as_ref()) {
                println!("{}\n", render_markdown(result));
            }
        }
        Format::Text => {
            println!("Project: {}", result.project_description);
            println!("---");
            for candidate in &result.all_candidates {
                match (&candidate.evaluation, &candidate.rejection_reason) {
                    (Some(evaluation), _) => println!("{}", summarize(evaluation)),
                    (None, Some(reason)) => println!("{}: rejected ({})", candidate.name, reason),
                    (None, None) => println!("{}: not evaluated", candidate.name),
                }
            }
            println!("\n---");
            match result.recommended() {
                Some(best) => println!(
                    "Recommended: {} ({:.1})",
                    best.name,
                    best.overall_score().unwrap_or(0.0)
                ),
                None => println!("No viable candidates"),
            }
        }
    }

    Ok(())
}
