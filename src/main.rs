use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use edvancea::catalog::{self, Catalog};
use edvancea::practice::{builtin_topics, find_topic};
use edvancea::storage::FileBackend;
use edvancea::{Config, Identity, Learner, server};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "edvancea")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// User whose progress to read and update
    #[arg(short, long, global = true, env = "EDVANCEA_USER")]
    user: Option<String>,

    /// Catalog API root, e.g. http://localhost:5000 (built-in catalog when unset)
    #[arg(long, global = true)]
    api: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the catalog API server
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// List courses with your progress
    Courses,
    /// Show a course's lessons and where to continue
    Course {
        /// Course id
        id: String,
    },
    /// Mark a lesson complete
    Complete {
        /// Course id
        course: String,
        /// Lesson id
        lesson: String,
    },
    /// Mark a lesson incomplete
    Incomplete {
        /// Course id
        course: String,
        /// Lesson id
        lesson: String,
    },
    /// List practice topics with your progress
    Topics,
    /// Answer a practice question
    Answer {
        /// Topic id
        topic: String,
        /// Question id
        question: String,
        /// Chosen option (1-based)
        option: usize,
    },
    /// Show lesson and practice statistics
    Stats {
        /// Print the dashboard as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete all stored progress for the user
    Forget,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edvancea=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    let mut config = Config::load()?;
    if cli.api.is_some() {
        config.api_url = cli.api.clone();
    }

    let backend = Arc::new(FileBackend::open_default()?);
    let mut learner = Learner::with_backend(backend);
    if let Some(identity) = cli.user.and_then(Identity::new) {
        learner.sign_in(identity);
    }

    match cli.command {
        Commands::Serve { port } => {
            let port = port.unwrap_or(config.port);
            let listener = TcpListener::bind(("0.0.0.0", port))
                .await
                .with_context(|| format!("Failed to bind port {}", port))?;
            server::serve(listener, Catalog::builtin().clone()).await?;
        }
        Commands::Courses => {
            let catalog = catalog::fetch_or_builtin(config.api_url.as_deref()).await;
            for course in catalog.courses() {
                let progress = learner.course_progress(course);
                println!(
                    "{:>3}  {:<45} {:<13} {:>3}/{:<3} {:>3}%",
                    course.id,
                    course.title,
                    course.level,
                    progress.completed,
                    progress.total,
                    progress.percentage
                );
            }

            let overall = learner.overall_progress(&catalog);
            println!(
                "\nOverall: {}/{} lessons, {}%",
                overall.completed, overall.total, overall.percentage
            );
        }
        Commands::Course { id } => {
            let catalog = catalog::fetch_or_builtin(config.api_url.as_deref()).await;
            let Some(course) = catalog.find_by_key(&id) else {
                bail!("Course not found: {}", id);
            };

            let lessons = learner.lessons();
            let progress = learner.course_progress(course);
            println!("{} ({}, {})", course.title, course.category, course.level);
            println!("{}/{} lessons, {}%", progress.completed, progress.total, progress.percentage);

            for module in &course.modules {
                println!("\n{}. {}", module.id, module.title);
                for lesson in &module.lessons {
                    let mark = if lessons.is_complete(&course.key(), &lesson.id) { "x" } else { " " };
                    println!("  [{}] {:>3}  {}", mark, lesson.id, lesson.title);
                }
            }

            if let Some(next) = course.next_lesson(&lessons) {
                let verb = if progress.percentage > 0 { "Continue" } else { "Start" };
                println!("\n{} with lesson {}: {}", verb, next.id, next.title);
            }
        }
        Commands::Complete { course, lesson } => {
            warn_if_signed_out(&learner);
            let catalog = catalog::fetch_or_builtin(config.api_url.as_deref()).await;
            let course_def = catalog.find_by_key(&course);
            if course_def.and_then(|c| c.find_lesson(&lesson)).is_none() {
                tracing::warn!("Lesson {} is not part of course {} in the catalog", lesson, course);
            }

            learner.mark_complete(&catalog.canonical_key(&course), &lesson)?;
            if let Some(next) = course_def.and_then(|c| c.lesson_after(&lesson)) {
                println!("Next lesson: {} {}", next.id, next.title);
            }
        }
        Commands::Incomplete { course, lesson } => {
            warn_if_signed_out(&learner);
            let catalog = catalog::fetch_or_builtin(config.api_url.as_deref()).await;
            learner.mark_incomplete(&catalog.canonical_key(&course), &lesson)?;
        }
        Commands::Topics => {
            for topic in builtin_topics() {
                let progress = learner.topic_progress(&topic.id);
                println!(
                    "{:<20} {:<28} {:<13} {:>2}/{:<2} solved  {:>3}% accuracy",
                    topic.id,
                    topic.title,
                    topic.difficulty.label(),
                    progress.solved_count,
                    topic.questions.len(),
                    progress.accuracy()
                );
            }
        }
        Commands::Answer { topic, question, option } => {
            let topic_def =
                find_topic(&topic).with_context(|| format!("Unknown practice topic: {}", topic))?;
            let question_def = topic_def
                .find_question(&question)
                .with_context(|| format!("Unknown question {} in {}", question, topic))?;
            if option == 0 || option > question_def.options.len() {
                bail!("Option must be between 1 and {}", question_def.options.len());
            }

            warn_if_signed_out(&learner);
            let is_correct = question_def.is_correct(option - 1);
            learner.submit_answer(&topic, &question, is_correct)?;

            if is_correct {
                println!("Correct!");
            } else {
                println!(
                    "Incorrect. The answer is: {}",
                    question_def.correct_option().unwrap_or("(unknown)")
                );
            }
            println!("{}", question_def.explanation);

            let progress = learner.topic_progress(&topic);
            println!(
                "{}: {}/{} solved, {}% complete",
                topic_def.title,
                progress.solved_count,
                topic_def.questions.len(),
                progress.completion(topic_def.questions.len())
            );
        }
        Commands::Stats { json } => {
            let catalog = catalog::fetch_or_builtin(config.api_url.as_deref()).await;
            let dashboard = learner.dashboard(&catalog);
            if json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
                return Ok(());
            }

            println!(
                "Lessons:  {}/{} complete ({}%)",
                dashboard.overall.completed, dashboard.overall.total, dashboard.overall.percentage
            );
            println!(
                "Practice: {} solved, {} attempts, {}% accuracy",
                dashboard.practice.total_solved,
                dashboard.practice.total_attempts,
                dashboard.practice.accuracy
            );

            println!("\nIn progress:");
            for entry in dashboard.in_progress() {
                println!("  {:<45} {:>3}%", entry.title, entry.progress.percentage);
            }
            println!("\nCompleted:");
            for entry in dashboard.completed() {
                println!("  {}", entry.title);
            }
        }
        Commands::Forget => {
            if learner.delete_account()? {
                println!("Stored progress deleted");
            } else {
                bail!("No user given; pass --user or set EDVANCEA_USER");
            }
        }
    }

    Ok(())
}

fn warn_if_signed_out(learner: &Learner) {
    if !learner.is_signed_in() {
        tracing::warn!("No user given; progress will not be saved");
    }
}
