use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{Parser, Subcommand, ValueEnum};
use skill_suggest::{
    Assessment, Skill, SuggestError, UserProfile, load_history, load_profile, parse_questions,
    parse_recommendations, prompt, read_response, split_sections,
};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "skill_suggest=info";
const DEFAULT_USER: &str = "local";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Take an assessment in the terminal
    Assess {
        /// Model response containing the questions
        #[arg(short, long, required_unless_present = "combined")]
        questions: Option<PathBuf>,

        /// Model response containing the course recommendations JSON
        #[arg(short, long)]
        recommendations: Option<PathBuf>,

        /// Single response with "Course Suggestions" and "Skill Assessment Questions" sections
        #[arg(long, conflicts_with_all = ["questions", "recommendations"])]
        combined: Option<PathBuf>,

        /// User the result is saved for
        #[arg(short, long, default_value = DEFAULT_USER)]
        user: String,

        /// Directory where results are saved
        #[arg(long)]
        history_dir: Option<PathBuf>,
    },

    /// Parse a model response and print the records as JSON
    Parse {
        #[arg(value_enum)]
        kind: ResponseKind,

        /// File containing the raw model response
        file: PathBuf,
    },

    /// Print a prompt for the generative model
    Prompt {
        #[arg(value_enum)]
        kind: PromptKind,

        #[command(flatten)]
        profile: ProfileArgs,

        /// Directory of saved results, used for course prompts
        #[arg(long)]
        history_dir: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ResponseKind {
    Questions,
    Courses,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PromptKind {
    /// Questions and course ideas for a new assessment
    Assessment,
    /// A JSON list of courses based on the latest result
    Courses,
}

#[derive(clap::Args, Debug)]
struct ProfileArgs {
    /// JSON profile file; overrides the flags below
    #[arg(long)]
    profile: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_USER)]
    user: String,

    #[arg(long, default_value = "")]
    name: String,

    /// Skill as name or name:level (beginner, intermediate, expert)
    #[arg(long = "skill")]
    skills: Vec<Skill>,

    #[arg(long, default_value = "")]
    experience: String,

    #[arg(long = "interest")]
    interests: Vec<String>,

    #[arg(long = "goal")]
    goals: Vec<String>,
}

impl ProfileArgs {
    fn into_profile(self) -> Result<UserProfile, SuggestError> {
        if let Some(path) = self.profile {
            return Ok(load_profile(path)?);
        }

        let mut profile = UserProfile::new(self.user, self.name);
        profile.skills = self.skills;
        profile.experience = self.experience;
        profile.interests = self.interests;
        profile.end_goals = self.goals;
        Ok(profile)
    }
}

fn main() {
    let args = Args::parse();
    let interactive = matches!(args.command, Command::Assess { .. });
    init_logging(args.log_file.as_deref(), interactive);

    if let Err(e) = run(args.command) {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to `log_file` when given. Without one, the interactive assessment
/// stays silent so the alternate screen is not overwritten.
fn init_logging(log_file: Option<&Path>, interactive: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => match File::create(path) {
            Ok(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).init(),
            Err(err) => eprintln!("Cannot open log file {}: {}", path.display(), err),
        },
        None if !interactive => builder.with_writer(std::io::stderr).init(),
        None => {}
    }
}

fn run(command: Command) -> Result<(), SuggestError> {
    match command {
        Command::Assess {
            questions,
            recommendations,
            combined,
            user,
            history_dir,
        } => {
            let mut assessment = match (combined, questions) {
                (Some(path), _) => {
                    let sections = split_sections(&read_response(path)?);
                    Assessment::from_response(&sections.skill_questions, user)?
                        .with_course_section(&sections.course_suggestions)
                }
                (None, Some(path)) => {
                    let mut assessment = Assessment::from_response(&read_response(path)?, user)?;
                    if let Some(path) = recommendations {
                        assessment = assessment
                            .with_recommendations(parse_recommendations(&read_response(path)?));
                    }
                    assessment
                }
                (None, None) => return Err(SuggestError::NoQuestions),
            };

            if let Some(dir) = history_dir {
                assessment = assessment.with_history_dir(dir);
            }

            tracing::info!(
                questions = assessment.app().total_questions(),
                "starting assessment"
            );
            assessment.run()
        }
        Command::Parse { kind, file } => {
            let raw = read_response(&file)?;
            let json = match kind {
                ResponseKind::Questions => {
                    let questions = parse_questions(&raw);
                    if questions.is_empty() {
                        return Err(SuggestError::NoQuestions);
                    }
                    serde_json::to_string_pretty(&questions)
                }
                ResponseKind::Courses => serde_json::to_string_pretty(&parse_recommendations(&raw)?),
            }
            .map_err(std::io::Error::other)?;

            println!("{}", json);
            Ok(())
        }
        Command::Prompt {
            kind,
            profile,
            history_dir,
        } => {
            let profile = profile.into_profile()?;
            let text = match kind {
                PromptKind::Assessment => prompt::assessment_prompt(&profile),
                PromptKind::Courses => {
                    let history = match history_dir {
                        Some(dir) => load_history(dir, &profile.id)?,
                        None => Vec::new(),
                    };
                    tracing::debug!(results = history.len(), "loaded assessment history");
                    prompt::recommendation_prompt(&profile, &history)
                }
            };

            println!("{}", text);
            Ok(())
        }
    }
}
