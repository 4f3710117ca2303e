use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "lesson-cli")]
#[command(about = "Interactive 3D modeling lessons: agent and terminal front ends")]
pub(crate) struct Cli {
    /// TOML config file. Falls back to $LESSON_CONFIG.
    #[arg(long = "config", global = true)]
    pub(crate) config: Option<String>,
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    Agent(AgentArgs),
    Profile(ProfileArgs),
    Tui(TuiArgs),
}

#[derive(Debug, Args)]
pub(crate) struct AgentArgs {
    #[command(subcommand)]
    pub(crate) command: AgentCommand,
}

#[derive(Debug, Subcommand)]
pub(crate) enum AgentCommand {
    Start(StartArgs),
    Event(EventArgs),
    Finish(FinishArgs),
    Map(ViewArgs),
    Lessons(LessonsArgs),
    Achievements(ViewArgs),
}

#[derive(Debug, Args)]
pub(crate) struct StartArgs {
    /// Skill to open; defaults to the first open, unfinished skill.
    #[arg(long = "skill")]
    pub(crate) skill: Option<String>,
    #[arg(long = "profile")]
    pub(crate) profile: Option<String>,
    #[arg(long = "state-out")]
    pub(crate) state_out: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct EventArgs {
    #[arg(long = "state-in")]
    pub(crate) state_in: Option<String>,
    /// select | deselect | delete | shift | shift-up | move:dx,dy,dz
    #[arg(long = "event")]
    pub(crate) event: String,
    /// Seconds spent before this event, for the lesson clock.
    #[arg(long = "elapsed", default_value_t = 0)]
    pub(crate) elapsed: u64,
    #[arg(long = "state-out")]
    pub(crate) state_out: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct FinishArgs {
    #[arg(long = "state-in")]
    pub(crate) state_in: Option<String>,
    #[arg(long = "profile")]
    pub(crate) profile: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct ViewArgs {
    #[arg(long = "profile")]
    pub(crate) profile: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct LessonsArgs {
    #[arg(long = "skill")]
    pub(crate) skill: String,
    #[arg(long = "profile")]
    pub(crate) profile: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct ProfileArgs {
    #[command(subcommand)]
    pub(crate) command: ProfileCommand,
}

#[derive(Debug, Subcommand)]
pub(crate) enum ProfileCommand {
    Init(ProfileInitArgs),
    Show(ViewArgs),
    Unlock(UnlockArgs),
}

#[derive(Debug, Args)]
pub(crate) struct ProfileInitArgs {
    #[arg(long = "username")]
    pub(crate) username: String,
    #[arg(long = "profile")]
    pub(crate) profile: Option<String>,
    /// Replace an existing profile file.
    #[arg(long = "force")]
    pub(crate) force: bool,
}

#[derive(Debug, Args)]
pub(crate) struct UnlockArgs {
    #[arg(long = "achievement")]
    pub(crate) achievement: String,
    #[arg(long = "profile")]
    pub(crate) profile: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct TuiArgs {
    #[arg(long = "skill")]
    pub(crate) skill: Option<String>,
    #[arg(long = "profile")]
    pub(crate) profile: Option<String>,
    #[arg(long = "state-file")]
    pub(crate) state_file: Option<String>,
}
