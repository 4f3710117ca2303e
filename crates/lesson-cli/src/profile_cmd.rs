use chrono::Utc;
use lesson_api::ProgressStore;
use lesson_core::TutorError;

use crate::{
    load_profile, AppContext, FileProfileStore, ProfileArgs, ProfileCommand, ProfileInitArgs,
    UnlockArgs, ViewArgs,
};

pub(super) fn run_profile(context: &AppContext, args: ProfileArgs) -> Result<i32, TutorError> {
    match args.command {
        ProfileCommand::Init(args) => run_init(context, args),
        ProfileCommand::Show(args) => run_show(context, args),
        ProfileCommand::Unlock(args) => run_unlock(context, args),
    }
}

/// Stands in for account creation: writes a fresh profile file.
pub(super) fn run_init(context: &AppContext, args: ProfileInitArgs) -> Result<i32, TutorError> {
    let username = args.username.trim();
    if username.is_empty() {
        return Err(TutorError::new("CLI_PROFILE_USERNAME", "Username must not be empty."));
    }

    let mut store = FileProfileStore::new(context.config.profile_path(args.profile.as_deref()));
    if store.path().exists() && !args.force {
        return Err(TutorError::new(
            "CLI_PROFILE_EXISTS",
            format!(
                "Profile already exists: {} (use --force to replace it)",
                store.path().display()
            ),
        ));
    }

    let profile = context.tutor.new_profile(username, Utc::now());
    store.save(&profile)?;

    println!("RESULT:OK");
    println!("EVENT:PROFILE_CREATED");
    println!("CURRENT_LESSON:{}", profile.progress.current_lesson);
    println!("PROFILE_OUT:{}", store.path().display());
    Ok(0)
}

pub(super) fn run_show(context: &AppContext, args: ViewArgs) -> Result<i32, TutorError> {
    let profile = load_profile(&context.config.profile_path(args.profile.as_deref()))?;

    println!("RESULT:OK");
    println!("USERNAME:{}", profile.username);
    println!("CURRENT_LESSON:{}", profile.progress.current_lesson);
    println!("SKILL_POINTS:{}", profile.progress.skill_points);
    println!("STREAK:{}", profile.progress.streak);
    println!("DAYS_ACTIVE:{}", profile.stats.days_active);
    println!("LONGEST_STREAK:{}", profile.stats.longest_streak);
    println!("LAST_ACTIVE:{}", profile.progress.last_active.to_rfc3339());
    for skill_id in &profile.progress.completed_lessons {
        println!("COMPLETED:{}", skill_id);
    }
    for achievement in &profile.stats.achievements {
        println!("ACHIEVEMENT:{}", achievement.id);
    }
    Ok(0)
}

pub(super) fn run_unlock(context: &AppContext, args: UnlockArgs) -> Result<i32, TutorError> {
    let mut store = FileProfileStore::new(context.config.profile_path(args.profile.as_deref()));
    let profile = load_profile(store.path())?;
    let (profile, unlocked) = context
        .tutor
        .unlock_achievement(&profile, &args.achievement, Utc::now())?;
    if unlocked {
        store.save(&profile)?;
    }

    println!("RESULT:OK");
    println!("ACHIEVEMENT:{}", args.achievement);
    println!("UNLOCKED_NOW:{}", unlocked);
    Ok(0)
}
