use std::path::Path;

use chrono::Utc;
use lesson_api::ProgressStore;
use lesson_core::{LearnerProfile, TutorError};
use lesson_runtime::LessonSession;

use crate::{
    finish_into_store, json_string, load_open_session, parse_event,
    save_session_state, start_session, AgentArgs, AgentCommand, AppContext, EventArgs,
    FileProfileStore, FinishArgs, LessonsArgs, SessionState, StartArgs, ViewArgs,
};

pub(super) fn run_agent(context: &AppContext, args: AgentArgs) -> Result<i32, TutorError> {
    match args.command {
        AgentCommand::Start(args) => run_start(context, args),
        AgentCommand::Event(args) => run_event(context, args),
        AgentCommand::Finish(args) => run_finish(context, args),
        AgentCommand::Map(args) => run_map(context, args),
        AgentCommand::Lessons(args) => run_lessons(context, args),
        AgentCommand::Achievements(args) => run_achievements(context, args),
    }
}

fn load_learner(context: &AppContext, profile: Option<&str>) -> Result<Option<LearnerProfile>, TutorError> {
    FileProfileStore::new(context.config.profile_path(profile)).load()
}

pub(super) fn run_start(context: &AppContext, args: StartArgs) -> Result<i32, TutorError> {
    let learner = load_learner(context, args.profile.as_deref())?;
    let session = start_session(&context.tutor, learner.as_ref(), args.skill.as_deref())?;
    let lock = context
        .tutor
        .lock_state(learner.as_ref().map(|learner| &learner.progress), session.skill_id());

    let state_out = context.config.session_path(args.state_out.as_deref());
    save_session_state(&state_out, &SessionState::new(session.clone()))?;

    println!("RESULT:OK");
    println!("EVENT:STARTED");
    println!("LOCK:{}", lock.as_str());
    emit_session(&session);
    println!("STATE_OUT:{}", state_out.display());
    Ok(0)
}

pub(super) fn run_event(context: &AppContext, args: EventArgs) -> Result<i32, TutorError> {
    let event = parse_event(&args.event)?;
    let state_in = context.config.session_path(args.state_in.as_deref());
    let mut state = load_open_session(&state_in)?;

    state.session.tick(args.elapsed);
    let outcome = state.session.dispatch(event);

    let state_out = match args.state_out.as_deref() {
        Some(path) => Path::new(path).to_path_buf(),
        None => state_in,
    };
    save_session_state(&state_out, &state)?;

    println!("RESULT:OK");
    println!("EVENT:{}", event.label().to_uppercase());
    println!("CHANGED:{}", outcome.snapshot_changed);
    println!("COMPLETED_NOW:{}", outcome.completed_now);
    emit_session(&state.session);
    println!("STATE_OUT:{}", state_out.display());
    Ok(0)
}

pub(super) fn run_finish(context: &AppContext, args: FinishArgs) -> Result<i32, TutorError> {
    let state_in = context.config.session_path(args.state_in.as_deref());
    let state = load_open_session(&state_in)?;
    let mut store = FileProfileStore::new(context.config.profile_path(args.profile.as_deref()));

    let (profile, outcome) =
        finish_into_store(&context.tutor, &state_in, state, &mut store, Utc::now())?;

    println!("RESULT:OK");
    println!("EVENT:FINISHED");
    println!("SKILL:{}", outcome.summary.skill_id);
    println!("POINTS_EARNED:{}", outcome.summary.points_earned);
    println!("TIME:{}", outcome.summary.elapsed);
    println!("ACCURACY:{}", outcome.summary.accuracy);
    println!("SKILL_POINTS:{}", profile.progress.skill_points);
    println!("STREAK:{}", profile.progress.streak);
    println!("NEXT:{}", outcome.next.label());
    println!("PROFILE_OUT:{}", store.path().display());
    Ok(0)
}

pub(super) fn run_map(context: &AppContext, args: ViewArgs) -> Result<i32, TutorError> {
    let learner = load_learner(context, args.profile.as_deref())?;
    let progress = learner.as_ref().map(|learner| &learner.progress);

    println!("RESULT:OK");
    println!("SIGNED_IN:{}", learner.is_some());
    for world in context.tutor.world_summaries(progress) {
        println!(
            "WORLD:{}|{}/{}|{}",
            world.world_id,
            world.completed_skills,
            world.total_skills,
            json_string(&world.name)
        );
    }
    for node in context.tutor.skill_map(progress) {
        println!(
            "SKILL:{}|{}|{}|{}",
            node.skill_id,
            node.world,
            node.lock.as_str(),
            json_string(&node.name)
        );
    }
    println!(
        "RECOMMENDED:{}",
        context
            .tutor
            .recommended_skill(progress)
            .map(|skill| skill.id.as_str())
            .unwrap_or("NONE")
    );
    Ok(0)
}

pub(super) fn run_lessons(context: &AppContext, args: LessonsArgs) -> Result<i32, TutorError> {
    let learner = load_learner(context, args.profile.as_deref())?;
    let entries = context.tutor.exercises(
        learner.as_ref().map(|learner| &learner.progress),
        &args.skill,
    )?;

    println!("RESULT:OK");
    println!("SKILL:{}", args.skill);
    for entry in entries {
        println!(
            "EXERCISE:{}|{}|{}|{}",
            entry.exercise_id,
            if entry.locked { "locked" } else { "open" },
            if entry.completed { "done" } else { "todo" },
            json_string(&entry.title)
        );
    }
    Ok(0)
}

pub(super) fn run_achievements(context: &AppContext, args: ViewArgs) -> Result<i32, TutorError> {
    let learner = load_learner(context, args.profile.as_deref())?;

    println!("RESULT:OK");
    for entry in context.tutor.achievements(learner.as_ref()) {
        println!(
            "ACHIEVEMENT:{}|{}|{}",
            entry.definition.id,
            match (entry.is_unlocked(), entry.unlocked_at) {
                (true, Some(at)) => at.to_rfc3339(),
                (true, None) => "UNLOCKED".to_string(),
                (false, _) => "LOCKED".to_string(),
            },
            json_string(&entry.definition.name)
        );
    }
    Ok(0)
}

fn emit_session(session: &LessonSession) {
    println!("SKILL:{}", session.skill_id());
    for message in session.messages() {
        println!("MESSAGE_JSON:{}", json_string(&message));
    }
    println!("COMPLETE:{}", session.is_complete());
    println!("ELAPSED:{}", session.elapsed_label());
}
