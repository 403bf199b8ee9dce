use crate::context::ExecutionContext;
use crate::presentation::view_models::{QuizOutcome, SimulateViewModel};
use crate::presentation::{CommandResultViewModel, Guidance, Renderer, StatusBadge};
use crate::types::QuizVariant;
use anyhow::{Result, bail};
use chrono::Utc;
use keepsake_store::KeyValueStore;
use keepsake_tracker::{
    ClickTarget, ClientInfo, Config, InteractionLogger, ManualClock, PageTracker, Persistence,
    ScrollMetrics,
};
use keepsake_types::FinalSnapshot;
use keepsake_widgets::{
    Autoplay, Carousel, Choice, Footer, Key, Lightbox, MemoryBook, MobileMenu, Quiz, QuizResult,
    SwipeTracker, VideoPlayer,
};
use tracing::info;

/// Sections present on the page, in document order.
const PAGE_SECTIONS: [&str; 7] = [
    "home", "story", "timeline", "memories", "video", "quiz", "contact",
];

const GALLERY: [&str; 4] = [
    "images/memories/first-date.jpg",
    "images/memories/first-trip.jpg",
    "images/memories/special-moments.jpg",
    "images/memories/celebrations.jpg",
];

pub struct SimulateOptions {
    pub answers: Option<String>,
    pub quiz: QuizVariant,
    pub slides: usize,
    pub finalize: bool,
}

pub fn handle(
    ctx: &ExecutionContext,
    options: SimulateOptions,
    renderer: &impl Renderer,
) -> Result<()> {
    let config = ctx.load_config()?;
    let definition = options.quiz.definition();
    let answers = parse_answers(options.answers.as_deref(), definition.answer_key)?;

    let store = ctx.open_store(&config)?;
    let clock = ManualClock::new(Utc::now());
    let client = ClientInfo::from_environment();
    let mut logger = InteractionLogger::new(store, clock.clone(), &client, &config.storage);

    let quiz_result = run_visit(&mut logger, &clock, &config, &options, &answers);

    let final_snapshot = options.finalize.then(|| logger.finalize());
    info!(
        session_id = %logger.session_id(),
        total = logger.total_interactions(),
        "simulated visit recorded"
    );

    let view = present(ctx, &logger, options.quiz, &quiz_result, final_snapshot.as_ref());
    let degraded = view.degraded_reason.is_some();

    let mut result = CommandResultViewModel::new(view);
    result = if degraded {
        result.with_badge(StatusBadge::warning("Visit recorded in memory only"))
    } else {
        result.with_badge(StatusBadge::success("Visit recorded"))
    };
    result = result
        .with_suggestion(Guidance::new("See what was stored").with_command("keepsake inspect"))
        .with_suggestion(Guidance::new("Count events by kind").with_command("keepsake stats"));

    renderer.render(result)
}

/// `None` answers every question correctly. A short string leaves the
/// remaining questions unanswered.
fn parse_answers(answers: Option<&str>, key: &[Choice]) -> Result<Vec<Choice>> {
    let Some(answers) = answers else {
        return Ok(key.to_vec());
    };

    let answers: Vec<char> = answers.chars().filter(|c| !c.is_whitespace()).collect();
    if answers.len() > key.len() {
        bail!(
            "got {} answers but the quiz has {} questions",
            answers.len(),
            key.len()
        );
    }

    answers
        .into_iter()
        .enumerate()
        .map(|(i, c)| {
            Choice::try_from(c).map_err(|e| anyhow::anyhow!("answer {}: {}", i + 1, e))
        })
        .collect()
}

/// One scripted walk through the page. Time advances on `clock` between
/// steps so timers fire the way they would in a browser.
fn run_visit<S: KeyValueStore>(
    logger: &mut InteractionLogger<S, ManualClock>,
    clock: &ManualClock,
    config: &Config,
    options: &SimulateOptions,
    answers: &[Choice],
) -> QuizResult {
    let now = || keepsake_tracker::Clock::now(clock);
    let mut page = PageTracker::new(config, logger.start_time());

    // Menu, then jump to the story section
    let mut menu = MobileMenu::new();
    clock.advance_millis(1_200);
    menu.toggle(logger);
    page.navigate_to("story", &PAGE_SECTIONS[..], logger);
    menu.outside_click(false, logger);

    // Scroll down through the story
    for step in 1..=3 {
        clock.advance_millis(40);
        page.scrolled(
            now(),
            ScrollMetrics {
                scroll_y: 400.0 * step as f64,
                document_height: 6000.0,
                viewport_height: 900.0,
            },
        );
    }
    clock.advance(config.timing.scroll_debounce());
    page.tick(now(), logger);
    page.section_visibility("story", 0.8, logger);
    page.section_visibility("timeline", 0.6, logger);

    // Carousel: every slide once by button, a swipe back, then one autoplay step
    let mut carousel = Carousel::new(options.slides);
    carousel.show(0, logger);
    for _ in 0..options.slides {
        clock.advance_millis(1_500);
        carousel.next(logger);
    }
    let mut swipe = SwipeTracker::new();
    swipe.start(300.0, 500.0);
    swipe.moved(320.0, 502.0);
    if let Some(gesture) = swipe.end(380.0, 505.0) {
        carousel.apply_swipe(gesture, logger);
    }
    let mut autoplay = Autoplay::new(&config.timing, now());
    clock.advance(config.timing.autoplay_interval());
    autoplay.tick(now(), true, &mut carousel, logger);
    autoplay.stop();

    // Memories and the gallery lightbox
    page.section_visibility("memories", 0.7, logger);
    let mut book = MemoryBook::new();
    clock.advance_millis(2_000);
    book.open(1, logger);
    clock.advance_millis(6_000);
    book.close();

    let mut lightbox = Lightbox::from_sources(GALLERY);
    lightbox.open("first-trip", Some("Our First Trip"), None, logger);
    clock.advance_millis(3_000);
    lightbox.handle_key(Key::ArrowRight, logger);
    clock.advance_millis(3_000);
    lightbox.handle_key(Key::Escape, logger);

    // Video
    let mut video = VideoPlayer::default();
    video.nav_clicked(logger);
    page.navigate_to("video", &PAGE_SECTIONS[..], logger);
    video.section_viewed(logger);
    video.clicked(logger);
    video.toggle(logger);
    clock.advance_millis(20_000);
    video.seeked(42.0, logger);
    clock.advance_millis(15_000);
    video.ended(logger);
    page.tick(now(), logger);

    // Quiz
    page.navigate_to("quiz", &PAGE_SECTIONS[..], logger);
    page.section_visibility("quiz", 0.9, logger);
    let mut quiz = Quiz::new(options.quiz.definition());
    for (i, choice) in answers.iter().enumerate() {
        clock.advance_millis(2_500);
        quiz.select_answer(i + 1, *choice, logger);
        quiz.next();
    }
    clock.advance_millis(1_000);
    let result = quiz.finish(logger);

    // Footer, then idle long enough for a time update
    page.clicked(
        &ClickTarget {
            tag: "BUTTON".to_string(),
            class_name: "footer-btn".to_string(),
            id: String::new(),
            text: Some("Send Love".to_string()),
        },
        logger,
    );
    Footer.send_love(logger);
    clock.advance(config.timing.time_update_interval());
    page.tick(now(), logger);
    page.stop();

    result
}

fn present<S: KeyValueStore>(
    ctx: &ExecutionContext,
    logger: &InteractionLogger<S, ManualClock>,
    quiz: QuizVariant,
    result: &QuizResult,
    final_snapshot: Option<&FinalSnapshot>,
) -> SimulateViewModel {
    let degraded_reason = match logger.persistence() {
        Persistence::Durable => None,
        Persistence::Degraded { reason } => Some(reason.clone()),
    };

    SimulateViewModel {
        session_id: logger.session_id().to_string(),
        total_interactions: logger.total_interactions(),
        time_spent: final_snapshot
            .map(|f| f.time_spent)
            .unwrap_or_else(|| logger.time_spent()),
        quiz: QuizOutcome {
            quiz: quiz.to_string(),
            score: result.score,
            total_questions: result.total_questions,
            message: result.message.to_string(),
        },
        persisted: degraded_reason.is_none(),
        degraded_reason,
        finalized: final_snapshot.is_some(),
        store_path: ctx.store_path().display().to_string(),
    }
}
