//! Walkthrough of the updater: function tasks, struct tasks, composites,
//! topic frequency checks, a heartbeat, broadcasts and task removal.

use diagnostic_updater::{
    CompositeTask, FrequencyStatus, FunctionExt, Heartbeat, Level, LogSink, Rate, RealClock,
    Status, Task, TaskResult, TopicDiagnostic, Updater, UpdaterConfig,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// State shared by the example producers instead of a global.
#[derive(Default)]
struct Launch {
    time_to_launch: AtomicUsize,
}

impl Launch {
    fn time_to_launch(&self) -> usize {
        self.time_to_launch.load(Ordering::SeqCst)
    }
}

fn dummy_diagnostic(launch: &Launch, status: &mut Status) {
    let time_to_launch = launch.time_to_launch();
    if time_to_launch < 10 {
        status.set_summary(
            Level::Error,
            format!(
                "Buckle your seat belt. Launch in {} seconds!",
                time_to_launch
            ),
        );
    } else {
        status.set_summary(Level::Ok, "Launch is in a long time. Have a soda.");
    }

    status.add("Diagnostic Name", "dummy");
    status.add("Time to Launch", time_to_launch);
    status.add(
        "Geeky thing to say",
        format!(
            "The square of the time to launch {} is {}",
            time_to_launch,
            time_to_launch * time_to_launch
        ),
    );
}

struct DummyTask;

impl Task for DummyTask {
    fn name(&self) -> &str {
        "Updater Derived from Task"
    }

    fn run(&self, status: &mut Status) -> TaskResult {
        status.set_summary(Level::Warn, "This is a silly updater.");
        status.add("Stupidicity of this updater", 1000.0);
        Ok(())
    }
}

fn check_lower_bound(launch: &Launch, status: &mut Status) {
    let time_to_launch = launch.time_to_launch() as i64;
    if time_to_launch > 5 {
        status.set_summary(Level::Ok, "Lower-bound OK");
    } else {
        status.set_summary(Level::Error, "Too low");
    }
    status.add("Low-Side Margin", time_to_launch - 5);
}

fn check_upper_bound(launch: &Launch, status: &mut Status) {
    let time_to_launch = launch.time_to_launch() as i64;
    if time_to_launch < 10 {
        status.set_summary(Level::Ok, "Upper-bound OK");
    } else {
        status.set_summary(Level::Warn, "Too high");
    }
    status.add("Top-Side Margin", 10 - time_to_launch);
}

fn main() -> diagnostic_updater::Result<()> {
    env_logger::init();

    let launch = Arc::new(Launch::default());
    let clock = Arc::new(RealClock::default());

    let config = UpdaterConfig {
        hardware_id: format!("Device-{}-{}", 27, 46),
        verbose: true,
        ..Default::default()
    };
    let updater = Updater::with_clock(LogSink, config, clock.clone())?;

    let shared = launch.clone();
    updater.add_function("Function updater", move |status: &mut Status| {
        dummy_diagnostic(&shared, status)
    })?;
    updater.add_task(DummyTask)?;
    updater.add_task(Heartbeat)?;

    let shared = launch.clone();
    let lower: Arc<dyn Task> = Arc::new(
        (move |status: &mut Status| check_lower_bound(&shared, status))
            .into_task("Lower-bound check"),
    );
    let shared = launch.clone();
    let upper = (move |status: &mut Status| check_upper_bound(&shared, status))
        .into_task("Upper-bound check");

    let mut bounds = CompositeTask::new("Bound check");
    bounds.add_shared(lower.clone());
    bounds.add_task(upper);
    updater.add_task(bounds)?;

    updater.broadcast(Level::Ok, "Doing important initialization stuff.")?;

    let frequency = FrequencyStatus::builder()
        .min_frequency(0.5)
        .max_frequency(2.0)
        .tolerance(1.1)
        .window_size(10)
        .clock(clock.clone())
        .build()?;
    let mut topic1 = TopicDiagnostic::new("topic1", frequency);
    // Sharing works here because the lower-bound check holds no state of its own.
    topic1.add_task(lower);
    let topic1 = topic1.register(&updater)?;

    updater.force_update()?;

    if !updater.remove_by_name("Bound check") {
        log::error!("The Bound check task was not found when trying to remove it.");
    }

    let mut rate = Rate::new(clock, 10.0);
    for step in 0..100 {
        launch.time_to_launch.store(step / 10, Ordering::SeqCst);
        topic1.tick();
        updater.update()?;
        rate.sleep();
    }
    Ok(())
}
