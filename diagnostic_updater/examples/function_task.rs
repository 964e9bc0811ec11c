use diagnostic_updater::{FunctionExt, Level, LogSink, Status, Updater};
use std::thread;
use std::time::Duration;

fn main() -> diagnostic_updater::Result<()> {
    env_logger::init();

    // Create updater that logs every aggregate
    let updater = Updater::new(LogSink);
    updater.set_hardware_id("none");

    // Create simple task and add it to the updater
    updater.add_task(
        (|status: &mut Status| {
            status.set_summary(Level::Warn, "foo");
            status.add("one", 1);
            status.add("true_bool", true);
        })
        .into_task("my_task"),
    )?;

    // Fallible functions report their error as the status message
    updater.add_function("flaky_task", |status: &mut Status| -> Result<(), String> {
        status.add("attempt", 1);
        Err("sensor did not answer".into())
    })?;

    for _ in 0..5 {
        // Publish diagnostic update
        updater.force_update()?;
        thread::sleep(Duration::from_secs(1));
    }
    Ok(())
}
