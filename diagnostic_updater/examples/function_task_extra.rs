use diagnostic_updater::{ChannelSink, FunctionExt, Level, Status, Updater};
use std::thread;
use std::time::Duration;

fn main() -> diagnostic_updater::Result<()> {
    env_logger::init();

    let (sink, receiver) = ChannelSink::unbounded();
    let updater = Updater::new(sink);
    updater.set_hardware_id("none");

    // Create simple task and add it to the updater
    let my_task = (|status: &mut Status| {
        status.set_summary(Level::Warn, "foo");
        status.add("one", 1);
        status.add("true_bool", true);
    })
    .into_task("my_task");
    updater.add_task(my_task)?;

    // Create simple tasks that only run when passed in explicitly

    let task1 = (|status: &mut Status| {
        status.set_summary(Level::Error, "bar");
        status.add("two", 2);
    })
    .into_task("my_task1");

    let task2 = (|status: &mut Status| {
        status.set_summary(Level::Warn, "baz");
        status.add("three", 3);
    })
    .into_task("my_task2");

    let printer = thread::spawn(move || {
        for array in receiver.iter() {
            for status in &array.status {
                println!(
                    "#{} {} [{}] {}",
                    array.header.seq, status.name, status.level, status.message
                );
            }
        }
    });

    for _ in 0..3 {
        updater.force_update_with_extra(&[&task1, &task2])?;
        thread::sleep(Duration::from_secs(1));
    }

    drop(updater);
    printer.join().expect("printer thread panicked");
    Ok(())
}
