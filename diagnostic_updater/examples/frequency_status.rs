use diagnostic_updater::{FrequencyStatus, LogSink, Rate, RealClock, Updater, UpdaterConfig};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() -> diagnostic_updater::Result<()> {
    env_logger::init();

    // Delay between events in seconds, passed as the first argument
    let delay_seconds = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<f64>().ok())
        .unwrap_or(1.0);

    let clock = Arc::new(RealClock::default());
    let config = UpdaterConfig {
        hardware_id: "none".into(),
        period: 0.5,
        verbose: true,
        ..Default::default()
    };
    let updater = Updater::with_clock(LogSink, config, clock.clone())?;

    let no_limits = Arc::new(FrequencyStatus::builder().name("No limits").build()?);
    let only_max = Arc::new(
        FrequencyStatus::builder()
            .name("Only max")
            .max_frequency(10.0)
            .build()?,
    );
    let only_min = Arc::new(
        FrequencyStatus::builder()
            .name("Only min")
            .min_frequency(5.0)
            .build()?,
    );
    let both = Arc::new(
        FrequencyStatus::builder()
            .name("Both limits")
            .min_frequency(5.0)
            .max_frequency(10.0)
            .build()?,
    );

    let tracked = vec![no_limits, only_max, only_min, both];
    for task in &tracked {
        updater.add_task(task.clone())?;
    }

    let tick_thread = thread::spawn(move || {
        for _ in 0..20 {
            thread::sleep(Duration::from_secs_f64(delay_seconds));
            for task in &tracked {
                task.tick();
            }
        }
    });

    // Updates run at 2 Hz, the updater itself throttles publishing to its period
    let mut rate = Rate::new(clock, 2.0);
    for _ in 0..(40.0 * delay_seconds).ceil() as usize {
        updater.update()?;
        rate.sleep();
    }

    tick_thread.join().expect("tick thread panicked");
    Ok(())
}
