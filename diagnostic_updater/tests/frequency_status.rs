use diagnostic_updater::tasks::frequency_status::FrequencyStatusBuilder;
use diagnostic_updater::{Error, FrequencyStatus, Level, Status, Task, Time};

mod util;

fn tick_every(fs: &FrequencyStatus, interval: f64, count: usize) {
    for i in 0..count {
        fs.tick_at(Time::from_seconds(util::START + interval * i as f64));
    }
}

fn run(fs: &FrequencyStatus) -> Status {
    let mut status = Status::default();
    fs.run(&mut status).unwrap();
    status
}

fn actual_frequency(status: &Status) -> f64 {
    status
        .value("Actual frequency (Hz)")
        .expect("Frequency should always be reported")
        .parse()
        .unwrap()
}

fn bounded() -> FrequencyStatus {
    FrequencyStatus::builder()
        .min_frequency(0.5)
        .max_frequency(2.0)
        .tolerance(1.1)
        .window_size(5)
        .build()
        .unwrap()
}

#[test]
fn steady_one_hertz_is_ok() {
    let fs = bounded();
    tick_every(&fs, 1.0, 5);
    let status = run(&fs);

    assert_eq!(status.level, Level::Ok, "{}", status.message);
    assert!((actual_frequency(&status) - 1.0).abs() < 1e-9);
    assert_eq!(status.value("Events since startup"), Some("5"));
    assert_eq!(status.value("Events since last update"), Some("5"));
    assert_eq!(status.name, "", "Name should not be set by FrequencyStatus");
    assert_eq!(fs.name(), "Frequency Status");
}

#[test]
fn not_enough_data_is_a_warning() {
    let fs = bounded();
    let status0 = run(&fs);
    fs.tick_at(Time::from_seconds(util::START));
    let status1 = run(&fs);

    for status in &[status0, status1] {
        assert_eq!(status.level, Level::Warn);
        assert_eq!(status.message, "Not enough data since startup");
        assert!(status.value("Events since startup").is_some());
        assert!(status.value("Events since last update").is_some());
        assert!(status.value("Actual frequency (Hz)").is_some());
    }
}

#[test]
fn minimum_frequency_is_inclusive() {
    let fs = bounded();
    tick_every(&fs, 2.0, 5);
    let status = run(&fs);
    assert_eq!(status.level, Level::Ok, "{}", status.message);
    assert!((actual_frequency(&status) - 0.5).abs() < 1e-9);
}

#[test]
fn maximum_frequency_is_inclusive() {
    let fs = bounded();
    tick_every(&fs, 0.5, 5);
    let status = run(&fs);
    assert_eq!(status.level, Level::Ok, "{}", status.message);
}

#[test]
fn far_too_slow_is_an_error() {
    let fs = bounded();
    tick_every(&fs, 2.5, 5);
    let status = run(&fs);
    assert_eq!(status.level, Level::Error);
    assert_eq!(status.message, "Frequency too low.");
}

#[test]
fn slightly_too_slow_is_a_warning() {
    let fs = bounded();
    tick_every(&fs, 2.1, 5);
    let status = run(&fs);
    assert_eq!(status.level, Level::Warn);
    assert_eq!(status.message, "Frequency slightly too low.");
}

#[test]
fn far_too_fast_is_an_error() {
    let fs = bounded();
    tick_every(&fs, 0.4, 5);
    let status = run(&fs);
    assert_eq!(status.level, Level::Error);
    assert_eq!(status.message, "Frequency too high.");
}

#[test]
fn slightly_too_fast_is_a_warning() {
    let fs = bounded();
    tick_every(&fs, 0.48, 5);
    let status = run(&fs);
    assert_eq!(status.level, Level::Warn);
    assert_eq!(status.message, "Frequency slightly too high.");
}

#[test]
fn simultaneous_events_are_too_fast() {
    let fs = bounded();
    for _ in 0..3 {
        fs.tick_at(Time::from_seconds(util::START));
    }
    let status = run(&fs);
    assert_eq!(status.level, Level::Error);
    assert_eq!(status.message, "Frequency too high.");
}

#[test]
fn only_the_latest_window_counts() {
    let fs = bounded();
    tick_every(&fs, 10.0, 10);
    for i in 1..=5 {
        fs.tick_at(Time::from_seconds(util::START + 100.0 + f64::from(i)));
    }
    let status = run(&fs);
    assert_eq!(status.level, Level::Ok, "{}", status.message);
    assert_eq!(status.value("Events in window"), Some("5"));
    assert_eq!(status.value("Events since startup"), Some("15"));
}

#[test]
fn events_since_last_update_resets_on_run() {
    let fs = bounded();
    tick_every(&fs, 1.0, 3);
    run(&fs);
    fs.tick_at(Time::from_seconds(util::START + 3.0));
    fs.tick_at(Time::from_seconds(util::START + 4.0));
    let status = run(&fs);
    assert_eq!(status.value("Events since last update"), Some("2"));
    assert_eq!(status.value("Events since startup"), Some("5"));
}

#[test]
fn clearing_reverts_to_not_enough_data() {
    let fs = bounded();
    tick_every(&fs, 1.0, 5);
    assert_eq!(run(&fs).level, Level::Ok);
    fs.clear();
    let status = run(&fs);
    assert_eq!(status.level, Level::Warn, "Freshly cleared should warn");
    assert_eq!(status.message, "Not enough data since startup");
}

#[test]
fn tick_uses_the_configured_clock() {
    let clock = util::clock();
    let fs = FrequencyStatus::builder()
        .min_frequency(1.0)
        .max_frequency(1.0)
        .clock(clock.clone())
        .build()
        .unwrap();
    for _ in 0..5 {
        fs.tick();
        clock.advance_secs(1.0);
    }
    let status = run(&fs);
    assert_eq!(status.level, Level::Ok, "{}", status.message);
    assert_eq!(status.value("Target frequency (Hz)"), Some("1"));
}

#[test]
fn bounds_are_reported() {
    let fs = bounded();
    tick_every(&fs, 1.0, 2);
    let status = run(&fs);
    let min: f64 = status
        .value("Minimum acceptable frequency (Hz)")
        .unwrap()
        .parse()
        .unwrap();
    let max: f64 = status
        .value("Maximum acceptable frequency (Hz)")
        .unwrap()
        .parse()
        .unwrap();
    assert!((min - 0.5 / 1.1).abs() < 1e-9);
    assert!((max - 2.2).abs() < 1e-9);
    assert!(status.value("Target frequency (Hz)").is_none());
}

#[test]
fn unbounded_status_omits_bounds() {
    let fs = FrequencyStatus::builder().build().unwrap();
    tick_every(&fs, 1.0, 3);
    let status = run(&fs);
    assert_eq!(status.level, Level::Ok);
    assert!(status.value("Minimum acceptable frequency (Hz)").is_none());
    assert!(status.value("Maximum acceptable frequency (Hz)").is_none());
}

fn rejected_parameter(builder: &mut FrequencyStatusBuilder<'_>) -> &'static str {
    match builder.build() {
        Err(Error::InvalidConfig { parameter, .. }) => parameter,
        Err(err) => panic!("Unexpected error: {}", err),
        Ok(_) => panic!("Invalid configuration was accepted"),
    }
}

#[test]
fn invalid_configurations_are_rejected() {
    assert_eq!(
        rejected_parameter(FrequencyStatus::builder().min_frequency(3.0).max_frequency(2.0)),
        "max_frequency"
    );
    assert_eq!(
        rejected_parameter(FrequencyStatus::builder().min_frequency(-1.0)),
        "min_frequency"
    );
    assert_eq!(
        rejected_parameter(FrequencyStatus::builder().window_size(1)),
        "window_size"
    );
    assert_eq!(
        rejected_parameter(FrequencyStatus::builder().window_size(0)),
        "window_size"
    );
    assert_eq!(
        rejected_parameter(FrequencyStatus::builder().tolerance(0.9)),
        "tolerance"
    );
}
