use diagnostic_updater::{
    run_diagnostics, CompositeTaskRunner, Level, Status, Task, TaskError, TaskResult,
};

struct Reading {
    name: &'static str,
    level: Level,
    value: i32,
}

impl Task for Reading {
    fn name(&self) -> &str {
        self.name
    }

    fn run(&self, status: &mut Status) -> TaskResult {
        status.set_summary(self.level, self.name);
        status.add(self.name, self.value);
        Ok(())
    }
}

struct Disconnected;

impl Task for Disconnected {
    fn name(&self) -> &str {
        "bus"
    }

    fn run(&self, _: &mut Status) -> TaskResult {
        Err(TaskError::new("no response"))
    }
}

struct Crashing;

impl Task for Crashing {
    fn name(&self) -> &str {
        "firmware"
    }

    fn run(&self, _: &mut Status) -> TaskResult {
        panic!("watchdog reset")
    }
}

struct Arm {
    shoulder: Reading,
    elbow: Reading,
    bus: Disconnected,
    firmware: Crashing,
}

impl Arm {
    fn healthy() -> Self {
        Self {
            shoulder: Reading {
                name: "shoulder",
                level: Level::Ok,
                value: 12,
            },
            elbow: Reading {
                name: "elbow",
                level: Level::Ok,
                value: 7,
            },
            bus: Disconnected,
            firmware: Crashing,
        }
    }
}

#[test]
fn healthy_fields_merge_into_one_ok_status() {
    let arm = Arm::healthy();
    let mut status = Status::new(Level::Ok, "");
    run_diagnostics!(&mut status, arm.shoulder, arm.elbow);

    assert_eq!(status.level, Level::Ok);
    assert_eq!(status.message, "shoulder; elbow");
    assert_eq!(status.value("shoulder"), Some("12"));
    assert_eq!(status.value("elbow"), Some("7"));
}

#[test]
fn failing_field_becomes_an_error_summary() {
    let arm = Arm::healthy();
    let mut status = Status::default();
    run_diagnostics!(&mut status, arm.shoulder, arm.bus, arm.elbow);

    assert_eq!(status.level, Level::Error);
    assert_eq!(status.message, "Task 'bus' failed: no response");
    assert_eq!(status.values.len(), 2);
}

#[test]
fn panicking_field_does_not_escape() {
    let mut arm = Arm::healthy();
    arm.elbow.level = Level::Warn;
    let mut status = Status::default();
    run_diagnostics!(&mut status, arm.firmware, arm.elbow, arm.shoulder);

    assert_eq!(status.level, Level::Error);
    assert_eq!(status.message, "Task 'firmware' panicked; elbow");
    assert_eq!(status.value("elbow"), Some("7"));
}

#[test]
fn runner_applies_summary_when_dropped() {
    let mut arm = Arm::healthy();
    arm.shoulder.level = Level::Warn;
    let mut status = Status::new(Level::Ok, "start");
    {
        let mut runner = CompositeTaskRunner::new(&mut status);
        runner.run(&arm.elbow);
        runner.run(&arm.shoulder);
    }

    assert_eq!(status.level, Level::Warn);
    assert_eq!(status.message, "shoulder");
}
