use diagnostic_updater::msg::DiagnosticStatus;
use diagnostic_updater::Heartbeat;

mod util;

use util::{find, Harness};

#[test]
fn heartbeat_reports_alive_on_every_update() {
    let harness = Harness::new();
    harness.updater.add_task(Heartbeat).unwrap();

    for seq in 1..=3 {
        let array = harness.force_update();
        assert_eq!(array.header.seq, seq);
        let status = find(&array, "Heartbeat");
        assert_eq!(status.level, DiagnosticStatus::OK);
        assert_eq!(status.message, "Alive");
        assert_eq!(status.hardware_id, "test_hw");
        assert!(status.values.is_empty());
    }
}
