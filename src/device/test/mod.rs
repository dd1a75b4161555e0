use super::*;


use hal::TestAdc;
use util::{setup, setup_joined};

#[test]
fn join_services_stack_until_accept() {
    let (handle, _led, _sink, mut device) = setup();
    handle.joined_after_polls(3);
    device.start().unwrap();
    device.join();

    // One join trigger, then exactly one 1 s service call per negative
    // poll, and nothing sent or received before the accept.
    assert_eq!(handle.join_calls(), 1);
    assert_eq!(handle.process_calls(), [JOIN_POLL_MS; 3]);
    assert!(handle.sent().is_empty());
    assert_eq!(handle.receive_calls(), 0);
    assert_eq!(device.join_state(), JoinState::Joined);
}

#[test]
fn join_with_immediate_accept_never_polls() {
    let (handle, _led, _sink, mut device) = setup();
    device.start().unwrap();
    device.join();
    assert_eq!(handle.join_calls(), 1);
    assert!(handle.process_calls().is_empty());
}

#[test]
fn failed_init_never_touches_the_network() {
    let (handle, _led, _sink, mut device) = setup();
    handle.fail_init();

    assert!(device.start().is_err());
    assert_eq!(handle.init_calls(), 1);
    assert_eq!(handle.join_calls(), 0);
    assert!(handle.sent().is_empty());
    assert_eq!(handle.receive_calls(), 0);
    assert_eq!(device.join_state(), JoinState::NotStarted);
}

#[test]
fn cycle_sends_reading_on_port_2() {
    let (handle, _led, _sink, mut device) = setup_joined();
    assert_eq!(device.run_cycle(), Ok(CycleOutcome::Timeout));

    let sent = handle.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, b"27.04,4.50");
    assert_eq!(sent[0].1, UPLINK_PORT);
    // Timed-out wait: the downlink check is skipped entirely.
    assert_eq!(handle.process_calls(), [RX_WAIT_MS]);
    assert_eq!(handle.receive_calls(), 0);
}

#[test]
fn downlink_first_byte_drives_the_output() {
    let (handle, led, _sink, mut device) = setup_joined();
    handle.queue_downlink(&[0x01, 0xFF], 5);

    assert_eq!(device.run_cycle(), Ok(CycleOutcome::Downlink(0x01)));
    // Only byte 0 lands on the output; port 5 and 0xFF go nowhere.
    assert_eq!(led.writes(), [0x01]);
}

#[test]
fn downlink_level_is_not_coerced_to_boolean() {
    let (handle, led, _sink, mut device) = setup_joined();
    handle.queue_downlink(&[0xFF], 1);

    assert_eq!(device.run_cycle(), Ok(CycleOutcome::Downlink(0xFF)));
    assert_eq!(led.writes(), [0xFF]);
}

#[test]
fn empty_downlink_is_ignored() {
    let (handle, led, _sink, mut device) = setup_joined();
    handle.queue_downlink(&[], 2);

    assert_eq!(device.run_cycle(), Ok(CycleOutcome::Event));
    assert!(led.writes().is_empty());
}

#[test]
fn event_without_downlink_leaves_output_alone() {
    let (handle, led, _sink, mut device) = setup_joined();
    handle.raise_events();

    assert_eq!(device.run_cycle(), Ok(CycleOutcome::Event));
    assert_eq!(handle.receive_calls(), 1);
    assert!(led.writes().is_empty());
}

#[test]
fn send_failure_still_waits_and_retries_next_cycle() {
    let (handle, _led, _sink, mut device) = setup_joined();
    handle.fail_sends();
    handle.raise_events();

    assert_eq!(device.run_cycle(), Ok(CycleOutcome::Event));
    assert_eq!(device.run_cycle(), Ok(CycleOutcome::Event));

    // Both cycles attempted a send, both still ran their wait and their
    // downlink check; no backoff, no skipped cycle.
    assert_eq!(handle.sent().len(), 2);
    assert_eq!(handle.process_calls(), [RX_WAIT_MS; 2]);
    assert_eq!(handle.receive_calls(), 2);
}

#[test]
fn sampling_failure_skips_the_cycle() {
    let mut adc = TestAdc::nominal();
    adc.fail = true;
    let (handle, led, _sink, mut device) = util::setup_with_adc(adc);
    device.start().unwrap();
    device.join();

    assert!(device.run_cycle().is_err());
    assert!(handle.sent().is_empty());
    assert!(handle.process_calls().is_empty());
    assert!(led.writes().is_empty());
}

#[test]
fn status_pulse_vocabulary_through_startup() {
    let (handle, _led, sink, mut device) = setup();
    handle.joined_after_polls(2);
    device.start().unwrap();
    device.join();

    // start: 1 before init, 1 after; join: 2 per negative poll, then 1.
    assert_eq!(sink.pulses(), [1, 1, 2, 2, 1]);
    assert_eq!(sink.infos().first().map(String::as_str), Some("initializing lorawan stack"));
    assert_eq!(sink.infos().last().map(String::as_str), Some("joined"));
}

#[test]
fn fatal_init_reports_before_returning() {
    let (handle, _led, sink, mut device) = setup();
    handle.fail_init();
    let _ = device.start();

    // The pre-init pulse fired; the post-init success pulse did not.
    assert_eq!(sink.pulses(), [1]);
}
