use courier_types::{DeliveryReport, DeliveryStatus, Message, UndoOutcome};
use serde_json::{self as json, Value};

fn parse(json_str: &str) -> Value {
    json::from_str(json_str).expect("valid json")
}

#[test]
fn message_roundtrip() {
    let msg = Message::new("alice", vec!["bob".into(), "charlie".into()], "Hello!");

    let s = json::to_string(&msg).expect("serialize");
    let v = parse(&s);

    assert_eq!(v["sender"], "alice");
    assert_eq!(v["recipients"][0], "bob");
    assert_eq!(v["recipients"][1], "charlie");
    assert_eq!(v["content"], "Hello!");
    assert!(v["id"].is_string());
    assert!(v["timestamp"].is_string());

    let back: Message = json::from_str(&s).expect("deserialize");
    assert_eq!(back, msg);
}

#[test]
fn delivery_report_roundtrip() {
    let msg = Message::new("alice", vec!["bob".into(), "mallory".into()], "hi");
    let report = DeliveryReport {
        message: msg,
        outcomes: vec![
            ("bob".into(), DeliveryStatus::Delivered),
            ("mallory".into(), DeliveryStatus::NotFound),
        ],
    };

    let s = json::to_string(&report).expect("serialize");
    let v = parse(&s);

    assert_eq!(v["outcomes"][0][0], "bob");
    assert_eq!(v["outcomes"][0][1], "Delivered");
    assert_eq!(v["outcomes"][1][1], "NotFound");

    let back: DeliveryReport = json::from_str(&s).expect("deserialize");
    assert_eq!(back, report);
}

#[test]
fn undo_outcome_roundtrip() {
    let outcome = UndoOutcome::NothingToUndo;

    let s = json::to_string(&outcome).expect("serialize");
    assert_eq!(s, "\"NothingToUndo\"");

    let back: UndoOutcome = json::from_str(&s).expect("deserialize");
    assert_eq!(back, outcome);
}
