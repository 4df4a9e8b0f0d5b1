//! End-to-end poll cycles against a scripted administrative client.

use std::fs;

use mqmon::broker::{Query, Row, SessionError};
use mqmon::collector::CollectionOrchestrator;
use mqmon::config::Config;
use mqmon::metrics::names;
use tempfile::tempdir;

use crate::common::{attr_number, attr_text, gauge, rate, RecordingReporter, ScriptedClient};

fn orchestrator(config_toml: &str) -> CollectionOrchestrator {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mqmon.toml");
    fs::write(&path, config_toml).unwrap();
    let config = Config::load(&path).unwrap();
    CollectionOrchestrator::from_config(&config).unwrap()
}

const BASE_CONFIG: &str = r#"
[broker]
host = "mq.example.com"
queue_manager = "QM1"
"#;

#[test]
fn test_queue_rows_from_three_queries_merge_into_one_record() {
    // Purpose: Verify a full cycle merges the queue queries and applies
    // the configured filter
    // Validates:
    // - One MQQueueSample per surviving queue, keyed by queue name
    // - Ignored queue reported nowhere
    // - Common-attribute prefix present exactly once, fields in query order
    let mut orchestrator = orchestrator(
        r#"
        [broker]
        host = "mq.example.com"
        queue_manager = "QM1"

        [report]
        additional_queue_status = true

        [filters.queue]
        ignores = ["SYSTEM\\..*"]
        "#,
    );

    let mut client = ScriptedClient::new()
        .respond(
            &Query::QueueInquire,
            vec![
                Row::new()
                    .with_text(names::Q_NAME, "Q1")
                    .with_number(names::Q_DEPTH, 5)
                    .with_number(names::Q_MAX_DEPTH, 10)
                    .with_number(names::OPEN_INPUT_COUNT, 1)
                    .with_number(names::OPEN_OUTPUT_COUNT, 2),
                Row::new()
                    .with_text(names::Q_NAME, "SYSTEM.DEFAULT.LOCAL.QUEUE")
                    .with_number(names::Q_DEPTH, 3),
            ],
        )
        .respond(
            &Query::QueueResetStats,
            vec![Row::new()
                .with_text(names::Q_NAME, "Q1")
                .with_number(names::HIGH_Q_DEPTH, 9)
                .with_number(names::MSG_DEQ_COUNT, 4)
                .with_number(names::MSG_ENQ_COUNT, 6)
                .with_number(names::TIME_SINCE_RESET, 100)],
        )
        .respond(
            &Query::QueueStatus,
            vec![Row::new()
                .with_text(names::Q_NAME, "Q1")
                .with_number(names::OLDEST_MSG_AGE, 12)
                .with_number(names::UNCOMMITTED_MSGS, 0)
                .with_text("lastGetDate", "2024-03-04")
                .with_text("lastGetTime", "09:00:00")],
        );
    let mut reporter = RecordingReporter::new();

    orchestrator.run_cycle(&mut client, &mut reporter);

    let samples = reporter.of_kind(names::MQ_QUEUE_SAMPLE);
    assert_eq!(samples.len(), 1, "ignored queue must not be reported");
    let (_, set, entity) = samples[0];
    assert_eq!(entity.as_deref(), Some("Q1"));

    assert_eq!(attr_text(set, names::PROVIDER), Some("IBM"));
    assert_eq!(attr_text(set, names::Q_MANAGER_NAME), Some("QM1"));
    assert_eq!(attr_text(set, names::Q_MANAGER_HOST), Some("mq.example.com"));
    assert_eq!(attr_text(set, names::Q_NAME), Some("Q1"));
    assert_eq!(set.count(names::PROVIDER), 1);

    assert_eq!(gauge(set, names::Q_DEPTH), Some(5.0));
    assert_eq!(gauge(set, names::Q_DEPTH_PERCENT), Some(50.0));
    assert_eq!(gauge(set, names::HIGH_Q_DEPTH), Some(9.0));
    assert_eq!(gauge(set, names::OLDEST_MSG_AGE), Some(12.0));
    assert_eq!(attr_text(set, names::LAST_GET), Some("2024-03-04 09:00:00"));
}

#[test]
fn test_session_failure_abandons_cycle_with_one_status_record() {
    // Purpose: Verify the broker-unavailable path
    // Validates:
    // - Exactly one record for the whole cycle
    // - Reason classification and numeric reason code carried
    let mut orchestrator = orchestrator(BASE_CONFIG);
    let mut client =
        ScriptedClient::new().refuse(SessionError::Unavailable { reason_code: 2059 });
    let mut reporter = RecordingReporter::new();

    orchestrator.run_cycle(&mut client, &mut reporter);

    assert_eq!(reporter.records.len(), 1);
    let (kind, set, entity) = &reporter.records[0];
    assert_eq!(kind.as_str(), names::MQ_OBJECT_STATUS_SAMPLE);
    assert_eq!(entity.as_deref(), Some("QM1"));
    assert_eq!(attr_text(set, names::STATUS), Some("QUEUE_MANAGER_NOT_AVAILABLE"));
    assert_eq!(
        attr_text(set, names::CHANNEL_INIT_STATUS),
        Some("QUEUE_MANAGER_NOT_AVAILABLE")
    );
    assert_eq!(attr_number(set, names::ERROR), Some(2059));
    assert_eq!(attr_text(set, names::NAME), Some("QM1"));
}

#[test]
fn test_admin_setup_failure_uses_connect_error_label() {
    let mut orchestrator = orchestrator(BASE_CONFIG);
    let mut client =
        ScriptedClient::new().refuse(SessionError::AdminSetup { reason_code: 2035 });
    let mut reporter = RecordingReporter::new();

    orchestrator.run_cycle(&mut client, &mut reporter);

    assert_eq!(reporter.records.len(), 1);
    let set = &reporter.records[0].1;
    assert_eq!(attr_text(set, names::STATUS), Some("QUEUE_MANAGER_CONNECT_ERROR"));
    assert_eq!(attr_number(set, names::ERROR), Some(2035));
}

#[test]
fn test_query_failure_is_cycle_local() {
    // Purpose: Verify a failed query is skipped while the rest of the
    // cycle still reports
    // Validates:
    // - Queue seen only by a later query still gets a fully prefixed record
    let mut orchestrator = orchestrator(BASE_CONFIG);
    let mut client = ScriptedClient::new()
        .fail(&Query::QueueInquire, 3008)
        .respond(
            &Query::QueueResetStats,
            vec![Row::new()
                .with_text(names::Q_NAME, "Q1")
                .with_number(names::HIGH_Q_DEPTH, 9)],
        );
    let mut reporter = RecordingReporter::new();

    orchestrator.run_cycle(&mut client, &mut reporter);

    let samples = reporter.of_kind(names::MQ_QUEUE_SAMPLE);
    assert_eq!(samples.len(), 1);
    let set = &samples[0].1;
    assert_eq!(attr_text(set, names::PROVIDER), Some("IBM"));
    assert_eq!(attr_text(set, names::Q_NAME), Some("Q1"));
    assert_eq!(gauge(set, names::HIGH_Q_DEPTH), Some(9.0));
}

#[test]
fn test_channel_records_decode_codes_and_carry_rates() {
    let mut orchestrator = orchestrator(BASE_CONFIG);
    let mut client = ScriptedClient::new().respond(
        &Query::ChannelStatus,
        vec![
            Row::new()
                .with_text(names::CHANNEL_NAME, "TO.QM2")
                .with_number(names::CHANNEL_TYPE, 1)
                .with_number(names::CHANNEL_STATUS, 3)
                .with_number(names::CHANNEL_SUB_STATE, 300)
                .with_text(names::CONNECTION_NAME, " 10.0.0.1(1414) ")
                .with_number("messages", 42)
                .with_number("bytesSent", 1000),
            Row::new()
                .with_text(names::CHANNEL_NAME, "TO.QM3")
                .with_number(names::CHANNEL_STATUS, 3)
                .with_number("indoubtStatus", 1),
        ],
    );
    let mut reporter = RecordingReporter::new();

    orchestrator.run_cycle(&mut client, &mut reporter);

    let samples = reporter.of_kind(names::MQ_CHANNEL_SAMPLE);
    assert_eq!(samples.len(), 2);

    let running = &samples[0].1;
    assert_eq!(attr_text(running, names::CHANNEL_STATUS), Some("RUNNING"));
    assert_eq!(attr_text(running, names::CHANNEL_TYPE), Some("SENDER"));
    assert_eq!(attr_text(running, names::CHANNEL_SUB_STATE), Some("RECEIVING"));
    assert_eq!(attr_text(running, names::CONNECTION_NAME), Some("10.0.0.1(1414)"));
    assert_eq!(gauge(running, names::MSGS_COUNT), Some(42.0));
    assert_eq!(rate(running, names::MSGS_RATE), Some(42.0));
    assert_eq!(gauge(running, names::BYTES_SENT_COUNT), Some(1000.0));
    assert_eq!(rate(running, names::BYTES_SENT_RATE), Some(1000.0));

    // An in-doubt channel overrides its transport status.
    let indoubt = &samples[1].1;
    assert_eq!(attr_text(indoubt, names::CHANNEL_STATUS), Some("INDOUBT"));
}

#[test]
fn test_queue_manager_status_record() {
    let mut orchestrator = orchestrator(BASE_CONFIG);
    let mut client = ScriptedClient::new().respond(
        &Query::QueueManagerStatus,
        vec![Row::new()
            .with_number(names::CHANNEL_INIT_STATUS, 2)
            .with_number(names::COMMAND_SERVER_STATUS, 2)
            .with_number(names::CONNECTION_COUNT, 17)
            .with_number(names::STATUS, 2)],
    );
    let mut reporter = RecordingReporter::new();

    orchestrator.run_cycle(&mut client, &mut reporter);

    let samples = reporter.of_kind(names::MQ_OBJECT_STATUS_SAMPLE);
    assert_eq!(samples.len(), 1);
    let set = &samples[0].1;
    assert_eq!(attr_text(set, names::OBJECT_ATTRIBUTE), Some("QueueManager"));
    assert_eq!(attr_text(set, names::CHANNEL_INIT_STATUS), Some("RUNNING"));
    assert_eq!(attr_text(set, names::COMMAND_SERVER_STATUS), Some("RUNNING"));
    assert_eq!(gauge(set, names::CONNECTION_COUNT), Some(17.0));
    assert_eq!(attr_text(set, names::STATUS), Some("RUNNING"));
    assert_eq!(attr_number(set, names::ERROR), Some(0));
}

#[test]
fn test_listeners_skip_defaults_and_survive_per_listener_failures() {
    let mut orchestrator = orchestrator(BASE_CONFIG);
    let mut client = ScriptedClient::new()
        .respond(
            &Query::ListenerInquire,
            vec![
                Row::new().with_text(names::NAME, "LISTENER.TCP"),
                Row::new().with_text(names::NAME, "SYSTEM.DEFAULT.LISTENER.TCP"),
                Row::new().with_text(names::NAME, "LISTENER.BROKEN"),
            ],
        )
        .respond(
            &Query::ListenerStatus {
                name: "LISTENER.TCP".to_string(),
            },
            vec![Row::new()
                .with_number(names::STATUS, 2)
                .with_number("port", 1414)],
        )
        .fail(
            &Query::ListenerStatus {
                name: "LISTENER.BROKEN".to_string(),
            },
            2085,
        );
    let mut reporter = RecordingReporter::new();

    orchestrator.run_cycle(&mut client, &mut reporter);

    let samples = reporter.of_kind(names::MQ_OBJECT_STATUS_SAMPLE);
    assert_eq!(samples.len(), 2, "default listener must be skipped");

    let (_, running, entity) = samples[0];
    assert_eq!(entity.as_deref(), Some("LISTENER.TCP"));
    assert_eq!(attr_text(running, names::OBJECT_ATTRIBUTE), Some("Listener"));
    assert_eq!(attr_text(running, names::STATUS), Some("RUNNING"));
    assert_eq!(gauge(running, "port"), Some(1414.0));

    let (_, broken, entity) = samples[1];
    assert_eq!(entity.as_deref(), Some("LISTENER.BROKEN"));
    assert_eq!(attr_text(broken, names::STATUS), Some("UNKNOWN"));
    assert_eq!(attr_number(broken, names::ERROR), Some(2085));
}

#[test]
fn test_topic_collection_is_gated_and_filtered() {
    let mut orchestrator = orchestrator(
        r#"
        [broker]
        host = "mq.example.com"
        queue_manager = "QM1"

        [report]
        topic_status = true

        [filters.topic]
        ignores = ["\\$SYS.*"]
        "#,
    );
    let mut client = ScriptedClient::new().respond(
        &Query::TopicStatus,
        vec![
            Row::new()
                .with_text(names::TOPIC_NAME, "PRICES/EQUITIES")
                .with_number(names::PUB_COUNT, 3)
                .with_number(names::SUB_COUNT, 12),
            Row::new()
                .with_text(names::TOPIC_NAME, "$SYS/MQ/INFO")
                .with_number(names::PUB_COUNT, 1),
        ],
    );
    let mut reporter = RecordingReporter::new();

    orchestrator.run_cycle(&mut client, &mut reporter);

    let samples = reporter.of_kind(names::MQ_TOPIC_SAMPLE);
    assert_eq!(samples.len(), 1);
    let (_, set, entity) = samples[0];
    assert_eq!(entity.as_deref(), Some("PRICES/EQUITIES"));
    assert_eq!(attr_text(set, names::OBJECT_ATTRIBUTE), Some("topic"));
    assert_eq!(attr_text(set, names::TOPIC_NAME), Some("PRICES/EQUITIES"));
    assert_eq!(gauge(set, names::PUB_COUNT), Some(3.0));
    assert_eq!(gauge(set, names::SUB_COUNT), Some(12.0));
}

#[test]
fn test_topics_not_collected_without_gate() {
    let mut orchestrator = orchestrator(BASE_CONFIG);
    let mut client = ScriptedClient::new().respond(
        &Query::TopicStatus,
        vec![Row::new()
            .with_text(names::TOPIC_NAME, "PRICES/EQUITIES")
            .with_number(names::PUB_COUNT, 3)],
    );
    let mut reporter = RecordingReporter::new();

    orchestrator.run_cycle(&mut client, &mut reporter);

    assert!(reporter.of_kind(names::MQ_TOPIC_SAMPLE).is_empty());
}

#[test]
fn test_event_messages_become_event_samples() {
    // Purpose: Verify event queue draining
    // Validates:
    // - Reason code and qualifier decoded
    // - Remaining parameters folded into the details string, sorted
    let mut orchestrator = orchestrator(
        r#"
        [broker]
        host = "mq.example.com"
        queue_manager = "QM1"

        [report]
        event_messages = true
        "#,
    );
    let mut client = ScriptedClient::new().respond(
        &Query::EventMessages {
            queue: "SYSTEM.ADMIN.QMGR.EVENT".to_string(),
        },
        vec![Row::new()
            .with_text(names::PUT_TIME, "2024-03-04 09:00:00")
            .with_number(names::REASON_CODE, 2226)
            .with_text("qName", "Q1")
            .with_number("boundaryDepth", 5000)],
    );
    let mut reporter = RecordingReporter::new();

    orchestrator.run_cycle(&mut client, &mut reporter);

    let samples = reporter.of_kind(names::MQ_EVENT_SAMPLE);
    assert_eq!(samples.len(), 1);
    let set = &samples[0].1;
    assert_eq!(attr_text(set, names::PROVIDER), Some("IBM"));
    assert_eq!(attr_text(set, names::OBJECT_ATTRIBUTE), Some("event"));
    assert_eq!(attr_text(set, names::Q_MANAGER_NAME), Some("QM1"));
    assert_eq!(attr_text(set, names::Q_MANAGER_HOST), Some("mq.example.com"));
    assert_eq!(attr_text(set, names::QUEUE_MANAGER), Some("QM1"));
    assert_eq!(attr_text(set, names::EVENT_QUEUE), Some("SYSTEM.ADMIN.QMGR.EVENT"));
    assert_eq!(attr_text(set, names::PUT_TIME), Some("2024-03-04 09:00:00"));
    assert_eq!(attr_text(set, names::REASON_CODE), Some("Q_FULL"));
    assert_eq!(
        attr_text(set, names::DETAILS),
        Some("boundaryDepth=5000;qName=Q1;")
    );
}

#[test]
fn test_error_log_hits_surface_once_across_cycles() {
    // Purpose: Verify the tail scan runs inside the cycle and its offset
    // survives between cycles
    let dir = tempdir().unwrap();
    let error_dir = dir.path().join("errors");
    let state_dir = dir.path().join("state");
    fs::create_dir_all(&error_dir).unwrap();
    fs::create_dir_all(&state_dir).unwrap();
    fs::write(
        error_dir.join("AMQERR01.LOG"),
        "AMQ8003: queue manager started.\nAMQ9526: Message sequence number error for channel TO.QM2.\n",
    )
    .unwrap();

    let mut orchestrator = orchestrator(&format!(
        r#"
        [broker]
        host = "mq.example.com"
        queue_manager = "QM1"

        [report]
        monitor_error_logs = true

        [logs]
        error_log_path = "{}"
        state_path = "{}"
        "#,
        error_dir.display(),
        state_dir.display()
    ));
    let mut client = ScriptedClient::new();
    let mut reporter = RecordingReporter::new();

    orchestrator.run_cycle(&mut client, &mut reporter);
    let samples = reporter.of_kind(names::MQ_EVENT_SAMPLE);
    assert_eq!(samples.len(), 1);
    let set = &samples[0].1;
    assert_eq!(attr_text(set, names::PROVIDER), Some("IBM"));
    assert_eq!(attr_text(set, names::OBJECT_ATTRIBUTE), Some("log"));
    assert_eq!(attr_text(set, names::Q_MANAGER_NAME), Some("QM1"));
    assert_eq!(attr_text(set, names::Q_MANAGER_HOST), Some("mq.example.com"));
    assert_eq!(attr_text(set, names::QUEUE_MANAGER), Some("QM1"));
    assert_eq!(attr_text(set, names::REASON_CODE), Some("CHANNEL_OUT_OF_SYNC"));
    assert_eq!(
        attr_text(set, names::DETAILS),
        Some("AMQ9526: Message sequence number error for channel TO.QM2.")
    );

    // The same lines are never reported twice.
    let mut client = ScriptedClient::new();
    let mut reporter = RecordingReporter::new();
    orchestrator.run_cycle(&mut client, &mut reporter);
    assert!(reporter.of_kind(names::MQ_EVENT_SAMPLE).is_empty());
}
