//! Topic metrics: publication/subscription counts per topic, plus optional
//! per-subscription status.

use tracing::error;

use crate::broker::constants::{lookup_or_code, Category};
use crate::broker::{AdminSession, Query};
use crate::filtering::FilterRuleSet;
use crate::metrics::merger::RecordMerger;
use crate::metrics::names;

pub(crate) fn collect(
    session: &mut dyn AdminSession,
    filter: &FilterRuleSet,
    merger: &mut RecordMerger,
    additional_status: bool,
) {
    status(session, filter, merger);
    if additional_status {
        subscriptions(session, filter, merger);
    }
}

fn status(session: &mut dyn AdminSession, filter: &FilterRuleSet, merger: &mut RecordMerger) {
    let rows = match session.query(&Query::TopicStatus) {
        Ok(rows) => rows,
        Err(e) => {
            error!("error fetching topic status: {}", e);
            return;
        }
    };

    for row in &rows {
        let Some(name) = row.text(names::TOPIC_NAME) else {
            continue;
        };
        if !filter.should_report(name) {
            continue;
        }

        let set = merger.record_mut(name);
        set.add_attr(names::STATUS_TYPE, "topicStatus");
        if let Some(durable) = row.number(names::DURABLE) {
            set.add_gauge(names::DURABLE, durable as f64);
        }
        if let Some(pubs) = row.number(names::PUB_COUNT) {
            set.add_gauge(names::PUB_COUNT, pubs as f64);
        }
        if let Some(subs) = row.number(names::SUB_COUNT) {
            set.add_gauge(names::SUB_COUNT, subs as f64);
        }
    }
}

fn subscriptions(
    session: &mut dyn AdminSession,
    filter: &FilterRuleSet,
    merger: &mut RecordMerger,
) {
    let rows = match session.query(&Query::TopicSubscriptions) {
        Ok(rows) => rows,
        Err(e) => {
            error!("error fetching topic subscription status: {}", e);
            return;
        }
    };

    for row in &rows {
        let Some(name) = row.text(names::TOPIC_NAME) else {
            continue;
        };
        if !filter.should_report(name) {
            continue;
        }

        let set = merger.record_mut(name);
        set.add_attr(names::STATUS_TYPE, "topicSub");
        if let Some(durable) = row.number(names::DURABLE) {
            set.add_gauge(names::DURABLE, durable as f64);
        }
        if let Some(sub_id) = row.bytes(names::SUB_ID) {
            set.add_attr_bytes(names::SUB_ID, sub_id.to_vec());
        }
        if let Some(user) = row.text(names::SUB_USER_ID) {
            set.add_attr(names::SUB_USER_ID, user);
        }
        if let Some(sub_type) = row.number(names::SUB_TYPE) {
            set.add_attr(
                names::SUB_TYPE,
                lookup_or_code(sub_type, Category::SubscriptionType, "SUB_TYPE"),
            );
        }
        if let Some(count) = row.number(names::MESSAGE_COUNT) {
            set.add_gauge(names::MESSAGE_COUNT, count as f64);
        }
        if let Some(connection) = row.bytes(names::CONNECTION_ID) {
            set.add_attr_bytes(names::CONNECTION_ID, connection.to_vec());
        }
        for field in [
            names::RESUME_DATE,
            names::RESUME_TIME,
            names::LAST_MESSAGE_DATE,
            names::LAST_MESSAGE_TIME,
        ] {
            if let Some(value) = row.text(field) {
                set.add_attr(field, value);
            }
        }
    }
}
