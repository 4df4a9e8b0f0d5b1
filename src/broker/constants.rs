//! Broker code tables.
//!
//! Administrative responses carry numeric codes; this module maps them to
//! their short names. Keeping the tables behind one pure function means a
//! different broker's tables can be swapped in without touching the
//! merge/filter/scan core.

/// The code namespaces a lookup can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Channel initiator / command server / listener service status.
    ServiceStatus,
    /// Overall queue manager status.
    QueueManagerStatus,
    ChannelType,
    ChannelStatus,
    ChannelSubState,
    SubscriptionType,
    /// Event message reason codes.
    ReasonCode,
    /// Event message reason qualifiers.
    ReasonQualifier,
}

/// Short name for `code` within `category`, if known.
pub fn lookup(code: i64, category: Category) -> Option<&'static str> {
    match category {
        Category::ServiceStatus => service_status(code),
        Category::QueueManagerStatus => queue_manager_status(code),
        Category::ChannelType => channel_type(code),
        Category::ChannelStatus => channel_status(code),
        Category::ChannelSubState => channel_sub_state(code),
        Category::SubscriptionType => subscription_type(code),
        Category::ReasonCode => reason_code(code),
        Category::ReasonQualifier => reason_qualifier(code),
    }
}

/// Like [`lookup`], falling back to `PREFIX_<code>` for unknown codes so a
/// record never loses the raw information.
pub fn lookup_or_code(code: i64, category: Category, prefix: &str) -> String {
    lookup(code, category)
        .map(str::to_string)
        .unwrap_or_else(|| format!("{prefix}_{code}"))
}

fn service_status(code: i64) -> Option<&'static str> {
    Some(match code {
        0 => "STOPPED",
        1 => "STARTING",
        2 => "RUNNING",
        3 => "STOPPING",
        4 => "RETRYING",
        _ => return None,
    })
}

fn queue_manager_status(code: i64) -> Option<&'static str> {
    Some(match code {
        1 => "STARTING",
        2 => "RUNNING",
        3 => "QUIESCING",
        4 => "STANDBY",
        _ => return None,
    })
}

fn channel_type(code: i64) -> Option<&'static str> {
    Some(match code {
        1 => "SENDER",
        2 => "SERVER",
        3 => "RECEIVER",
        4 => "REQUESTER",
        5 => "ALL",
        6 => "CLNTCONN",
        7 => "SVRCONN",
        8 => "CLUSRCVR",
        9 => "CLUSSDR",
        _ => return None,
    })
}

fn channel_status(code: i64) -> Option<&'static str> {
    Some(match code {
        0 => "INACTIVE",
        1 => "BINDING",
        2 => "STARTING",
        3 => "RUNNING",
        4 => "STOPPING",
        5 => "RETRYING",
        6 => "STOPPED",
        7 => "REQUESTING",
        8 => "PAUSED",
        9 => "DISCONNECTED",
        13 => "INITIALIZING",
        14 => "SWITCHING",
        _ => return None,
    })
}

fn channel_sub_state(code: i64) -> Option<&'static str> {
    Some(match code {
        0 => "OTHER",
        100 => "END_OF_BATCH",
        200 => "SENDING",
        300 => "RECEIVING",
        400 => "SERIALIZING",
        500 => "RESYNCHING",
        600 => "HEARTBEATING",
        700 => "SCYEXIT",
        800 => "RCVEXIT",
        900 => "SENDEXIT",
        1000 => "MSGEXIT",
        1100 => "MREXIT",
        1200 => "CHADEXIT",
        1250 => "NET_CONNECTING",
        1300 => "HANDSHAKING",
        1400 => "NAME_SERVER",
        1500 => "IN_MQPUT",
        1600 => "IN_MQGET",
        1700 => "IN_MQI_CALL",
        1800 => "COMPRESSING",
        _ => return None,
    })
}

fn subscription_type(code: i64) -> Option<&'static str> {
    Some(match code {
        1 => "API",
        2 => "ADMIN",
        3 => "PROXY",
        _ => return None,
    })
}

fn reason_code(code: i64) -> Option<&'static str> {
    Some(match code {
        2035 => "NOT_AUTHORIZED",
        2085 => "UNKNOWN_OBJECT_NAME",
        2161 => "Q_MGR_QUIESCING",
        2162 => "Q_MGR_STOPPING",
        2224 => "Q_DEPTH_HIGH",
        2225 => "Q_DEPTH_LOW",
        2226 => "Q_FULL",
        2227 => "Q_SERVICE_INTERVAL_HIGH",
        2228 => "Q_SERVICE_INTERVAL_OK",
        2279 => "CHANNEL_STOPPED_BY_USER",
        _ => return None,
    })
}

fn reason_qualifier(code: i64) -> Option<&'static str> {
    Some(match code {
        1 => "CONN_NOT_AUTHORIZED",
        2 => "OPEN_NOT_AUTHORIZED",
        3 => "CLOSE_NOT_AUTHORIZED",
        4 => "CMD_NOT_AUTHORIZED",
        5 => "Q_MGR_STOPPING",
        6 => "Q_MGR_QUIESCING",
        7 => "CHANNEL_STOPPED_OK",
        8 => "CHANNEL_STOPPED_ERROR",
        9 => "CHANNEL_STOPPED_RETRY",
        10 => "CHANNEL_STOPPED_DISABLED",
        _ => return None,
    })
}
