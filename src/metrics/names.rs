//! Attribute names and sample kinds shared across collectors.

// Common attributes attached to every record.
pub const PROVIDER: &str = "provider";
pub const IBM_PROVIDER: &str = "IBM";
pub const Q_MANAGER_NAME: &str = "qManagerName";
pub const Q_MANAGER_HOST: &str = "qManagerHost";
pub const OBJECT_ATTRIBUTE: &str = "object";

pub const NAME: &str = "name";
pub const ERROR: &str = "error";
pub const STATUS: &str = "status";

pub const Q_NAME: &str = "qName";
pub const TOPIC_NAME: &str = "topicName";

// Object kinds carried in the OBJECT_ATTRIBUTE field.
pub const OBJ_QUEUE: &str = "queue";
pub const OBJ_TOPIC: &str = "topic";
pub const OBJ_Q_MGR: &str = "QueueManager";
pub const OBJ_LISTENER: &str = "Listener";
pub const OBJ_CHANNEL: &str = "channel";
pub const OBJ_EVENT: &str = "event";
pub const OBJ_LOG: &str = "log";

// Sample kinds.
pub const MQ_QUEUE_SAMPLE: &str = "MQQueueSample";
pub const MQ_TOPIC_SAMPLE: &str = "MQTopicSample";
pub const MQ_CHANNEL_SAMPLE: &str = "MQChannelSample";
pub const MQ_OBJECT_STATUS_SAMPLE: &str = "MQObjectStatusSample";
pub const MQ_EVENT_SAMPLE: &str = "MQEventSample";

// Queue sample fields.
pub const Q_DEPTH: &str = "qDepth";
pub const Q_MAX_DEPTH: &str = "qDepthMax";
pub const Q_DEPTH_PERCENT: &str = "qDepthPercent";
pub const OPEN_INPUT_COUNT: &str = "openInputCount";
pub const OPEN_OUTPUT_COUNT: &str = "openOutputCount";
pub const HIGH_Q_DEPTH: &str = "highQDepth";
pub const MSG_DEQ_COUNT: &str = "msgDeqCount";
pub const MSG_ENQ_COUNT: &str = "msgEnqCount";
pub const TIME_SINCE_RESET: &str = "timeSinceReset";
pub const OLDEST_MSG_AGE: &str = "oldestMsgAge";
pub const UNCOMMITTED_MSGS: &str = "uncommittedMsgs";
pub const LAST_GET: &str = "lastGet";
pub const LAST_PUT: &str = "lastPut";

// Topic sample fields.
pub const DURABLE: &str = "durable";
pub const PUB_COUNT: &str = "pubCount";
pub const SUB_COUNT: &str = "subCount";
pub const SUB_ID: &str = "subId";
pub const SUB_USER_ID: &str = "subUserId";
pub const SUB_TYPE: &str = "subType";
pub const RESUME_DATE: &str = "resumeDate";
pub const RESUME_TIME: &str = "resumeTime";
pub const LAST_MESSAGE_DATE: &str = "lastMessageDate";
pub const LAST_MESSAGE_TIME: &str = "lastMessageTime";
pub const MESSAGE_COUNT: &str = "messageCount";
pub const CONNECTION_ID: &str = "connectionId";
pub const STATUS_TYPE: &str = "statusType";

// Channel sample fields.
pub const CHANNEL_NAME: &str = "channelName";
pub const CHANNEL_TYPE: &str = "channelType";
pub const CHANNEL_STATUS: &str = "channelStatus";
pub const CHANNEL_SUB_STATE: &str = "channelSubState";
pub const CONNECTION_NAME: &str = "connectionName";
pub const CHANNEL_START_DATE: &str = "channelStartDate";
pub const CHANNEL_START_TIME: &str = "channelStartTime";
pub const MSGS_COUNT: &str = "msgsCount";
pub const MSGS_RATE: &str = "msgsRate";
pub const BYTES_SENT_COUNT: &str = "bytesSentCount";
pub const BYTES_SENT_RATE: &str = "bytesSentRate";
pub const BYTES_REC_COUNT: &str = "bytesRecCount";
pub const BYTES_REC_RATE: &str = "bytesRecRate";
pub const BUFFERS_SENT_COUNT: &str = "buffersSentCount";
pub const BUFFERS_SENT_RATE: &str = "buffersSentRate";
pub const BUFFER_REC_COUNT: &str = "bufferRecCount";
pub const BUFFER_REC_RATE: &str = "bufferRecRate";

// Queue manager status fields.
pub const CHANNEL_INIT_STATUS: &str = "channelInitStatus";
pub const COMMAND_SERVER_STATUS: &str = "commandServerStatus";
pub const CONNECTION_COUNT: &str = "connectionCount";

// Event sample fields.
pub const QUEUE_MANAGER: &str = "queueManager";
pub const EVENT_QUEUE: &str = "eventQueue";
pub const PUT_TIME: &str = "putTime";
pub const REASON_CODE: &str = "reasonCode";
pub const REASON_QUALIFIER: &str = "reasonQualifier";
pub const DETAILS: &str = "details";
