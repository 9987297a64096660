//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# hookchat configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[chat]
webhook_url = "http://localhost:5678/webhook/chat"
# initial_messages = ["Hi there!", "How can I help you today?"]
# load_previous_session = false
# enable_streaming = false
# chat_input_key = "chatInput"
# chat_session_key = "sessionId"
# session_storage_key = "hookchat-session-id"
# live_socket_url = "ws://localhost:5678/chat"
# request_timeout_secs = 60   # 1-600

[chat.webhook_config]
# method = "POST"             # GET, POST

[chat.webhook_config.headers]
# Authorization = "Bearer ..."

[chat.metadata]
# source = "terminal"

[storage]
# path = "/path/to/store.json"   # defaults to <data dir>/hookchat/store.json

[logging]
# level = "info"              # trace, debug, info, warn, error
"##
    .to_string()
}
