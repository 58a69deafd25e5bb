//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# nyai configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[session]
# model = "gpt-4o-mini"  # required here or per call (--model)
# system = "You are a helpful assistant."
# remember = true        # append each exchange to the history

[provider]
# base_url = "https://api.openai.com/v1"
# api_key_env = "OPENAI_API_KEY"   # env var holding the key
# organization = "org-..."
# connect_timeout_secs = 10        # 1-600
# timeout_secs = 120               # 1-600

[logging]
# level = "info"         # trace, debug, info, warn, error
"##
    .to_string()
}
