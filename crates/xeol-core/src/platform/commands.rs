//! Workflow command formatting
//!
//! The runner interprets stdout lines of the form `::name key=value::data`.

/// Escape command data (`%`, `\r`, `\n`)
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape a command property value (data escapes plus `:` and `,`)
pub fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

/// Render a workflow command line
pub fn format_command(command: &str, properties: &[(&str, &str)], message: &str) -> String {
    let mut line = format!("::{}", command);

    let properties: Vec<String> = properties
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{}={}", key, escape_property(value)))
        .collect();
    if !properties.is_empty() {
        line.push(' ');
        line.push_str(&properties.join(","));
    }

    line.push_str("::");
    line.push_str(&escape_data(message));
    line
}
