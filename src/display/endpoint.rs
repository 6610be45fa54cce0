//! Endpoint policy display formatting

use crate::transport::EndpointPolicy;

/// Format the endpoint policy as a table
pub fn format_endpoint_policy(policy: &EndpointPolicy) -> String {
    let path_width = policy
        .overrides()
        .map(|(path, _)| path.len())
        .max()
        .unwrap_or(4)
        .max("(default)".len());

    let mut output = String::new();
    output.push_str(&format!(
        "{:<path_width$}  {:<10}  {:<10}\n",
        "Path",
        "Request",
        "Response",
        path_width = path_width,
    ));
    output.push_str(&format!(
        "{:-<path_width$}  {:-<10}  {:-<10}\n",
        "",
        "",
        "",
        path_width = path_width,
    ));

    output.push_str(&format!(
        "{:<path_width$}  {:<10}  {:<10}\n",
        "(default)",
        policy.default.request.to_string(),
        policy.default.response.to_string(),
        path_width = path_width,
    ));

    for (path, modes) in policy.overrides() {
        output.push_str(&format!(
            "{:<path_width$}  {:<10}  {:<10}\n",
            path,
            modes.request.to_string(),
            modes.response.to_string(),
            path_width = path_width,
        ));
    }

    if policy.override_count() == 0 {
        output.push_str("\nNo endpoint overrides configured.\n");
    }

    output
}
